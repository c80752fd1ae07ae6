//! Report sink trait and error types.

use core::future::Future;

use crate::report::PlayerReport;
use crate::types::Player;

/// Error type for output operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
    /// Endpoint disabled (e.g., cable unplugged or device reset).
    Disabled,
}

impl core::fmt::Display for OutputError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OutputError::Io => write!(f, "I/O error"),
            OutputError::NotReady => write!(f, "sink not ready"),
            OutputError::Disabled => write!(f, "endpoint disabled"),
        }
    }
}

/// Async trait for the HID report transport shared by both players.
///
/// Reports are sent one at a time; there is a single sender, so
/// implementations need no locking.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Check if the sink can accept a report right now.
    fn is_ready(&self) -> bool;

    /// Wait until the sink can accept a report.
    ///
    /// There is no timeout: if the sink never becomes ready, this never
    /// completes.
    fn wait_ready(&mut self) -> impl Future<Output = ()>;

    /// Send `report` tagged with `player`'s report ID.
    fn send(
        &mut self,
        player: Player,
        report: &PlayerReport,
    ) -> impl Future<Output = Result<(), OutputError>>;
}
