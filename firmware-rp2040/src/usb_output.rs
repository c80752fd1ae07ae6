//! USB HID report sink shared by both gamepads.
//!
//! Both players are exposed through a single HID interface whose report
//! descriptor declares two gamepad collections, one per report ID. Every
//! report written here is therefore prefixed by the player's report ID.

use dual_gamepad_core::{OutputError, Player, PlayerReport, ReportSink};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::{
    Config, HidBootProtocol, HidSubclass, HidWriter, ReportId, RequestHandler, State,
};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::EndpointError;
use embassy_usb::Builder;

use crate::config::{HID_POLL_MS, REPORT_DESCRIPTOR};

/// Largest report written, report ID included.
pub const MAX_REPORT_SIZE: usize = 8;

/// HID writer type used by the firmware.
pub type GamepadHidWriter<'d> = HidWriter<'d, Driver<'d, USB>, MAX_REPORT_SIZE>;

const _: () = assert!(PlayerReport::INPUT_REPORT_SIZE <= MAX_REPORT_SIZE);

#[inline]
fn endpoint_error_to_output_error(e: EndpointError) -> OutputError {
    match e {
        EndpointError::Disabled => OutputError::Disabled,
        EndpointError::BufferOverflow => OutputError::Io,
    }
}

/// [`ReportSink`] writing to the HID interrupt IN endpoint.
pub struct UsbReportSink<'d> {
    writer: GamepadHidWriter<'d>,
    ready: bool,
}

impl<'d> UsbReportSink<'d> {
    /// Create a new sink from the given HID writer.
    pub fn new(writer: GamepadHidWriter<'d>) -> Self {
        Self {
            writer,
            ready: false,
        }
    }
}

impl<'d> ReportSink for UsbReportSink<'d> {
    fn is_ready(&self) -> bool {
        self.ready
    }

    async fn wait_ready(&mut self) {
        if !self.ready {
            self.writer.ready().await;
            self.ready = true;
        }
    }

    async fn send(&mut self, player: Player, report: &PlayerReport) -> Result<(), OutputError> {
        // Waits for the previous report to leave the endpoint.
        let result = self
            .writer
            .write(&report.to_input_report(player))
            .await
            .map_err(endpoint_error_to_output_error);
        if result == Err(OutputError::Disabled) {
            // Unplugged or reset; wait for re-enumeration before the next send.
            self.ready = false;
        }
        result
    }
}

/// HID request handler (handles SET_REPORT, etc.).
///
/// The gamepads have no output or feature reports; GET_REPORT is left
/// unanswered and SET_REPORT / SET_IDLE are accepted and ignored.
pub struct GamepadRequestHandler;

impl RequestHandler for GamepadRequestHandler {
    fn get_report(&mut self, _id: ReportId, _buf: &mut [u8]) -> Option<usize> {
        None
    }

    fn set_report(&mut self, _id: ReportId, _data: &[u8]) -> OutResponse {
        OutResponse::Accepted
    }

    fn set_idle_ms(&mut self, _id: Option<ReportId>, _duration_ms: u32) {}

    fn get_idle_ms(&mut self, _id: Option<ReportId>) -> Option<u32> {
        None
    }
}

/// Configure the HID class in the USB builder.
///
/// Returns the HID writer for use by the application.
pub fn configure_usb_hid<'d>(
    builder: &mut Builder<'d, Driver<'d, USB>>,
    state: &'d mut State<'d>,
    request_handler: &'d mut GamepadRequestHandler,
) -> GamepadHidWriter<'d> {
    let config = Config {
        report_descriptor: &REPORT_DESCRIPTOR,
        request_handler: Some(request_handler),
        poll_ms: HID_POLL_MS,
        max_packet_size: MAX_REPORT_SIZE as u16,
        hid_subclass: HidSubclass::No,
        hid_boot_protocol: HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}
