//! Host power state and local status indication.

use core::future::Future;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use portable_atomic::{AtomicBool, Ordering};

/// The host side of the USB link, as far as suspend and wakeup go.
pub trait HostLink {
    /// Check if the host has suspended the bus.
    fn is_suspended(&self) -> bool;

    /// Ask the host to resume the bus (USB remote wakeup).
    ///
    /// The driver calls this once per wakeup, then awaits
    /// [`HostLink::wait_resume`].
    fn request_wake(&mut self);

    /// Wait until the bus is no longer suspended.
    fn wait_resume(&mut self) -> impl Future<Output = ()>;
}

/// A host that never suspends.
impl HostLink for () {
    fn is_suspended(&self) -> bool {
        false
    }

    fn request_wake(&mut self) {}

    async fn wait_resume(&mut self) {}
}

/// Bus suspend state shared between the USB stack and the polling loop.
///
/// The USB side reports bus events (`on_suspended`, `on_reset`) and serves
/// wake requests (`wait_wake_request`). The polling side uses a shared
/// reference as its [`HostLink`].
///
/// A bus reset counts as a resume: hosts commonly leave suspend that way,
/// and the stack does not report it as a resume event.
pub struct LinkState<M: RawMutex> {
    suspended: AtomicBool,
    resumed: Signal<M, ()>,
    wake: Signal<M, ()>,
}

impl<M: RawMutex> LinkState<M> {
    pub const fn new() -> Self {
        Self {
            suspended: AtomicBool::new(false),
            resumed: Signal::new(),
            wake: Signal::new(),
        }
    }

    #[inline]
    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::Relaxed)
    }

    /// The bus was suspended or resumed.
    pub fn on_suspended(&self, suspended: bool) {
        self.suspended.store(suspended, Ordering::Relaxed);
        if !suspended {
            self.resumed.signal(());
        }
    }

    /// The bus was reset (or the device enabled/disabled).
    ///
    /// Leaves suspend and drops any pending wake request.
    pub fn on_reset(&self) {
        self.on_suspended(false);
        self.clear_wake_request();
    }

    /// Ask the USB side to send a remote wakeup.
    pub fn request_wake(&self) {
        self.wake.signal(());
    }

    /// Check if a wake request is pending.
    pub fn wake_requested(&self) -> bool {
        self.wake.signaled()
    }

    /// Wait for a wake request from the polling side.
    pub async fn wait_wake_request(&self) {
        self.wake.wait().await
    }

    /// Drop a pending wake request.
    pub fn clear_wake_request(&self) {
        self.wake.reset();
    }

    /// Wait until the bus is not suspended.
    pub async fn wait_resume(&self) {
        // A stale resume signal only costs one extra check.
        while self.is_suspended() {
            self.resumed.wait().await;
        }
    }
}

impl<M: RawMutex> Default for LinkState<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> HostLink for &LinkState<M> {
    fn is_suspended(&self) -> bool {
        LinkState::is_suspended(*self)
    }

    fn request_wake(&mut self) {
        LinkState::request_wake(*self)
    }

    async fn wait_resume(&mut self) {
        LinkState::wait_resume(*self).await
    }
}

/// Local "input active" indicator, typically an LED.
pub trait StatusIndicator {
    fn set_active(&mut self, active: bool);
}

/// No indicator.
impl StatusIndicator for () {
    fn set_active(&mut self, _active: bool) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::pin::pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    type Link = LinkState<NoopRawMutex>;

    fn noop_waker() -> Waker {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }
        unsafe { Waker::from_raw(noop_raw_waker()) }
    }

    // Poll a future once
    fn poll_once<F: Future>(f: core::pin::Pin<&mut F>) -> Poll<F::Output> {
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        f.poll(&mut cx)
    }

    #[test]
    fn test_suspend_and_resume() {
        let link = Link::new();
        assert!(!link.is_suspended());
        link.on_suspended(true);
        assert!(link.is_suspended());

        let mut resume = pin!(link.wait_resume());
        assert!(poll_once(resume.as_mut()).is_pending());

        link.on_suspended(false);
        assert!(poll_once(resume.as_mut()).is_ready());
    }

    #[test]
    fn test_wait_resume_ready_when_active() {
        let link = Link::new();
        assert!(poll_once(pin!(link.wait_resume())).is_ready());
    }

    #[test]
    fn test_bus_reset_resumes() {
        let link = Link::new();
        link.on_suspended(true);
        link.request_wake();

        let mut resume = pin!(link.wait_resume());
        assert!(poll_once(resume.as_mut()).is_pending());

        link.on_reset();
        assert!(!link.is_suspended());
        assert!(poll_once(resume.as_mut()).is_ready());
    }

    #[test]
    fn test_bus_reset_drops_wake_request() {
        let link = Link::new();
        link.on_suspended(true);
        link.request_wake();
        assert!(link.wake_requested());

        link.on_reset();
        assert!(!link.wake_requested());

        // The next suspend does not see a stale request.
        link.on_suspended(true);
        assert!(poll_once(pin!(link.wait_wake_request())).is_pending());
    }

    #[test]
    fn test_wake_request_delivered() {
        let link = Link::new();
        link.on_suspended(true);

        let mut host = &link;
        assert!(HostLink::is_suspended(&host));
        HostLink::request_wake(&mut host);
        assert!(poll_once(pin!(link.wait_wake_request())).is_ready());
        assert!(!link.wake_requested());
    }

    #[test]
    fn test_clear_wake_request() {
        let link = Link::new();
        link.request_wake();
        link.clear_wake_request();
        assert!(!link.wake_requested());
    }
}
