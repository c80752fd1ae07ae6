#![no_std]
#![no_main]

use defmt::{info, warn};
use defmt_rtt as _;
use dual_gamepad_rp2040::config::{
    LAYOUT, PICO_USABLE_PINS, USB_MANUFACTURER, USB_MAX_POWER_MA, USB_PID, USB_PRODUCT,
    USB_SERIAL, USB_VID,
};
use dual_gamepad_rp2040::{
    configure_usb_hid, EmbassyClock, FirmwareDriver, FirmwareHost, FirmwareIndicator,
    GamepadDriver, GamepadRequestHandler, GpioPins, ReportSink, UsbReportSink, UsbStatus,
    UsbStatusHandler,
};
use embassy_executor::Spawner;
use embassy_futures::select::{select, Either};
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Bus state shared by the USB and gamepad tasks.
static USB_STATUS: UsbStatus = UsbStatus::new();

/// USB device configuration buffer.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();
static HID_REQUEST_HANDLER: StaticCell<GamepadRequestHandler> = StaticCell::new();

static USB_HANDLER: StaticCell<UsbStatusHandler> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dual gamepad starting, layout {}", LAYOUT.name);

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let map = match LAYOUT.validate(PICO_USABLE_PINS) {
        Ok(map) => map,
        Err(e) => defmt::panic!("Invalid pin layout {}: {}", LAYOUT.name, e),
    };

    // --- GPIO Setup ---
    // SAFETY: the validated layout only uses broken-out pins, none of which
    // is claimed anywhere else in this firmware.
    let pins = unsafe { GpioPins::new(&map) };

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(USB_VID, USB_PID);
    usb_config.manufacturer = Some(USB_MANUFACTURER);
    usb_config.product = Some(USB_PRODUCT);
    usb_config.serial_number = Some(USB_SERIAL);
    usb_config.max_power = USB_MAX_POWER_MA;
    usb_config.max_packet_size_0 = 64;
    usb_config.supports_remote_wakeup = cfg!(feature = "remote-wakeup");

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    builder.handler(USB_HANDLER.init(UsbStatusHandler::new(&USB_STATUS)));

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let request_handler = HID_REQUEST_HANDLER.init(GamepadRequestHandler);
    let hid_writer = configure_usb_hid(&mut builder, hid_state, request_handler);

    // Build the USB device
    let usb_device = builder.build();

    // --- Driver ---
    #[cfg(feature = "remote-wakeup")]
    let host: FirmwareHost = &USB_STATUS;
    #[cfg(not(feature = "remote-wakeup"))]
    let host: FirmwareHost = ();

    #[cfg(feature = "led-status")]
    let indicator: FirmwareIndicator = dual_gamepad_rp2040::LedIndicator::new(
        embassy_rp::gpio::Output::new(p.PIN_25, embassy_rp::gpio::Level::Low),
    );
    #[cfg(not(feature = "led-status"))]
    let indicator: FirmwareIndicator = ();

    let driver = GamepadDriver::new(pins, EmbassyClock, map, UsbReportSink::new(hid_writer))
        .with_host(host)
        .with_indicator(indicator);

    // Spawn tasks (unwrap the SpawnToken, then spawn)
    spawner.spawn(usb_task(usb_device, &USB_STATUS).unwrap());
    spawner.spawn(gamepad_task(driver).unwrap());

    info!("Dual gamepad initialized, waiting for USB...");
}

/// USB device task - runs the USB stack and performs remote wakeup.
#[embassy_executor::task]
async fn usb_task(mut device: UsbDevice<'static, Driver<'static, USB>>, status: &'static UsbStatus) {
    loop {
        device.run_until_suspend().await;
        match select(device.wait_resume(), status.wait_wake_request()).await {
            Either::First(()) => {
                // Resumed by the host; drop any request that raced it.
                status.clear_wake_request();
            }
            Either::Second(()) => {
                info!("Sending remote wakeup");
                if let Err(e) = device.remote_wakeup().await {
                    warn!("Remote wakeup failed: {:?}", e);
                }
            }
        }
    }
}

/// Gamepad task - samples, debounces and sends reports forever.
#[embassy_executor::task]
async fn gamepad_task(mut driver: FirmwareDriver) {
    // Wait for USB to be ready
    driver.sink_mut().wait_ready().await;
    info!("USB HID ready, polling inputs...");

    driver.run().await
}
