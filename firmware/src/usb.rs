//! USB device construction for the USB-attached backends.
//!
//! The device shape is decided at bootstrap: every USB path carries one
//! HID gamepad interface; the DInput path adds a HID keyboard for the
//! keyboard-emulation mode; the viewer rides along as a CDC-ACM
//! interface when the backend set has one.

use crossbox_core::{BackendSelection, Buttons, KeyboardMode, ReportError};
use crossbox_modes::keyboard;
use embassy_rp::peripherals::USB;
use embassy_usb::class::cdc_acm::{self, CdcAcmClass};
use embassy_usb::class::hid::{self, HidWriter};
use embassy_usb::{Builder, Config as UsbConfig, UsbDevice};
use static_cell::StaticCell;
use usbd_hid::descriptor::{KeyboardReport, SerializedDescriptor};

pub type UsbDriver = embassy_rp::usb::Driver<'static, USB>;
pub type GamepadWriter = HidWriter<'static, UsbDriver, 16>;
pub type ViewerSender = cdc_acm::Sender<'static, UsbDriver>;

/// Standard HID gamepad descriptor used by the DInput backend.
///
/// 16 buttons, two 8-bit stick pairs, two 8-bit triggers.
pub const DINPUT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x10, //   Usage Maximum (Button 16)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x95, 0x10, //   Report Count (16)
    0x75, 0x01, //   Report Size (1)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Left Stick ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x15, 0x81, //   Logical Minimum (-127)
    0x25, 0x7F, //   Logical Maximum (127)
    0x95, 0x02, //   Report Count (2)
    0x75, 0x08, //   Report Size (8)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- C-Stick ---
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Triggers ---
    0x09, 0x33, //   Usage (Rx)
    0x09, 0x34, //   Usage (Ry)
    0x15, 0x00, //   Logical Minimum (0)
    0x26, 0xFF, 0x00, //   Logical Maximum (255)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    0xC0, // End Collection
];

/// Xbox-style HID descriptor for the default XInput backend: full
/// 16-bit stick axes for better Windows game support.
pub const XINPUT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    0xA1, 0x00, //   Collection (Physical)
    //
    // --- Buttons (16 buttons) ---
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x10, //     Usage Maximum (Button 16)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x10, //     Report Count (16)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- Left Stick ---
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x01, 0x80, // Logical Minimum (-32767)
    0x26, 0xFF, 0x7F, // Logical Maximum (32767)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x10, //     Report Size (16)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- C-Stick ---
    0x09, 0x32, //     Usage (Z)
    0x09, 0x35, //     Usage (Rz)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    // --- Triggers ---
    0x09, 0x33, //     Usage (Rx)
    0x09, 0x34, //     Usage (Ry)
    0x15, 0x00, //     Logical Minimum (0)
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x08, //     Report Size (8)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    //
    0xC0, //   End Collection
    0xC0, // End Collection
];

/// HORIPAD-shaped descriptor the Switch accepts: 14 buttons, hat
/// switch, four 8-bit axes, one vendor padding byte.
pub const SWITCH_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x05, // Usage (Gamepad)
    0xA1, 0x01, // Collection (Application)
    //
    // --- Buttons (14 buttons + 2 bit padding) ---
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x35, 0x00, //   Physical Minimum (0)
    0x45, 0x01, //   Physical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x0E, //   Report Count (14)
    0x05, 0x09, //   Usage Page (Button)
    0x19, 0x01, //   Usage Minimum (Button 1)
    0x29, 0x0E, //   Usage Maximum (Button 14)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x02, //   Report Count (2)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Hat switch (4 bits + 4 bit padding) ---
    0x05, 0x01, //   Usage Page (Generic Desktop)
    0x25, 0x07, //   Logical Maximum (7)
    0x46, 0x3B, 0x01, // Physical Maximum (315)
    0x75, 0x04, //   Report Size (4)
    0x95, 0x01, //   Report Count (1)
    0x65, 0x14, //   Unit (Degrees)
    0x09, 0x39, //   Usage (Hat switch)
    0x81, 0x42, //   Input (Data, Variable, Absolute, Null State)
    0x65, 0x00, //   Unit (None)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x04, //   Report Size (4)
    0x81, 0x01, //   Input (Constant)
    //
    // --- Sticks (4 x 8-bit axes) ---
    0x26, 0xFF, 0x00, // Logical Maximum (255)
    0x46, 0xFF, 0x00, // Physical Maximum (255)
    0x09, 0x30, //   Usage (X)
    0x09, 0x31, //   Usage (Y)
    0x09, 0x32, //   Usage (Z)
    0x09, 0x35, //   Usage (Rz)
    0x75, 0x08, //   Report Size (8)
    0x95, 0x04, //   Report Count (4)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    //
    // --- Vendor padding byte ---
    0x75, 0x08, //   Report Size (8)
    0x95, 0x01, //   Report Count (1)
    0x81, 0x01, //   Input (Constant)
    //
    0xC0, // End Collection
];

/// Everything `build` hands back to the boot task.
pub struct UsbParts {
    pub device: UsbDevice<'static, UsbDriver>,
    pub gamepad: GamepadWriter,
    pub keyboard: Option<UsbKeyboard>,
    pub viewer: Option<ViewerSender>,
}

static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static GAMEPAD_HID_STATE: StaticCell<hid::State> = StaticCell::new();
static KEYBOARD_HID_STATE: StaticCell<hid::State> = StaticCell::new();
static CDC_STATE: StaticCell<cdc_acm::State> = StaticCell::new();

/// Build the USB device for the selected backend.
///
/// Called at most once, from bootstrap, before the gate is published.
pub fn build(driver: UsbDriver, selection: BackendSelection, with_viewer: bool) -> UsbParts {
    let (vid, pid, product, descriptor) = match selection {
        BackendSelection::SwitchUsb => (0x0F0D, 0x00C1, "HORIPAD S", SWITCH_DESCRIPTOR),
        BackendSelection::DInputUsb => (0x1209, 0x0302, "crossbox DInput", DINPUT_DESCRIPTOR),
        // Console selections never reach USB construction; default to
        // the XInput shape.
        _ => (0x1209, 0x0301, "crossbox", XINPUT_DESCRIPTOR),
    };

    let mut config = UsbConfig::new(vid, pid);
    config.manufacturer = Some("crossbox");
    config.product = Some(product);
    config.serial_number = Some("001");
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );

    let gamepad = configure_hid(&mut builder, GAMEPAD_HID_STATE.init(hid::State::new()), descriptor);

    let keyboard = match selection {
        BackendSelection::DInputUsb => {
            let writer = configure_hid(
                &mut builder,
                KEYBOARD_HID_STATE.init(hid::State::new()),
                KeyboardReport::desc(),
            );
            Some(UsbKeyboard::new(writer))
        }
        _ => None,
    };

    let viewer = if with_viewer {
        let class = CdcAcmClass::new(&mut builder, CDC_STATE.init(cdc_acm::State::new()), 64);
        let (sender, _receiver) = class.split();
        Some(sender)
    } else {
        None
    };

    UsbParts {
        device: builder.build(),
        gamepad,
        keyboard,
        viewer,
    }
}

fn configure_hid(
    builder: &mut Builder<'static, UsbDriver>,
    state: &'static mut hid::State<'static>,
    report_descriptor: &'static [u8],
) -> GamepadWriter {
    let config = hid::Config {
        report_descriptor,
        request_handler: None,
        poll_ms: 1,
        max_packet_size: 16,
        hid_subclass: hid::HidSubclass::No,
        hid_boot_protocol: hid::HidBootProtocol::None,
    };

    HidWriter::new(builder, state, config)
}

/// The keyboard-emulation report path, attached and detached by the
/// mode switcher.
pub struct UsbKeyboard {
    writer: GamepadWriter,
}

impl UsbKeyboard {
    #[must_use]
    pub fn new(writer: GamepadWriter) -> Self {
        Self { writer }
    }
}

impl KeyboardMode for UsbKeyboard {
    async fn send_report(&mut self, frame: Buttons) -> Result<(), ReportError> {
        let codes = keyboard::keycodes(frame);
        // Standard boot-shaped input report: modifier, reserved, 6KRO.
        let report = [
            0, 0, codes[0], codes[1], codes[2], codes[3], codes[4], codes[5],
        ];
        self.writer
            .write(&report)
            .await
            .map_err(|_| ReportError::Io)
    }
}
