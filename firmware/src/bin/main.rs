#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{info, warn};
use defmt_rtt as _;
use embassy_embedded_hal::shared_bus::blocking::i2c::I2cDevice;
use embassy_executor::{Executor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Flex, Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_rp::peripherals::{I2C0, PIN_25, PIN_28, PIN_8, PIN_9, USB};
use embassy_rp::usb::Driver;
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::NoopMutex;
use embassy_time::Timer;
use static_cell::StaticCell;

use crossbox_core::{
    bootstrap, display_state_for, wants_firmware_update, BackendSelection, BackendSet,
    CommunicationBackend, DefaultMode, InputSnapshot, InputSource, ReadyGate, ReportLoop,
    SharedRuntime, StatusLoop,
};
use crossbox_modes::ActiveMode;
use crossbox_rp2040::backends::{
    Backend, DInputBackend, GamecubeBackend, N64Backend, SwitchBackend, ViewerBackend,
    XInputBackend,
};
use crossbox_rp2040::joybus::{self, JoybusPort};
use crossbox_rp2040::usb::{self, UsbKeyboard};
use crossbox_rp2040::{config, GpioButtonInput, ModeSelector, NunchukInput, OledStatus};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

static mut CORE1_STACK: Stack<4096> = Stack::new();
static EXECUTOR0: StaticCell<Executor> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// The primary backend's live snapshot, shared by both cores.
static SNAPSHOT: InputSnapshot = InputSnapshot::new();

/// Readiness gate: published by the boot task as its last action; core
/// 1 does no work before it observes the publish.
static RUNTIME: ReadyGate<SharedRuntime> = ReadyGate::new();

#[cortex_m_rt::entry]
fn main() -> ! {
    info!("crossbox starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // Core 1 owns the display/Nunchuk bus; it brings the bus up itself
    // once the readiness gate opens.
    let (i2c_peripheral, i2c_scl, i2c_sda) = (p.I2C0, p.PIN_9, p.PIN_8);

    spawn_core1(
        p.CORE1,
        unsafe { &mut *core::ptr::addr_of_mut!(CORE1_STACK) },
        move || {
            let executor1 = EXECUTOR1.init(Executor::new());
            executor1.run(|spawner| {
                spawner.spawn(status_task(i2c_peripheral, i2c_scl, i2c_sda).unwrap());
            });
        },
    );

    // GPIO matrix, in config::BUTTON_MAP order.
    let buttons = [
        Input::new(p.PIN_5, Pull::Up),  // L
        Input::new(p.PIN_4, Pull::Up),  // Left
        Input::new(p.PIN_3, Pull::Up),  // Down
        Input::new(p.PIN_2, Pull::Up),  // Right
        Input::new(p.PIN_6, Pull::Up),  // Mod X
        Input::new(p.PIN_7, Pull::Up),  // Mod Y
        Input::new(p.PIN_10, Pull::Up), // Select
        Input::new(p.PIN_0, Pull::Up),  // Start
        Input::new(p.PIN_11, Pull::Up), // Home
        Input::new(p.PIN_13, Pull::Up), // C-Left
        Input::new(p.PIN_12, Pull::Up), // C-Up
        Input::new(p.PIN_15, Pull::Up), // C-Down
        Input::new(p.PIN_14, Pull::Up), // A
        Input::new(p.PIN_16, Pull::Up), // C-Right
        Input::new(p.PIN_26, Pull::Up), // B
        Input::new(p.PIN_21, Pull::Up), // X
        Input::new(p.PIN_19, Pull::Up), // Z
        Input::new(p.PIN_17, Pull::Up), // Up
        Input::new(p.PIN_27, Pull::Up), // R
        Input::new(p.PIN_22, Pull::Up), // Y
        Input::new(p.PIN_20, Pull::Up), // Light-shield
        Input::new(p.PIN_18, Pull::Up), // Mid-shield
    ];
    let gpio = GpioButtonInput::new(buttons, &config::BUTTON_MAP);

    let executor0 = EXECUTOR0.init(Executor::new());
    executor0.run(|spawner| {
        spawner.spawn(boot_task(spawner, gpio, p.PIN_28, p.PIN_25, p.USB).unwrap());
    });
}

/// Core 0: bootstrap, then the report loop.
#[embassy_executor::task]
async fn boot_task(
    spawner: Spawner,
    mut gpio: GpioButtonInput,
    joybus_pin: Peri<'static, PIN_28>,
    led_pin: Peri<'static, PIN_25>,
    usb_peripheral: Peri<'static, USB>,
) {
    // Read the power-on holds before any other side effect.
    let _ = gpio.refresh(&SNAPSHOT).await;
    let held = SNAPSHOT.capture();

    // Firmware-update interlock, checked first: later steps allocate
    // resources that would otherwise block recovery.
    if wants_firmware_update(held) {
        embassy_rp::rom_data::reset_to_usb_boot(0, 0);
        // The ROM takes over; this is never reached.
        loop {
            cortex_m::asm::wfe();
        }
    }

    // Boot indicator.
    let mut led = Output::new(led_pin, Level::Low);
    led.set_high();

    // One-shot console probe; a timeout resolves to "no console".
    let mut joybus_line = Flex::new(joybus_pin);
    let console = joybus::detect_console(&mut joybus_line).await;
    info!("detected console: {}", console);

    let plan = bootstrap::plan(held, console);

    let (mut backends, keyboard) = match plan.backend {
        BackendSelection::GamecubeJoybus => {
            let port = JoybusPort::new(joybus_line);
            let primary = Backend::Gamecube(GamecubeBackend::new(gpio, &SNAPSHOT, port));
            (BackendSet::single(primary), None)
        }
        BackendSelection::N64Joybus => {
            let port = JoybusPort::new(joybus_line);
            let primary = Backend::N64(N64Backend::new(gpio, &SNAPSHOT, port));
            (BackendSet::single(primary), None)
        }
        selection => {
            let driver = Driver::new(usb_peripheral, Irqs);
            let parts = usb::build(driver, selection, plan.with_viewer);
            spawner.spawn(usb_task(parts.device).unwrap());

            let primary = match selection {
                BackendSelection::SwitchUsb => {
                    Backend::Switch(SwitchBackend::new(gpio, &SNAPSHOT, parts.gamepad))
                }
                BackendSelection::DInputUsb => {
                    Backend::DInput(DInputBackend::new(gpio, &SNAPSHOT, parts.gamepad))
                }
                _ => Backend::XInput(XInputBackend::new(gpio, &SNAPSHOT, parts.gamepad)),
            };
            let set = match parts.viewer {
                Some(sender) => BackendSet::with_viewer(
                    primary,
                    Backend::Viewer(ViewerBackend::new(&SNAPSHOT, sender)),
                ),
                None => BackendSet::single(primary),
            };
            (set, parts.keyboard)
        }
    };

    match plan.default_mode {
        DefaultMode::Melee => backends.primary_mut().set_mode(ActiveMode::default_melee()),
        DefaultMode::Ultimate => backends
            .primary_mut()
            .set_mode(ActiveMode::default_ultimate()),
    }

    let mut report_loop: ReportLoop<Backend, ModeSelector, UsbKeyboard> =
        ReportLoop::new(backends, ModeSelector::new(keyboard));

    // Publish as the last bootstrap action; core 1 is spinning on this
    // and may read shared state the moment it lands.
    RUNTIME.publish(SharedRuntime {
        snapshot: &SNAPSHOT,
        display: display_state_for(&plan),
    });
    info!(
        "bootstrap complete: {} backend(s)",
        report_loop.backends().len()
    );

    report_loop.run().await
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Core 1: wait for bootstrap, then run the status loop.
#[embassy_executor::task]
async fn status_task(
    i2c_peripheral: Peri<'static, I2C0>,
    scl: Peri<'static, PIN_9>,
    sda: Peri<'static, PIN_8>,
) {
    // Spin until the boot task publishes; no setup, not even the bus,
    // happens before the gate is observed set.
    let runtime = RUNTIME.wait();
    info!("core 1: shared runtime ready");

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config::I2C_HZ;
    let i2c = I2c::new_blocking(i2c_peripheral, scl, sda, i2c_config);

    let bus = NoopMutex::new(RefCell::new(i2c));
    let nunchuk = NunchukInput::new(I2cDevice::new(&bus));

    match OledStatus::new(I2cDevice::new(&bus), &config::DISPLAY_LAYOUT) {
        Ok(surface) => {
            let mut status =
                StatusLoop::new(Some(nunchuk), surface, runtime.snapshot, runtime.display);
            loop {
                if status.cycle().await.is_err() {
                    warn!("core 1: display write failed");
                }
            }
        }
        Err(_) => {
            // No display fitted; keep the Nunchuk contribution alive.
            warn!("core 1: display init failed, polling nunchuk only");
            let mut nunchuk = nunchuk;
            loop {
                let _ = nunchuk.refresh(runtime.snapshot).await;
                Timer::after_millis(5).await;
            }
        }
    }
}
