//! BuglePlayer - firmware entry point
//!
//! 1. Bring up logging and peripherals
//! 2. Build the control loop over the panel, UART2 link and audio engine
//! 3. Tick forever, draining diagnostics to UART0 after every iteration
//!
//! Any peripheral init failure is fatal: it is logged and the chip restarts.

#[cfg(target_os = "espidf")]
mod firmware {
    use esp_idf_svc::hal::delay::FreeRtos;
    use esp_idf_svc::hal::gpio::IOPin;
    use esp_idf_svc::hal::peripherals::Peripherals;
    use esp_idf_svc::log::EspLogger;
    use esp_idf_svc::sys::{self, EspError};

    use bugle_player::hal::{self, DecoderEngine, PanelPins, UartLink};
    use bugle_player::logging::{LogLevel, LogStream};
    use bugle_player::{BoardConfig, ControlLoop, BUTTONS};

    /// Version string (set by build.rs, includes git hash)
    const VERSION: &str = env!("VERSION_STRING");

    /// How often dropped diagnostics are reported.
    const DROP_REPORT_MS: u32 = 10_000;

    static LOG_STREAM: LogStream = LogStream::new();

    pub fn run() -> ! {
        sys::link_patches();
        EspLogger::initialize_default();

        log::info!("{}", VERSION);
        log::info!("-------------------------");

        if let Err(e) = run_player() {
            log::error!("startup failed: {}", e);
        }

        FreeRtos::delay_ms(1000);
        // SAFETY: esp_restart never returns and has no preconditions
        unsafe { sys::esp_restart() };
        #[allow(unreachable_code)]
        loop {}
    }

    fn run_player() -> Result<(), EspError> {
        let config = BoardConfig::default();
        let peripherals = Peripherals::take()?;
        let pins = peripherals.pins;

        // Panel order must match BUTTONS
        let mut panel = PanelPins::new([
            pins.gpio5.downgrade(),
            pins.gpio18.downgrade(),
            pins.gpio23.downgrade(),
            pins.gpio13.downgrade(),
            pins.gpio33.downgrade(),
            pins.gpio27.downgrade(),
        ])?;
        for button in BUTTONS.iter() {
            log::info!("button {} on GPIO{}: {:?}", button.id, button.pin, button.role.trigger());
        }

        let mut link = UartLink::new(
            peripherals.uart2,
            pins.gpio22,
            pins.gpio21,
            config.link_baud_rate,
        )?;
        log::info!(
            "link: UART2 {} baud, rx=GPIO{} tx=GPIO{}",
            config.link_baud_rate,
            config.link_pins.rx,
            config.link_pins.tx
        );

        let mut engine = DecoderEngine::new(&config, &LOG_STREAM);
        engine.describe();

        let mut control = ControlLoop::with_debounce(&BUTTONS, &LOG_STREAM, config.debounce_ms);
        let mut last_drop_report = hal::now_ms();

        loop {
            let now = hal::now_ms();
            control.tick(now, &mut engine, &mut panel, &mut link);

            drain_diagnostics();

            if now.wrapping_sub(last_drop_report) > DROP_REPORT_MS {
                let dropped = LOG_STREAM.dropped();
                if dropped > 0 {
                    log::warn!("Dropped diagnostics: {}", dropped);
                    LOG_STREAM.reset_dropped();
                }
                last_drop_report = now;
            }

            // Let the idle task feed the watchdog
            FreeRtos::delay_ms(1);
        }
    }

    fn drain_diagnostics() {
        while let Some(entry) = LOG_STREAM.drain() {
            let ts = entry.timestamp_ms;
            let msg = entry.message();
            match entry.level {
                LogLevel::Error => log::error!("[{:10}] {}", ts, msg),
                LogLevel::Warn => log::warn!("[{:10}] {}", ts, msg),
                LogLevel::Info => log::info!("[{:10}] {}", ts, msg),
                LogLevel::Debug => log::debug!("[{:10}] {}", ts, msg),
            }
        }
    }
}

#[cfg(target_os = "espidf")]
fn main() {
    firmware::run();
}

#[cfg(not(target_os = "espidf"))]
fn main() {
    eprintln!("player: firmware image for ESP32 targets; the host build only runs tests");
}
