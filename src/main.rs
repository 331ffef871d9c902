// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

#![cfg_attr(target_os = "none", no_std, no_main)]

// Host builds only exist so `cargo test` can build the whole package.
#[cfg(not(target_os = "none"))]
fn main() {}

#[cfg(target_os = "none")]
mod board {
    use core::cell::RefCell;

    use cortex_m::peripheral::NVIC;
    use cortex_m_rt::entry;
    use critical_section::Mutex;
    use defmt_rtt as _;
    use panic_halt as _;

    use hal::{
        pac::{self, interrupt, Interrupt, TIM2, USART1},
        prelude::*,
        serial::{Config, Event as SerialEvent, Rx, Serial},
    };
    use stm32f7xx_hal as hal;

    use rover_drive::{
        config::RX_BUFFER_LEN,
        drivers::{vnh7040, DriveBank, Vnh7040},
        hw::{usart, BoardPins, Led, SerialTx, TickTimer},
        queue::SafeByteChannel,
        tick::TickFlag,
        DriveConfig, Firmware,
    };

    static TICK: TickFlag = TickFlag::new();
    static RX: SafeByteChannel<RX_BUFFER_LEN> = SafeByteChannel::new();

    // Handed to the interrupt handlers once at startup.
    static G_TIMER: Mutex<RefCell<Option<TickTimer<TIM2>>>> = Mutex::new(RefCell::new(None));
    static G_RX: Mutex<RefCell<Option<Rx<USART1>>>> = Mutex::new(RefCell::new(None));

    #[interrupt]
    fn TIM2() {
        static mut TIMER: Option<TickTimer<TIM2>> = None;

        if TIMER.is_none() {
            *TIMER = critical_section::with(|cs| G_TIMER.borrow_ref_mut(cs).take());
        }
        if let Some(timer) = TIMER {
            timer.on_interrupt(&TICK);
        }
    }

    #[interrupt]
    fn USART1() {
        static mut SERIAL_RX: Option<Rx<USART1>> = None;

        if SERIAL_RX.is_none() {
            *SERIAL_RX = critical_section::with(|cs| G_RX.borrow_ref_mut(cs).take());
        }
        if let Some(rx) = SERIAL_RX {
            usart::receive(rx, &RX);
        }
    }

    #[entry]
    fn main() -> ! {
        // Peripherals
        let dp = pac::Peripherals::take().unwrap();

        // Clocks
        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.freeze();

        // GPIO
        let pins = BoardPins::new(dp.GPIOA, dp.GPIOD, dp.GPIOE, dp.GPIOF);
        let mut diag = pins.diag;
        vnh7040::configure_diagnostics(&mut diag.sense_enable, &mut diag.sel1);

        // TIM4 PWM, one channel per bridge
        let pwm_pins = (pins.pwm.ch1, pins.pwm.ch2, pins.pwm.ch3, pins.pwm.ch4);
        let (pwm0, pwm1, pwm2, pwm3) = dp.TIM4.pwm_hz(pwm_pins, 20.kHz(), &clocks).split();

        let bank = DriveBank::new(
            Vnh7040::new(pins.m0.ina, pins.m0.inb, pwm0),
            Vnh7040::new(pins.m1.ina, pins.m1.inb, pwm1),
            Vnh7040::new(pins.m2.ina, pins.m2.inb, pwm2),
            Vnh7040::new(pins.m3.ina, pins.m3.inb, pwm3),
        );
        let led = Led::active_low(pins.led);

        let config = DriveConfig::default();
        let mut fw = Firmware::new(&config, bank, led).unwrap();

        // USART1 (host link)
        let usart_cfg = Config {
            baud_rate: 115_200.bps(),
            ..Default::default()
        };
        let mut serial = Serial::new(dp.USART1, (pins.usart1.tx, pins.usart1.rx), &clocks, usart_cfg);
        serial.listen(SerialEvent::Rxne);
        let (tx, rx) = serial.split();
        let mut link = SerialTx::new(tx);

        // Control tick
        let timer = TickTimer::start(dp.TIM2, &clocks);

        critical_section::with(|cs| {
            *G_RX.borrow_ref_mut(cs) = Some(rx);
            *G_TIMER.borrow_ref_mut(cs) = Some(timer);
        });

        // Interrupts start only after everything above is in place.
        unsafe {
            NVIC::unmask(Interrupt::USART1);
            NVIC::unmask(Interrupt::TIM2);
        }

        defmt::info!("rover drive running");

        loop {
            fw.poll(&TICK, &RX);
            link.service(fw.tx_mut());
        }
    }
}
