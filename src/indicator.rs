//! Advertising indicator LED.
//!
//! While advertising the LED is lit and, on profiles that blink, toggled
//! by a repeating timer. When advertising stops the timer is cancelled and
//! the LED is forced to a steady level so it never freezes mid-blink.
//!
//! The LED is active-low (nRF52840-DK): driving the pin low lights it.

use embedded_hal::digital::StatefulOutputPin;

use crate::config::BLINK_PERIOD_MS;
use crate::error::{Error, TimerError};

/// Repeating timer that drives the blink.
///
/// Each expiry must be delivered back as [`Indicator::on_tick`].
pub trait PeriodicTimer {
    fn start(&mut self, period_ms: u32) -> Result<(), TimerError>;
    fn stop(&mut self) -> Result<(), TimerError>;
}

pub struct Indicator<P, T> {
    led: P,
    timer: T,
    blink: bool,
    running: bool,
}

impl<P, T> Indicator<P, T>
where
    P: StatefulOutputPin,
    T: PeriodicTimer,
{
    pub fn new(led: P, timer: T, blink: bool) -> Self {
        Self {
            led,
            timer,
            blink,
            running: false,
        }
    }

    /// Whether the blink timer is running.
    pub fn is_blinking(&self) -> bool {
        self.running
    }

    /// Show that advertising is active.
    pub fn show_advertising(&mut self) -> Result<(), Error> {
        self.led.set_low().map_err(|_| Error::Indicator)?;
        if self.blink && !self.running {
            self.timer.start(BLINK_PERIOD_MS)?;
            self.running = true;
        }
        Ok(())
    }

    /// Show that advertising has stopped.
    pub fn show_stopped(&mut self) -> Result<(), Error> {
        if self.running {
            self.timer.stop()?;
            self.running = false;
        }
        self.led.set_high().map_err(|_| Error::Indicator)
    }

    /// Timer expiry. Ticks that arrive after the timer was stopped are ignored.
    pub fn on_tick(&mut self) -> Result<(), Error> {
        if self.running {
            self.led.toggle().map_err(|_| Error::Indicator)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

    use super::PeriodicTimer;
    use crate::error::TimerError;

    #[derive(Default, Debug)]
    pub struct PinLog {
        pub high: bool,
        pub toggles: usize,
    }

    /// Output pin whose state stays observable after it is moved away.
    #[derive(Clone, Default)]
    pub struct FakePin(pub Rc<RefCell<PinLog>>);

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            let mut log = self.0.borrow_mut();
            log.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            let mut log = self.0.borrow_mut();
            log.high = true;
            Ok(())
        }
    }

    impl StatefulOutputPin for FakePin {
        fn is_set_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0.borrow().high)
        }

        fn is_set_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0.borrow().high)
        }

        fn toggle(&mut self) -> Result<(), Infallible> {
            let mut log = self.0.borrow_mut();
            log.high = !log.high;
            log.toggles += 1;
            Ok(())
        }
    }

    #[derive(Default, Debug)]
    pub struct TimerLog {
        pub period_ms: Option<u32>,
        pub starts: usize,
        pub stops: usize,
    }

    #[derive(Clone, Default)]
    pub struct FakeTimer(pub Rc<RefCell<TimerLog>>);

    impl PeriodicTimer for FakeTimer {
        fn start(&mut self, period_ms: u32) -> Result<(), TimerError> {
            let mut log = self.0.borrow_mut();
            log.period_ms = Some(period_ms);
            log.starts += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<(), TimerError> {
            let mut log = self.0.borrow_mut();
            log.period_ms = None;
            log.stops += 1;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fakes::{FakePin, FakeTimer};
    use super::*;

    fn blinking() -> (Indicator<FakePin, FakeTimer>, FakePin, FakeTimer) {
        let pin = FakePin::default();
        let timer = FakeTimer::default();
        (Indicator::new(pin.clone(), timer.clone(), true), pin, timer)
    }

    #[test]
    fn show_advertising_lights_led_and_starts_blink() {
        let (mut indicator, pin, timer) = blinking();
        indicator.show_advertising().unwrap();
        assert!(!pin.0.borrow().high);
        assert_eq!(timer.0.borrow().period_ms, Some(1000));
        assert!(indicator.is_blinking());
    }

    #[test]
    fn ticks_toggle_while_blinking() {
        let (mut indicator, pin, _timer) = blinking();
        indicator.show_advertising().unwrap();
        indicator.on_tick().unwrap();
        assert!(pin.0.borrow().high);
        indicator.on_tick().unwrap();
        assert!(!pin.0.borrow().high);
        assert_eq!(pin.0.borrow().toggles, 2);
    }

    #[test]
    fn stop_forces_steady_level_mid_blink() {
        let (mut indicator, pin, timer) = blinking();
        indicator.show_advertising().unwrap();
        indicator.on_tick().unwrap();
        indicator.on_tick().unwrap();
        assert!(!pin.0.borrow().high);
        indicator.show_stopped().unwrap();
        assert!(pin.0.borrow().high);
        assert_eq!(timer.0.borrow().stops, 1);
        assert!(!indicator.is_blinking());
    }

    #[test]
    fn stale_tick_after_stop_is_ignored() {
        let (mut indicator, pin, _timer) = blinking();
        indicator.show_advertising().unwrap();
        indicator.show_stopped().unwrap();
        indicator.on_tick().unwrap();
        assert!(pin.0.borrow().high);
        assert_eq!(pin.0.borrow().toggles, 0);
    }

    #[test]
    fn steady_profile_never_starts_timer() {
        let pin = FakePin::default();
        let timer = FakeTimer::default();
        let mut indicator = Indicator::new(pin.clone(), timer.clone(), false);
        indicator.show_advertising().unwrap();
        indicator.on_tick().unwrap();
        assert!(!pin.0.borrow().high);
        assert_eq!(pin.0.borrow().toggles, 0);
        indicator.show_stopped().unwrap();
        assert!(pin.0.borrow().high);
        assert_eq!(timer.0.borrow().starts, 0);
        assert_eq!(timer.0.borrow().stops, 0);
    }

    #[test]
    fn stop_without_start_only_drives_led() {
        let (mut indicator, pin, timer) = blinking();
        indicator.show_stopped().unwrap();
        assert!(pin.0.borrow().high);
        assert_eq!(timer.0.borrow().stops, 0);
    }
}
