//! Button event routing.
//!
//! Debounced press/release events arrive tagged with the physical button
//! and a monotonic timestamp. The router maps them onto advertising
//! commands according to the active [`ButtonLayout`], including the
//! long-press-to-stop gesture.

use crate::config::{ms_to_ticks, LONG_PRESS_MS};

/// Physical buttons (nRF52840-DK numbering).
///
/// The two-key variant's Key 0 / Key 1 are Button 1 / Button 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Button1,
    Button2,
    Button3,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    Press,
    Release,
}

/// Monotonic tick count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticks(pub u64);

impl Ticks {
    /// Ticks elapsed from `earlier` to `self`, tolerant of counter wrap.
    pub fn ticks_since(self, earlier: Ticks) -> u64 {
        self.0.wrapping_sub(earlier.0)
    }
}

/// A debounced button edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub button: Button,
    pub action: ButtonAction,
    /// When the edge happened.
    pub at: Ticks,
}

/// Assignment of advertising actions to buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLayout {
    /// Press starts advertising.
    pub start: Button,
    /// Press stops advertising.
    pub stop: Button,
    /// Releasing after a long hold stops advertising.
    pub long_press_stop: Option<Button>,
}

/// What the advertising controller should do in response to a button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    StartAdvertising,
    StopAdvertising,
}

/// Press bookkeeping for one long-press button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LongPress {
    threshold: u64,
    pressed_at: Option<Ticks>,
}

impl LongPress {
    pub const fn new(threshold_ticks: u64) -> Self {
        Self {
            threshold: threshold_ticks,
            pressed_at: None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn press(&mut self, at: Ticks) {
        self.pressed_at = Some(at);
    }

    /// Returns `true` if the hold lasted at least the threshold.
    ///
    /// A release without a recorded press never counts as long.
    pub fn release(&mut self, at: Ticks) -> bool {
        match self.pressed_at.take() {
            Some(pressed_at) => at.ticks_since(pressed_at) >= self.threshold,
            None => false,
        }
    }
}

/// Maps button events onto advertising commands.
pub struct ButtonRouter {
    layout: ButtonLayout,
    long_press: LongPress,
}

impl ButtonRouter {
    pub const fn new(layout: ButtonLayout) -> Self {
        Self {
            layout,
            long_press: LongPress::new(ms_to_ticks(LONG_PRESS_MS)),
        }
    }

    pub fn layout(&self) -> &ButtonLayout {
        &self.layout
    }

    /// Whether the long-press button is currently held down.
    pub fn long_press_held(&self) -> bool {
        self.long_press.is_pressed()
    }

    pub fn route(&mut self, event: &ButtonEvent) -> Option<Command> {
        let is_long_press_button = self.layout.long_press_stop == Some(event.button);

        match event.action {
            ButtonAction::Press if event.button == self.layout.start => {
                debug!("{} pressed - start advertising", event.button);
                Some(Command::StartAdvertising)
            }
            ButtonAction::Press if event.button == self.layout.stop => {
                debug!("{} pressed - stop advertising", event.button);
                Some(Command::StopAdvertising)
            }
            ButtonAction::Press if is_long_press_button => {
                debug!("{} pressed, time recorded", event.button);
                self.long_press.press(event.at);
                None
            }
            ButtonAction::Release if is_long_press_button => {
                if self.long_press.release(event.at) {
                    info!("{} held past {} ms - advertising cancelled", event.button, LONG_PRESS_MS);
                    Some(Command::StopAdvertising)
                } else {
                    debug!("{} short press - advertising continues", event.button);
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{THREE_BUTTON_PROFILE, TWO_KEY_PROFILE};

    const THRESHOLD: u64 = ms_to_ticks(LONG_PRESS_MS);

    fn event(button: Button, action: ButtonAction, at: u64) -> ButtonEvent {
        ButtonEvent {
            button,
            action,
            at: Ticks(at),
        }
    }

    fn three_button_router() -> ButtonRouter {
        ButtonRouter::new(THREE_BUTTON_PROFILE.buttons)
    }

    #[test]
    fn start_and_stop_buttons_act_on_press() {
        let mut router = three_button_router();
        assert_eq!(
            router.route(&event(Button::Button1, ButtonAction::Press, 0)),
            Some(Command::StartAdvertising)
        );
        assert_eq!(
            router.route(&event(Button::Button2, ButtonAction::Press, 10)),
            Some(Command::StopAdvertising)
        );
    }

    #[test]
    fn start_and_stop_buttons_ignore_release() {
        let mut router = three_button_router();
        assert_eq!(router.route(&event(Button::Button1, ButtonAction::Release, 5)), None);
        assert_eq!(router.route(&event(Button::Button2, ButtonAction::Release, 5)), None);
    }

    #[test]
    fn long_press_press_records_time_only() {
        let mut router = three_button_router();
        assert_eq!(router.route(&event(Button::Button3, ButtonAction::Press, 100)), None);
        assert!(router.long_press_held());
    }

    #[test]
    fn long_press_boundary_is_inclusive() {
        let mut router = three_button_router();
        router.route(&event(Button::Button3, ButtonAction::Press, 1_000));
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, 1_000 + THRESHOLD)),
            Some(Command::StopAdvertising)
        );
        assert!(!router.long_press_held());
    }

    #[test]
    fn release_one_tick_short_of_threshold_does_nothing() {
        let mut router = three_button_router();
        router.route(&event(Button::Button3, ButtonAction::Press, 1_000));
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, 1_000 + THRESHOLD - 1)),
            None
        );
        assert!(!router.long_press_held());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut router = three_button_router();
        // Even a huge timestamp must not read as a long hold.
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, u64::MAX)),
            None
        );
    }

    #[test]
    fn second_release_after_long_press_is_ignored() {
        let mut router = three_button_router();
        router.route(&event(Button::Button3, ButtonAction::Press, 0));
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, 2 * THRESHOLD)),
            Some(Command::StopAdvertising)
        );
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, 3 * THRESHOLD)),
            None
        );
    }

    #[test]
    fn repeated_press_restarts_hold_timer() {
        let mut router = three_button_router();
        router.route(&event(Button::Button3, ButtonAction::Press, 0));
        router.route(&event(Button::Button3, ButtonAction::Press, THRESHOLD));
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, THRESHOLD + 10)),
            None
        );
    }

    #[test]
    fn hold_measured_across_counter_wrap() {
        let mut router = three_button_router();
        let pressed = u64::MAX - 10;
        router.route(&event(Button::Button3, ButtonAction::Press, pressed));
        let released = pressed.wrapping_add(THRESHOLD);
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, released)),
            Some(Command::StopAdvertising)
        );
    }

    #[test]
    fn two_key_layout_has_no_long_press() {
        let mut router = ButtonRouter::new(TWO_KEY_PROFILE.buttons);
        assert_eq!(
            router.route(&event(Button::Button1, ButtonAction::Press, 0)),
            Some(Command::StartAdvertising)
        );
        assert_eq!(router.route(&event(Button::Button3, ButtonAction::Press, 0)), None);
        assert_eq!(
            router.route(&event(Button::Button3, ButtonAction::Release, 10 * THRESHOLD)),
            None
        );
        assert!(!router.long_press_held());
    }

    #[test]
    fn ticks_since_wraps() {
        assert_eq!(Ticks(5).ticks_since(Ticks(2)), 3);
        assert_eq!(Ticks(1).ticks_since(Ticks(u64::MAX)), 2);
    }
}
