//! GPIO button input with async debouncing.
//!
//! Buttons are active-low with internal pull-up. Each one is handled by an
//! async task that waits for a GPIO edge, debounces it, and sends a
//! timestamped press or release `Event` to the application channel.

use defmt::debug;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{Duration, Instant, Timer};
use nrf_beacon::config::BUTTON_DEBOUNCE_MS;
use nrf_beacon::{Button, ButtonAction, ButtonEvent, Event, Ticks};

use crate::EVENT_QUEUE_DEPTH;

/// Run a single button polling loop.
///
/// Reports the press stamped at the falling edge and the release stamped
/// at the rising edge, each only once the level has been stable for the
/// debounce time.
pub async fn button_task(
    pin: AnyPin,
    button: Button,
    tx: Sender<'static, CriticalSectionRawMutex, Event, EVENT_QUEUE_DEPTH>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;
        let pressed_at = now();

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        if !btn.is_low() {
            continue;
        }

        debug!("{} pressed", button);
        tx.send(edge(button, ButtonAction::Press, pressed_at)).await;

        // A release must follow every reported press, or the hold timer
        // would never be cleared.
        loop {
            btn.wait_for_rising_edge().await;
            let released_at = now();
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
            if btn.is_high() {
                debug!("{} released", button);
                tx.send(edge(button, ButtonAction::Release, released_at)).await;
                break;
            }
        }
    }
}

fn now() -> Ticks {
    Ticks(Instant::now().as_ticks())
}

fn edge(button: Button, action: ButtonAction, at: Ticks) -> Event {
    Event::Button(ButtonEvent { button, action, at })
}
