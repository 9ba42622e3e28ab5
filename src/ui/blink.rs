//! Repeating blink timer.
//!
//! The advertising controller starts and stops the timer through
//! [`SignalTimer`]; a dedicated task runs an Embassy `Ticker` while the
//! timer is armed and feeds each expiry back to the application as an
//! `Event::IndicatorTick`.

use defmt::{debug, Format};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use nrf_beacon::{Event, PeriodicTimer, TimerError};

use crate::EVENT_QUEUE_DEPTH;

#[derive(Clone, Copy, Format)]
enum TimerCommand {
    Start(u32),
    Stop,
}

static TIMER_COMMAND: Signal<CriticalSectionRawMutex, TimerCommand> = Signal::new();

/// [`PeriodicTimer`] backed by [`blink_task`].
pub struct SignalTimer;

impl PeriodicTimer for SignalTimer {
    fn start(&mut self, period_ms: u32) -> Result<(), TimerError> {
        if period_ms == 0 {
            return Err(TimerError);
        }
        TIMER_COMMAND.signal(TimerCommand::Start(period_ms));
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TimerError> {
        TIMER_COMMAND.signal(TimerCommand::Stop);
        Ok(())
    }
}

/// Wait for the timer to be armed, then tick until it is stopped or re-armed.
pub async fn blink_task(tx: Sender<'static, CriticalSectionRawMutex, Event, EVENT_QUEUE_DEPTH>) -> ! {
    let mut command = TIMER_COMMAND.wait().await;

    loop {
        let period_ms = match command {
            TimerCommand::Start(period_ms) => period_ms,
            TimerCommand::Stop => {
                command = TIMER_COMMAND.wait().await;
                continue;
            }
        };

        debug!("Blink timer armed ({} ms)", period_ms);
        let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));
        command = loop {
            match select(TIMER_COMMAND.wait(), ticker.next()).await {
                Either::First(next) => break next,
                Either::Second(()) => tx.send(Event::IndicatorTick).await,
            }
        };
    }
}
