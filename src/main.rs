//! nrf-beacon firmware entry point.
//!
//! Boots the board in dependency order, hands the beacon payload to the
//! SoftDevice and then dispatches button and blink-timer events forever.
//! Every error reaching this level is fatal: `unwrap!` logs it and halts
//! through panic-probe.

#![no_std]
#![no_main]

mod softdevice;
mod ui;

use defmt::{info, unwrap};
use defmt_rtt as _; // global logger
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Level, Output, OutputDrive, Pin};
use embassy_nrf::interrupt::Priority;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use nrf_beacon::config::{self, BeaconProfile};
use nrf_beacon::{Beacon, Button, Event};
use nrf_softdevice::Softdevice;
use panic_probe as _;

/// Depth of the event channel shared by the button and blink tasks.
pub const EVENT_QUEUE_DEPTH: usize = 8;

static EVENTS: Channel<CriticalSectionRawMutex, Event, EVENT_QUEUE_DEPTH> = Channel::new();

#[cfg(not(feature = "two-key"))]
const PROFILE: &BeaconProfile = &config::THREE_BUTTON_PROFILE;
#[cfg(feature = "two-key")]
const PROFILE: &BeaconProfile = &config::TWO_KEY_PROFILE;

// Button timestamps are embassy ticks; the long-press threshold assumes this rate.
const _: () = assert!(embassy_time::TICK_HZ == config::TICK_HZ);

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    info!("SD is running");
    sd.run().await
}

#[embassy_executor::task(pool_size = 3)]
async fn button_task(pin: AnyPin, button: Button) -> ! {
    ui::buttons::button_task(pin, button, EVENTS.sender()).await
}

#[embassy_executor::task]
async fn blink_task() -> ! {
    ui::blink::blink_task(EVENTS.sender()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Logging: defmt-rtt is linked above and needs no runtime init.
    let mut conf = embassy_nrf::config::Config::default();
    // Keep our interrupts below the SoftDevice's reserved priorities.
    conf.gpiote_interrupt_priority = Priority::P2;
    conf.time_interrupt_priority = Priority::P2;
    // Power management: DC/DC regulator for the main supply.
    conf.dcdc.reg1 = true;
    let p = embassy_nrf::init(conf);

    // LEDs / buttons. LED 1 is lit at power-on (active-low).
    let led = Output::new(p.P0_13, Level::Low, OutputDrive::Standard);
    unwrap!(spawner.spawn(button_task(p.P0_11.degrade(), Button::Button1)));
    unwrap!(spawner.spawn(button_task(p.P0_12.degrade(), Button::Button2)));
    if PROFILE.buttons.long_press_stop.is_some() {
        unwrap!(spawner.spawn(button_task(p.P0_24.degrade(), Button::Button3)));
    }

    // Periodic timer service.
    unwrap!(spawner.spawn(blink_task()));

    // Radio stack.
    let sd: &'static Softdevice = softdevice::enable();
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Advertising payload.
    let radio = softdevice::SoftdeviceRadio::new(sd);
    let mut beacon = unwrap!(Beacon::new(radio, led, ui::blink::SignalTimer, PROFILE));
    info!("Beacon started.");

    // Idle loop: the executor sleeps (WFE) while the channel is empty.
    loop {
        let event = EVENTS.receive().await;
        unwrap!(beacon.handle(event));
    }
}
