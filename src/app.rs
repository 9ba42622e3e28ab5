//! Beacon application: bootstrap and event dispatch.
//!
//! Button edges and blink-timer expiries are delivered as [`Event`]s and
//! handled one at a time, to completion, by [`Beacon::handle`].

use embedded_hal::digital::StatefulOutputPin;

use crate::advertising::{AdvertisingConfig, AdvertisingController, AdvertisingState, Radio};
use crate::beacon::advdata::encode_advertising_data;
use crate::beacon::build_beacon_info;
use crate::buttons::{ButtonEvent, ButtonRouter, Command};
use crate::config::{BeaconProfile, ADV_FLAG_BR_EDR_NOT_SUPPORTED, ADV_INTERVAL_MS};
use crate::error::Error;
use crate::indicator::{Indicator, PeriodicTimer};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// A debounced button edge.
    Button(ButtonEvent),
    /// The blink timer expired.
    IndicatorTick,
}

pub struct Beacon<R, P, T> {
    controller: AdvertisingController<R, P, T>,
    router: ButtonRouter,
}

impl<R, P, T> Beacon<R, P, T>
where
    R: Radio,
    P: StatefulOutputPin,
    T: PeriodicTimer,
{
    /// Build and encode the beacon payload for `profile` and configure it
    /// with the radio. Advertising stays stopped until a start button.
    pub fn new(radio: R, led: P, timer: T, profile: &BeaconProfile) -> Result<Self, Error> {
        let info = build_beacon_info(&profile.identity);
        let data = encode_advertising_data(&info, ADV_FLAG_BR_EDR_NOT_SUPPORTED)?;
        let config = AdvertisingConfig::non_connectable(ADV_INTERVAL_MS);

        let controller = AdvertisingController::configure(
            radio,
            Indicator::new(led, timer, profile.blink_indicator),
            &data,
            &config,
            profile.tx_power_dbm,
        )?;

        Ok(Self {
            controller,
            router: ButtonRouter::new(profile.buttons),
        })
    }

    pub fn state(&self) -> AdvertisingState {
        self.controller.state()
    }

    pub fn controller(&self) -> &AdvertisingController<R, P, T> {
        &self.controller
    }

    pub fn handle(&mut self, event: Event) -> Result<(), Error> {
        match event {
            Event::Button(button) => match self.router.route(&button) {
                Some(Command::StartAdvertising) => self.controller.start(),
                Some(Command::StopAdvertising) => self.controller.stop(),
                None => Ok(()),
            },
            Event::IndicatorTick => self.controller.on_indicator_tick(),
        }
    }
}
