//! Advertising controller.
//!
//! Owns the advertising set handed out by the radio stack and the
//! `Stopped` / `Advertising` state machine. Redundant start/stop requests
//! are silent no-ops; any error from the radio is returned to the caller,
//! which treats it as fatal.

use embedded_hal::digital::StatefulOutputPin;

use crate::beacon::advdata::EncodedAdvertisingBuffer;
use crate::config::{ms_to_adv_units, ADV_DURATION_UNLIMITED, CONN_CFG_TAG};
use crate::error::{Error, RadioError};
use crate::indicator::{Indicator, PeriodicTimer};

/// Opaque advertising-set handle issued by the radio stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvHandle(pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvertisingType {
    NonConnectableNonScannableUndirected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterPolicy {
    /// Accept scan and connect requests from any device.
    Any,
}

/// Role whose TX power is being set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxPowerRole {
    Advertising,
}

/// Advertising parameters, fixed at boot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdvertisingConfig {
    pub kind: AdvertisingType,
    /// Interval in 0.625 ms units.
    pub interval: u32,
    /// Duration in 10 ms units, 0 = until stopped.
    pub duration: u16,
    pub filter_policy: FilterPolicy,
}

impl AdvertisingConfig {
    /// Non-connectable, non-scannable, undirected advertising every `interval_ms`.
    pub const fn non_connectable(interval_ms: u32) -> Self {
        Self {
            kind: AdvertisingType::NonConnectableNonScannableUndirected,
            interval: ms_to_adv_units(interval_ms),
            duration: ADV_DURATION_UNLIMITED,
            filter_policy: FilterPolicy::Any,
        }
    }
}

/// The radio stack the controller drives.
pub trait Radio {
    /// Register the payload and parameters as an advertising set.
    fn configure(
        &mut self,
        data: &[u8],
        config: &AdvertisingConfig,
    ) -> Result<AdvHandle, RadioError>;

    fn start(&mut self, handle: AdvHandle, conn_cfg_tag: u8) -> Result<(), RadioError>;

    fn stop(&mut self, handle: AdvHandle) -> Result<(), RadioError>;

    fn set_tx_power(
        &mut self,
        role: TxPowerRole,
        handle: AdvHandle,
        dbm: i8,
    ) -> Result<(), RadioError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvertisingState {
    Stopped,
    Advertising,
}

pub struct AdvertisingController<R, P, T> {
    radio: R,
    indicator: Indicator<P, T>,
    handle: AdvHandle,
    state: AdvertisingState,
    tx_power_dbm: i8,
}

impl<R, P, T> AdvertisingController<R, P, T>
where
    R: Radio,
    P: StatefulOutputPin,
    T: PeriodicTimer,
{
    /// Register `data` with the radio. A controller only exists once the
    /// advertising set has been configured, so start/stop can never run
    /// before it.
    pub fn configure(
        mut radio: R,
        indicator: Indicator<P, T>,
        data: &EncodedAdvertisingBuffer,
        config: &AdvertisingConfig,
        tx_power_dbm: i8,
    ) -> Result<Self, Error> {
        let handle = radio.configure(data.as_slice(), config)?;
        info!(
            "Advertising set {} configured ({} bytes, interval {})",
            handle.0,
            data.len(),
            config.interval
        );

        Ok(Self {
            radio,
            indicator,
            handle,
            state: AdvertisingState::Stopped,
            tx_power_dbm,
        })
    }

    pub fn state(&self) -> AdvertisingState {
        self.state
    }

    pub fn is_advertising(&self) -> bool {
        self.state == AdvertisingState::Advertising
    }

    pub fn handle(&self) -> AdvHandle {
        self.handle
    }

    pub fn indicator(&self) -> &Indicator<P, T> {
        &self.indicator
    }

    /// `Stopped -> Advertising`. No-op if already advertising.
    pub fn start(&mut self) -> Result<(), Error> {
        if self.is_advertising() {
            return Ok(());
        }

        self.radio.start(self.handle, CONN_CFG_TAG)?;
        self.radio
            .set_tx_power(TxPowerRole::Advertising, self.handle, self.tx_power_dbm)?;
        self.state = AdvertisingState::Advertising;
        self.indicator.show_advertising()?;

        info!("Advertising started");
        Ok(())
    }

    /// `Advertising -> Stopped`. No-op if already stopped.
    pub fn stop(&mut self) -> Result<(), Error> {
        if !self.is_advertising() {
            return Ok(());
        }

        self.radio.stop(self.handle)?;
        self.state = AdvertisingState::Stopped;
        self.indicator.show_stopped()?;

        info!("Advertising stopped");
        Ok(())
    }

    /// Blink timer expiry.
    pub fn on_indicator_tick(&mut self) -> Result<(), Error> {
        self.indicator.on_tick()
    }
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum RadioCall {
        Configure(Vec<u8>, AdvertisingConfig),
        Start(AdvHandle, u8),
        Stop(AdvHandle),
        TxPower(TxPowerRole, AdvHandle, i8),
    }

    #[derive(Default)]
    pub struct RadioLog {
        pub calls: Vec<RadioCall>,
        /// Status code returned by the next call, then cleared.
        pub fail_next: Option<u32>,
    }

    /// Radio that records every call.
    #[derive(Clone, Default)]
    pub struct FakeRadio(pub Rc<RefCell<RadioLog>>);

    impl FakeRadio {
        pub fn calls(&self) -> Vec<RadioCall> {
            self.0.borrow().calls.clone()
        }

        pub fn starts(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, RadioCall::Start(..)))
                .count()
        }

        pub fn stops(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, RadioCall::Stop(..)))
                .count()
        }

        fn record(&self, call: RadioCall) -> Result<(), RadioError> {
            let mut log = self.0.borrow_mut();
            if let Some(code) = log.fail_next.take() {
                return Err(RadioError::Raw(code));
            }
            log.calls.push(call);
            Ok(())
        }
    }

    impl Radio for FakeRadio {
        fn configure(
            &mut self,
            data: &[u8],
            config: &AdvertisingConfig,
        ) -> Result<AdvHandle, RadioError> {
            self.record(RadioCall::Configure(data.to_vec(), *config))?;
            Ok(AdvHandle(0))
        }

        fn start(&mut self, handle: AdvHandle, conn_cfg_tag: u8) -> Result<(), RadioError> {
            self.record(RadioCall::Start(handle, conn_cfg_tag))
        }

        fn stop(&mut self, handle: AdvHandle) -> Result<(), RadioError> {
            self.record(RadioCall::Stop(handle))
        }

        fn set_tx_power(
            &mut self,
            role: TxPowerRole,
            handle: AdvHandle,
            dbm: i8,
        ) -> Result<(), RadioError> {
            self.record(RadioCall::TxPower(role, handle, dbm))
        }
    }
}
