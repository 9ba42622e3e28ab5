//! Host-testable library interface for nrf-beacon.
//!
//! Holds every piece of pure logic - beacon payload construction, the
//! advertising state machine, button routing and the blink indicator -
//! behind small traits the firmware implements for the real hardware.
//!
//! Usage: `cargo test`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to the modules below.
#[macro_use]
mod fmt;

pub mod advertising;
pub mod app;
pub mod beacon;
pub mod buttons;
pub mod config;
pub mod error;
pub mod indicator;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports
// ═══════════════════════════════════════════════════════════════════════════

pub use advertising::{AdvHandle, AdvertisingConfig, AdvertisingState, Radio, TxPowerRole};
pub use app::{Beacon, Event};
pub use beacon::advdata::{encode_advertising_data, EncodedAdvertisingBuffer};
pub use beacon::{build_beacon_info, BeaconInfo};
pub use buttons::{Button, ButtonAction, ButtonEvent, Ticks};
pub use config::BeaconProfile;
pub use error::{EncodingOverflow, Error, RadioError, TimerError};
pub use indicator::PeriodicTimer;
