//! Application-wide constants and compile-time configuration.
//!
//! Beacon identity, radio parameters and button timing live here so they
//! can be tuned in one place. Everything that differs between the two
//! firmware variants is bundled into a [`BeaconProfile`].

use crate::beacon::BeaconIdentity;
use crate::buttons::{Button, ButtonLayout};

// Beacon payload

/// Bluetooth SIG company identifier carried in the manufacturer data (Nordic).
pub const COMPANY_IDENTIFIER: u16 = 0x0059;

/// Beacon info block: device type byte.
pub const DEVICE_TYPE: u8 = 0x02;

/// Beacon info block: length of the data that follows the first two bytes.
pub const ADV_DATA_LENGTH: u8 = 0x15;

/// Measured RSSI at 1 m (0xC3 on the wire).
pub const MEASURED_RSSI: i8 = -61;

/// AD flags value: BR/EDR not supported.
pub const ADV_FLAG_BR_EDR_NOT_SUPPORTED: u8 = 0x04;

// Radio

/// Maximum advertising data size for legacy advertising.
pub const LEGACY_ADV_DATA_MAX: usize = 31;

/// Non-connectable advertising interval (ms).
pub const ADV_INTERVAL_MS: u32 = 1000;

/// Advertising duration in 10 ms units. 0 = advertise until stopped.
pub const ADV_DURATION_UNLIMITED: u16 = 0;

/// Connection configuration tag handed to the stack on advertising start.
pub const CONN_CFG_TAG: u8 = 1;

// Timing

/// Monotonic tick rate of the RTC-driven time base (Hz).
pub const TICK_HZ: u64 = 32_768;

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Hold time after which releasing the long-press button stops advertising (ms).
pub const LONG_PRESS_MS: u64 = 5000;

/// Indicator LED toggle period while advertising (ms).
pub const BLINK_PERIOD_MS: u32 = 1000;

/// Convert milliseconds to ticks of the monotonic counter.
pub const fn ms_to_ticks(ms: u64) -> u64 {
    ms * TICK_HZ / 1000
}

/// Convert milliseconds to advertising interval units (0.625 ms).
pub const fn ms_to_adv_units(ms: u32) -> u32 {
    ms * 1000 / 625
}

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the `embassy_nrf::peripherals::*` pins are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button 1 / Key 0 → P0.11
//   Button 2 / Key 1 → P0.12
//   Button 3         → P0.24
//   Status LED 1     → P0.13 (active-low)

/// Everything that distinguishes one deployed firmware variant from another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconProfile {
    /// UUID, major, minor and calibrated RSSI broadcast by this beacon.
    pub identity: BeaconIdentity,
    /// Advertising TX power (dBm).
    pub tx_power_dbm: i8,
    /// Which physical button does what.
    pub buttons: ButtonLayout,
    /// Blink the indicator LED while advertising (steady otherwise).
    pub blink_indicator: bool,
}

/// Variant 1: three buttons, long-press cancel on Button 3, blinking LED.
pub const THREE_BUTTON_PROFILE: BeaconProfile = BeaconProfile {
    identity: BeaconIdentity {
        uuid: [
            0xC8, 0x70, 0xD9, 0x75, 0xAF, 0x4A, 0x4D, 0x66, 0xAB, 0xFF, 0xF4, 0xE5, 0xE8, 0x82,
            0x39, 0xF7,
        ],
        major: 0xC3B7,
        minor: 0xA224,
        measured_rssi: MEASURED_RSSI,
    },
    tx_power_dbm: 0,
    buttons: ButtonLayout {
        start: Button::Button1,
        stop: Button::Button2,
        long_press_stop: Some(Button::Button3),
    },
    blink_indicator: true,
};

/// Variant 2: Key 0 starts, Key 1 stops, steady LED, reduced TX power.
pub const TWO_KEY_PROFILE: BeaconProfile = BeaconProfile {
    identity: BeaconIdentity {
        uuid: [
            0x8A, 0x0A, 0x42, 0xE1, 0x53, 0x0E, 0x47, 0x54, 0xA9, 0xBA, 0x26, 0xA0, 0x88, 0x6F,
            0x2F, 0x30,
        ],
        major: 0x0102,
        minor: 0x0304,
        measured_rssi: MEASURED_RSSI,
    },
    tx_power_dbm: -16,
    buttons: ButtonLayout {
        start: Button::Button1,
        stop: Button::Button2,
        long_press_stop: None,
    },
    blink_indicator: false,
};
