//! Beacon payload builder.
//!
//! The beacon info block is the 23-byte manufacturer-specific payload that
//! identifies this beacon:
//!
//! ```text
//! [device type][data len][uuid: 16][major: 2 BE][minor: 2 BE][measured rssi]
//! ```
//!
//! It is built once at boot from compile-time constants and then encoded
//! into BLE AD structures by [`advdata`].

pub mod advdata;

use crate::config::{ADV_DATA_LENGTH, DEVICE_TYPE};

/// Total size of the beacon info block.
pub const BEACON_INFO_LEN: usize = 0x17;

/// Deployment-specific identity broadcast by the beacon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconIdentity {
    pub uuid: [u8; 16],
    pub major: u16,
    pub minor: u16,
    /// Calibrated RSSI at 1 m (dBm).
    pub measured_rssi: i8,
}

/// The fixed-layout beacon info block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BeaconInfo {
    bytes: [u8; BEACON_INFO_LEN],
}

impl BeaconInfo {
    pub fn as_bytes(&self) -> &[u8; BEACON_INFO_LEN] {
        &self.bytes
    }

    pub fn device_type(&self) -> u8 {
        self.bytes[0]
    }

    pub fn uuid(&self) -> [u8; 16] {
        let mut uuid = [0u8; 16];
        uuid.copy_from_slice(&self.bytes[2..18]);
        uuid
    }

    pub fn major(&self) -> u16 {
        u16::from_be_bytes([self.bytes[18], self.bytes[19]])
    }

    pub fn minor(&self) -> u16 {
        u16::from_be_bytes([self.bytes[20], self.bytes[21]])
    }

    pub fn measured_rssi(&self) -> i8 {
        self.bytes[22] as i8
    }
}

/// Assemble the beacon info block for `identity`.
pub const fn build_beacon_info(identity: &BeaconIdentity) -> BeaconInfo {
    let mut bytes = [0u8; BEACON_INFO_LEN];
    bytes[0] = DEVICE_TYPE;
    bytes[1] = ADV_DATA_LENGTH;

    let mut i = 0;
    while i < 16 {
        bytes[2 + i] = identity.uuid[i];
        i += 1;
    }

    let major = identity.major.to_be_bytes();
    bytes[18] = major[0];
    bytes[19] = major[1];

    let minor = identity.minor.to_be_bytes();
    bytes[20] = minor[0];
    bytes[21] = minor[1];

    bytes[22] = identity.measured_rssi as u8;

    BeaconInfo { bytes }
}
