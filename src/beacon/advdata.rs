//! BLE advertising-data (AD structure) encoding.
//!
//! Each AD structure is `[len][type][data...]` where `len` counts the type
//! byte plus the data. The beacon packet carries two of them:
//!
//! ```text
//! 02 01 04                       flags: BR/EDR not supported
//! 1A FF 59 00 <23-byte info>     manufacturer data: company 0x0059 (LE)
//! ```

use heapless::Vec;

use super::BeaconInfo;
use crate::config::{COMPANY_IDENTIFIER, LEGACY_ADV_DATA_MAX};
use crate::error::EncodingOverflow;

/// AD type: Flags.
pub const AD_TYPE_FLAGS: u8 = 0x01;

/// AD type: Manufacturer Specific Data.
pub const AD_TYPE_MANUFACTURER_DATA: u8 = 0xFF;

/// Legacy advertising data, capacity-checked against the 31-byte limit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodedAdvertisingBuffer {
    data: Vec<u8, LEGACY_ADV_DATA_MAX>,
}

impl EncodedAdvertisingBuffer {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Append one AD structure, leaving the buffer untouched if it does not fit.
    pub fn push(&mut self, ad: &AdStructure<'_>) -> Result<(), EncodingOverflow> {
        let required = self.data.len() + ad.encoded_len();
        if required > self.data.capacity() {
            return Err(EncodingOverflow {
                required,
                capacity: self.data.capacity(),
            });
        }

        // Length checked above, so none of these pushes can fail.
        let _ = self.data.push((ad.encoded_len() - 1) as u8);
        match ad {
            AdStructure::Flags(flags) => {
                let _ = self.data.push(AD_TYPE_FLAGS);
                let _ = self.data.push(*flags);
            }
            AdStructure::ManufacturerSpecificData {
                company_identifier,
                payload,
            } => {
                let _ = self.data.push(AD_TYPE_MANUFACTURER_DATA);
                let _ = self
                    .data
                    .extend_from_slice(&company_identifier.to_le_bytes());
                let _ = self.data.extend_from_slice(payload);
            }
        }
        Ok(())
    }
}

/// A single AD structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdStructure<'a> {
    Flags(u8),
    ManufacturerSpecificData {
        company_identifier: u16,
        payload: &'a [u8],
    },
}

impl AdStructure<'_> {
    /// Bytes this structure occupies on air, length byte included.
    pub fn encoded_len(&self) -> usize {
        match self {
            AdStructure::Flags(_) => 3,
            AdStructure::ManufacturerSpecificData { payload, .. } => 4 + payload.len(),
        }
    }
}

/// Encode the flags element followed by the manufacturer element carrying
/// `info`.
///
/// Fails with [`EncodingOverflow`] if the result would exceed the legacy
/// 31-byte advertising data limit.
pub fn encode_advertising_data(
    info: &BeaconInfo,
    flags: u8,
) -> Result<EncodedAdvertisingBuffer, EncodingOverflow> {
    encode_ad_structures(&[
        AdStructure::Flags(flags),
        AdStructure::ManufacturerSpecificData {
            company_identifier: COMPANY_IDENTIFIER,
            payload: info.as_bytes(),
        },
    ])
}

/// Encode `structures` back to back into a fresh buffer.
pub fn encode_ad_structures(
    structures: &[AdStructure<'_>],
) -> Result<EncodedAdvertisingBuffer, EncodingOverflow> {
    let mut buf = EncodedAdvertisingBuffer::new();
    for ad in structures {
        if let Err(e) = buf.push(ad) {
            // Report the size the whole packet would have needed.
            let required = structures.iter().map(AdStructure::encoded_len).sum();
            warn!(
                "Advertising data needs {} bytes, limit is {}",
                required, e.capacity
            );
            return Err(EncodingOverflow {
                required,
                capacity: e.capacity,
            });
        }
    }
    debug!("Encoded {} bytes of advertising data", buf.len());
    Ok(buf)
}
