//! Unified error type for nrf-beacon.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Derives `defmt::Format` (with the `defmt` feature) for efficient
//! on-target logging.

/// Top-level error type used across the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Radio
    /// The radio stack rejected a configure/start/stop/TX-power call.
    Radio(RadioError),

    // Payload
    /// The encoded advertising data does not fit the legacy limit.
    Encoding(EncodingOverflow),

    // Indicator
    /// Driving the indicator LED failed.
    Indicator,

    /// The blink timer could not be started or stopped.
    Timer,
}

/// Subset of radio-stack errors we propagate (keeps the enum `Copy`-friendly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioError {
    /// Raw status code from the SoftDevice.
    Raw(u32),
    /// The payload does not fit the stack's advertising buffer.
    PayloadTooLarge,
}

/// The advertising data would exceed the stack's maximum size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncodingOverflow {
    /// Bytes the encoding needed.
    pub required: usize,
    /// Bytes the buffer can hold.
    pub capacity: usize,
}

/// The periodic timer service refused a start/stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerError;

// Convenience conversions

impl From<RadioError> for Error {
    fn from(e: RadioError) -> Self {
        Error::Radio(e)
    }
}

impl From<EncodingOverflow> for Error {
    fn from(e: EncodingOverflow) -> Self {
        Error::Encoding(e)
    }
}

impl From<TimerError> for Error {
    fn from(_: TimerError) -> Self {
        Error::Timer
    }
}
