//! Board user interface - buttons in, indicator LED out.
//!
//! ## Components
//!
//! - **Buttons**: debounced tactile switches, reported as press/release events
//! - **Blink timer**: repeating tick that drives the indicator LED while advertising
//!
//! The LED pin itself is owned by the advertising controller.

pub mod blink;
pub mod buttons;
