//! Error types for the selector engine
//!
//! Nothing here is fatal to a host: every variant is recovered locally by
//! deferring the request, logging and ignoring it, or clamping back into
//! range. The variants exist so call sites can tell those cases apart.

use thiserror::Error;

/// Errors raised by selector operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    /// Operation needs the time axis, but layout has not completed yet
    #[error("layout has not completed; time axis is not initialized")]
    NotReady,

    /// `set_data` was called on an already-populated store
    #[error("waveform data already set; use refresh_data to replace samples")]
    AlreadyInitialized,

    /// A scroll offset left the valid range and was snapped back
    #[error("offset {offset} outside valid scroll range 0..={max}")]
    OutOfRange { offset: f32, max: f32 },
}
