//! Error types for theme resolution.

use swatch::{Mode, ParseError};
use thiserror::Error;

/// Error fetching or decoding the active theme from a store.
///
/// Every variant maps to the same user-visible outcome (the default table)
/// but logs differently: `NotFound` is an expected state, the rest are
/// operational faults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No active theme is persisted for this mode.
    #[error("no active theme persisted for {0} mode")]
    NotFound(Mode),
    /// Transport-level failure reaching the store.
    #[error("theme fetch failed: {0}")]
    Fetch(String),
    /// The store responded but the payload did not normalize.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
