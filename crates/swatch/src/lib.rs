#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Swatch
//!
//! Theme model for the daub rendering pipeline.
//!
//! Swatch provides:
//! - [`Role`] and [`ThemeConfig`]: a closed set of semantic color slots,
//!   each holding a validated 6-digit HEX value
//! - [`CustomTheme`]: a named, optionally user-owned theme record with
//!   light/dark configs and active/default flags
//! - [`normalize_record`]: tolerant normalization of backend payloads
//!   (camelCase or flattened-lowercase keys, configs as objects or
//!   JSON-encoded strings)
//! - [`select_active`]: deterministic winner when persisted data holds
//!   conflicting active flags
//! - [`DEFAULT_LIGHT`] / [`DEFAULT_DARK`]: the hardcoded fallback palettes,
//!   with pre-converted HSL strings for the critical paint path
//!
//! ## Example
//!
//! ```rust
//! use swatch::{Mode, Role, default_theme};
//!
//! let theme = default_theme(Mode::Dark);
//! assert_eq!(theme.color(Role::Background).to_string(), "#0f0f0f");
//! ```

/// Semantic color roles and the theme config value object.
pub mod config;
/// Hardcoded fallback palettes with pre-converted HSL tables.
pub mod defaults;
/// Theme records, payload normalization, and active-theme selection.
pub mod record;

pub use config::{Role, ThemeConfig, ThemeConfigPatch};
pub use defaults::{DEFAULT_DARK, DEFAULT_DARK_HSL, DEFAULT_LIGHT, DEFAULT_LIGHT_HSL, default_hsl, default_theme};
pub use record::{
    CustomTheme, MODE_STORAGE_KEY, Mode, ModePreference, ParseError, normalize_record,
    select_active,
};
