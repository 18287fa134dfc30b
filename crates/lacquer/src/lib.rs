#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Lacquer
//!
//! The finishing coat: async resolution of the persisted active theme,
//! painted over the approximate critical theme from `primer`.
//!
//! The pipeline is:
//! 1. A [`RenderSession`] is created when the shell mounts; it owns the
//!    mode preference, the request sequence, and the overlay latch.
//! 2. [`ThemeResolver`] fetches active records from a [`ThemeStore`]
//!    (HTTP in production via [`HttpThemeStore`], canned in tests via
//!    [`StaticThemeStore`]), picks the winner, and applies it.
//! 3. Any fault — nothing persisted, transport failure, malformed payload,
//!    timeout — lands on the hardcoded default table. The user always ends
//!    with a coherent theme and the loading overlay always comes down.
//!
//! Stale responses are discarded by sequence number, so rapid mode toggles
//! settle on the user's last choice without flicker.
//!
//! ## Example
//!
//! ```rust
//! use lacquer::{RenderSession, ResolveOutcome, StaticThemeStore, ThemeResolver};
//! use vanity::MemoryDocument;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = StaticThemeStore::not_found();
//! let doc = MemoryDocument::new();
//! let session = RenderSession::new();
//!
//! let outcome = ThemeResolver::new(&store, &doc, &session)
//!     .resolve_current()
//!     .await;
//! assert_eq!(outcome, ResolveOutcome::FallenBack);
//! # }
//! ```

/// Applying a resolved config to the document.
pub mod applier;
/// Store and resolution errors.
pub mod error;
/// HTTP-backed theme store.
#[cfg(feature = "http")]
pub mod http;
/// The async resolver.
pub mod resolver;
/// Per-shell session state.
pub mod session;
/// The theme store seam and its canned implementation.
pub mod store;

pub use applier::apply_theme;
pub use error::StoreError;
#[cfg(feature = "http")]
pub use http::HttpThemeStore;
pub use resolver::{DEFAULT_FETCH_TIMEOUT, ResolveOutcome, ThemeResolver};
pub use session::{RenderSession, ResolverState};
pub use store::{StaticThemeStore, ThemeStore};
