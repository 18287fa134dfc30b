//! Ephemeral per-shell rendering state.
//!
//! One [`RenderSession`] is created when the application shell mounts and
//! dropped on navigation away. It is the single explicit owner of state
//! the pipeline used to scatter across ambient globals: the mode
//! preference, the request sequence counter, the resolver state, the last
//! applied config, and the overlay-removed-once latch. Everything takes
//! it by reference; nothing reaches into the document implicitly.

use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use swatch::{ModePreference, ThemeConfig};
use tracing::trace;

/// Resolver lifecycle for the current session.
///
/// `Idle -> Fetching -> {Applied | FallenBack}`, re-enterable on every
/// mode change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolverState {
    /// No resolution has been requested yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Fetching,
    /// The persisted active theme was applied.
    Applied,
    /// The default table was applied (legitimate terminal state).
    FallenBack,
}

/// Ephemeral, in-memory session state for the theme pipeline.
#[derive(Debug, Default)]
pub struct RenderSession {
    preference: RwLock<ModePreference>,
    sequence: AtomicU64,
    state: RwLock<ResolverState>,
    last_applied: RwLock<Option<ThemeConfig>>,
    overlay_removed: AtomicBool,
}

impl RenderSession {
    /// A fresh session following the OS mode preference.
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh session with an explicit mode preference.
    pub fn with_preference(preference: ModePreference) -> Self {
        let session = Self::default();
        *session.preference.write().expect("session lock poisoned") = preference;
        session
    }

    /// The current mode preference.
    pub fn preference(&self) -> ModePreference {
        *self.preference.read().expect("session lock poisoned")
    }

    /// Record a new mode preference.
    pub fn set_preference(&self, preference: ModePreference) {
        *self.preference.write().expect("session lock poisoned") = preference;
    }

    /// Begin a resolution request: bump the sequence and return the
    /// captured value for this call. Only the response matching the
    /// latest sequence may mutate the document.
    pub fn begin_request(&self) -> u64 {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.write().expect("session lock poisoned") = ResolverState::Fetching;
        trace!(theme.seq = seq, "Resolution request started");
        seq
    }

    /// Whether `seq` is still the latest request (no newer one superseded it).
    pub fn is_current(&self, seq: u64) -> bool {
        self.sequence.load(Ordering::SeqCst) == seq
    }

    /// The resolver state.
    pub fn state(&self) -> ResolverState {
        *self.state.read().expect("session lock poisoned")
    }

    pub(crate) fn set_state(&self, state: ResolverState) {
        *self.state.write().expect("session lock poisoned") = state;
    }

    /// The last successfully applied config, if any.
    pub fn last_applied(&self) -> Option<ThemeConfig> {
        *self.last_applied.read().expect("session lock poisoned")
    }

    pub(crate) fn record_applied(&self, config: ThemeConfig) {
        *self.last_applied.write().expect("session lock poisoned") = Some(config);
    }

    /// Latch the overlay removal; true exactly once per session.
    pub(crate) fn mark_overlay_removed(&self) -> bool {
        !self.overlay_removed.swap(true, Ordering::SeqCst)
    }

    /// Whether the loading overlay has been torn down this session.
    pub fn overlay_removed(&self) -> bool {
        self.overlay_removed.load(Ordering::SeqCst)
    }
}
