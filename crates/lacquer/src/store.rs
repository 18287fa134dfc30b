//! The theme store seam.
//!
//! [`ThemeStore`] is the only async dependency of the resolver. Production
//! wires in the HTTP adapter (feature `http`); tests and native demos use
//! [`StaticThemeStore`] with canned responses.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use swatch::{CustomTheme, Mode};

use crate::error::StoreError;

/// Source of persisted active-theme records.
pub trait ThemeStore: Send + Sync {
    /// Fetch the records flagged active for `mode`.
    ///
    /// An empty store is [`StoreError::NotFound`], not an empty `Vec`; the
    /// resolver treats the two identically but logs them apart.
    fn active_themes(
        &self,
        mode: Mode,
    ) -> impl Future<Output = Result<Vec<CustomTheme>, StoreError>> + Send;
}

/// One canned store response.
#[derive(Debug, Clone)]
enum Canned {
    Records(Vec<CustomTheme>),
    NotFound,
    Fail(String),
}

impl Canned {
    fn resolve(self, mode: Mode) -> Result<Vec<CustomTheme>, StoreError> {
        match self {
            Canned::Records(records) => Ok(records),
            Canned::NotFound => Err(StoreError::NotFound(mode)),
            Canned::Fail(message) => Err(StoreError::Fetch(message)),
        }
    }
}

/// Canned-response store for tests and offline use.
///
/// Responses queued with the `then_*` builders are served in order; once
/// the queue drains, the constructor's response repeats indefinitely.
#[derive(Debug)]
pub struct StaticThemeStore {
    queue: Mutex<VecDeque<Canned>>,
    steady: Canned,
    calls: AtomicU64,
}

impl StaticThemeStore {
    fn from_steady(steady: Canned) -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            steady,
            calls: AtomicU64::new(0),
        }
    }

    /// A store that always answers with these records.
    pub fn with_records(records: Vec<CustomTheme>) -> Self {
        Self::from_steady(Canned::Records(records))
    }

    /// A store with nothing persisted.
    pub fn not_found() -> Self {
        Self::from_steady(Canned::NotFound)
    }

    /// A store whose fetches always fail.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_steady(Canned::Fail(message.into()))
    }

    /// Queue a one-shot records response ahead of the steady one.
    pub fn then_records(self, records: Vec<CustomTheme>) -> Self {
        self.push(Canned::Records(records))
    }

    /// Queue a one-shot not-found response ahead of the steady one.
    pub fn then_not_found(self) -> Self {
        self.push(Canned::NotFound)
    }

    /// Queue a one-shot failure ahead of the steady one.
    pub fn then_failure(self, message: impl Into<String>) -> Self {
        self.push(Canned::Fail(message.into()))
    }

    fn push(self, canned: Canned) -> Self {
        self.queue.lock().expect("store lock poisoned").push_back(canned);
        self
    }

    /// How many fetches this store has served.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ThemeStore for StaticThemeStore {
    async fn active_themes(&self, mode: Mode) -> Result<Vec<CustomTheme>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let canned = self
            .queue
            .lock()
            .expect("store lock poisoned")
            .pop_front()
            .unwrap_or_else(|| self.steady.clone());
        canned.resolve(mode)
    }
}
