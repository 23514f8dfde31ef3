//! Fetch snapshots - the read-only view of a feed's state

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Ordered collection of items, replaced wholesale on every successful fetch
pub type ItemCollection<T> = Arc<Vec<T>>;

/// Tri-state fetch result
#[derive(Debug)]
pub enum FetchState<T> {
    /// No result yet (first fetch, or a refetch after an error)
    Loading,
    /// Retries exhausted; previous items are not kept
    Error,
    Ready(ItemCollection<T>),
}

// Manual impl: cloning only bumps the Arc, no `T: Clone` bound
impl<T> Clone for FetchState<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Loading => Self::Loading,
            Self::Error => Self::Error,
            Self::Ready(items) => Self::Ready(Arc::clone(items)),
        }
    }
}

#[derive(Debug)]
pub struct FetchSnapshot<T> {
    pub state: FetchState<T>,
    /// When the state was last settled by a fetch (success or terminal failure)
    pub fetched_at: Option<DateTime<Utc>>,
    /// A fetch is in flight (a background refetch keeps Ready data visible)
    pub is_fetching: bool,
}

impl<T> Clone for FetchSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            fetched_at: self.fetched_at,
            is_fetching: self.is_fetching,
        }
    }
}

impl<T> FetchSnapshot<T> {
    pub fn loading() -> Self {
        Self {
            state: FetchState::Loading,
            fetched_at: None,
            is_fetching: true,
        }
    }

    pub fn ready(items: Vec<T>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            state: FetchState::Ready(Arc::new(items)),
            fetched_at: Some(fetched_at),
            is_fetching: false,
        }
    }

    pub fn error(fetched_at: DateTime<Utc>) -> Self {
        Self {
            state: FetchState::Error,
            fetched_at: Some(fetched_at),
            is_fetching: false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state, FetchState::Error)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, FetchState::Ready(_))
    }

    /// Items, only when Ready
    pub fn items(&self) -> Option<&[T]> {
        match &self.state {
            FetchState::Ready(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Shared handle to the items, only when Ready
    pub fn collection(&self) -> Option<ItemCollection<T>> {
        match &self.state {
            FetchState::Ready(items) => Some(Arc::clone(items)),
            _ => None,
        }
    }

    /// Ready with at least one item - the only state worth paging through
    pub fn has_items(&self) -> bool {
        self.items().is_some_and(|items| !items.is_empty())
    }

    /// Human-readable age for "last updated" labels
    pub fn age_label(&self, now: DateTime<Utc>) -> Option<String> {
        let fetched_at = self.fetched_at?;
        let secs = (now - fetched_at).num_seconds().max(0);
        Some(if secs < 60 {
            format!("{}s ago", secs)
        } else if secs < 3600 {
            format!("{}m ago", secs / 60)
        } else {
            format!("{}h ago", secs / 3600)
        })
    }
}

impl<T> Default for FetchSnapshot<T> {
    fn default() -> Self {
        Self::loading()
    }
}
