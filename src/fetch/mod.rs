// Fetch layer - background data fetching with caching and retry
//
// Each feed gets its own FeedQuery: a tokio task that fetches, retries with
// capped exponential backoff, refetches on a schedule and reacts to
// triggers. The UI reads FetchSnapshots; it never sees error details.

mod policy;
mod query;
mod snapshot;

pub use policy::FetchPolicy;
pub use query::{FeedQuery, FetchTrigger};
pub use snapshot::{FetchSnapshot, FetchState, ItemCollection};
