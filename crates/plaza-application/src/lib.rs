pub mod composer;
pub mod paged_fetcher;
pub mod session_service;

pub use composer::Composer;
pub use paged_fetcher::{ErrorSink, PAGE_CHANGE_DEFER, PageChangeHook, PagedFetcher};
pub use session_service::{ReloadCallback, SessionOutcome, SessionService};
