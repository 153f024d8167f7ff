//! Insights client: HTTP transport to the analysis service and the
//! bridge that executes fetch effects off the controller thread.
mod fetch;
mod handle;
mod types;

pub use fetch::{ClientSettings, HttpInsightsClient, InsightsApi, GENERIC_FETCH_ERROR};
pub use handle::ClientHandle;
pub use types::{ClientEvent, FailureKind, InsightsError, OpId};
