use serde_json::Value;

use crate::FetchStatus;

/// Snapshot of the controller state handed to the view for rendering.
///
/// `result` is the insights document exactly as the service returned
/// it; `error` is the display message of the last failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub status: FetchStatus,
    pub result: Option<Value>,
    pub error: Option<String>,
    pub dirty: bool,
}
