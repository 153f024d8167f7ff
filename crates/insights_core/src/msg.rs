use serde_json::Value;

use crate::{Failure, OpId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the storefront URL input box.
    InputChanged(String),
    /// User asked to fetch insights for the current input.
    FetchClicked,
    /// Transport finished the given operation with a payload.
    FetchSucceeded { op: OpId, payload: Value },
    /// Transport finished the given operation with a classified failure.
    FetchFailed { op: OpId, failure: Failure },
}
