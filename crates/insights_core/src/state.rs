use serde_json::Value;

use crate::view_model::AppViewModel;

/// Monotonically increasing identifier for one fetch operation.
pub type OpId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Classified outcome of a failed operation, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    /// HTTP status, when the remote service answered at all.
    pub code: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: String,
    status: FetchStatus,
    result: Option<Value>,
    error: Option<Failure>,
    last_issued: OpId,
    last_applied: OpId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&Failure> {
        self.error.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            status: self.status,
            result: self.result.clone(),
            error: self.error.as_ref().map(|failure| failure.message.clone()),
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_input(&mut self, value: String) {
        if self.input != value {
            self.input = value;
            self.dirty = true;
        }
    }

    /// Starts a new operation: Pending status, cleared outcome, next id.
    pub(crate) fn begin_operation(&mut self) -> OpId {
        self.last_issued += 1;
        self.status = FetchStatus::Pending;
        self.result = None;
        self.error = None;
        self.dirty = true;
        self.last_issued
    }

    // A completion applies only for the latest issued operation, and
    // only once. Anything else is stale and dropped.
    fn accepts(&self, op: OpId) -> bool {
        op == self.last_issued && op > self.last_applied
    }

    pub(crate) fn apply_success(&mut self, op: OpId, payload: Value) {
        if !self.accepts(op) {
            return;
        }
        self.last_applied = op;
        self.status = FetchStatus::Succeeded;
        self.result = Some(payload);
        self.error = None;
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self, op: OpId, failure: Failure) {
        if !self.accepts(op) {
            return;
        }
        self.last_applied = op;
        self.status = FetchStatus::Failed;
        self.result = None;
        self.error = Some(failure);
        self.dirty = true;
    }
}
