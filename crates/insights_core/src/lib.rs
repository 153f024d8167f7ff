//! Insights core: pure request-controller state machine and view model.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, Failure, FetchStatus, OpId};
pub use update::update;
pub use view_model::AppViewModel;
