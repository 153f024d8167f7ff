use crate::{AppState, Effect, FetchStatus, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(value) => {
            state.set_input(value);
            Vec::new()
        }
        Msg::FetchClicked => {
            // At most one operation in flight; the pending one is left
            // to complete.
            if state.status() == FetchStatus::Pending {
                return (state, Vec::new());
            }
            let op = state.begin_operation();
            let website_url = state.input().to_owned();
            vec![Effect::FetchInsights { op, website_url }]
        }
        Msg::FetchSucceeded { op, payload } => {
            state.apply_success(op, payload);
            Vec::new()
        }
        Msg::FetchFailed { op, failure } => {
            state.apply_failure(op, failure);
            Vec::new()
        }
    };

    (state, effects)
}
