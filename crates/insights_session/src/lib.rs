//! Insights session: wires the pure controller core to the insights
//! client and exposes the facade a view embeds.
pub mod logging;
mod session;

pub use session::{Session, ViewSink};
