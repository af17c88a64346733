mod evaluator;
mod event;
mod route;
mod state;
mod store;

pub use evaluator::AlertEvaluator;
pub use event::AlertEvent;
pub use route::{AlertRoute, AlertRoutes};
pub use state::{ScaleState, ScaleStatus};
pub use store::ScaleStateStore;

#[cfg(test)]
mod tests;
