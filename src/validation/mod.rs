//! URL liveness checking
//!
//! One classification attempt per URL (`classifier`), repeated while no
//! HTTP status was obtained (`retry`), fanned out over a bounded worker
//! pool (`dispatcher`).

pub mod classifier;
pub mod dispatcher;
pub mod retry;

// Re-export commonly used items
pub use classifier::{ClassifierOptions, Classify, LivenessClassifier, build_http_client};
pub use dispatcher::Dispatcher;
pub use retry::RetryController;
