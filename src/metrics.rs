//! Rap engine metrics.

use metrics::Counter;
use metrics_derive::Metrics;

/// Metrics for a [`RapEngine`](crate::engine::RapEngine).
#[derive(Metrics, Clone)]
#[metrics(scope = "raps")]
pub struct EngineMetrics {
    /// Number of raps executed.
    pub executed: Counter,
    /// Number of raps that ended with an error.
    pub failed: Counter,
    /// Number of atomic attempts.
    pub atomic_attempts: Counter,
    /// Number of successful atomic submissions.
    pub atomic_successes: Counter,
    /// Number of atomic attempts that fell back to sequential execution.
    pub atomic_fallbacks: Counter,
    /// Number of atomic attempts the user rejected.
    pub user_rejections: Counter,
    /// Number of actions executed sequentially.
    pub sequential_actions: Counter,
    /// Number of sequential actions that failed.
    pub action_failures: Counter,
}
