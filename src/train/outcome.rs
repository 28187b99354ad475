use std::time::Duration;

/// Which termination condition ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The iteration cap was hit before the error threshold.
    MaxIterations,
    /// An epoch finished with total error below the threshold.
    Converged,
    /// The caller's stop flag was set.
    Stopped,
}

/// Result of a completed `train_loop` run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainOutcome {
    pub reason: StopReason,
    /// Number of full passes over the training set that were completed.
    pub epochs: u32,
    /// Total error of the last completed epoch.
    pub total_error: f64,
    /// Wall-clock time of the whole loop.
    pub elapsed: Duration,
}
