use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Hyperparameters and hooks for a `train_loop` run.
///
/// - `lambda`            — fixed learning rate applied to every weight change
/// - `max_iterations`    — hard cap on training epochs
/// - `error_threshold`   — stop once an epoch's total error falls below this
/// - `autosave_interval` — epochs between checkpoints; `0` disables autosave
/// - `autosave_path`     — where checkpoints are written; autosave only fires
///                         when both this and a positive interval are set
/// - `stop_flag`         — optional flag another thread may set to request an
///                         early stop; inspected at the same point as the two
///                         termination conditions
pub struct TrainOptions {
    pub lambda: f64,
    pub max_iterations: u32,
    pub error_threshold: f64,
    pub autosave_interval: u32,
    pub autosave_path: Option<PathBuf>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainOptions {
    /// Minimal options: no autosave, no stop flag.
    pub fn new(lambda: f64, max_iterations: u32, error_threshold: f64) -> Self {
        TrainOptions {
            lambda,
            max_iterations,
            error_threshold,
            autosave_interval: 0,
            autosave_path: None,
            stop_flag: None,
        }
    }
}
