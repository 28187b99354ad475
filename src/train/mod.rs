pub mod options;
pub mod outcome;
pub mod trainer;

pub use options::TrainOptions;
pub use outcome::{StopReason, TrainOutcome};
pub use trainer::train_loop;
