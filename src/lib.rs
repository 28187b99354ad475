//! quadnet: a fixed four-layer feedforward network (input, two hidden,
//! output) trained with strict online backpropagation — per-example weight
//! updates, fixed learning rate, no batching or momentum.
//!
//! The core lives in [`network::Network`] (forward pass, detailed forward
//! pass, in-place weight update) and [`train::train_loop`] (epoch control,
//! termination, checkpointing). Weight persistence, dataset and bitmap
//! input, and configuration are boundary modules around it.

pub mod activation;
pub mod config;
pub mod data;
pub mod math;
pub mod network;
pub mod train;
pub mod weights;

// Convenience re-exports
pub use config::Config;
pub use data::Dataset;
pub use math::matrix::Matrix;
pub use network::{Network, Topology};
pub use train::{train_loop, StopReason, TrainOptions, TrainOutcome};
pub use weights::WeightTensor;
