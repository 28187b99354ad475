use std::sync::atomic::Ordering;
use std::time::Instant;

use anyhow::Result;
use log::{debug, info};

use crate::network::Network;
use crate::train::options::TrainOptions;
use crate::train::outcome::{StopReason, TrainOutcome};
use crate::weights::store;

/// Trains `network` on the given examples until one of the termination
/// conditions fires, then makes one non-mutating reporting pass over the
/// training set.
///
/// One epoch is one pass over the examples in the order given — never
/// shuffled. Weights mutate continuously within an epoch: an example late in
/// the epoch sees the updates made by earlier examples of the same epoch.
///
/// Termination is checked once per epoch, in priority order: the iteration
/// cap, then the error threshold, then the caller's stop flag. When none
/// fires, a checkpoint is written at every multiple of the autosave
/// interval. The iteration counter starts at 1 and is advanced before the
/// checks, so a cap of N runs exactly N epochs and the first autosave lands
/// when the counter first reaches the interval.
///
/// # Panics
/// Panics if `inputs` is empty or the two slices differ in length.
pub fn train_loop(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    options: &TrainOptions,
) -> Result<TrainOutcome> {
    assert!(!inputs.is_empty(), "training set must not be empty");
    assert_eq!(
        inputs.len(),
        targets.len(),
        "inputs and targets must have equal length"
    );

    let start = Instant::now();
    let mut iteration: u32 = 1;

    let reason = loop {
        network.reset_error();

        for (input, target) in inputs.iter().zip(targets.iter()) {
            network.run_detailed(input, target);
            network.update_weights(input, options.lambda);
        }

        if network.print_detailed() {
            debug!(
                "iteration {} total error {}",
                iteration,
                network.total_error()
            );
        }

        iteration += 1;

        if iteration > options.max_iterations {
            break StopReason::MaxIterations;
        } else if network.total_error() < options.error_threshold {
            break StopReason::Converged;
        } else if stop_requested(options) {
            break StopReason::Stopped;
        } else if should_autosave(iteration, options.autosave_interval) {
            if let Some(path) = &options.autosave_path {
                info!(
                    "autosaving at {} total iterations, total error {}",
                    iteration,
                    network.total_error()
                );
                store::save(network.weights(), path)?;
            }
        }
    };

    let elapsed = start.elapsed();
    let outcome = TrainOutcome {
        reason,
        epochs: iteration - 1,
        total_error: network.total_error(),
        elapsed,
    };

    report(network, &outcome, options);

    for (input, target) in inputs.iter().zip(targets.iter()) {
        network.run_with_output(input, Some(target));
    }
    println!();

    Ok(outcome)
}

/// Autosave fires only at positive intervals and only when the counter is an
/// exact multiple.
fn should_autosave(iteration: u32, interval: u32) -> bool {
    interval > 0 && iteration % interval == 0
}

fn stop_requested(options: &TrainOptions) -> bool {
    options
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}

fn report(network: &Network, outcome: &TrainOutcome, options: &TrainOptions) {
    println!();
    match outcome.reason {
        StopReason::MaxIterations => {
            println!(
                "Max number of iterations reached ({}).",
                options.max_iterations
            );
        }
        StopReason::Converged => {
            println!("{} total iterations.", outcome.epochs);
            println!(
                "Error threshold met: {} total error compared to threshold {}.",
                network.total_error(),
                options.error_threshold
            );
        }
        StopReason::Stopped => {
            println!("Stop requested after {} iterations.", outcome.epochs);
        }
    }
    println!("{}ms elapsed.", outcome.elapsed.as_millis());
}
