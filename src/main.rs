use std::env;
use std::path::{Path, PathBuf};

use anyhow::Result;
use log::error;

use quadnet::data::sets;
use quadnet::weights::store;
use quadnet::{train_loop, Config, Network, Topology, TrainOptions, WeightTensor};

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{:#}. Aborting process.", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config_path = env::args().nth(1);
    let config = Config::load(config_path.as_deref());

    let topology = Topology::new(&config.nodes)?;

    let sizes: Vec<String> = topology.sizes().iter().map(|n| n.to_string()).collect();
    println!();
    println!("Network configuration: {}", sizes.join(" "));
    println!();

    let mut network = Network::new(topology, config.print_detailed);

    if config.train {
        train(&mut network, &config)
    } else {
        evaluate(&mut network, &config)
    }
}

/// Trains from fresh random weights (or resumes from a saved file), then
/// saves the result when requested.
fn train(network: &mut Network, config: &Config) -> Result<()> {
    println!("Training network.");
    println!(" - Random weight range: {} to {}", config.min_random, config.max_random);
    println!(" - Max iterations: {}", config.max_iterations);
    println!(" - Lambda: {}", config.lambda);

    let weights = if config.use_training_weights {
        store::load(network.topology().sizes(), Path::new(&config.weights_path))?
    } else {
        WeightTensor::random(
            network.topology().sizes(),
            config.min_random,
            config.max_random,
        )
    };
    network.set_weights(weights)?;

    let dataset = sets::load(
        network.topology().input(),
        network.topology().output(),
        &config.sets_path,
    )?;

    let options = TrainOptions {
        lambda: config.lambda,
        max_iterations: config.max_iterations,
        error_threshold: config.error_threshold,
        autosave_interval: if config.save_weights { config.autosave_interval } else { 0 },
        autosave_path: if config.save_weights {
            Some(PathBuf::from(&config.saved_weights_path))
        } else {
            None
        },
        stop_flag: None,
    };

    train_loop(network, &dataset.inputs, &dataset.targets, &options)?;

    if config.save_weights {
        store::save(network.weights(), Path::new(&config.saved_weights_path))?;
    }

    Ok(())
}

/// Evaluates saved weights against a testing set, printing each example's
/// outputs next to its targets.
fn evaluate(network: &mut Network, config: &Config) -> Result<()> {
    println!("Running network.");

    let weights = store::load(network.topology().sizes(), Path::new(&config.weights_path))?;
    network.set_weights(weights)?;

    let dataset = sets::load(
        network.topology().input(),
        network.topology().output(),
        &config.sets_path,
    )?;

    for (input, target) in dataset.inputs.iter().zip(dataset.targets.iter()) {
        network.run_with_output(input, Some(target));
    }
    println!();

    Ok(())
}
