use std::fs;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Runtime options for a training or evaluation run.
///
/// Loaded from a JSON file with camelCase keys. Every key is optional: a
/// missing key takes its built-in default, and a missing or malformed file
/// falls back to the defaults wholesale (with a logged notice). The value is
/// built once at startup and passed by reference to whoever needs it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Train the network, as opposed to evaluating a saved one.
    pub train: bool,
    /// Node counts for the four layers, input to output.
    pub nodes: Vec<usize>,
    /// Verbose per-example and per-iteration output.
    pub print_detailed: bool,
    /// Set file path, or one of the reserved image-dataset literals.
    pub sets_path: String,
    /// Weights to evaluate with, or to resume training from.
    pub weights_path: String,
    /// Resume training from `weights_path` instead of random weights.
    pub use_training_weights: bool,
    /// Learning rate.
    pub lambda: f64,
    pub max_iterations: u32,
    pub error_threshold: f64,
    /// Random weight range, inclusive lower bound.
    pub min_random: f64,
    /// Random weight range, exclusive upper bound.
    pub max_random: f64,
    /// Save trained weights when the run finishes (and at autosaves).
    pub save_weights: bool,
    pub saved_weights_path: String,
    /// Epochs between autosaves; 0 disables autosaving.
    pub autosave_interval: u32,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            train: true,
            nodes: vec![2, 2, 2, 1],
            print_detailed: false,
            sets_path: "sets/train.txt".to_string(),
            weights_path: "weights/weights.txt".to_string(),
            use_training_weights: false,
            lambda: 0.3,
            max_iterations: 100_000,
            error_threshold: 0.001,
            min_random: -1.0,
            max_random: 1.0,
            save_weights: true,
            saved_weights_path: "weights/saved.txt".to_string(),
            autosave_interval: 10_000,
        }
    }
}

impl Config {
    /// Loads configuration from an optional user file. Never fails: a
    /// missing or malformed file is recovered by falling back to the
    /// built-in defaults.
    pub fn load(path: Option<&str>) -> Config {
        let Some(path) = path else {
            info!("no configuration file given, using built-in defaults");
            return Config::default();
        };

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => {
                warn!("configuration file not found at {}, using built-in defaults", path);
                return Config::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(config) => {
                info!("configuration options loaded from {}", path);
                config
            }
            Err(err) => {
                warn!(
                    "malformed configuration file at {}: {}; using built-in defaults",
                    path, err
                );
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "quadnet-config-{}-{}",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn no_path_yields_defaults() {
        let config = Config::load(None);
        assert!(config.train);
        assert_eq!(config.nodes, vec![2, 2, 2, 1]);
        assert_eq!(config.lambda, 0.3);
    }

    #[test]
    fn missing_file_recovers_with_defaults() {
        let config = Config::load(Some("/nonexistent/config.json"));
        assert_eq!(config.max_iterations, Config::default().max_iterations);
    }

    #[test]
    fn malformed_file_recovers_with_defaults() {
        let path = temp_config("bad.json", "{ not json");
        let config = Config::load(path.to_str());
        fs::remove_file(&path).ok();

        assert_eq!(config.lambda, Config::default().lambda);
    }

    #[test]
    fn each_missing_key_falls_back_individually() {
        let path = temp_config("partial.json", r#"{"lambda": 0.7, "maxIterations": 42}"#);
        let config = Config::load(path.to_str());
        fs::remove_file(&path).ok();

        assert_eq!(config.lambda, 0.7);
        assert_eq!(config.max_iterations, 42);
        // Everything else untouched.
        assert_eq!(config.nodes, Config::default().nodes);
        assert_eq!(config.error_threshold, Config::default().error_threshold);
        assert_eq!(config.sets_path, Config::default().sets_path);
    }

    #[test]
    fn keys_are_camel_case_on_disk() {
        let path = temp_config(
            "camel.json",
            r#"{
                "train": false,
                "nodes": [4, 3, 3, 2],
                "printDetailed": true,
                "useTrainingWeights": true,
                "savedWeightsPath": "out.txt",
                "autosaveInterval": 500
            }"#,
        );
        let config = Config::load(path.to_str());
        fs::remove_file(&path).ok();

        assert!(!config.train);
        assert_eq!(config.nodes, vec![4, 3, 3, 2]);
        assert!(config.print_detailed);
        assert!(config.use_training_weights);
        assert_eq!(config.saved_weights_path, "out.txt");
        assert_eq!(config.autosave_interval, 500);
    }
}
