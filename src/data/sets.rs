//! Training and testing set input.
//!
//! A set file is whitespace-delimited text: the example count first, then
//! per example the input values followed by the target values. Two reserved
//! path literals select the built-in hand-image datasets instead of a file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};

use crate::data::images;

/// Reserved path literal selecting the 25 built-in training images.
pub const TRAINING_IMAGES: &str = "TRAINING_IMAGES";
/// Reserved path literal selecting the 5 built-in testing images.
pub const TESTING_IMAGES: &str = "TESTING_IMAGES";

const HANDS_DIR: &str = "images/hands";
const CLASSES: usize = 5;
const TRAIN_SAMPLES: usize = 5;
const TEST_SAMPLE: usize = 6;

/// An ordered set of (input, target) example pairs. Order is significant:
/// training processes examples sequentially and never shuffles.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub inputs: Vec<Vec<f64>>,
    pub targets: Vec<Vec<f64>>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Loads the set named by `path`: one of the reserved image literals, or a
/// text file of `input_nodes`-wide inputs and `output_nodes`-wide targets.
pub fn load(input_nodes: usize, output_nodes: usize, path: &str) -> Result<Dataset> {
    match path {
        TRAINING_IMAGES => training_images(input_nodes),
        TESTING_IMAGES => testing_images(input_nodes),
        _ => from_file(input_nodes, output_nodes, Path::new(path)),
    }
}

fn from_file(input_nodes: usize, output_nodes: usize, path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("training/testing file not found at {}", path.display()))?;
    let mut tokens = text.split_whitespace();

    let count: usize = tokens
        .next()
        .context("set file is empty")?
        .parse()
        .context("set file does not start with an example count")?;

    let mut inputs = Vec::with_capacity(count);
    let mut targets = Vec::with_capacity(count);

    for t in 0..count {
        let mut input = Vec::with_capacity(input_nodes);
        for _ in 0..input_nodes {
            input.push(next_value(&mut tokens, t, path)?);
        }
        let mut target = Vec::with_capacity(output_nodes);
        for _ in 0..output_nodes {
            target.push(next_value(&mut tokens, t, path)?);
        }
        inputs.push(input);
        targets.push(target);
    }

    Ok(Dataset { inputs, targets })
}

fn next_value<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    example: usize,
    path: &Path,
) -> Result<f64> {
    tokens
        .next()
        .with_context(|| format!("set file {} ends inside example {}", path.display(), example))?
        .parse()
        .with_context(|| format!("non-numeric token in example {} of {}", example, path.display()))
}

/// The training corpus: samples 1 through `TRAIN_SAMPLES` of every class.
fn training_images(input_nodes: usize) -> Result<Dataset> {
    let mut inputs = Vec::with_capacity(CLASSES * TRAIN_SAMPLES);
    let mut targets = Vec::with_capacity(CLASSES * TRAIN_SAMPLES);

    for class in 1..=CLASSES {
        for sample in 1..=TRAIN_SAMPLES {
            inputs.push(hand_image(class, sample, input_nodes)?);
            targets.push(vec![0.1 * class as f64]);
        }
    }

    Ok(Dataset { inputs, targets })
}

/// The held-out corpus: sample `TEST_SAMPLE` of every class.
fn testing_images(input_nodes: usize) -> Result<Dataset> {
    let mut inputs = Vec::with_capacity(CLASSES);
    let mut targets = Vec::with_capacity(CLASSES);

    for class in 1..=CLASSES {
        inputs.push(hand_image(class, TEST_SAMPLE, input_nodes)?);
        targets.push(vec![0.1 * class as f64]);
    }

    Ok(Dataset { inputs, targets })
}

fn hand_image(class: usize, sample: usize, input_nodes: usize) -> Result<Vec<f64>> {
    let path: PathBuf = Path::new(HANDS_DIR).join(format!("{}_{}.bmp", class, sample));
    let pixels = images::load_grayscale(&path)?;
    ensure!(
        pixels.len() == input_nodes,
        "image {} has {} pixels, network expects {} inputs",
        path.display(),
        pixels.len(),
        input_nodes
    );
    Ok(pixels)
}
