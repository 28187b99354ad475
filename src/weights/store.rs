//! Text persistence for weight tensors.
//!
//! Layout: one header line with the node counts of every layer that has
//! outgoing connections, a blank line, then one record per weight in the
//! form `layer from to value`, in arbitrary order.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::weights::tensor::WeightTensor;

/// Reads a weight tensor for the given layer sizes from `path`.
///
/// Fails if the file is missing, if the header does not match `sizes`, or if
/// any record is malformed or out of range. Records may appear in any order;
/// weights absent from the file are left at zero.
pub fn load(sizes: &[usize], path: &Path) -> Result<WeightTensor> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("weights file not found at {}", path.display()))?;
    let mut tokens = text.split_whitespace();

    for (alpha, &expected) in sizes[..sizes.len() - 1].iter().enumerate() {
        let found: usize = tokens
            .next()
            .context("weights file header is truncated")?
            .parse()
            .context("weights file header is not numeric")?;
        if found != expected {
            bail!(
                "weights file does not match network structure: layer {} has {} nodes, file says {}",
                alpha,
                expected,
                found
            );
        }
    }

    let mut tensor = WeightTensor::zeros(sizes);

    while let Some(first) = tokens.next() {
        let n: usize = first.parse().context("bad layer index in weights file")?;
        let a: usize = tokens
            .next()
            .context("truncated weight record")?
            .parse()
            .context("bad from-index in weights file")?;
        let b: usize = tokens
            .next()
            .context("truncated weight record")?
            .parse()
            .context("bad to-index in weights file")?;
        let value: f64 = tokens
            .next()
            .context("truncated weight record")?
            .parse()
            .context("bad weight value in weights file")?;

        let Some(matrix) = tensor.layers.get_mut(n) else {
            bail!("weight record references connection layer {} of {}", n, tensor.layers.len());
        };
        if a >= matrix.rows || b >= matrix.cols {
            bail!("weight record ({}, {}, {}) is out of range", n, a, b);
        }
        matrix.data[a][b] = value;
    }

    Ok(tensor)
}

/// Writes every weight of `tensor` to `path`, creating or truncating it.
pub fn save(tensor: &WeightTensor, path: &Path) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("cannot create weights file at {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let header: Vec<String> = tensor.layers.iter().map(|m| m.rows.to_string()).collect();
    writeln!(writer, "{}", header.join(" "))?;
    writeln!(writer)?;

    for (n, matrix) in tensor.layers.iter().enumerate() {
        for a in 0..matrix.rows {
            for b in 0..matrix.cols {
                writeln!(writer, "{} {} {} {}", n, a, b, matrix.data[a][b])?;
            }
        }
    }

    writer
        .flush()
        .with_context(|| format!("write to {} failed", path.display()))
}
