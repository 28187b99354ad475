use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::math::matrix::Matrix;

/// The full set of connection weights: one matrix per adjacent layer pair.
///
/// `layers[n].data[a][b]` is the weight from node `a` in layer `n` to node
/// `b` in layer `n + 1`. The tensor itself works for any number of layers;
/// the network gates construction at four.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTensor {
    pub layers: Vec<Matrix>,
}

impl WeightTensor {
    /// All-zero tensor shaped for the given layer sizes.
    pub fn zeros(sizes: &[usize]) -> WeightTensor {
        let layers = sizes
            .windows(2)
            .map(|pair| Matrix::zeros(pair[0], pair[1]))
            .collect();
        WeightTensor { layers }
    }

    /// Tensor with every weight drawn independently and uniformly from
    /// `[min, max)`.
    pub fn random(sizes: &[usize], min: f64, max: f64) -> WeightTensor {
        let layers = sizes
            .windows(2)
            .map(|pair| Matrix::random_range(pair[0], pair[1], min, max))
            .collect();
        WeightTensor { layers }
    }

    /// Checks that every matrix matches its two adjacent layer sizes.
    pub fn check_shape(&self, sizes: &[usize]) -> Result<()> {
        ensure!(
            self.layers.len() + 1 == sizes.len(),
            "weight tensor has {} layers of connections, topology needs {}",
            self.layers.len(),
            sizes.len() - 1
        );
        for (n, m) in self.layers.iter().enumerate() {
            ensure!(
                m.rows == sizes[n] && m.cols == sizes[n + 1],
                "connection layer {} is {}x{}, topology needs {}x{}",
                n,
                m.rows,
                m.cols,
                sizes[n],
                sizes[n + 1]
            );
        }
        Ok(())
    }
}
