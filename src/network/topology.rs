use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Number of layers the network supports: input, two hidden, output.
pub const LAYERS: usize = 4;

/// Validated node counts for the four layers, input to output.
///
/// The forward and backward passes are written against exactly this shape;
/// the topology is immutable once the network is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology([usize; LAYERS]);

impl Topology {
    /// Builds a topology from a slice of layer sizes. Fails unless there are
    /// exactly four entries, all positive.
    pub fn new(nodes: &[usize]) -> Result<Topology> {
        ensure!(
            nodes.len() == LAYERS,
            "expected {} layer sizes, got {}",
            LAYERS,
            nodes.len()
        );
        ensure!(
            nodes.iter().all(|&n| n > 0),
            "every layer must have at least one node: {:?}",
            nodes
        );

        let mut sizes = [0; LAYERS];
        sizes.copy_from_slice(nodes);
        Ok(Topology(sizes))
    }

    /// Node count of layer `alpha` (0 = input, 3 = output).
    pub fn layer(&self, alpha: usize) -> usize {
        self.0[alpha]
    }

    pub fn input(&self) -> usize {
        self.0[0]
    }

    pub fn output(&self) -> usize {
        self.0[LAYERS - 1]
    }

    pub fn sizes(&self) -> &[usize] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_four_positive_sizes() {
        let t = Topology::new(&[2, 5, 5, 3]).unwrap();
        assert_eq!(t.input(), 2);
        assert_eq!(t.layer(1), 5);
        assert_eq!(t.layer(2), 5);
        assert_eq!(t.output(), 3);
    }

    #[test]
    fn rejects_wrong_layer_count() {
        assert!(Topology::new(&[2, 3, 1]).is_err());
        assert!(Topology::new(&[2, 3, 3, 3, 1]).is_err());
    }

    #[test]
    fn rejects_empty_layer() {
        assert!(Topology::new(&[2, 0, 2, 1]).is_err());
    }
}
