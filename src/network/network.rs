use anyhow::Result;

use crate::activation::{sigmoid, sigmoid_prime};
use crate::network::topology::Topology;
use crate::weights::tensor::WeightTensor;

/// A four-layer feedforward network (input, two hidden, output) trained by
/// online backpropagation.
///
/// The input vector is never copied into the network; the forward and
/// backward passes read it straight from the caller's slice. Hidden and
/// output activations, the pre-activation sums, and the output error signal
/// are cached per example for the weight update.
pub struct Network {
    topology: Topology,
    weights: WeightTensor,

    // Activations for layers 1..3; overwritten by every forward pass.
    hidden1: Vec<f64>,
    hidden2: Vec<f64>,
    output: Vec<f64>,

    // Pre-activation sums for layers 1..3, filled by `run_detailed` only.
    // Kept raw so the derivative is not taken of an already-activated value.
    theta1: Vec<f64>,
    theta2: Vec<f64>,
    theta3: Vec<f64>,

    // Output-layer error signal, seeded by `run_detailed`.
    psi: Vec<f64>,

    total_error: f64,
    print_detailed: bool,
}

impl Network {
    /// Builds a network with all-zero weights. Weights are installed
    /// afterwards, either freshly randomized or loaded from a file.
    pub fn new(topology: Topology, print_detailed: bool) -> Network {
        let weights = WeightTensor::zeros(topology.sizes());
        Network {
            hidden1: vec![0.0; topology.layer(1)],
            hidden2: vec![0.0; topology.layer(2)],
            output: vec![0.0; topology.layer(3)],
            theta1: vec![0.0; topology.layer(1)],
            theta2: vec![0.0; topology.layer(2)],
            theta3: vec![0.0; topology.layer(3)],
            psi: vec![0.0; topology.layer(3)],
            topology,
            weights,
            total_error: 0.0,
            print_detailed,
        }
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &WeightTensor {
        &self.weights
    }

    /// Installs a weight tensor after checking it against the topology.
    pub fn set_weights(&mut self, weights: WeightTensor) -> Result<()> {
        weights.check_shape(self.topology.sizes())?;
        self.weights = weights;
        Ok(())
    }

    pub fn print_detailed(&self) -> bool {
        self.print_detailed
    }

    /// Sum over all examples since the last reset of
    /// `0.5 * (target - actual)^2` per output node. Accumulated by
    /// `run_detailed`; the trainer resets it at the start of each epoch.
    pub fn total_error(&self) -> f64 {
        self.total_error
    }

    pub fn reset_error(&mut self) {
        self.total_error = 0.0;
    }

    /// Forward pass. Returns the output-layer activations.
    ///
    /// The nesting recomputes each inner layer once per outer index and
    /// caches its activations as soon as they are fully accumulated. The
    /// traversal order is fixed; restructuring it into three independent
    /// matrix-vector products would change the floating-point results.
    pub fn run(&mut self, input: &[f64]) -> &[f64] {
        let w = &self.weights.layers;

        for i in 0..self.topology.layer(3) {
            let mut theta_i = 0.0;

            for j in 0..self.topology.layer(2) {
                let mut theta_j = 0.0;

                for k in 0..self.topology.layer(1) {
                    let mut theta_k = 0.0;

                    for m in 0..self.topology.layer(0) {
                        theta_k += input[m] * w[0].data[m][k];
                    }

                    self.hidden1[k] = sigmoid(theta_k);
                    theta_j += self.hidden1[k] * w[1].data[k][j];
                }

                self.hidden2[j] = sigmoid(theta_j);
                theta_i += self.hidden2[j] * w[2].data[j][i];
            }

            self.output[i] = sigmoid(theta_i);
        }

        &self.output
    }

    /// Forward pass in training mode: same traversal as `run`, but every
    /// pre-activation sum is cached, the squared error is accumulated into
    /// `total_error`, and the output error signal is seeded in the same pass
    /// as the prediction.
    pub fn run_detailed(&mut self, input: &[f64], target: &[f64]) {
        let w = &self.weights.layers;

        for i in 0..self.topology.layer(3) {
            self.theta3[i] = 0.0;

            for j in 0..self.topology.layer(2) {
                self.theta2[j] = 0.0;

                for k in 0..self.topology.layer(1) {
                    self.theta1[k] = 0.0;

                    for m in 0..self.topology.layer(0) {
                        self.theta1[k] += input[m] * w[0].data[m][k];
                    }

                    self.hidden1[k] = sigmoid(self.theta1[k]);
                    self.theta2[j] += self.hidden1[k] * w[1].data[k][j];
                }

                self.hidden2[j] = sigmoid(self.theta2[j]);
                self.theta3[i] += self.hidden2[j] * w[2].data[j][i];
            }

            self.output[i] = sigmoid(self.theta3[i]);
            let diff = target[i] - self.output[i];
            self.total_error += 0.5 * diff * diff;
            self.psi[i] = diff * sigmoid_prime(self.theta3[i]);
        }
    }

    /// Applies one example's weight update in place, consuming the caches
    /// filled by `run_detailed` for that same example.
    ///
    /// Ordering contract: for every connection, the backpropagated error
    /// contribution is accumulated from the weight's value *before* this
    /// example's update touches that connection. With the hidden-1-outer
    /// nesting this means the output-layer weights are read and re-written
    /// once per hidden-1 index, and later indices see the earlier updates.
    pub fn update_weights(&mut self, input: &[f64], lambda: f64) {
        let w = &mut self.weights.layers;

        for k in 0..self.topology.layer(1) {
            let mut omega_k = 0.0;

            for j in 0..self.topology.layer(2) {
                let mut omega_j = 0.0;

                for i in 0..self.topology.layer(3) {
                    omega_j += self.psi[i] * w[2].data[j][i];
                    w[2].data[j][i] += lambda * self.hidden2[j] * self.psi[i];
                }

                let psi_j = omega_j * sigmoid_prime(self.theta2[j]);
                omega_k += psi_j * w[1].data[k][j];
                w[1].data[k][j] += lambda * self.hidden1[k] * psi_j;
            }

            let psi_k = omega_k * sigmoid_prime(self.theta1[k]);

            for m in 0..self.topology.layer(0) {
                w[0].data[m][k] += lambda * input[m] * psi_k;
            }
        }
    }

    /// Forward pass plus one report line on stdout: the outputs, the targets
    /// when given, and an echo of the inputs in detailed mode.
    pub fn run_with_output(&mut self, input: &[f64], target: Option<&[f64]>) {
        self.run(input);

        println!();
        if self.print_detailed {
            print!("Inputs:");
            for value in input {
                print!(" {}", value);
            }
            print!(", ");
        }

        print!("F:");
        for value in &self.output {
            print!(" {}", value);
        }

        if let Some(target) = target {
            print!(", T:");
            for value in target {
                print!(" {}", value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    fn network_2221(w0: [[f64; 2]; 2], w1: [[f64; 2]; 2], w2: [[f64; 1]; 2]) -> Network {
        let topology = Topology::new(&[2, 2, 2, 1]).unwrap();
        let mut net = Network::new(topology, false);
        net.set_weights(WeightTensor {
            layers: vec![
                Matrix::from_data(w0.iter().map(|r| r.to_vec()).collect()),
                Matrix::from_data(w1.iter().map(|r| r.to_vec()).collect()),
                Matrix::from_data(w2.iter().map(|r| r.to_vec()).collect()),
            ],
        })
        .unwrap();
        net
    }

    /// Closed-form nested-sigmoid composition for the 2-2-2-1 shape, written
    /// independently of the engine's loop structure.
    fn closed_form_2221(
        input: &[f64],
        w0: &[[f64; 2]; 2],
        w1: &[[f64; 2]; 2],
        w2: &[[f64; 1]; 2],
    ) -> f64 {
        let a1: Vec<f64> = (0..2)
            .map(|k| sigmoid(input[0] * w0[0][k] + input[1] * w0[1][k]))
            .collect();
        let a2: Vec<f64> = (0..2)
            .map(|j| sigmoid(a1[0] * w1[0][j] + a1[1] * w1[1][j]))
            .collect();
        sigmoid(a2[0] * w2[0][0] + a2[1] * w2[1][0])
    }

    #[test]
    fn forward_matches_closed_form() {
        let w0 = [[0.4, -0.7], [0.2, 0.9]];
        let w1 = [[-0.3, 0.5], [0.8, -0.1]];
        let w2 = [[0.6], [-0.4]];
        let mut net = network_2221(w0, w1, w2);

        let input = [0.3, 0.8];
        let output = net.run(&input)[0];
        let expected = closed_form_2221(&input, &w0, &w1, &w2);

        assert!((output - expected).abs() < 1e-12);
    }

    #[test]
    fn detailed_pass_produces_same_output_as_run() {
        let w0 = [[0.4, -0.7], [0.2, 0.9]];
        let w1 = [[-0.3, 0.5], [0.8, -0.1]];
        let w2 = [[0.6], [-0.4]];
        let input = [0.1, 0.95];

        let mut net = network_2221(w0, w1, w2);
        let plain = net.run(&input)[0];

        let mut net = network_2221(w0, w1, w2);
        net.run_detailed(&input, &[1.0]);
        assert_eq!(net.output[0], plain);
    }

    #[test]
    fn total_error_is_half_squared_difference() {
        let w0 = [[0.4, -0.7], [0.2, 0.9]];
        let w1 = [[-0.3, 0.5], [0.8, -0.1]];
        let w2 = [[0.6], [-0.4]];
        let mut net = network_2221(w0, w1, w2);

        let input = [0.3, 0.8];
        let target = [0.9];
        net.run_detailed(&input, &target);

        let expected = 0.5 * (target[0] - net.output[0]).powi(2);
        assert!((net.total_error() - expected).abs() < 1e-15);
    }

    #[test]
    fn total_error_accumulates_across_examples() {
        let w0 = [[0.4, -0.7], [0.2, 0.9]];
        let w1 = [[-0.3, 0.5], [0.8, -0.1]];
        let w2 = [[0.6], [-0.4]];
        let mut net = network_2221(w0, w1, w2);

        net.run_detailed(&[0.3, 0.8], &[0.9]);
        let first = net.total_error();
        net.run_detailed(&[0.1, 0.2], &[0.2]);
        assert!(net.total_error() > first);

        net.reset_error();
        assert_eq!(net.total_error(), 0.0);
    }

    /// Mirrors the updater by hand for a 1-1-1-1 network, using the
    /// pre-update weight in the error accumulation, and checks the engine
    /// produces exactly those numbers. Also checks that accumulating from
    /// the post-update weight would give a different hidden-layer update,
    /// guarding the read-before-write ordering.
    #[test]
    fn updater_reads_weights_before_writing() {
        let topology = Topology::new(&[1, 1, 1, 1]).unwrap();
        let mut net = Network::new(topology, false);
        let (w0, w1, w2) = (0.5, -0.25, 0.75);
        net.set_weights(WeightTensor {
            layers: vec![
                Matrix::from_data(vec![vec![w0]]),
                Matrix::from_data(vec![vec![w1]]),
                Matrix::from_data(vec![vec![w2]]),
            ],
        })
        .unwrap();

        let input = [0.8];
        let target = [0.2];
        let lambda = 0.5;
        net.run_detailed(&input, &target);

        // Hand computation, pre-update reads.
        let theta1 = input[0] * w0;
        let a1 = sigmoid(theta1);
        let theta2 = a1 * w1;
        let a2 = sigmoid(theta2);
        let theta3 = a2 * w2;
        let a3 = sigmoid(theta3);
        let psi = (target[0] - a3) * sigmoid_prime(theta3);

        let omega_j = psi * w2;
        let new_w2 = w2 + lambda * a2 * psi;
        let psi_j = omega_j * sigmoid_prime(theta2);
        let omega_k = psi_j * w1;
        let new_w1 = w1 + lambda * a1 * psi_j;
        let psi_k = omega_k * sigmoid_prime(theta1);
        let new_w0 = w0 + lambda * input[0] * psi_k;

        net.update_weights(&input, lambda);
        let w = &net.weights().layers;
        assert!((w[2].data[0][0] - new_w2).abs() < 1e-15);
        assert!((w[1].data[0][0] - new_w1).abs() < 1e-15);
        assert!((w[0].data[0][0] - new_w0).abs() < 1e-15);

        // The corrupted variant: accumulate omega from the already-updated
        // weight. It must disagree with what the engine computed.
        let bad_omega_j = psi * new_w2;
        let bad_psi_j = bad_omega_j * sigmoid_prime(theta2);
        let bad_w1 = w1 + lambda * a1 * bad_psi_j;
        assert!((w[1].data[0][0] - bad_w1).abs() > 1e-12);
    }

    #[test]
    fn update_moves_output_toward_target() {
        let w0 = [[0.4, -0.7], [0.2, 0.9]];
        let w1 = [[-0.3, 0.5], [0.8, -0.1]];
        let w2 = [[0.6], [-0.4]];
        let mut net = network_2221(w0, w1, w2);

        let input = [0.3, 0.8];
        let target = [0.95];

        net.run_detailed(&input, &target);
        let before = (target[0] - net.output[0]).abs();
        net.update_weights(&input, 0.5);

        let after = (target[0] - net.run(&input)[0]).abs();
        assert!(after < before);
    }

    #[test]
    fn rejects_misshapen_weights() {
        let topology = Topology::new(&[2, 2, 2, 1]).unwrap();
        let mut net = Network::new(topology, false);
        let wrong = WeightTensor::zeros(&[2, 3, 2, 1]);
        assert!(net.set_weights(wrong).is_err());
    }
}
