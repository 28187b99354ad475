use std::f64::consts::E;

/// The logistic sigmoid `1 / (1 + e^(-x))`.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Derivative of the sigmoid, `f(x) * (1 - f(x))`.
///
/// Must be evaluated on the raw pre-activation sum, not on an already
/// activated value; callers cache the pre-activation sums for this reason.
pub fn sigmoid_prime(x: f64) -> f64 {
    let fx = sigmoid(x);
    fx * (1.0 - fx)
}
