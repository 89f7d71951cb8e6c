//! Fixed-topology feed-forward networks, and the flat [Save] form that the genetic operators
//! work on. A network is only ever built from a topology with random weights, or from a [Save].

pub mod layered;
pub mod save;

pub use layered::Layered;
pub use save::Save;

use crate::error::Result;

pub mod activate {
    use core::f64::consts::E;

    /// Logistic sigmoid, the default activation
    pub fn sigmoid(x: f64) -> f64 {
        1. / (1. + E.powf(-x))
    }

    pub fn steep_sigmoid(x: f64) -> f64 {
        1. / (1. + E.powf(-4.9 * x))
    }

    pub fn relu(x: f64) -> f64 {
        if x < 0. {
            0.
        } else {
            x
        }
    }

    pub fn tanh(x: f64) -> f64 {
        x.tanh()
    }
}

/// The trait for all networks. Right now, only f64 values are used.
pub trait Network {
    /// Feed `input` forward through every layer, returning the output layer's values.
    /// Input must be exactly as wide as the input layer.
    fn evaluate(&mut self, input: &[f64]) -> Result<&[f64]>;

    /// The network's most recent output
    fn output(&self) -> &[f64];

    /// Zero every neuron's transient value
    fn flush(&mut self);

    /// Neurons per layer, input first
    fn topology(&self) -> Vec<usize>;

    /// Flatten this network's weights into a [Save]
    fn to_save(&self) -> Save;
}

#[cfg(test)]
mod test {
    use super::activate::*;
    use crate::assert_f64_approx;

    #[test]
    fn test_activations() {
        assert_f64_approx!(0.5, sigmoid(0.));
        assert!(sigmoid(10.) > 0.99);
        assert!(sigmoid(-10.) < 0.01);
        assert_f64_approx!(0.5, steep_sigmoid(0.));
        assert!(steep_sigmoid(1.) > sigmoid(1.));
        assert_f64_approx!(0., relu(-3.));
        assert_f64_approx!(3., relu(3.));
        assert_f64_approx!(0., tanh(0.));
    }
}
