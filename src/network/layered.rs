use super::{Network, Save};
use crate::{
    error::{Error, Result},
    options::{Activation, Topology},
};
use rand::RngCore;
use rulinalg::{matrix::Matrix, vector::Vector};

/// A stateless feed-forward network of fully connected layers, without biases.
///
/// Weights of every non-input layer are kept as a matrix whose rows are that layer's neurons
/// and whose columns are the neurons of the previous layer. Row-major matrix data is therefore
/// exactly the flat ordering of a [Save].
#[derive(Debug, Clone)]
pub struct Layered {
    /// Transient value of every neuron, one vector per layer, input first
    values: Vec<Vector<f64>>,
    /// Incoming weights of layers 1..N
    weights: Vec<Matrix<f64>>,
    σ: Activation,
}

impl Layered {
    /// A network of `topology`, with every weight drawn from `init`
    pub fn build(topology: &Topology, σ: Activation, init: impl FnMut() -> f64) -> Result<Self> {
        Self::from_save(&Save::build(topology, init)?, σ)
    }

    /// A network of `topology` with weights uniformly distributed in [-1, 1]
    pub fn random(topology: &Topology, σ: Activation, rng: &mut impl RngCore) -> Result<Self> {
        Self::from_save(&Save::random(topology, rng)?, σ)
    }

    /// Reconstruct the layers described by `save.neurons`, then assign their weights in order
    pub fn from_save(save: &Save, σ: Activation) -> Result<Self> {
        save.validate()?;

        let mut offset = 0;
        let weights = save
            .neurons
            .windows(2)
            .map(|pair| {
                let (cols, rows) = (pair[0], pair[1]);
                let data = save.weights[offset..offset + rows * cols].to_vec();
                offset += rows * cols;
                Matrix::new(rows, cols, data)
            })
            .collect();

        Ok(Self {
            values: save.neurons.iter().map(|n| Vector::zeros(*n)).collect(),
            weights,
            σ,
        })
    }

    pub fn activation(&self) -> Activation {
        self.σ
    }
}

impl Network for Layered {
    fn evaluate(&mut self, input: &[f64]) -> Result<&[f64]> {
        let expected = self.values[0].size();
        if input.len() != expected {
            return Err(Error::InputLength {
                expected,
                found: input.len(),
            });
        }

        self.values[0].mut_data().copy_from_slice(input);
        for (idx, w) in self.weights.iter().enumerate() {
            self.values[idx + 1] = (w * &self.values[idx]).apply(&self.σ);
        }

        Ok(self.output())
    }

    fn output(&self) -> &[f64] {
        self.values.last().map(|v| v.data().as_slice()).unwrap_or(&[])
    }

    fn flush(&mut self) {
        for v in self.values.iter_mut() {
            *v = Vector::zeros(v.size());
        }
    }

    fn topology(&self) -> Vec<usize> {
        self.values.iter().map(|v| v.size()).collect()
    }

    fn to_save(&self) -> Save {
        Save {
            neurons: self.topology(),
            weights: self
                .weights
                .iter()
                .flat_map(|w| w.data().iter().copied())
                .collect(),
        }
    }
}
