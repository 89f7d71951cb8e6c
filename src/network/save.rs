use crate::{
    error::{Error, Result},
    options::Topology,
    random::random_unit,
    serialize::{deserialize_weights, serialize_weights},
};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// The flat form of a network. `weights` concatenates, layer by layer and neuron by neuron,
/// every neuron's incoming weights. Input neurons have none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Save {
    pub neurons: Vec<usize>,
    #[serde(
        serialize_with = "serialize_weights",
        deserialize_with = "deserialize_weights"
    )]
    pub weights: Vec<f64>,
}

/// Weights implied by a layered topology, where each neuron is connected to every neuron of the
/// previous layer. [None] when the count overflows.
pub fn weight_count(neurons: &[usize]) -> Option<usize> {
    neurons
        .windows(2)
        .try_fold(0usize, |sum, pair| sum.checked_add(pair[0].checked_mul(pair[1])?))
}

impl Save {
    /// A save of `topology`, with every weight drawn from `init`
    pub fn build(topology: &Topology, mut init: impl FnMut() -> f64) -> Result<Self> {
        topology.validate()?;
        let neurons = topology.layers();
        let count = weight_count(&neurons).ok_or_else(|| Error::WeightOverflow(neurons.clone()))?;
        let weights = (0..count).map(|_| init()).collect();
        Ok(Self { neurons, weights })
    }

    /// A save of `topology` with weights uniformly distributed in [-1, 1]
    pub fn random(topology: &Topology, rng: &mut impl RngCore) -> Result<Self> {
        Self::build(topology, || random_unit(&mut *rng))
    }

    /// The same topology as this save, with every weight redrawn
    pub fn randomized(&self, rng: &mut impl RngCore) -> Self {
        Self {
            neurons: self.neurons.clone(),
            weights: self.weights.iter().map(|_| random_unit(&mut *rng)).collect(),
        }
    }

    /// Check that the layer sizes are usable and agree with the number of weights
    pub fn validate(&self) -> Result<()> {
        if self.neurons.len() < 2 {
            return Err(Error::TopologyTooShort(self.neurons.len()));
        }
        if let Some(layer) = self.neurons.iter().position(|n| *n == 0) {
            return Err(Error::EmptyLayer { layer });
        }
        let expected = weight_count(&self.neurons)
            .ok_or_else(|| Error::WeightOverflow(self.neurons.clone()))?;
        if expected != self.weights.len() {
            return Err(Error::WeightCount {
                expected,
                found: self.weights.len(),
            });
        }
        Ok(())
    }

    pub fn to_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        let save: Self = serde_json::from_str(s)?;
        save.validate()?;
        Ok(save)
    }
}
