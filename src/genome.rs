use crate::network::Save;
use serde::{Deserialize, Serialize};

/// A network's flat weights, along with the score it earned. `network` is discarded once the
/// genome's generation ages past score-only retention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub score: f64,
    pub network: Option<Save>,
}

impl Genome {
    pub fn new(score: f64, network: Save) -> Self {
        Self {
            score,
            network: Some(network),
        }
    }

    #[inline]
    pub fn network(&self) -> Option<&Save> {
        self.network.as_ref()
    }

    /// Drop the network, keeping only the score
    #[inline]
    pub fn strip(&mut self) {
        self.network = None;
    }
}
