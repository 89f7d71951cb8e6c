#![allow(mixed_script_confusables)]
#![allow(confusable_idents)]

pub mod constants;
pub mod error;
pub mod evolution;
pub mod generation;
pub mod genome;
pub mod history;
pub mod macros;
pub mod network;
pub mod options;
pub mod random;
pub mod scenario;
pub mod serialize;

pub use error::{Error, Result};
pub use evolution::Evolution;
pub use generation::Generation;
pub use genome::Genome;
pub use history::History;
pub use network::{activate, Layered, Network, Save};
pub use options::{HistoryDepth, Options, ScoreOrder, Setting, Topology};
pub use scenario::{evolve, EvolutionTarget, Scenario, Stats};
