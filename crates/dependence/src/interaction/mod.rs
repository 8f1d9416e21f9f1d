//! Interaction ranking.
//!
//! - [`InteractionRanker`]: windowed-correlation estimate of interaction strength
//! - [`InstanceSampler`]: bounded subsample for large inputs

mod ranker;
mod sampling;

pub use ranker::{InteractionRanker, InteractionScore, rank, windowed_correlation};
pub use sampling::InstanceSampler;
