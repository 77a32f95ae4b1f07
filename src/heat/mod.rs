mod diffusion;
mod prune;

pub use diffusion::diffuse;
pub use prune::{PruneOutcome, prune};
