//! Deterministic scene-level RNG wrapper.
//!
//! Behaviors are deterministic and never draw random numbers; randomness is
//! confined to the scene collaborator (e.g. a freshly generated goblin's
//! movement speed).  One seeded `SmallRng` per run keeps replays identical.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Simulation-level RNG.
///
/// Used only in single-threaded contexts (the apply phase).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform value in `[0, 1)`.
    #[inline]
    pub fn unit_random(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }
}
