use bevy_ecs::prelude::Resource;

/// Shared gameplay randomness (drop rolls). Seed it for reproducible runs.
#[derive(Resource, Debug, Clone)]
pub struct GameRng(pub fastrand::Rng);

impl Default for GameRng {
    fn default() -> Self {
        GameRng(fastrand::Rng::new())
    }
}

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        GameRng(fastrand::Rng::with_seed(seed))
    }
}
