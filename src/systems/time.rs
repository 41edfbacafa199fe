//! Clock advancement.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame and hands out fixed physics steps.
use bevy_ecs::prelude::*;

use crate::resources::worldtime::{MAX_FIXED_STEPS_PER_FRAME, WorldTime};

/// Advance elapsed, scaled and unscaled deltas on the `WorldTime` resource.
///
/// `dt` is the raw frame delta in seconds. Negative values are treated as 0.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    let dt = dt.max(0.0);
    let scaled_dt = dt * wt.time_scale.max(0.0);
    wt.elapsed += scaled_dt;
    wt.delta = scaled_dt;
    wt.unscaled_delta = dt;
    wt.fixed_accumulator += scaled_dt;
    wt.frame_count += 1;
}

/// Consume as many whole physics steps as the accumulator holds.
///
/// Returns how many times the physics schedule should run this frame. Excess
/// time beyond [`MAX_FIXED_STEPS_PER_FRAME`] steps is dropped.
pub fn take_fixed_steps(world: &mut World) -> u32 {
    let mut wt = world.resource_mut::<WorldTime>();
    if wt.fixed_delta <= 0.0 {
        return 0;
    }
    let mut steps = 0;
    while wt.fixed_accumulator >= wt.fixed_delta && steps < MAX_FIXED_STEPS_PER_FRAME {
        wt.fixed_accumulator -= wt.fixed_delta;
        steps += 1;
    }
    if steps == MAX_FIXED_STEPS_PER_FRAME && wt.fixed_accumulator >= wt.fixed_delta {
        log::debug!(
            "dropping {:.3}s of physics time after {} steps",
            wt.fixed_accumulator,
            steps
        );
        wt.fixed_accumulator = 0.0;
    }
    steps
}
