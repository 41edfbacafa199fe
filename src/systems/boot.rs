//! Startup flow and the screen fade tick.
use bevy_ecs::prelude::*;
use log::info;

use crate::resources::boot::{BootSequence, BootStage};
use crate::resources::save::load_save;
use crate::resources::scene::SceneLoader;
use crate::resources::screenfade::ScreenFade;
use crate::resources::worldtime::WorldTime;

pub fn screen_fade_system(time: Res<WorldTime>, mut fade: ResMut<ScreenFade>) {
    if fade.is_fading() {
        fade.tick(time.unscaled_delta);
    }
}

/// Step the [`BootSequence`] once per frame. Does nothing once it is done or
/// when there is none.
///
/// Exclusive because loading the save applies settings across several
/// resources.
pub fn boot_system(world: &mut World) {
    let Some(stage) = world.get_resource::<BootSequence>().map(|b| b.stage()) else {
        return;
    };
    match stage {
        BootStage::LoadSave => {
            load_save(world);
            world.resource_mut::<BootSequence>().advance_to(BootStage::Waiting);
        }
        BootStage::Waiting => {
            let dt = world.resource::<WorldTime>().delta;
            let elapsed = {
                let mut boot = world.resource_mut::<BootSequence>();
                let elapsed = boot.wait(dt);
                if elapsed {
                    boot.advance_to(BootStage::FadingIn);
                }
                elapsed
            };
            if elapsed {
                world.get_resource_or_init::<ScreenFade>().fade_in();
            }
        }
        BootStage::FadingIn => {
            if world
                .get_resource::<ScreenFade>()
                .is_some_and(|fade| fade.is_fading())
            {
                return;
            }
            let scene = {
                let mut boot = world.resource_mut::<BootSequence>();
                boot.advance_to(BootStage::Done);
                boot.first_scene.clone()
            };
            info!("boot complete; loading '{}'", scene);
            world.get_resource_or_init::<SceneLoader>().load(scene);
        }
        BootStage::Done => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::save::{MemoryStore, SaveService};
    use crate::resources::scene::GAMEPLAY_SCENE;

    fn frame(world: &mut World, schedule: &mut Schedule, dt: f32) {
        {
            let mut time = world.resource_mut::<WorldTime>();
            time.delta = dt;
            time.unscaled_delta = dt;
        }
        schedule.run(world);
    }

    #[test]
    fn boot_runs_all_stages_in_order() {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(ScreenFade::opaque());
        world.insert_resource(SaveService::new(MemoryStore::with_json(
            r#"{"highScore": 7}"#,
        )));
        world.init_resource::<SceneLoader>();
        world.insert_resource(BootSequence::default());
        let mut schedule = Schedule::default();
        schedule.add_systems((screen_fade_system, boot_system).chain());

        frame(&mut world, &mut schedule, 0.0);
        assert_eq!(world.resource::<SaveService>().data().high_score, 7);
        assert_eq!(world.resource::<BootSequence>().stage(), BootStage::Waiting);

        frame(&mut world, &mut schedule, 0.6);
        assert_eq!(world.resource::<BootSequence>().stage(), BootStage::Waiting);
        frame(&mut world, &mut schedule, 0.6);
        assert_eq!(world.resource::<BootSequence>().stage(), BootStage::FadingIn);
        assert!(world.resource::<ScreenFade>().blocks_input());
        assert_eq!(world.resource::<SceneLoader>().pending(), None);

        frame(&mut world, &mut schedule, 0.3);
        assert!(!world.resource::<ScreenFade>().blocks_input());
        assert!(world.resource::<BootSequence>().is_done());
        assert_eq!(world.resource::<SceneLoader>().pending(), Some(GAMEPLAY_SCENE));
    }
}
