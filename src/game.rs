//! World assembly and the frame driver.
//!
//! [`build_world`] inserts every service resource, installs the observers and
//! bus subscribers, and registers the two scenes. [`GameLoop`] owns the world
//! and its three schedules and advances one host frame at a time:
//!
//! 1. advance [`WorldTime`]
//! 2. run the update schedule once
//! 3. run the physics schedule once per whole fixed step
//! 4. run the late schedule (input edges, message buffers)
//! 5. apply a pending scene transition
//!
//! [`DemoInput`] stands in for a device so the binary can play by itself.

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use crossbeam_channel::Receiver;
use glam::{Vec2, Vec3};
use log::{debug, info};

use crate::components::boxcollider::{Aabb, BoxCollider, layer_bit};
use crate::components::camera::CameraRig;
use crate::components::enemy::{ENEMY_LAYER, Enemy};
use crate::components::health::{Health, HealthConfig};
use crate::components::inputcontrolled::{ControllerInput, Player};
use crate::components::persistent::Persistent;
use crate::components::platformer::{GroundCheck, PlatformerController};
use crate::components::projectile::Projectile;
use crate::components::rigidbody::RigidBody;
use crate::components::tint::Tint;
use crate::components::transform::Transform;
use crate::components::uiwindow::UiWindow;
use crate::config::enemy::EnemyConfig;
use crate::events::audio::AudioCmd;
use crate::events::bus::ToastMessage;
use crate::events::input::{InputAction, InputEvent};
use crate::events::scene::SceneProgress;
use crate::resources::audio::{AudioManager, setup_audio};
use crate::resources::boot::BootSequence;
use crate::resources::collisionworld::{CollisionWorld, Gravity};
use crate::resources::debughud::DebugHud;
use crate::resources::eventbus::EventBusExt;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamemanager::GameManager;
use crate::resources::input::{InputFrame, InputSource, InputState};
use crate::resources::pool::{DEFAULT_WARM_COUNT, EntityPool, warm_up};
use crate::resources::rng::GameRng;
use crate::resources::save::SaveService;
use crate::resources::scene::{GAMEPLAY_SCENE, MAIN_MENU_SCENE, SceneLoader, register_scene};
use crate::resources::screenfade::ScreenFade;
use crate::resources::uistack::UiStack;
use crate::resources::worldtime::WorldTime;
use crate::systems::audio::{audio_manager_system, forward_audio_cmds, update_audio_cmds};
use crate::systems::boot::{boot_system, screen_fade_system};
use crate::systems::camera::{camera_follow_system, setup_camera};
use crate::systems::debughud::debug_hud_system;
use crate::systems::enemy::enemy_death_system;
use crate::systems::gameconfig::apply_gameconfig_changes;
use crate::systems::gamemanager::{game_time_system, setup_game_manager};
use crate::systems::health::{invincibility_system, setup_health, update_health_messages};
use crate::systems::input::{
    clear_input_edges, emit_input_events, player_input_system, update_input_state,
};
use crate::systems::movement::{apply_gravity_system, integrate_bodies_system};
use crate::systems::platformer::{platformer_physics_system, platformer_update_system};
use crate::systems::projectile::{
    fire_projectile, projectile_hit_system, projectile_lifetime_system,
};
use crate::systems::scene::{apply_scene_transition, update_scene_progress};
use crate::systems::time::{take_fixed_steps, update_world_time};
use crate::systems::toast::{setup_toasts, toast_system};
use crate::systems::ttl::ttl_system;
use crate::systems::ui::{setup_ui, window_fade_system};

/// Static level geometry.
pub const LEVEL_LAYER: u8 = 0;
pub const PLAYER_LAYER: u8 = 1;
/// Pool key of the player's shot.
pub const PROJECTILE_PREFAB: &str = "projectile";

fn projectile_prefab(world: &mut World) -> Entity {
    world
        .spawn((
            Projectile::default()
                .with_hit_effect("spark")
                .with_hit_sound("hit")
                .with_hit_mask(layer_bit(ENEMY_LAYER) | layer_bit(LEVEL_LAYER)),
            RigidBody::kinematic(),
            Transform::default(),
            BoxCollider::planar(0.25, 0.25).as_trigger(),
        ))
        .id()
}

fn build_gameplay_scene(world: &mut World) {
    {
        let mut level = world.resource_mut::<CollisionWorld>();
        // Floor, a ledge and two walls.
        for (center, half) in [
            (Vec3::new(0.0, -0.5, 0.0), Vec3::new(40.0, 0.5, 1.0)),
            (Vec3::new(6.0, 2.0, 0.0), Vec3::new(2.0, 0.25, 1.0)),
            (Vec3::new(-40.5, 5.0, 0.0), Vec3::new(0.5, 5.0, 1.0)),
            (Vec3::new(40.5, 5.0, 0.0), Vec3::new(0.5, 5.0, 1.0)),
        ] {
            level.add(Aabb::from_center(center, half), LEVEL_LAYER);
        }
    }

    let move_config = world
        .get_resource::<GameConfig>()
        .map(|c| c.player)
        .unwrap_or_default();
    let player = world
        .spawn((
            Player,
            ControllerInput::default(),
            PlatformerController::planar(move_config),
            GroundCheck::default(),
            RigidBody::new(),
            Transform::from_xyz(0.0, 0.5, 0.0),
            BoxCollider::planar(0.8, 1.0)
                .with_layer(PLAYER_LAYER)
                .with_collides_with(layer_bit(LEVEL_LAYER)),
            Health::new(HealthConfig::player().with_invincibility(1.0)),
            Tint::default(),
        ))
        .id();

    for (i, x) in [8.0, 14.0, -10.0].into_iter().enumerate() {
        let config = EnemyConfig {
            name: format!("slime-{}", i),
            max_health: 30.0,
            score_value: 100,
            drop_items: vec!["coin".into(), "heart".into()],
            drop_chance: 0.5,
            death_effect: Some("poof".into()),
            ..Default::default()
        };
        world.spawn(Enemy::bundle(config, Vec3::new(x, 0.5, 0.0)));
    }

    world.spawn((CameraRig::following(player), Transform::default()));
    warm_up(world, PROJECTILE_PREFAB, DEFAULT_WARM_COUNT);

    if let Some(mut audio) = world.get_resource_mut::<AudioManager>() {
        audio.play_bgm_default(Some("gameplay"));
    }
    world.publish(ToastMessage::new("Go!"));
}

fn build_main_menu_scene(world: &mut World) {
    let menu = world.spawn(UiWindow::new("MainMenu")).id();
    world.resource_scope(|world, mut stack: Mut<UiStack>| stack.push(menu, world));
    if let Some(mut audio) = world.get_resource_mut::<AudioManager>() {
        audio.play_bgm_default(Some("menu"));
    }
}

/// Interact fires the player's shot in the direction they face.
fn player_fire_observer(trigger: On<InputEvent>, mut commands: Commands) {
    let event = trigger.event();
    if event.action != InputAction::Interact || !event.pressed {
        return;
    }
    commands.queue(|world: &mut World| {
        if world.resource::<GameManager>().is_paused() {
            return;
        }
        let shooter = world
            .query_filtered::<&Transform, With<Player>>()
            .iter(world)
            .next()
            .copied();
        let Some(at) = shooter else {
            return;
        };
        let direction = Vec3::X * at.scale.x.signum();
        if let Some(shot) = fire_projectile(world, PROJECTILE_PREFAB, at.translation, direction) {
            debug!("player fired {:?}", shot);
        }
    });
}

/// Assemble a world ready for its first frame.
///
/// The screen starts covered and the [`BootSequence`] loads the save and the
/// first scene. Returns the receiving end of the audio command channel.
pub fn build_world(config: GameConfig, save: SaveService) -> (World, Receiver<AudioCmd>) {
    let mut world = World::new();

    world.insert_resource(
        WorldTime::default()
            .with_fixed_delta(config.fixed_delta)
            .with_time_scale(config.time_scale),
    );
    world.insert_resource(InputState::default());
    world.insert_resource(Gravity::default());
    world.insert_resource(CollisionWorld::new());
    world.insert_resource(AudioManager::new(config.se_voices).with_default_fade(config.bgm_fade));
    let audio_rx = setup_audio(&mut world);
    world.insert_resource(save);
    world.init_resource::<SceneLoader>();
    world.init_resource::<Messages<SceneProgress>>();
    world.init_resource::<GameRng>();
    world.insert_resource(ScreenFade::opaque());
    world.insert_resource(BootSequence::new(
        config.first_scene.clone(),
        config.boot_delay,
    ));

    let mut pool = EntityPool::default();
    pool.register(PROJECTILE_PREFAB, projectile_prefab);
    world.insert_resource(pool);

    setup_health(&mut world);
    setup_game_manager(&mut world);
    setup_ui(&mut world);
    setup_toasts(&mut world);
    setup_camera(&mut world);
    world.spawn((Observer::new(player_fire_observer), Persistent));

    register_scene(&mut world, GAMEPLAY_SCENE, build_gameplay_scene);
    register_scene(&mut world, MAIN_MENU_SCENE, build_main_menu_scene);

    world.insert_resource(config);
    world.flush();
    (world, audio_rx)
}

/// A world plus the schedules that drive it.
pub struct GameLoop {
    pub world: World,
    update: Schedule,
    physics: Schedule,
    late: Schedule,
}

impl GameLoop {
    pub fn new(world: World) -> Self {
        let mut update = Schedule::default();
        update.add_systems(
            (
                (
                    apply_gameconfig_changes,
                    update_input_state,
                    emit_input_events,
                    player_input_system,
                )
                    .chain(),
                (
                    screen_fade_system,
                    boot_system,
                    platformer_update_system,
                    invincibility_system,
                    game_time_system,
                )
                    .chain(),
                (
                    projectile_lifetime_system,
                    projectile_hit_system,
                    enemy_death_system,
                    ttl_system,
                )
                    .chain(),
                (
                    camera_follow_system,
                    window_fade_system,
                    toast_system,
                    audio_manager_system,
                    forward_audio_cmds,
                    debug_hud_system.run_if(resource_exists::<DebugHud>),
                )
                    .chain(),
            )
                .chain(),
        );

        let mut physics = Schedule::default();
        physics.add_systems(
            (
                platformer_physics_system,
                apply_gravity_system,
                integrate_bodies_system,
            )
                .chain(),
        );

        let mut late = Schedule::default();
        late.add_systems(
            (
                clear_input_edges,
                update_health_messages,
                update_scene_progress,
                update_audio_cmds,
            )
                .chain(),
        );

        Self {
            world,
            update,
            physics,
            late,
        }
    }

    /// Advance one host frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.update.run(&mut self.world);
        for _ in 0..take_fixed_steps(&mut self.world) {
            self.physics.run(&mut self.world);
        }
        self.late.run(&mut self.world);
        apply_scene_transition(&mut self.world);
        self.world.clear_trackers();
    }

    pub fn should_quit(&self) -> bool {
        self.world
            .get_resource::<GameManager>()
            .is_some_and(|gm| gm.quit_requested)
    }
}

/// Input that walks back and forth, taps jump at random and fires now and
/// then.
pub struct DemoInput {
    rng: fastrand::Rng,
    direction: f32,
    jump_frames: u32,
}

impl DemoInput {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            rng,
            direction: 1.0,
            jump_frames: 0,
        }
    }
}

impl Default for DemoInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for DemoInput {
    fn poll(&mut self, frame: u64) -> InputFrame {
        if frame > 0 && frame % 240 == 0 {
            self.direction = -self.direction;
        }
        if self.jump_frames > 0 {
            self.jump_frames -= 1;
        } else if self.rng.u32(0..90) == 0 {
            // Held for a varying number of frames, so jump heights vary.
            self.jump_frames = self.rng.u32(3..15);
        }
        let mut input = InputFrame::moving(Vec2::new(self.direction, 0.0));
        input.jump = self.jump_frames > 0;
        input.interact = self.rng.u32(0..45) == 0;
        input
    }
}

/// Log a one-line summary of the session.
pub fn report_session(world: &World) {
    let Some(gm) = world.get_resource::<GameManager>() else {
        return;
    };
    let time = world.resource::<WorldTime>();
    let scene = world
        .get_resource::<SceneLoader>()
        .and_then(|l| l.current().map(str::to_string))
        .unwrap_or_else(|| "-".into());
    info!(
        "frames={} elapsed={:.2}s scene={} score={} game_time={:.2}s",
        time.frame_count, time.elapsed, scene, gm.score, gm.game_time
    );
}
