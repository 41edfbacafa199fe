//! Platformer controller integration tests: jumps, coyote grace, jump
//! buffering and facing, driven through the update and physics schedules.

use bevy_ecs::prelude::*;
use glam::{Vec2, Vec3};

use whaleshark::components::boxcollider::{Aabb, BoxCollider};
use whaleshark::components::inputcontrolled::ControllerInput;
use whaleshark::components::platformer::{MovementState, PlatformerController};
use whaleshark::components::rigidbody::RigidBody;
use whaleshark::components::transform::Transform;
use whaleshark::config::movement::MoveConfig;
use whaleshark::resources::collisionworld::{CollisionWorld, Gravity};
use whaleshark::resources::worldtime::WorldTime;
use whaleshark::systems::movement::{apply_gravity_system, integrate_bodies_system};
use whaleshark::systems::platformer::{platformer_physics_system, platformer_update_system};
use whaleshark::systems::time::{take_fixed_steps, update_world_time};

const DT: f32 = 0.02;

struct Harness {
    world: World,
    update: Schedule,
    physics: Schedule,
    actor: Entity,
}

impl Harness {
    fn new(config: MoveConfig, controller: fn(MoveConfig) -> PlatformerController, y: f32) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default().with_fixed_delta(DT));
        world.insert_resource(Gravity::default());
        let mut level = CollisionWorld::new();
        level.add(
            Aabb {
                min: Vec3::new(-50.0, -1.0, -50.0),
                max: Vec3::new(50.0, 0.0, 50.0),
            },
            0,
        );
        world.insert_resource(level);
        let actor = world
            .spawn((
                controller(config),
                ControllerInput::default(),
                RigidBody::new(),
                Transform::from_xyz(0.0, y, 0.0),
                BoxCollider::new(Vec3::ONE),
            ))
            .id();

        let mut update = Schedule::default();
        update.add_systems(platformer_update_system);
        let mut physics = Schedule::default();
        physics.add_systems(
            (
                platformer_physics_system,
                apply_gravity_system,
                integrate_bodies_system,
            )
                .chain(),
        );
        Self {
            world,
            update,
            physics,
            actor,
        }
    }

    fn standing(config: MoveConfig) -> Self {
        Self::new(config, PlatformerController::planar, 0.5)
    }

    fn frame(&mut self) {
        update_world_time(&mut self.world, DT);
        self.update.run(&mut self.world);
        for _ in 0..take_fixed_steps(&mut self.world) {
            self.physics.run(&mut self.world);
        }
    }

    fn frames(&mut self, n: usize) {
        for _ in 0..n {
            self.frame();
        }
    }

    fn input(&mut self) -> Mut<'_, ControllerInput> {
        self.world.get_mut::<ControllerInput>(self.actor).unwrap()
    }

    fn press_jump(&mut self) {
        let mut input = self.input();
        input.press_jump();
    }

    fn state(&self) -> MovementState {
        self.world
            .get::<PlatformerController>(self.actor)
            .unwrap()
            .state
    }

    fn body(&self) -> &RigidBody {
        self.world.get::<RigidBody>(self.actor).unwrap()
    }

    fn transform(&self) -> &Transform {
        self.world.get::<Transform>(self.actor).unwrap()
    }
}

#[test]
fn double_jump_then_blocked() {
    let mut h = Harness::standing(MoveConfig {
        max_jumps: 2,
        ..Default::default()
    });
    h.frames(2);
    assert!(h.state().is_grounded);

    h.press_jump();
    h.frame();
    assert_eq!(h.state().jump_count, 1);
    assert!(h.body().velocity.y > 0.0);

    h.frames(4);
    assert!(!h.state().is_grounded);
    h.press_jump();
    h.frame();
    assert_eq!(h.state().jump_count, 2);

    h.frames(3);
    h.press_jump();
    h.frame();
    let state = h.state();
    assert_eq!(state.jump_count, 2);
    assert!(state.coyote_timer <= 0.0);
    // The press stays buffered; nothing consumed it.
    assert!(state.jump_buffer_timer > 0.0);
}

#[test]
fn coyote_grace_allows_a_late_jump() {
    // No spare jumps, so only the coyote grace can allow a jump.
    let config = MoveConfig {
        max_jumps: 0,
        ..Default::default()
    };

    let mut h = Harness::standing(config);
    h.frames(2);
    h.world.resource_mut::<CollisionWorld>().clear();
    h.frame();
    assert!(!h.state().is_grounded);
    h.press_jump();
    h.frame();
    assert_eq!(h.state().jump_count, 1);
    assert!(h.body().velocity.y > 0.0);

    let mut late = Harness::standing(config);
    late.frames(2);
    late.world.resource_mut::<CollisionWorld>().clear();
    late.frames(6);
    late.press_jump();
    late.frame();
    assert_eq!(late.state().jump_count, 0);
    assert!(late.body().velocity.y < 0.0);
}

#[test]
fn buffered_press_fires_on_landing() {
    let config = MoveConfig {
        max_jumps: 0,
        ..Default::default()
    };
    let mut h = Harness::new(config, PlatformerController::planar, 1.5);
    h.frame();
    while h.transform().translation.y - 0.5 > 0.3 {
        h.frame();
    }
    assert!(!h.state().is_grounded);
    h.press_jump();
    h.frame();

    let mut jumped = false;
    for _ in 0..5 {
        h.frame();
        if h.state().jump_count == 1 && h.body().velocity.y > 0.0 {
            jumped = true;
            break;
        }
    }
    assert!(jumped, "buffered jump never fired");
}

#[test]
fn stale_press_does_not_fire_on_landing() {
    let config = MoveConfig {
        max_jumps: 0,
        ..Default::default()
    };
    let mut h = Harness::new(config, PlatformerController::planar, 3.0);
    h.frame();
    h.press_jump();
    h.frame();
    h.frames(60);
    assert!(h.state().is_grounded);
    assert_eq!(h.state().jump_count, 0);
    assert!(h.body().velocity.y.abs() < 1e-3);
}

#[test]
fn planar_actor_flips_with_input() {
    let mut h = Harness::standing(MoveConfig::default());
    h.frames(2);

    h.input().axis = Vec2::new(-1.0, 0.0);
    h.frames(3);
    assert!(h.transform().scale.x < 0.0);
    assert!(h.body().velocity.x < 0.0);

    h.input().axis = Vec2::ZERO;
    h.frames(3);
    assert!(h.transform().scale.x < 0.0);
    assert_eq!(h.body().velocity.x, 0.0);

    h.input().axis = Vec2::new(0.5, 0.0);
    h.frame();
    assert!(h.transform().scale.x > 0.0);
    assert!((h.body().velocity.x - 3.0).abs() < 1e-4);
}

#[test]
fn spatial_actor_turns_towards_movement() {
    let mut h = Harness::new(MoveConfig::default(), PlatformerController::spatial, 0.5);
    h.frames(2);
    h.input().axis = Vec2::new(1.0, 0.0);
    h.frames(20);

    assert!((h.transform().yaw_degrees() - 90.0).abs() < 0.5);
    let v = h.body().velocity;
    assert!((v.x - 6.0).abs() < 1e-4);
    assert!(v.z.abs() < 1e-4);
    assert!(h.transform().translation.x > 1.0);
}

#[test]
fn jump_count_resets_only_on_landing() {
    let mut rng = fastrand::Rng::with_seed(42);
    let mut state = MovementState::default();
    for _ in 0..500 {
        let hit = rng.bool();
        let before = state.is_grounded;
        state.jump_count = 3;
        let landed = state.apply_ground_probe(hit);
        assert_eq!(landed, hit && !before);
        if landed {
            assert_eq!(state.jump_count, 0);
        } else {
            assert_eq!(state.jump_count, 3);
        }
    }
}
