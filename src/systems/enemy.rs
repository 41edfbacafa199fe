//! Enemy death rewards.
use bevy_ecs::prelude::*;
use log::debug;

use crate::components::enemy::{Enemy, Pickup};
use crate::components::transform::Transform;
use crate::events::health::HealthMessage;
use crate::resources::rng::GameRng;
use crate::systems::gamemanager::add_score;

/// Award score and roll a drop for every enemy that died this frame.
pub fn enemy_death_system(
    mut messages: MessageReader<HealthMessage>,
    enemies: Query<(&Enemy, Option<&Transform>)>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
) {
    for message in messages.read() {
        let HealthMessage::Died { entity } = *message else {
            continue;
        };
        let Ok((enemy, transform)) = enemies.get(entity) else {
            continue;
        };
        let score = enemy.config.score_value;
        commands.queue(move |world: &mut World| {
            add_score(world, score);
        });
        if let Some(item) = enemy.config.roll_drop(&mut rng.0) {
            debug!("{} dropped {}", enemy.config.name, item);
            let at = transform.copied().unwrap_or_default();
            commands.spawn((
                Pickup {
                    item: item.to_string(),
                },
                Transform::from_translation(at.translation),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::enemy::EnemyConfig;
    use crate::events::health::DamageEvent;
    use crate::resources::gamemanager::GameManager;
    use crate::systems::health::setup_health;
    use glam::Vec3;

    #[test]
    fn dead_enemy_scores_and_drops() {
        let mut world = World::new();
        world.init_resource::<GameManager>();
        world.insert_resource(GameRng::seeded(5));
        setup_health(&mut world);
        let config = EnemyConfig {
            score_value: 250,
            drop_chance: 1.0,
            drop_items: vec!["coin".into()],
            ..Default::default()
        };
        let enemy = world.spawn(Enemy::bundle(config, Vec3::new(2.0, 0.0, 0.0))).id();
        let bystander = world.spawn(Transform::default()).id();

        world.trigger(DamageEvent::new(enemy, 1000.0));
        world.trigger(DamageEvent::new(bystander, 1000.0));
        world.flush();

        let mut schedule = Schedule::default();
        schedule.add_systems(enemy_death_system);
        schedule.run(&mut world);

        assert_eq!(world.resource::<GameManager>().score, 250);
        let mut pickups = world.query::<(&Pickup, &Transform)>();
        let drops: Vec<_> = pickups.iter(&world).collect();
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].0.item, "coin");
        assert_eq!(drops[0].1.translation, Vec3::new(2.0, 0.0, 0.0));
    }
}
