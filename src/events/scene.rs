use bevy_ecs::message::Message;

/// Progress of a scene transition: 0.0 when it starts, 0.9 once the old
/// scene is gone, 1.0 after the new one is built.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct SceneProgress {
    pub scene: String,
    pub progress: f32,
}
