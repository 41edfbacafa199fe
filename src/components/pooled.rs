use bevy_ecs::prelude::Component;

/// Membership of an [`EntityPool`](crate::resources::pool::EntityPool)
/// instance. Idle instances have `active == false`.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Pooled {
    pub prefab: String,
    pub active: bool,
}

impl Pooled {
    pub fn new(prefab: impl Into<String>) -> Self {
        Self {
            prefab: prefab.into(),
            active: false,
        }
    }
}
