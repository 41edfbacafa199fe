//! Stack of modal windows. The last pushed window is the only interactive
//! one; windows below it stay visible but ignore input.
//!
//! Bookkeeping is immediate. Showing and hiding start fades on the
//! [`UiWindow`] components, which finish over the next frames. The stack
//! reaches the windows through a [`WindowStore`], so it works both from
//! systems (a `Query<&mut UiWindow>`) and with exclusive `World` access.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::uiwindow::UiWindow;

/// Access to window components by entity.
pub trait WindowStore {
    /// Run `f` on the window of `entity`, if it still has one.
    fn with_window(&mut self, entity: Entity, f: impl FnOnce(&mut UiWindow));
}

impl WindowStore for World {
    fn with_window(&mut self, entity: Entity, f: impl FnOnce(&mut UiWindow)) {
        if let Some(mut window) = self.get_mut::<UiWindow>(entity) {
            f(&mut window);
        }
    }
}

impl WindowStore for Query<'_, '_, &mut UiWindow> {
    fn with_window(&mut self, entity: Entity, f: impl FnOnce(&mut UiWindow)) {
        if let Ok(mut window) = self.get_mut(entity) {
            f(&mut window);
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct UiStack {
    stack: Vec<Entity>,
}

impl UiStack {
    /// Freeze the current top, then push, show and enable `window`.
    pub fn push(&mut self, window: Entity, store: &mut impl WindowStore) {
        if let Some(&top) = self.stack.last() {
            store.with_window(top, |w| w.set_interactable(false));
        }
        self.stack.push(window);
        store.with_window(window, |w| {
            w.show();
            w.set_interactable(true);
        });
        debug!("ui push {:?} (depth {})", window, self.stack.len());
    }

    /// Pop and hide the top window and re-enable the one below. Returns the
    /// popped window, or `None` when the stack was empty.
    pub fn pop(&mut self, store: &mut impl WindowStore) -> Option<Entity> {
        let top = self.stack.pop()?;
        store.with_window(top, |w| {
            w.set_interactable(false);
            w.hide();
        });
        if let Some(&below) = self.stack.last() {
            store.with_window(below, |w| w.set_interactable(true));
        }
        debug!("ui pop {:?} (depth {})", top, self.stack.len());
        Some(top)
    }

    /// Pop and hide everything.
    pub fn clear(&mut self, store: &mut impl WindowStore) {
        while let Some(window) = self.stack.pop() {
            store.with_window(window, |w| {
                w.set_interactable(false);
                w.hide();
            });
        }
    }

    /// Forget every window without touching them, for when they are about to
    /// be despawned anyway.
    pub fn reset(&mut self) {
        self.stack.clear();
    }

    pub fn top(&self) -> Option<Entity> {
        self.stack.last().copied()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn contains(&self, window: Entity) -> bool {
        self.stack.contains(&window)
    }
}
