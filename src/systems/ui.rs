//! Window fades, the back action and the pause menu flow.
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::info;

use crate::components::persistent::Persistent;
use crate::components::uiwindow::{PauseMenu, UiWindow};
use crate::events::bus::PauseToggled;
use crate::events::input::{InputAction, InputEvent};
use crate::events::ui::PauseMenuAction;
use crate::resources::eventbus::{BusCommandsExt, EventBusExt};
use crate::resources::gamemanager::GameManager;
use crate::resources::scene::SceneLoader;
use crate::resources::uistack::UiStack;
use crate::resources::worldtime::WorldTime;

/// Advance running show/hide fades with unscaled time.
pub fn window_fade_system(time: Res<WorldTime>, mut windows: Query<&mut UiWindow>) {
    let dt = time.unscaled_delta;
    for mut window in windows.iter_mut() {
        if window.is_fading() {
            window.tick(dt);
        }
    }
}

/// Back closes the top window. On the pause menu it resumes the game
/// instead, so pause state and the stack stay in step.
pub fn ui_back_observer(
    trigger: On<InputEvent>,
    mut stack: ResMut<UiStack>,
    mut windows: Query<&mut UiWindow>,
    menus: Query<(), With<PauseMenu>>,
    mut commands: Commands,
) {
    let event = trigger.event();
    if event.action != InputAction::Back || !event.pressed {
        return;
    }
    let Some(top) = stack.top() else {
        return;
    };
    if menus.contains(top) {
        commands.publish(PauseToggled(false));
    } else {
        stack.pop(&mut windows);
    }
}

/// Show the pause menu and freeze gameplay time on pause; undo on resume.
///
/// The menu is on the stack at most once. Pausing while it is buried closes
/// the windows above it, and resuming closes it along with anything opened
/// over it.
pub fn on_pause_menu_toggled(
    In(PauseToggled(paused)): In<PauseToggled>,
    menus: Query<Entity, With<PauseMenu>>,
    mut windows: Query<&mut UiWindow>,
    mut stack: ResMut<UiStack>,
    mut time: ResMut<WorldTime>,
) {
    let menu = menus.iter().next();
    if paused {
        if let Some(menu) = menu {
            if stack.contains(menu) {
                while stack.top() != Some(menu) && stack.pop(&mut windows).is_some() {}
            } else {
                stack.push(menu, &mut windows);
            }
        }
        time.time_scale = 0.0;
    } else {
        if let Some(menu) = menu.filter(|m| stack.contains(*m)) {
            while let Some(closed) = stack.pop(&mut windows) {
                if closed == menu {
                    break;
                }
            }
        }
        time.time_scale = 1.0;
    }
}

pub fn pause_menu_action_observer(
    trigger: On<PauseMenuAction>,
    mut time: ResMut<WorldTime>,
    mut loader: ResMut<SceneLoader>,
    mut gm: ResMut<GameManager>,
    mut commands: Commands,
) {
    match *trigger.event() {
        PauseMenuAction::Resume => commands.publish(PauseToggled(false)),
        PauseMenuAction::Settings => info!("Settings menu not implemented yet"),
        PauseMenuAction::MainMenu => {
            time.time_scale = 1.0;
            gm.go_to_main_menu(&mut loader);
        }
        PauseMenuAction::Quit => {
            time.time_scale = 1.0;
            gm.quit_requested = true;
            info!("quit requested");
        }
    }
}

/// Install the stack, the back/pause handlers and a hidden pause menu
/// window. Returns the pause menu entity.
pub fn setup_ui(world: &mut World) -> Entity {
    world.init_resource::<UiStack>();
    world.subscribe(on_pause_menu_toggled);
    world.spawn((Observer::new(ui_back_observer), Persistent));
    world.spawn((Observer::new(pause_menu_action_observer), Persistent));
    world
        .spawn((UiWindow::new("PauseMenu"), PauseMenu, Persistent))
        .id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::scene::MAIN_MENU_SCENE;
    use crate::systems::gamemanager::{setup_game_manager, toggle_pause};

    fn make_world() -> (World, Entity) {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.init_resource::<SceneLoader>();
        setup_game_manager(&mut world);
        let menu = setup_ui(&mut world);
        (world, menu)
    }

    fn back(world: &mut World) {
        world.trigger(InputEvent {
            action: InputAction::Back,
            pressed: true,
        });
        world.flush();
    }

    fn fade(world: &mut World, seconds: f32) {
        world.resource_mut::<WorldTime>().unscaled_delta = seconds;
        let mut schedule = Schedule::default();
        schedule.add_systems(window_fade_system);
        schedule.run(world);
    }

    #[test]
    fn pause_pushes_menu_and_freezes_time() {
        let (mut world, menu) = make_world();
        toggle_pause(&mut world);
        assert_eq!(world.resource::<UiStack>().top(), Some(menu));
        assert_eq!(world.resource::<WorldTime>().time_scale, 0.0);

        // Fades run on unscaled time while gameplay is frozen.
        fade(&mut world, 0.2);
        let window = world.get::<UiWindow>(menu).unwrap();
        assert_eq!(window.alpha(), 1.0);
        assert!(window.is_interactable());

        toggle_pause(&mut world);
        assert!(world.resource::<UiStack>().is_empty());
        assert_eq!(world.resource::<WorldTime>().time_scale, 1.0);
        fade(&mut world, 0.2);
        assert!(!world.get::<UiWindow>(menu).unwrap().is_active());
    }

    #[test]
    fn back_on_pause_menu_resumes() {
        let (mut world, _) = make_world();
        toggle_pause(&mut world);
        back(&mut world);
        assert!(!world.resource::<GameManager>().paused);
        assert!(world.resource::<UiStack>().is_empty());
        assert_eq!(world.resource::<WorldTime>().time_scale, 1.0);
    }

    #[test]
    fn back_pops_other_windows() {
        let (mut world, _) = make_world();
        let dialog = world.spawn(UiWindow::new("dialog")).id();
        world.resource_scope(|world, mut stack: Mut<UiStack>| stack.push(dialog, world));
        back(&mut world);
        assert!(world.resource::<UiStack>().is_empty());
        back(&mut world);
        assert!(world.resource::<UiStack>().is_empty(), "empty stack ignores back");
    }

    #[test]
    fn resume_closes_windows_opened_over_the_menu() {
        let (mut world, menu) = make_world();
        toggle_pause(&mut world);
        let dialog = world.spawn(UiWindow::new("dialog")).id();
        world.resource_scope(|world, mut stack: Mut<UiStack>| stack.push(dialog, world));
        world.publish(PauseToggled(false));
        assert!(world.resource::<UiStack>().is_empty());
        assert!(!world.get::<UiWindow>(menu).unwrap().is_interactable());
        assert!(!world.get::<UiWindow>(dialog).unwrap().is_interactable());
    }

    #[test]
    fn menu_is_never_stacked_twice() {
        let (mut world, menu) = make_world();
        let settings = world.spawn(UiWindow::new("settings")).id();
        world.resource_scope(|world, mut stack: Mut<UiStack>| stack.push(settings, world));
        toggle_pause(&mut world);
        let dialog = world.spawn(UiWindow::new("dialog")).id();
        world.resource_scope(|world, mut stack: Mut<UiStack>| stack.push(dialog, world));

        // Pausing again while the menu is buried brings it back to the top.
        world.publish(PauseToggled(true));
        {
            let stack = world.resource::<UiStack>();
            assert_eq!(stack.len(), 2);
            assert_eq!(stack.top(), Some(menu));
        }
        assert!(world.get::<UiWindow>(menu).unwrap().is_interactable());

        world.publish(PauseToggled(false));
        assert!(!world.resource::<GameManager>().paused);
        assert_eq!(world.resource::<UiStack>().top(), Some(settings));
        assert!(world.get::<UiWindow>(settings).unwrap().is_interactable());

        // Back now closes the plain window and never reaches a stale menu.
        back(&mut world);
        assert!(world.resource::<UiStack>().is_empty());
        assert!(!world.resource::<GameManager>().paused);
        assert_eq!(world.resource::<WorldTime>().time_scale, 1.0);
    }

    #[test]
    fn menu_buttons() {
        let (mut world, _) = make_world();
        toggle_pause(&mut world);
        world.trigger(PauseMenuAction::Resume);
        world.flush();
        assert!(!world.resource::<GameManager>().paused);

        world.trigger(PauseMenuAction::Settings);
        world.flush();

        toggle_pause(&mut world);
        world.trigger(PauseMenuAction::MainMenu);
        world.flush();
        assert_eq!(world.resource::<WorldTime>().time_scale, 1.0);
        assert_eq!(world.resource::<SceneLoader>().pending(), Some(MAIN_MENU_SCENE));

        world.trigger(PauseMenuAction::Quit);
        world.flush();
        assert!(world.resource::<GameManager>().quit_requested);
    }
}
