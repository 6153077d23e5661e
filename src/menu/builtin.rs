//! Built-in game sub-menus
//!
//! After the declaration files are loaded the declared menu gets a fixed set
//! of game controls: warping to a level or to the castle, restarting or
//! exiting the current level, and returning to the title screen. The menu only
//! reads the selections from its own nodes; the game logic stays behind
//! [`GameControl`].

use std::cell::RefCell;
use std::rc::Rc;

use super::actions::ActionRegistry;
use super::builder::MenuBuilder;
use super::forest::Forest;

pub const WARP_TO_LEVEL_SUBMENU: &str = "warp_to_level_submenu";
pub const WARP_LEVEL: &str = "warp_level";
pub const WARP_ACT: &str = "warp_act";
pub const WARP_TO_LEVEL: &str = "warp_to_level";
pub const WARP_TO_CASTLE_SUBMENU: &str = "warp_to_castle_submenu";
pub const WARP_CASTLE: &str = "warp_castle";
pub const WARP_TO_CASTLE: &str = "warp_to_castle";
pub const RESTART_LEVEL: &str = "restart_level";
pub const EXIT_LEVEL: &str = "exit_level";
pub const RETURN_TO_MAIN_MENU: &str = "return_to_main_menu";

/// Frames the exit transition waits before leaving the level
pub const EXIT_LEVEL_DELAY: i32 = 30;

/// Game operations triggered from the built-in buttons.
///
/// Every method reports whether the game accepted the request; a refusal
/// plays the cancel cue.
pub trait GameControl {
    /// Warp to the level at `level_index` of the host's level catalog.
    /// `act` is 1-based.
    fn warp_to_level(&mut self, level_index: usize, act: i32) -> bool;
    /// Warp to the castle exit of the level at `level_index`
    fn warp_to_castle(&mut self, level_index: usize) -> bool;
    fn restart_level(&mut self) -> bool;
    fn exit_level(&mut self, delay: i32) -> bool;
    fn return_to_main_menu(&mut self) -> bool;
}

/// Append the built-in nodes at the builder's cursor and register their
/// actions. Re-installing is a no-op for the nodes and keeps the first
/// registered actions.
pub fn install(
    builder: &mut MenuBuilder<'_>,
    actions: &mut ActionRegistry,
    game: Rc<RefCell<dyn GameControl>>,
) {
    builder.submenu(WARP_TO_LEVEL_SUBMENU, "Warp to Level", "WARP TO LEVEL");
    builder.choice_level(WARP_LEVEL, "Level Select");
    builder.choice_star(WARP_ACT, "Star Select");
    builder.button(WARP_TO_LEVEL, "Warp", WARP_TO_LEVEL);
    builder.end_menu();

    builder.submenu(WARP_TO_CASTLE_SUBMENU, "Warp to Castle", "WARP TO CASTLE");
    builder.choice_level(WARP_CASTLE, "Level Exit");
    builder.button(WARP_TO_CASTLE, "Warp", WARP_TO_CASTLE);
    builder.end_menu();

    builder.button(RESTART_LEVEL, "Restart Level", RESTART_LEVEL);
    builder.button(EXIT_LEVEL, "Exit Level", EXIT_LEVEL);
    builder.button(RETURN_TO_MAIN_MENU, "Return to Main Menu", RETURN_TO_MAIN_MENU);

    let g = Rc::clone(&game);
    actions.register(
        WARP_TO_LEVEL,
        move |_: &str, forest: &mut Forest| {
            let level = level_index(forest.value(WARP_LEVEL));
            let act = forest.value(WARP_ACT) + 1;
            g.borrow_mut().warp_to_level(level, act)
        },
        false,
    );

    let g = Rc::clone(&game);
    actions.register(
        WARP_TO_CASTLE,
        move |_: &str, forest: &mut Forest| {
            let level = level_index(forest.value(WARP_CASTLE));
            g.borrow_mut().warp_to_castle(level)
        },
        false,
    );

    let g = Rc::clone(&game);
    actions.register(
        RESTART_LEVEL,
        move |_: &str, _: &mut Forest| g.borrow_mut().restart_level(),
        false,
    );

    let g = Rc::clone(&game);
    actions.register(
        EXIT_LEVEL,
        move |_: &str, _: &mut Forest| g.borrow_mut().exit_level(EXIT_LEVEL_DELAY),
        false,
    );

    actions.register(
        RETURN_TO_MAIN_MENU,
        move |_: &str, _: &mut Forest| game.borrow_mut().return_to_main_menu(),
        false,
    );
}

fn level_index(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::builder::Cursor;
    use crate::menu::node::{Kind, Root};

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl GameControl for Recorder {
        fn warp_to_level(&mut self, level_index: usize, act: i32) -> bool {
            self.calls.push(format!("level {} act {}", level_index, act));
            true
        }
        fn warp_to_castle(&mut self, level_index: usize) -> bool {
            self.calls.push(format!("castle {}", level_index));
            true
        }
        fn restart_level(&mut self) -> bool {
            self.calls.push("restart".into());
            true
        }
        fn exit_level(&mut self, delay: i32) -> bool {
            self.calls.push(format!("exit {}", delay));
            false
        }
        fn return_to_main_menu(&mut self) -> bool {
            self.calls.push("main".into());
            true
        }
    }

    #[test]
    fn test_install_layout() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut actions = ActionRegistry::new();
        let game = Rc::new(RefCell::new(Recorder::default()));
        {
            let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
            b.toggle("user_option", "User Option", None, false);
            install(&mut b, &mut actions, game);
        }

        let top: Vec<String> = forest
            .siblings(forest.root(Root::Declared).unwrap())
            .into_iter()
            .map(|id| forest.node(id).name.clone())
            .collect();
        assert_eq!(
            top,
            vec![
                "user_option",
                WARP_TO_LEVEL_SUBMENU,
                WARP_TO_CASTLE_SUBMENU,
                RESTART_LEVEL,
                EXIT_LEVEL,
                RETURN_TO_MAIN_MENU,
            ]
        );

        let level = forest.find_setting(WARP_LEVEL).unwrap();
        assert_eq!(forest.node(level).kind(), Kind::ChoiceLevel);
        assert_eq!(forest.node(level).config_key, None);
        let act = forest.find_setting(WARP_ACT).unwrap();
        assert_eq!(forest.node(act).kind(), Kind::ChoiceStar);
    }

    #[test]
    fn test_actions_read_selection() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut actions = ActionRegistry::new();
        let game = Rc::new(RefCell::new(Recorder::default()));
        {
            let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
            install(&mut b, &mut actions, game.clone());
        }

        forest.set_value(WARP_LEVEL, 4);
        forest.set_value(WARP_ACT, 2);
        forest.set_value(WARP_CASTLE, 1);
        assert!(actions.invoke(WARP_TO_LEVEL, WARP_TO_LEVEL, &mut forest));
        assert!(actions.invoke(WARP_TO_CASTLE, WARP_TO_CASTLE, &mut forest));
        assert!(actions.invoke(RESTART_LEVEL, RESTART_LEVEL, &mut forest));
        assert!(!actions.invoke(EXIT_LEVEL, EXIT_LEVEL, &mut forest));
        assert!(actions.invoke(RETURN_TO_MAIN_MENU, RETURN_TO_MAIN_MENU, &mut forest));

        assert_eq!(
            game.borrow().calls,
            vec!["level 4 act 3", "castle 1", "restart", "exit 30", "main"]
        );
    }
}
