//! A pretend game behind the terminal frontend
//!
//! Supplies a native options menu with a handful of settings, a level
//! catalog and a [`GameControl`] that only reports what it was asked to do.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::menu::builtin::GameControl;
use crate::menu::convert::{NativeMenu, NativeOption};
use crate::menu::node::KEY_INVALID;

/// Shared slot for the latest event worth showing in the status bar
pub type Notice = Rc<RefCell<Option<String>>>;

pub fn level_names() -> Vec<String> {
    [
        "Bob-omb Battlefield",
        "Whomp's Fortress",
        "Jolly Roger Bay",
        "Cool, Cool Mountain",
        "Big Boo's Haunt",
        "Hazy Maze Cave",
        "Lethal Lava Land",
        "Castle Grounds",
    ]
    .iter()
    .map(|name| name.to_string())
    .collect()
}

/// The game's own settings, shared with the menu that converts them
#[derive(Debug, Default, Clone)]
pub struct NativeSettings {
    pub camera_invert: Rc<Cell<bool>>,
    pub camera_speed: Rc<Cell<i32>>,
    pub aspect: Rc<Cell<i32>>,
    pub music_volume: Rc<Cell<i32>>,
    pub jump_binds: Rc<Cell<[u32; 3]>>,
}

impl NativeSettings {
    pub fn new() -> Self {
        let settings = NativeSettings::default();
        settings.camera_speed.set(4);
        settings.music_volume.set(100);
        settings
            .jump_binds
            .set(['A' as u32, ' ' as u32, KEY_INVALID]);
        settings
    }

    /// Native menu over these settings. Its button reports through `notice`.
    pub fn menu(&self, notice: &Notice) -> NativeMenu {
        let notice = Rc::clone(notice);
        NativeMenu {
            title: "OPTIONS".to_string(),
            options: vec![
                NativeOption::Submenu {
                    label: "CAMERA".to_string(),
                    menu: NativeMenu {
                        title: "CAMERA".to_string(),
                        options: vec![
                            NativeOption::Toggle {
                                label: "Invert X".to_string(),
                                value: Rc::clone(&self.camera_invert),
                            },
                            NativeOption::Scroll {
                                label: "Speed".to_string(),
                                min: 1,
                                max: 10,
                                step: 1,
                                value: Rc::clone(&self.camera_speed),
                            },
                        ],
                    },
                },
                NativeOption::Choice {
                    label: "Aspect Ratio".to_string(),
                    choices: vec!["Stretch".to_string(), "4:3".to_string(), "16:9".to_string()],
                    index: Rc::clone(&self.aspect),
                },
                NativeOption::Scroll {
                    label: "Music Volume".to_string(),
                    min: 0,
                    max: 127,
                    step: 1,
                    value: Rc::clone(&self.music_volume),
                },
                NativeOption::Bind {
                    label: "Jump".to_string(),
                    binds: Rc::clone(&self.jump_binds),
                },
                NativeOption::Button {
                    label: "Reset Camera".to_string(),
                    action: Box::new(move || {
                        *notice.borrow_mut() = Some("Camera reset".to_string());
                    }),
                },
            ],
        }
    }
}

/// Game that records requests instead of carrying them out
pub struct DemoGame {
    levels: usize,
    notice: Notice,
}

impl DemoGame {
    pub fn new(levels: usize, notice: Notice) -> Self {
        DemoGame { levels, notice }
    }

    fn report(&self, message: String) -> bool {
        *self.notice.borrow_mut() = Some(message);
        true
    }
}

impl GameControl for DemoGame {
    fn warp_to_level(&mut self, level_index: usize, act: i32) -> bool {
        if level_index >= self.levels {
            return false;
        }
        self.report(format!("Warp to level {} star {}", level_index + 1, act))
    }

    fn warp_to_castle(&mut self, level_index: usize) -> bool {
        if level_index >= self.levels {
            return false;
        }
        self.report(format!("Warp to castle near level {}", level_index + 1))
    }

    fn restart_level(&mut self) -> bool {
        self.report("Restart level".to_string())
    }

    fn exit_level(&mut self, delay: i32) -> bool {
        self.report(format!("Exit level in {} frames", delay))
    }

    fn return_to_main_menu(&mut self) -> bool {
        self.report("Return to main menu".to_string())
    }
}
