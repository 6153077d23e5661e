// Integration tests: declaration folder, navigation and settings file together

use std::cell::{Cell, RefCell};
use std::fs;
use std::path::Path;
use std::rc::Rc;

use optmenu::config::codec;
use optmenu::menu::builtin::GameControl;
use optmenu::menu::convert::{NativeMenu, NativeOption};
use optmenu::menu::node::Root;
use optmenu::menu::OptionMenu;
use optmenu::nav::{Buttons, Host, InputFrame, MenuState, Navigator};
use optmenu::settings::{Settings, MENU_DIR_NAME};
use optmenu::view::{MenuView, ValueView, VISIBLE_ROWS};

const GRAPHICS: &str = r#"
# graphics options
SUBMENU gfx "Graphics" "GRAPHICS"
  TOGGLE vsync "V-Sync" vsync 1
  SCROLL fov "Field of View" fov 70 60 110 5
ENDMENU
CHOICE hud "HUD" hud_mode 0 Full Minimal Off
"#;

struct Levels;

impl Host for Levels {
    fn first_key_down(&self) -> Option<u32> {
        None
    }

    fn is_key_down(&self, _key: u32) -> bool {
        false
    }

    fn level_count(&self, exclude_castle: bool) -> i32 {
        if exclude_castle {
            15
        } else {
            16
        }
    }
}

#[derive(Default)]
struct RecordingGame {
    warps: Vec<(usize, i32)>,
}

impl GameControl for RecordingGame {
    fn warp_to_level(&mut self, level_index: usize, act: i32) -> bool {
        self.warps.push((level_index, act));
        true
    }

    fn warp_to_castle(&mut self, _level_index: usize) -> bool {
        true
    }

    fn restart_level(&mut self) -> bool {
        true
    }

    fn exit_level(&mut self, _delay: i32) -> bool {
        true
    }

    fn return_to_main_menu(&mut self) -> bool {
        false
    }
}

fn install(dir: &Path) -> Settings {
    let menus = dir.join(MENU_DIR_NAME);
    fs::create_dir_all(&menus).unwrap();
    fs::write(menus.join("graphics.txt"), GRAPHICS).unwrap();
    // not a declaration file
    fs::write(menus.join("notes.md"), "TOGGLE stray Stray null 1\n").unwrap();
    Settings::new(dir, &dir.join("user"))
}

fn boot(settings: &Settings, native: NativeMenu) -> (OptionMenu, Rc<RefCell<RecordingGame>>) {
    let game = Rc::new(RefCell::new(RecordingGame::default()));
    let menu = OptionMenu::bootstrap(settings, native, game.clone());
    (menu, game)
}

fn send(nav: &mut Navigator, menu: &mut OptionMenu, frame: InputFrame) {
    nav.tick(menu, &mut Levels, &frame);
    nav.tick(menu, &mut Levels, &InputFrame::new());
}

fn press(nav: &mut Navigator, menu: &mut OptionMenu, buttons: Buttons) {
    send(nav, menu, InputFrame::new().press(buttons));
}

fn stick(nav: &mut Navigator, menu: &mut OptionMenu, x: i32, y: i32) {
    send(nav, menu, InputFrame::new().with_stick(x, y));
}

#[test]
fn test_bootstrap_layout() {
    let dir = tempfile::tempdir().unwrap();
    let settings = install(dir.path());
    let (menu, _) = boot(&settings, NativeMenu::default());

    let top: Vec<String> = menu
        .forest
        .siblings(menu.forest.root(Root::Declared).unwrap())
        .into_iter()
        .map(|id| menu.forest.node(id).name.clone())
        .collect();
    assert_eq!(
        top,
        vec![
            "gfx",
            "hud",
            "warp_to_level_submenu",
            "warp_to_castle_submenu",
            "restart_level",
            "exit_level",
            "return_to_main_menu",
        ]
    );
    assert!(menu.forest.find_setting("stray").is_none());
    assert!(menu.forest.root(Root::Converted).is_none());
}

#[test]
fn test_settings_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let settings = install(dir.path());

    {
        let (mut menu, _) = boot(&settings, NativeMenu::default());
        let mut nav = Navigator::new();

        press(&mut nav, &mut menu, Buttons::Z);
        press(&mut nav, &mut menu, Buttons::A); // into Graphics
        press(&mut nav, &mut menu, Buttons::A); // V-Sync off
        stick(&mut nav, &mut menu, 0, -80);
        stick(&mut nav, &mut menu, 80, 0); // FOV 75
        press(&mut nav, &mut menu, Buttons::B);
        stick(&mut nav, &mut menu, 0, -80);
        stick(&mut nav, &mut menu, -80, 0); // HUD Off
        press(&mut nav, &mut menu, Buttons::START);

        assert_eq!(nav.state(), MenuState::Closed);
        assert!(settings.config_path.exists());
    }

    let (menu, _) = boot(&settings, NativeMenu::default());
    assert_eq!(menu.value("vsync"), 0);
    assert_eq!(menu.value("fov"), 75);
    assert_eq!(menu.value("hud"), 2);
}

#[test]
fn test_only_declared_keys_are_saved() {
    let dir = tempfile::tempdir().unwrap();
    let settings = install(dir.path());
    let volume = Rc::new(Cell::new(50));
    let native = NativeMenu {
        title: "OPTIONS".into(),
        options: vec![NativeOption::Scroll {
            label: "Volume".into(),
            min: 0,
            max: 100,
            step: 10,
            value: Rc::clone(&volume),
        }],
    };
    let (mut menu, _) = boot(&settings, native);
    let mut nav = Navigator::new();

    press(&mut nav, &mut menu, Buttons::R);
    stick(&mut nav, &mut menu, 80, 0);
    assert_eq!(volume.get(), 60);
    press(&mut nav, &mut menu, Buttons::START);

    let bytes = fs::read(&settings.config_path).unwrap();
    let keys: Vec<String> = codec::decode(&bytes).into_iter().map(|r| r.key).collect();
    assert_eq!(keys, vec!["vsync", "fov", "hud_mode"]);
}

#[test]
fn test_stale_records_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let settings = install(dir.path());
    {
        let (mut menu, _) = boot(&settings, NativeMenu::default());
        menu.set_value("fov", 100);
        menu.persist();
    }

    // a newer version drops the FOV option
    let menus = dir.path().join(MENU_DIR_NAME);
    let trimmed = GRAPHICS.replace("  SCROLL fov \"Field of View\" fov 70 60 110 5\n", "");
    fs::write(menus.join("graphics.txt"), trimmed).unwrap();

    let (menu, _) = boot(&settings, NativeMenu::default());
    assert!(menu.forest.find_setting("fov").is_none());
    assert_eq!(menu.value("vsync"), 1);
}

#[test]
fn test_warp_through_builtin_menu() {
    let dir = tempfile::tempdir().unwrap();
    let settings = install(dir.path());
    let (mut menu, game) = boot(&settings, NativeMenu::default());
    let mut nav = Navigator::new();

    press(&mut nav, &mut menu, Buttons::Z);
    stick(&mut nav, &mut menu, 0, -80);
    stick(&mut nav, &mut menu, 0, -80);
    press(&mut nav, &mut menu, Buttons::A); // into Warp to Level

    let view = MenuView::build(&menu.forest, &Levels, &nav, VISIBLE_ROWS).unwrap();
    assert_eq!(view.title, "WARP TO LEVEL");
    assert_eq!(view.count, 3);

    stick(&mut nav, &mut menu, 80, 0); // level 2
    stick(&mut nav, &mut menu, 0, -80);
    stick(&mut nav, &mut menu, 80, 0);
    stick(&mut nav, &mut menu, 80, 0); // star 3

    let view = MenuView::build(&menu.forest, &Levels, &nav, VISIBLE_ROWS).unwrap();
    let star = view.rows.iter().flatten().find(|row| row.selected).unwrap();
    assert_eq!(star.value, ValueView::Text("Star 3".to_string()));

    stick(&mut nav, &mut menu, 0, -80);
    press(&mut nav, &mut menu, Buttons::A);
    assert_eq!(game.borrow().warps, vec![(1, 3)]);
}
