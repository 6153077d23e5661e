// optmenu: data-driven in-game options menu, played from a terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::Env;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use optmenu::menu::builtin::GameControl;
use optmenu::menu::forest::Forest;
use optmenu::menu::OptionMenu;
use optmenu::settings::Settings;
use optmenu::ui::demo::{level_names, DemoGame, NativeSettings, Notice};
use optmenu::ui::host::TerminalHost;
use optmenu::ui::App;

#[derive(Parser, Debug)]
#[command(version, about = "Data-driven options menu for games and mods")]
struct Args {
    /// Installation folder holding the `menus` declaration folder
    #[arg(long, value_name = "DIR")]
    install_dir: Option<PathBuf>,

    /// Folder the settings file is written to
    #[arg(long, value_name = "DIR")]
    user_dir: Option<PathBuf>,

    /// Declaration folder, overrides the one inside the install folder
    #[arg(long, value_name = "DIR")]
    menus: Option<PathBuf>,

    /// Settings file, overrides the one inside the user folder
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    fn settings(&self) -> Settings {
        let install_dir = self
            .install_dir
            .clone()
            .unwrap_or_else(Settings::default_install_dir);
        let user_dir = self
            .user_dir
            .clone()
            .unwrap_or_else(Settings::default_user_dir);
        let mut settings = Settings::new(&install_dir, &user_dir);
        if let Some(menus) = &self.menus {
            settings.menu_dir = menus.clone();
        }
        if let Some(config) = &self.config {
            settings.config_path = config.clone();
        }
        settings
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = args.settings();
    info!(
        "menus from {}, settings in {}",
        settings.menu_dir.display(),
        settings.config_path.display()
    );

    let notice: Notice = Rc::default();
    let levels = level_names();
    let native = NativeSettings::new();
    let game: Rc<RefCell<dyn GameControl>> =
        Rc::new(RefCell::new(DemoGame::new(levels.len(), Rc::clone(&notice))));
    let mut menu = OptionMenu::bootstrap(&settings, native.menu(&notice), game);

    // action behind the sample declaration's "Heal Now" button
    let heal_notice = Rc::clone(&notice);
    menu.actions.register(
        "heal_action",
        move |node: &str, _: &mut Forest| {
            *heal_notice.borrow_mut() = Some(format!("{}: health restored", node));
            true
        },
        false,
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(menu, TerminalHost::new(levels), notice);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
