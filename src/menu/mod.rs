//! Menu tree model
//!
//! - [`node`]: option nodes, kinds and value storage
//! - [`forest`]: the arena holding the declared and the converted menu
//! - [`builder`]: appending nodes at an insertion cursor
//! - [`convert`]: wrapping the host's native menu
//! - [`actions`]: the Action Registry behind BUTTON nodes
//! - [`builtin`]: the game sub-menus appended after loading
//!
//! [`OptionMenu`] ties them together with the config file and is what the
//! navigator drives.

pub mod actions;
pub mod builder;
pub mod builtin;
pub mod convert;
pub mod forest;
pub mod node;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use log::info;

use crate::config::ConfigFile;
use crate::parser::loader::{self, LoadReport};
use crate::settings::Settings;
use actions::ActionRegistry;
use builder::{Cursor, MenuBuilder};
use builtin::GameControl;
use convert::NativeMenu;
use forest::Forest;
use node::Root;

/// Both menus, their actions and where their settings are stored
#[derive(Default)]
pub struct OptionMenu {
    pub forest: Forest,
    pub actions: ActionRegistry,
    cursor: Cursor,
    config: Option<ConfigFile>,
}

impl OptionMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert the native menu, load the declaration files, append the
    /// built-in game menus and restore saved settings, in that order.
    pub fn bootstrap(
        settings: &Settings,
        native: NativeMenu,
        game: Rc<RefCell<dyn GameControl>>,
    ) -> Self {
        let mut menu = OptionMenu::new();
        menu.convert(native);
        let report = menu.load_directory(&settings.menu_dir);
        info!(
            "{} declaration files, {} options",
            report.files,
            menu.forest.walk(Root::Declared).len()
        );
        menu.install_builtins(game);
        menu.set_config(ConfigFile::new(&settings.config_path));
        menu.restore();
        menu
    }

    /// Builder appending to the declared menu where the last load stopped
    pub fn declare(&mut self) -> MenuBuilder<'_> {
        MenuBuilder::new(&mut self.forest, &mut self.cursor, Root::Declared)
    }

    pub fn convert(&mut self, native: NativeMenu) {
        convert::convert(&mut self.forest, &mut self.actions, native);
    }

    pub fn load_source(&mut self, text: &str) -> LoadReport {
        loader::load_source(&mut self.declare(), text)
    }

    pub fn load_directory(&mut self, dir: &Path) -> LoadReport {
        loader::load_directory(&mut self.declare(), dir)
    }

    pub fn install_builtins(&mut self, game: Rc<RefCell<dyn GameControl>>) {
        let mut builder = MenuBuilder::new(&mut self.forest, &mut self.cursor, Root::Declared);
        builtin::install(&mut builder, &mut self.actions, game);
    }

    pub fn set_config(&mut self, config: ConfigFile) {
        self.config = Some(config);
    }

    pub fn config(&self) -> Option<&ConfigFile> {
        self.config.as_ref()
    }

    /// Apply saved settings, if a config file is set
    pub fn restore(&mut self) {
        if let Some(config) = &self.config {
            config.restore(&mut self.forest);
        }
    }

    /// Save settings, if a config file is set
    pub fn persist(&self) {
        if let Some(config) = &self.config {
            config.persist(&self.forest);
        }
    }

    pub fn value(&self, name: &str) -> i32 {
        self.forest.value(name)
    }

    pub fn set_value(&mut self, name: &str, value: i32) {
        self.forest.set_value(name, value);
    }

    /// Invoke an action by name on behalf of `node_name`
    pub fn invoke(&mut self, action: &str, node_name: &str) -> bool {
        self.actions.invoke(action, node_name, &mut self.forest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_continues_across_sources() {
        let mut menu = OptionMenu::new();
        menu.load_source("SUBMENU a A A\nTOGGLE t T null 1\n");
        menu.load_source("TOGGLE u U null 0\nENDMENU\nTOGGLE v V null 0\n");

        let a = menu.forest.find_by_name(Root::Declared, "a").unwrap();
        let t = menu.forest.node(a).child().unwrap();
        let names: Vec<String> = menu
            .forest
            .siblings(t)
            .into_iter()
            .map(|id| menu.forest.node(id).name.clone())
            .collect();
        assert_eq!(names, vec!["t", "u"]);
        assert_eq!(menu.forest.sibling_count(a), 2);
    }

    #[test]
    fn test_value_accessors() {
        let mut menu = OptionMenu::new();
        menu.load_source("SCROLL s S null 3 0 9 1\n");
        menu.set_value("s", 7);
        assert_eq!(menu.value("s"), 7);
        assert_eq!(menu.value("nope"), 0);
    }
}
