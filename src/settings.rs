//! File locations
//!
//! Declaration files live in a `menus` folder next to the installation, the
//! binary config in the user's config directory.

use std::env;
use std::path::{Path, PathBuf};

/// Folder of `*.txt` declaration files inside the install directory
pub const MENU_DIR_NAME: &str = "menus";

/// Binary config file inside the user directory
pub const CONFIG_FILE_NAME: &str = "optmenu.cfg";

/// Application folder inside the platform config directory
pub const APP_DIR_NAME: &str = "optmenu";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub menu_dir: PathBuf,
    pub config_path: PathBuf,
}

impl Settings {
    pub fn new(install_dir: &Path, user_dir: &Path) -> Self {
        Settings {
            menu_dir: install_dir.join(MENU_DIR_NAME),
            config_path: user_dir.join(CONFIG_FILE_NAME),
        }
    }

    /// Directory holding the running executable, or the working directory
    pub fn default_install_dir() -> PathBuf {
        env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Per-user config directory, or the working directory when the platform
    /// has none
    pub fn default_user_dir() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::new(&Self::default_install_dir(), &Self::default_user_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        let settings = Settings::new(Path::new("/opt/game"), Path::new("/home/u/.config/optmenu"));
        assert_eq!(settings.menu_dir, PathBuf::from("/opt/game/menus"));
        assert_eq!(
            settings.config_path,
            PathBuf::from("/home/u/.config/optmenu/optmenu.cfg")
        );
    }
}
