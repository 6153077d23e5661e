//! # Introduction
//!
//! optmenu is a data-driven in-game options menu. Mods describe their options
//! in plain text declaration files. The engine builds a menu tree from them,
//! drives it from controller input one frame at a time and keeps the chosen
//! values in a small binary config file.
//!
//! ## Pipeline
//!
//! ```text
//! *.txt → Lexer → Directives → MenuBuilder → Forest ⇄ ConfigFile
//!                                              ↑
//!                              InputFrame → Navigator → MenuView
//! ```
//!
//! 1. [`parser`]: tokenises declaration lines into [`parser::directive::Directive`]s
//!    and loads whole files and folders.
//! 2. [`menu`]: the node arena with its two roots: options declared by mods
//!    and the host's own menu converted in place. Buttons call into the
//!    [`menu::actions::ActionRegistry`].
//! 3. [`config`]: the little-endian record format settings are saved in.
//! 4. [`nav`]: the [`nav::Navigator`] state machine fed one
//!    [`nav::InputFrame`] per frame. Everything it needs from the game goes
//!    through the [`nav::Host`] trait.
//! 5. [`view`]: what to draw for the open menu: a fixed-height window of
//!    rows, their value text and a scrollbar.
//! 6. [`ui`]: ratatui frontend that plays the host in a terminal; not part of
//!    the stable library API.
//!
//! ## Declaration files
//!
//! One directive per line, fields separated by spaces, quotes group a field:
//!
//! ```text
//! SUBMENU cheats "Cheats" "CHEATS"
//! TOGGLE  moon_jump "Moon Jump" moon_jump 0
//! SCROLL  speed "Speed" speed 10 0 100 5
//! CHOICE  hud "HUD" hud 0 Full Minimal Off
//! BUTTON  heal "Heal" heal_action
//! BIND    dash "Dash" dash 0x8000 0x2A 0xFFFF 0xFFFF
//! ENDMENU
//! ```

pub mod config;
pub mod errors;
pub mod menu;
pub mod nav;
pub mod parser;
pub mod settings;
pub mod ui;
pub mod view;
