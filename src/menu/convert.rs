//! Conversion of the host's native menu
//!
//! The host describes its existing options menu as a [`NativeMenu`] whose
//! values live in shared cells. Conversion wraps every native option in a
//! node of the converted root without copying the values: adjusting a
//! converted node writes straight into the host's cell.
//!
//! Converted nodes are named after their label, carry no config key and are
//! never persisted by the menu. Native buttons are routed through
//! [`HOST_ACTION`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use super::actions::{ActionRegistry, HostAction, HOST_ACTION};
use super::builder::{Cursor, MenuBuilder};
use super::forest::Forest;
use super::node::{Origin, OptionNode, Payload, Root, ValueCell, BIND_SLOTS};

/// A page of the host's native menu
#[derive(Debug, Default)]
pub struct NativeMenu {
    pub title: String,
    pub options: Vec<NativeOption>,
}

pub enum NativeOption {
    Toggle {
        label: String,
        value: Rc<Cell<bool>>,
    },
    Choice {
        label: String,
        choices: Vec<String>,
        index: Rc<Cell<i32>>,
    },
    Scroll {
        label: String,
        min: i32,
        max: i32,
        step: i32,
        value: Rc<Cell<i32>>,
    },
    Submenu {
        label: String,
        menu: NativeMenu,
    },
    Bind {
        label: String,
        binds: Rc<Cell<[u32; BIND_SLOTS]>>,
    },
    Button {
        label: String,
        action: HostAction,
    },
}

impl fmt::Debug for NativeOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeOption::Toggle { label, .. } => write!(f, "Toggle({})", label),
            NativeOption::Choice { label, .. } => write!(f, "Choice({})", label),
            NativeOption::Scroll { label, .. } => write!(f, "Scroll({})", label),
            NativeOption::Submenu { label, menu } => {
                write!(f, "Submenu({}, {:?})", label, menu.options)
            }
            NativeOption::Bind { label, .. } => write!(f, "Bind({})", label),
            NativeOption::Button { label, .. } => write!(f, "Button({})", label),
        }
    }
}

/// Build the converted root from the host's native menu
pub fn convert(forest: &mut Forest, actions: &mut ActionRegistry, native: NativeMenu) {
    let mut cursor = Cursor::default();
    let mut builder = MenuBuilder::new(forest, &mut cursor, Root::Converted);
    convert_options(&mut builder, actions, native.options);
    actions.install_host_dispatcher();
}

fn convert_options(
    builder: &mut MenuBuilder<'_>,
    actions: &mut ActionRegistry,
    options: Vec<NativeOption>,
) {
    for option in options {
        match option {
            NativeOption::Toggle { label, value } => {
                insert(builder, &label, Payload::Toggle {
                    value: ValueCell::Shared(value),
                });
            }
            NativeOption::Choice {
                label,
                choices,
                index,
            } => {
                insert(builder, &label, Payload::Choice {
                    index: ValueCell::Shared(index),
                    choices,
                });
            }
            NativeOption::Scroll {
                label,
                min,
                max,
                step,
                value,
            } => {
                insert(builder, &label, Payload::Scroll {
                    value: ValueCell::Shared(value),
                    min,
                    max,
                    step,
                });
            }
            NativeOption::Submenu { label, menu } => {
                builder.submenu(&label, &label, &menu.title);
                convert_options(builder, actions, menu.options);
                builder.end_menu();
            }
            NativeOption::Bind { label, binds } => {
                insert(builder, &label, Payload::Bind {
                    binds: ValueCell::Shared(binds),
                    mask: 0,
                    slot: 0,
                });
            }
            NativeOption::Button { label, action } => {
                insert(builder, &label, Payload::Button {
                    action: HOST_ACTION.to_string(),
                });
                actions.register_host_action(&label, action);
            }
        }
    }
}

fn insert(builder: &mut MenuBuilder<'_>, label: &str, payload: Payload) {
    let node = OptionNode::new(label, label, payload).with_origin(Origin::Converted);
    builder.insert(node);
}
