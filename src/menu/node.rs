//! Option node definitions
//!
//! Every entry of a menu is an [`OptionNode`] stored in the
//! [`Forest`](super::forest::Forest) arena and addressed by [`NodeId`].
//! The kind-specific state lives in the tagged [`Payload`], so a node can never
//! carry a payload that disagrees with its kind.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Number of alternate key codes a BIND node holds
pub const BIND_SLOTS: usize = 3;

/// Key code meaning "no key bound"
pub const KEY_INVALID: u32 = 0xFFFF;

/// Index of a node inside its forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// The two top-level menus of a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Root {
    /// Built from declaration files and built-ins
    Declared,
    /// Built by wrapping the host's native menu
    Converted,
}

/// Who owns the value storage of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Value storage owned by the node
    Declared,
    /// Value storage owned by the host and shared with the node
    Converted,
}

/// Value storage that is either owned by the node or shared with the host.
///
/// Shared cells belong to the host's native menu. The host keeps its own
/// handle alive for as long as it wants to observe the value, and the
/// reference count keeps the storage alive for the menu.
#[derive(Clone)]
pub enum ValueCell<T: Copy> {
    Owned(T),
    Shared(Rc<Cell<T>>),
}

impl<T: Copy> ValueCell<T> {
    pub fn get(&self) -> T {
        match self {
            ValueCell::Owned(v) => *v,
            ValueCell::Shared(cell) => cell.get(),
        }
    }

    pub fn set(&mut self, value: T) {
        match self {
            ValueCell::Owned(v) => *v = value,
            ValueCell::Shared(cell) => cell.set(value),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, ValueCell::Shared(_))
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for ValueCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueCell::Owned(v) => write!(f, "Owned({:?})", v),
            ValueCell::Shared(cell) => write!(f, "Shared({:?})", cell.get()),
        }
    }
}

/// Node kind, fixed for the node's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Toggle,
    Choice,
    Scroll,
    Bind,
    Button,
    Submenu,
    ChoiceLevel,
    ChoiceStar,
}

impl Kind {
    /// Kind byte used by config records, `None` for kinds that are never saved
    pub fn record_tag(self) -> Option<u8> {
        match self {
            Kind::Toggle => Some(0),
            Kind::Choice => Some(1),
            Kind::Scroll => Some(2),
            Kind::Bind => Some(3),
            _ => None,
        }
    }

    pub fn from_record_tag(tag: u8) -> Option<Kind> {
        match tag {
            0 => Some(Kind::Toggle),
            1 => Some(Kind::Choice),
            2 => Some(Kind::Scroll),
            3 => Some(Kind::Bind),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Toggle => "TOGGLE",
            Kind::Choice => "CHOICE",
            Kind::Scroll => "SCROLL",
            Kind::Bind => "BIND",
            Kind::Button => "BUTTON",
            Kind::Submenu => "SUBMENU",
            Kind::ChoiceLevel => "CHOICE_LEVEL",
            Kind::ChoiceStar => "CHOICE_STAR",
        };
        write!(f, "{}", s)
    }
}

/// Kind-specific node state
#[derive(Debug, Clone)]
pub enum Payload {
    Toggle {
        value: ValueCell<bool>,
    },
    Scroll {
        value: ValueCell<i32>,
        min: i32,
        max: i32,
        step: i32,
    },
    Choice {
        index: ValueCell<i32>,
        choices: Vec<String>,
    },
    /// Choice over the host's level catalog
    ChoiceLevel {
        index: ValueCell<i32>,
    },
    /// Choice over the fixed star range
    ChoiceStar {
        index: ValueCell<i32>,
    },
    Bind {
        binds: ValueCell<[u32; BIND_SLOTS]>,
        /// Controller buttons synthesized while a bound key is held
        mask: u32,
        /// Slot edited by the next capture
        slot: usize,
    },
    Button {
        action: String,
    },
    Submenu {
        child: Option<NodeId>,
        /// Set between SUBMENU and its first child or matching ENDMENU
        awaiting_child: bool,
    },
}

impl Payload {
    pub fn kind(&self) -> Kind {
        match self {
            Payload::Toggle { .. } => Kind::Toggle,
            Payload::Scroll { .. } => Kind::Scroll,
            Payload::Choice { .. } => Kind::Choice,
            Payload::ChoiceLevel { .. } => Kind::ChoiceLevel,
            Payload::ChoiceStar { .. } => Kind::ChoiceStar,
            Payload::Bind { .. } => Kind::Bind,
            Payload::Button { .. } => Kind::Button,
            Payload::Submenu { .. } => Kind::Submenu,
        }
    }

    /// Integer view of the value, as exposed by name lookups
    pub fn int_value(&self) -> Option<i32> {
        match self {
            Payload::Toggle { value } => Some(i32::from(value.get())),
            Payload::Scroll { value, .. } => Some(value.get()),
            Payload::Choice { index, .. }
            | Payload::ChoiceLevel { index }
            | Payload::ChoiceStar { index } => Some(index.get()),
            _ => None,
        }
    }

    /// Store an integer value. Returns false for kinds without one.
    pub fn set_int_value(&mut self, v: i32) -> bool {
        match self {
            Payload::Toggle { value } => value.set(v != 0),
            Payload::Scroll { value, .. } => value.set(v),
            Payload::Choice { index, .. }
            | Payload::ChoiceLevel { index }
            | Payload::ChoiceStar { index } => index.set(v),
            _ => return false,
        }
        true
    }
}

/// One entry of the menu tree
#[derive(Debug, Clone)]
pub struct OptionNode {
    pub name: String,
    pub config_key: Option<String>,
    pub label: String,
    /// Header text shown while this node's children are displayed
    pub title: String,
    pub origin: Origin,
    pub payload: Payload,
    pub(crate) prev: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl OptionNode {
    pub fn new(name: impl Into<String>, label: impl Into<String>, payload: Payload) -> Self {
        let label = label.into();
        OptionNode {
            name: name.into(),
            config_key: None,
            title: label.clone(),
            label,
            origin: Origin::Declared,
            payload,
            prev: None,
            next: None,
            parent: None,
        }
    }

    pub fn with_config_key(mut self, key: Option<String>) -> Self {
        self.config_key = key;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn kind(&self) -> Kind {
        self.payload.kind()
    }

    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// First child of a SUBMENU, `None` for other kinds and empty submenus
    pub fn child(&self) -> Option<NodeId> {
        match self.payload {
            Payload::Submenu { child, .. } => child,
            _ => None,
        }
    }

    /// Config key when the node takes part in persistence
    pub fn persisted_key(&self) -> Option<&str> {
        self.kind().record_tag()?;
        self.config_key.as_deref()
    }
}
