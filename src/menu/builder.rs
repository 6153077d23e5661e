//! Menu tree construction
//!
//! Nodes are appended one at a time through a [`Cursor`]:
//!
//! - the first node of a menu becomes its root
//! - a node created right after a SUBMENU that has no child yet becomes that
//!   submenu's first child
//! - any other node becomes the next sibling of the previously created node
//!
//! `ENDMENU` pops an explicit stack of open submenus and moves the cursor back
//! to the submenu that was closed, so badly nested input is detected instead
//! of silently corrupting the cursor.

use log::{debug, warn};

use super::forest::Forest;
use super::node::{NodeId, OptionNode, Payload, Root, ValueCell, BIND_SLOTS};
use crate::parser::directive::Directive;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenMenu {
    Real(NodeId),
    /// A duplicate SUBMENU whose ENDMENU must not move the cursor
    Ignored,
}

/// Insertion state of one menu, kept between files
#[derive(Debug, Default, Clone)]
pub struct Cursor {
    prev: Option<NodeId>,
    open: Vec<OpenMenu>,
}

impl Cursor {
    /// Node the next insertion is positioned after
    pub fn prev(&self) -> Option<NodeId> {
        self.prev
    }

    /// Number of submenus waiting for their ENDMENU
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

/// Result of applying one directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Created(NodeId),
    /// The name already exists, nothing changed
    Duplicate,
    /// An open submenu was closed
    Closed,
    /// ENDMENU with no open submenu
    Unbalanced,
}

pub struct MenuBuilder<'a> {
    forest: &'a mut Forest,
    cursor: &'a mut Cursor,
    root: Root,
}

impl<'a> MenuBuilder<'a> {
    pub fn new(forest: &'a mut Forest, cursor: &'a mut Cursor, root: Root) -> Self {
        MenuBuilder {
            forest,
            cursor,
            root,
        }
    }

    /// Apply a parsed declaration line
    pub fn apply(&mut self, directive: &Directive) -> BuildOutcome {
        let created = match directive {
            Directive::Submenu { name, label, title } => self.submenu(name, label, title),
            Directive::Toggle {
                name,
                label,
                config_key,
                initial,
            } => self.toggle(name, label, config_key.clone(), *initial),
            Directive::Scroll {
                name,
                label,
                config_key,
                initial,
                min,
                max,
                step,
            } => self.scroll(name, label, config_key.clone(), *initial, *min, *max, *step),
            Directive::Choice {
                name,
                label,
                config_key,
                initial,
                choices,
            } => self.choice(name, label, config_key.clone(), *initial, choices.clone()),
            Directive::Button {
                name,
                label,
                action,
            } => self.button(name, label, action),
            Directive::Bind {
                name,
                label,
                config_key,
                mask,
                binds,
            } => self.bind(name, label, config_key.clone(), *mask, *binds),
            Directive::EndMenu => return self.end_menu(),
        };
        match created {
            Some(id) => BuildOutcome::Created(id),
            None => BuildOutcome::Duplicate,
        }
    }

    pub fn submenu(&mut self, name: &str, label: &str, title: &str) -> Option<NodeId> {
        let node = OptionNode::new(
            name,
            label,
            Payload::Submenu {
                child: None,
                awaiting_child: true,
            },
        )
        .with_title(title);
        match self.insert(node) {
            Some(id) => {
                self.cursor.open.push(OpenMenu::Real(id));
                Some(id)
            }
            None => {
                self.cursor.open.push(OpenMenu::Ignored);
                None
            }
        }
    }

    pub fn toggle(
        &mut self,
        name: &str,
        label: &str,
        config_key: Option<String>,
        initial: bool,
    ) -> Option<NodeId> {
        let payload = Payload::Toggle {
            value: ValueCell::Owned(initial),
        };
        self.insert(OptionNode::new(name, label, payload).with_config_key(config_key))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn scroll(
        &mut self,
        name: &str,
        label: &str,
        config_key: Option<String>,
        initial: i32,
        min: i32,
        max: i32,
        step: i32,
    ) -> Option<NodeId> {
        let payload = Payload::Scroll {
            value: ValueCell::Owned(initial),
            min,
            max,
            step,
        };
        self.insert(OptionNode::new(name, label, payload).with_config_key(config_key))
    }

    pub fn choice(
        &mut self,
        name: &str,
        label: &str,
        config_key: Option<String>,
        initial: i32,
        choices: Vec<String>,
    ) -> Option<NodeId> {
        let payload = Payload::Choice {
            index: ValueCell::Owned(initial),
            choices,
        };
        self.insert(OptionNode::new(name, label, payload).with_config_key(config_key))
    }

    /// Choice over the host's level catalog. Never persisted.
    pub fn choice_level(&mut self, name: &str, label: &str) -> Option<NodeId> {
        let payload = Payload::ChoiceLevel {
            index: ValueCell::Owned(0),
        };
        self.insert(OptionNode::new(name, label, payload))
    }

    /// Choice over the star range. Never persisted.
    pub fn choice_star(&mut self, name: &str, label: &str) -> Option<NodeId> {
        let payload = Payload::ChoiceStar {
            index: ValueCell::Owned(0),
        };
        self.insert(OptionNode::new(name, label, payload))
    }

    pub fn button(&mut self, name: &str, label: &str, action: &str) -> Option<NodeId> {
        let payload = Payload::Button {
            action: action.to_string(),
        };
        self.insert(OptionNode::new(name, label, payload))
    }

    pub fn bind(
        &mut self,
        name: &str,
        label: &str,
        config_key: Option<String>,
        mask: u32,
        binds: [u32; BIND_SLOTS],
    ) -> Option<NodeId> {
        let payload = Payload::Bind {
            binds: ValueCell::Owned(binds),
            mask,
            slot: 0,
        };
        self.insert(OptionNode::new(name, label, payload).with_config_key(config_key))
    }

    /// Close the most recently opened submenu
    pub fn end_menu(&mut self) -> BuildOutcome {
        match self.cursor.open.pop() {
            Some(OpenMenu::Real(id)) => {
                if let Payload::Submenu { awaiting_child, .. } =
                    &mut self.forest.node_mut(id).payload
                {
                    *awaiting_child = false;
                }
                self.cursor.prev = Some(id);
                BuildOutcome::Closed
            }
            Some(OpenMenu::Ignored) => BuildOutcome::Closed,
            None => {
                warn!("ENDMENU without a matching SUBMENU, ignored");
                BuildOutcome::Unbalanced
            }
        }
    }

    /// Link a fully built node at the cursor.
    ///
    /// Returns `None` without touching the forest when a declared node with
    /// the same name already exists.
    pub(crate) fn insert(&mut self, mut node: OptionNode) -> Option<NodeId> {
        if self.root == Root::Declared
            && self.forest.find_by_name(Root::Declared, &node.name).is_some()
        {
            debug!("duplicate option '{}' ignored", node.name);
            return None;
        }

        let anchor = match self.cursor.prev {
            Some(prev) => Some(prev),
            None => self
                .forest
                .root(self.root)
                .map(|root| self.forest.last_sibling(root)),
        };

        match anchor {
            None => {
                node.prev = None;
                node.next = None;
                node.parent = None;
                let id = self.forest.push(node);
                self.forest.set_root(self.root, id);
                self.cursor.prev = Some(id);
                Some(id)
            }
            Some(prev) => {
                let opens_child = matches!(
                    self.forest.node(prev).payload,
                    Payload::Submenu {
                        awaiting_child: true,
                        ..
                    }
                );
                if opens_child {
                    node.prev = None;
                    node.next = None;
                    node.parent = Some(prev);
                } else {
                    node.prev = Some(prev);
                    node.next = None;
                    node.parent = self.forest.node(prev).parent;
                }

                let id = self.forest.push(node);
                let prev_node = self.forest.node_mut(prev);
                if opens_child {
                    prev_node.payload = Payload::Submenu {
                        child: Some(id),
                        awaiting_child: false,
                    };
                } else {
                    prev_node.next = Some(id);
                }
                self.cursor.prev = Some(id);
                Some(id)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::node::{Kind, KEY_INVALID};

    fn names(forest: &Forest, ids: Vec<NodeId>) -> Vec<String> {
        ids.into_iter().map(|id| forest.node(id).name.clone()).collect()
    }

    fn assert_sibling_symmetry(forest: &Forest) {
        for i in 0..forest.len() {
            let id = NodeId(i);
            if let Some(next) = forest.node(id).next() {
                assert_eq!(forest.node(next).prev(), Some(id));
            }
            if let Some(prev) = forest.node(id).prev() {
                assert_eq!(forest.node(prev).next(), Some(id));
            }
        }
    }

    #[test]
    fn test_first_node_becomes_root() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
        let id = b.toggle("t", "T", None, false).unwrap();
        assert_eq!(forest.root(Root::Declared), Some(id));
        assert_eq!(forest.node(id).parent(), None);
    }

    #[test]
    fn test_nesting() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
        b.submenu("outer", "Outer", "OUTER");
        b.toggle("a", "A", None, false);
        b.submenu("inner", "Inner", "INNER");
        b.toggle("b", "B", None, false);
        assert_eq!(b.end_menu(), BuildOutcome::Closed);
        b.toggle("c", "C", None, false);
        assert_eq!(b.end_menu(), BuildOutcome::Closed);
        b.toggle("d", "D", None, false);
        assert_eq!(cursor.depth(), 0);

        let outer = forest.find_by_name(Root::Declared, "outer").unwrap();
        let inner = forest.find_by_name(Root::Declared, "inner").unwrap();
        let a = forest.node(outer).child().unwrap();
        assert_eq!(names(&forest, forest.siblings(a)), vec!["a", "inner", "c"]);
        let b_id = forest.node(inner).child().unwrap();
        assert_eq!(forest.node(b_id).parent(), Some(inner));
        assert_eq!(names(&forest, forest.siblings(outer)), vec!["outer", "d"]);
        assert_sibling_symmetry(&forest);
    }

    #[test]
    fn test_empty_submenu_stays_childless() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
        b.toggle("first", "First", None, false);
        let m = b.submenu("m", "M", "M").unwrap();
        b.end_menu();
        let after = b.toggle("after", "After", None, false).unwrap();

        assert_eq!(forest.node(m).child(), None);
        assert_eq!(forest.node(m).next(), Some(after));
        assert_eq!(forest.node(after).parent(), None);
    }

    #[test]
    fn test_duplicate_is_noop() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
        b.scroll("vol", "Volume", Some("vol".into()), 4, 0, 10, 1);
        assert_eq!(b.scroll("vol", "Other", None, 9, 0, 10, 1), None);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.value("vol"), 4);
    }

    #[test]
    fn test_duplicate_submenu_reload_is_idempotent() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let lines = [
            Directive::Submenu {
                name: "s".into(),
                label: "S".into(),
                title: "S".into(),
            },
            Directive::Toggle {
                name: "t".into(),
                label: "T".into(),
                config_key: None,
                initial: true,
            },
            Directive::EndMenu,
            Directive::Button {
                name: "go".into(),
                label: "Go".into(),
                action: "go".into(),
            },
        ];
        {
            let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
            for d in &lines {
                b.apply(d);
            }
        }
        let before = forest.len();
        let prev = cursor.prev();
        {
            let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
            let outcomes: Vec<BuildOutcome> = lines.iter().map(|d| b.apply(d)).collect();
            assert_eq!(
                outcomes,
                vec![
                    BuildOutcome::Duplicate,
                    BuildOutcome::Duplicate,
                    BuildOutcome::Closed,
                    BuildOutcome::Duplicate,
                ]
            );
        }
        assert_eq!(forest.len(), before);
        assert_eq!(cursor.prev(), prev);
        assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn test_unbalanced_endmenu() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
        let t = b.toggle("t", "T", None, false).unwrap();
        assert_eq!(b.end_menu(), BuildOutcome::Unbalanced);
        let u = b.toggle("u", "U", None, false).unwrap();
        assert_eq!(forest.node(t).next(), Some(u));
    }

    #[test]
    fn test_converted_root_allows_repeated_names() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Converted);
        assert!(b.button("Back", "Back", "x").is_some());
        assert!(b.button("Back", "Back", "x").is_some());
        assert_eq!(forest.walk(Root::Converted).len(), 2);
        assert_eq!(forest.root(Root::Declared), None);
    }

    #[test]
    fn test_kinds_created() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
        let ids = [
            b.toggle("t", "T", None, false).unwrap(),
            b.scroll("s", "S", None, 0, 0, 1, 1).unwrap(),
            b.choice("c", "C", None, 0, vec![]).unwrap(),
            b.choice_level("l", "L").unwrap(),
            b.choice_star("st", "St").unwrap(),
            b.button("b", "B", "act").unwrap(),
            b.bind("k", "K", None, 1, [KEY_INVALID; BIND_SLOTS]).unwrap(),
        ];
        let kinds: Vec<Kind> = ids.iter().map(|&id| forest.node(id).kind()).collect();
        assert_eq!(
            kinds,
            vec![
                Kind::Toggle,
                Kind::Scroll,
                Kind::Choice,
                Kind::ChoiceLevel,
                Kind::ChoiceStar,
                Kind::Button,
                Kind::Bind,
            ]
        );
        assert_sibling_symmetry(&forest);
    }
}
