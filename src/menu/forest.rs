//! Arena holding both menu trees
//!
//! Nodes are never removed, so a [`NodeId`] stays valid for the lifetime of
//! the forest. Links are only written by the builder and the converter.

use super::node::{Kind, NodeId, OptionNode, Payload, Root, KEY_INVALID};

#[derive(Debug, Default)]
pub struct Forest {
    nodes: Vec<OptionNode>,
    declared: Option<NodeId>,
    converted: Option<NodeId>,
}

impl Forest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First node of a top-level menu
    pub fn root(&self, root: Root) -> Option<NodeId> {
        match root {
            Root::Declared => self.declared,
            Root::Converted => self.converted,
        }
    }

    pub(crate) fn set_root(&mut self, root: Root, id: NodeId) {
        match root {
            Root::Declared => self.declared = Some(id),
            Root::Converted => self.converted = Some(id),
        }
    }

    pub(crate) fn push(&mut self, node: OptionNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn node(&self, id: NodeId) -> &OptionNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut OptionNode {
        &mut self.nodes[id.0]
    }

    pub fn first_sibling(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(prev) = self.node(current).prev {
            current = prev;
        }
        current
    }

    pub fn last_sibling(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(next) = self.node(current).next {
            current = next;
        }
        current
    }

    /// All siblings of `id` in display order, `id` included
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = Some(self.first_sibling(id));
        while let Some(n) = current {
            out.push(n);
            current = self.node(n).next;
        }
        out
    }

    pub fn sibling_count(&self, id: NodeId) -> usize {
        self.siblings(id).len()
    }

    /// Zero-based position of `id` among its siblings
    pub fn sibling_index(&self, id: NodeId) -> usize {
        let mut index = 0;
        let mut current = id;
        while let Some(prev) = self.node(current).prev {
            current = prev;
            index += 1;
        }
        index
    }

    /// Every node of a top-level menu, parents before children and children
    /// before the parent's next sibling
    pub fn walk(&self, root: Root) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(first) = self.root(root) {
            self.walk_from(first, &mut out);
        }
        out
    }

    fn walk_from(&self, first: NodeId, out: &mut Vec<NodeId>) {
        let mut current = Some(first);
        while let Some(id) = current {
            out.push(id);
            if let Some(child) = self.node(id).child() {
                self.walk_from(child, out);
            }
            current = self.node(id).next;
        }
    }

    /// Any node of a top-level menu with the given name
    pub fn find_by_name(&self, root: Root, name: &str) -> Option<NodeId> {
        self.walk(root)
            .into_iter()
            .find(|&id| self.node(id).name == name)
    }

    /// A non-submenu node of the declared menu with the given name
    pub fn find_setting(&self, name: &str) -> Option<NodeId> {
        self.walk(Root::Declared)
            .into_iter()
            .find(|&id| self.node(id).kind() != Kind::Submenu && self.node(id).name == name)
    }

    /// The declared node persisted under `(kind, key)`
    pub fn find_config(&self, kind: Kind, key: &str) -> Option<NodeId> {
        self.walk(Root::Declared).into_iter().find(|&id| {
            let node = self.node(id);
            node.kind() == kind && node.persisted_key() == Some(key)
        })
    }

    /// Integer value of a declared setting, 0 when missing
    pub fn value(&self, name: &str) -> i32 {
        self.find_setting(name)
            .and_then(|id| self.node(id).payload.int_value())
            .unwrap_or(0)
    }

    /// Overwrite a declared setting. Missing names are ignored.
    pub fn set_value(&mut self, name: &str, value: i32) {
        if let Some(id) = self.find_setting(name) {
            self.node_mut(id).payload.set_int_value(value);
        }
    }

    /// Controller buttons synthesized by held BIND keys of the declared menu.
    ///
    /// `is_down` answers whether a key code is currently held.
    pub fn held_button_mask(&self, is_down: impl Fn(u32) -> bool) -> u32 {
        self.walk(Root::Declared)
            .into_iter()
            .filter_map(|id| match &self.node(id).payload {
                Payload::Bind { binds, mask, .. } => {
                    let held = binds
                        .get()
                        .iter()
                        .any(|&key| key != KEY_INVALID && is_down(key));
                    held.then_some(*mask)
                }
                _ => None,
            })
            .fold(0, |acc, mask| acc | mask)
    }
}
