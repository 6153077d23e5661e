//! Action Registry
//!
//! BUTTON nodes name an action instead of holding code. The registry maps
//! those names to callbacks registered by the host or by other modules before
//! the menu is opened. A callback receives the name of the pressed node and
//! the forest, and reports whether the action succeeded.
//!
//! Buttons converted from the host's native menu all point at
//! [`HOST_ACTION`]. That dispatcher looks the pressed node's name up in a
//! second table filled during conversion.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use rustc_hash::FxHashMap;

use super::forest::Forest;

/// Dispatcher used by every converted button
pub const HOST_ACTION: &str = "call_host_action";

pub type Action = Box<dyn FnMut(&str, &mut Forest) -> bool>;

/// Callback of a native menu button
pub type HostAction = Box<dyn FnMut()>;

type HostActionTable = Rc<RefCell<FxHashMap<String, HostAction>>>;

#[derive(Default)]
pub struct ActionRegistry {
    actions: FxHashMap<String, Action>,
    host_actions: HostActionTable,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action. An existing entry is only replaced when
    /// `overwrite` is set.
    pub fn register<F>(&mut self, name: &str, action: F, overwrite: bool)
    where
        F: FnMut(&str, &mut Forest) -> bool + 'static,
    {
        if self.actions.contains_key(name) && !overwrite {
            debug!("action '{}' already registered, keeping the first", name);
            return;
        }
        self.actions.insert(name.to_string(), Box::new(action));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Register the callback of a converted button under its node name.
    /// The first callback registered for a name wins.
    pub fn register_host_action(&mut self, node_name: &str, action: HostAction) {
        let mut table = self.host_actions.borrow_mut();
        if !table.contains_key(node_name) {
            table.insert(node_name.to_string(), action);
        }
    }

    /// Install the dispatcher for converted buttons
    pub(crate) fn install_host_dispatcher(&mut self) {
        let table = Rc::clone(&self.host_actions);
        self.register(
            HOST_ACTION,
            move |node_name: &str, _: &mut Forest| {
                match table.borrow_mut().get_mut(node_name) {
                    Some(callback) => {
                        callback();
                        true
                    }
                    None => false,
                }
            },
            true,
        );
    }

    /// Run the action `name` for the node `node_name`.
    ///
    /// An unregistered action counts as a failure.
    pub fn invoke(&mut self, name: &str, node_name: &str, forest: &mut Forest) -> bool {
        match self.actions.get_mut(name) {
            Some(action) => action(node_name, forest),
            None => {
                debug!("no action registered as '{}'", name);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_invoke_passes_node_name() {
        let mut registry = ActionRegistry::new();
        let seen = Rc::new(RefCell::new(String::new()));
        let sink = Rc::clone(&seen);
        registry.register(
            "echo",
            move |name: &str, _: &mut Forest| {
                *sink.borrow_mut() = name.to_string();
                true
            },
            false,
        );

        let mut forest = Forest::new();
        assert!(registry.invoke("echo", "my_button", &mut forest));
        assert_eq!(*seen.borrow(), "my_button");
    }

    #[test]
    fn test_missing_action_fails() {
        let mut registry = ActionRegistry::new();
        let mut forest = Forest::new();
        assert!(!registry.invoke("nope", "x", &mut forest));
    }

    #[test]
    fn test_overwrite_flag() {
        let mut registry = ActionRegistry::new();
        let mut forest = Forest::new();
        registry.register("a", |_: &str, _: &mut Forest| true, false);
        registry.register("a", |_: &str, _: &mut Forest| false, false);
        assert!(registry.invoke("a", "n", &mut forest));
        registry.register("a", |_: &str, _: &mut Forest| false, true);
        assert!(!registry.invoke("a", "n", &mut forest));
    }

    #[test]
    fn test_host_dispatcher() {
        let mut registry = ActionRegistry::new();
        let mut forest = Forest::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        registry.register_host_action("Reset", Box::new(move || counter.set(counter.get() + 1)));
        registry.register_host_action("Reset", Box::new(|| panic!("second registration wins")));
        registry.install_host_dispatcher();

        assert!(registry.invoke(HOST_ACTION, "Reset", &mut forest));
        assert!(!registry.invoke(HOST_ACTION, "Unknown", &mut forest));
        assert_eq!(hits.get(), 1);
    }
}
