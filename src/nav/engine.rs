//! Navigation state machine
//!
//! [`Navigator::tick`] runs once per host frame and fires at most one
//! transition, checked in this order:
//!
//! 1. while binding: wait for all keys released, then capture the next key
//! 2. while closed: R opens the converted menu, Z the declared one
//! 3. while open: Up, Down, Left, Right, A, B, Z, R, Start
//!
//! Closing always plays the saved cue, runs the host's close hook, persists
//! the declared settings and only then leaves the open state.

use log::debug;

use super::host::{Cue, Host};
use super::input::{Buttons, Direction, InputFrame, StickRepeat};
use crate::menu::node::{NodeId, Origin, Payload, Root, BIND_SLOTS, KEY_INVALID};
use crate::menu::OptionMenu;

/// Number of stars selectable by a star choice
pub const STAR_CHOICES: i32 = 6;

/// Step multiplier while the fast-scroll modifier is held
pub const FAST_SCROLL_FACTOR: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindPhase {
    /// Keys still held from the press that started binding
    AwaitRelease,
    /// Next held key is captured
    Capture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Closed,
    Open {
        menu: Root,
        selected: NodeId,
    },
    Binding {
        menu: Root,
        selected: NodeId,
        phase: BindPhase,
    },
}

/// Inputs a node can react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeInput {
    Left,
    Right,
    A,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reaction {
    /// The node ignores this input
    None,
    Ok,
    Cancel,
}

#[derive(Debug)]
pub struct Navigator {
    state: MenuState,
    stick: StickRepeat,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            state: MenuState::Closed,
            stick: StickRepeat::default(),
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != MenuState::Closed
    }

    pub fn is_binding(&self) -> bool {
        matches!(self.state, MenuState::Binding { .. })
    }

    /// The menu currently shown
    pub fn open_menu(&self) -> Option<Root> {
        match self.state {
            MenuState::Closed => None,
            MenuState::Open { menu, .. } | MenuState::Binding { menu, .. } => Some(menu),
        }
    }

    pub fn selected(&self) -> Option<NodeId> {
        match self.state {
            MenuState::Closed => None,
            MenuState::Open { selected, .. } | MenuState::Binding { selected, .. } => {
                Some(selected)
            }
        }
    }

    /// Open a menu at its first node. Returns false when the menu is empty.
    pub fn open(&mut self, menu: &OptionMenu, root: Root, host: &mut dyn Host) -> bool {
        let Some(first) = menu.forest.root(root) else {
            debug!("{:?} menu is empty, not opening", root);
            return false;
        };
        host.play_cue(Cue::Select);
        self.state = MenuState::Open {
            menu: root,
            selected: first,
        };
        true
    }

    /// Close the menu and persist the declared settings
    pub fn close(&mut self, menu: &OptionMenu, host: &mut dyn Host) {
        if self.state == MenuState::Closed {
            return;
        }
        host.play_cue(Cue::Saved);
        host.on_menu_closed();
        menu.persist();
        self.state = MenuState::Closed;
    }

    /// Advance the state machine by one frame
    pub fn tick(&mut self, menu: &mut OptionMenu, host: &mut dyn Host, input: &InputFrame) {
        let direction = self.stick.direction(input.stick_x, input.stick_y);

        match self.state {
            MenuState::Binding {
                menu: root,
                selected,
                phase,
            } => self.tick_binding(menu, host, root, selected, phase),
            MenuState::Closed => {
                if input.pressed.contains(Buttons::R) {
                    self.open(menu, Root::Converted, host);
                } else if input.pressed.contains(Buttons::Z) {
                    self.open(menu, Root::Declared, host);
                }
            }
            MenuState::Open {
                menu: root,
                selected,
            } => self.tick_open(menu, host, input, direction, root, selected),
        }
    }

    fn tick_binding(
        &mut self,
        menu: &mut OptionMenu,
        host: &mut dyn Host,
        root: Root,
        selected: NodeId,
        phase: BindPhase,
    ) {
        match phase {
            BindPhase::AwaitRelease => {
                if host.first_key_down().is_none() {
                    self.state = MenuState::Binding {
                        menu: root,
                        selected,
                        phase: BindPhase::Capture,
                    };
                }
            }
            BindPhase::Capture => {
                let node = menu.forest.node_mut(selected);
                let key = match node.origin {
                    Origin::Declared => host.first_key_down(),
                    Origin::Converted => host.raw_key(),
                };
                let Some(key) = key.filter(|&k| k != KEY_INVALID) else {
                    return;
                };
                if let Payload::Bind { binds, slot, .. } = &mut node.payload {
                    let mut codes = binds.get();
                    codes[*slot] = key;
                    binds.set(codes);
                }
                host.play_cue(Cue::Select);
                self.state = MenuState::Open {
                    menu: root,
                    selected,
                };
            }
        }
    }

    fn tick_open(
        &mut self,
        menu: &mut OptionMenu,
        host: &mut dyn Host,
        input: &InputFrame,
        direction: Option<Direction>,
        root: Root,
        selected: NodeId,
    ) {
        let fast = input.held.contains(Buttons::A);

        match direction {
            Some(Direction::Up) => {
                let node = menu.forest.node(selected);
                let target = node
                    .prev()
                    .unwrap_or_else(|| menu.forest.last_sibling(selected));
                self.select(root, target);
                host.play_cue(Cue::Select);
                return;
            }
            Some(Direction::Down) => {
                let node = menu.forest.node(selected);
                let target = node
                    .next()
                    .unwrap_or_else(|| menu.forest.first_sibling(selected));
                self.select(root, target);
                host.play_cue(Cue::Select);
                return;
            }
            Some(Direction::Left) => {
                let reaction = self.react(menu, host, root, selected, NodeInput::Left, fast);
                play_reaction(host, reaction);
                return;
            }
            Some(Direction::Right) => {
                let reaction = self.react(menu, host, root, selected, NodeInput::Right, fast);
                play_reaction(host, reaction);
                return;
            }
            None => {}
        }

        if input.pressed.contains(Buttons::A) {
            let reaction = self.react(menu, host, root, selected, NodeInput::A, fast);
            play_reaction(host, reaction);
        } else if input.pressed.contains(Buttons::B) {
            match menu.forest.node(selected).parent() {
                Some(parent) => {
                    self.select(root, parent);
                    host.play_cue(Cue::Select);
                }
                None => self.close(menu, host),
            }
        } else if input.pressed.contains(Buttons::Z) {
            match self.react(menu, host, root, selected, NodeInput::Z, fast) {
                Reaction::None => self.swap(menu, host, root, Root::Declared),
                reaction => play_reaction(host, reaction),
            }
        } else if input.pressed.contains(Buttons::R) {
            self.swap(menu, host, root, Root::Converted);
        } else if input.pressed.contains(Buttons::START) {
            self.close(menu, host);
        }
    }

    /// Close `target` if it is the open menu, otherwise switch to it
    fn swap(&mut self, menu: &OptionMenu, host: &mut dyn Host, open: Root, target: Root) {
        if open == target {
            self.close(menu, host);
        } else {
            self.open(menu, target, host);
        }
    }

    fn select(&mut self, root: Root, selected: NodeId) {
        self.state = MenuState::Open {
            menu: root,
            selected,
        };
    }

    /// Apply an input to the selected node
    fn react(
        &mut self,
        menu: &mut OptionMenu,
        host: &mut dyn Host,
        root: Root,
        selected: NodeId,
        input: NodeInput,
        fast: bool,
    ) -> Reaction {
        let node = menu.forest.node_mut(selected);
        let origin = node.origin;
        match &mut node.payload {
            Payload::Toggle { value } => {
                match input {
                    NodeInput::Left => value.set(false),
                    NodeInput::Right => value.set(true),
                    NodeInput::A => value.set(!value.get()),
                    NodeInput::Z => return Reaction::None,
                }
                Reaction::Ok
            }
            Payload::Choice { index, choices } => {
                let count = choices.len() as i32;
                cycle(index.get(), count, input)
                    .map(|v| index.set(v))
                    .map_or(Reaction::None, |_| Reaction::Ok)
            }
            Payload::ChoiceLevel { index } => {
                let count = host.level_count(true);
                cycle(index.get(), count, input)
                    .map(|v| index.set(v))
                    .map_or(Reaction::None, |_| Reaction::Ok)
            }
            Payload::ChoiceStar { index } => cycle(index.get(), STAR_CHOICES, input)
                .map(|v| index.set(v))
                .map_or(Reaction::None, |_| Reaction::Ok),
            Payload::Scroll {
                value,
                min,
                max,
                step,
            } => {
                let delta = if fast {
                    step.saturating_mul(FAST_SCROLL_FACTOR)
                } else {
                    *step
                };
                match input {
                    NodeInput::Left => value.set(value.get().saturating_sub(delta).max(*min)),
                    NodeInput::Right => value.set(value.get().saturating_add(delta).min(*max)),
                    _ => return Reaction::None,
                }
                Reaction::Ok
            }
            Payload::Bind { binds, slot, .. } => {
                match input {
                    NodeInput::Left => *slot = slot.saturating_sub(1),
                    NodeInput::Right => *slot = (*slot + 1).min(BIND_SLOTS - 1),
                    NodeInput::Z | NodeInput::A => {
                        let mut codes = binds.get();
                        codes[*slot] = KEY_INVALID;
                        binds.set(codes);
                        if input == NodeInput::A {
                            // the raw reader of converted binds sees only new presses
                            let phase = match origin {
                                Origin::Declared => BindPhase::AwaitRelease,
                                Origin::Converted => BindPhase::Capture,
                            };
                            self.state = MenuState::Binding {
                                menu: root,
                                selected,
                                phase,
                            };
                        }
                    }
                }
                Reaction::Ok
            }
            Payload::Button { action } => {
                if input != NodeInput::A {
                    return Reaction::None;
                }
                let action = action.clone();
                let name = node.name.clone();
                if menu.invoke(&action, &name) {
                    Reaction::Ok
                } else {
                    Reaction::Cancel
                }
            }
            Payload::Submenu { child, .. } => {
                if input != NodeInput::A {
                    return Reaction::None;
                }
                match *child {
                    Some(child) => {
                        self.select(root, child);
                        Reaction::Ok
                    }
                    None => Reaction::Cancel,
                }
            }
        }
    }
}

/// Next index of a choice over `count` entries, `None` if the input does not
/// move choices or there is nothing to choose from
fn cycle(index: i32, count: i32, input: NodeInput) -> Option<i32> {
    if count <= 0 {
        return None;
    }
    let index = index.rem_euclid(count);
    match input {
        NodeInput::Left => Some(if index == 0 { count - 1 } else { index - 1 }),
        NodeInput::Right | NodeInput::A => Some((index + 1) % count),
        NodeInput::Z => None,
    }
}

fn play_reaction(host: &mut dyn Host, reaction: Reaction) {
    match reaction {
        Reaction::Ok => host.play_cue(Cue::Confirm),
        Reaction::Cancel => host.play_cue(Cue::Cancel),
        Reaction::None => {}
    }
}
