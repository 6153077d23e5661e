//! Rendering adapter
//!
//! Computes what a frontend has to draw for the open menu without drawing
//! anything itself: the header title, a fixed-height window of rows around the
//! selection, each row's value text and the scrollbar thumb.
//!
//! # Window
//!
//! Up to `rows - 1` siblings before and after the selection are considered.
//! If everything fits, the window starts at the first sibling. Otherwise the
//! selection stays in the middle row, except near either end of the list where
//! the window stops at the first or last sibling.

use crate::menu::forest::Forest;
use crate::menu::node::{NodeId, Payload, Root, BIND_SLOTS, KEY_INVALID};
use crate::nav::{Host, MenuState, Navigator};

/// Rows shown at once
pub const VISIBLE_ROWS: usize = 7;

pub const DECLARED_MENU_TITLE: &str = "MOD OPTIONS";
pub const CONVERTED_MENU_TITLE: &str = "OPTIONS";

pub const TEXT_ENABLED: &str = "Enabled";
pub const TEXT_DISABLED: &str = "Disabled";
pub const TEXT_UNBOUND: &str = "NONE";
pub const TEXT_CAPTURING: &str = "...";

/// Rows to draw, top to bottom. `None` rows stay empty.
pub fn visible_window(forest: &Forest, selected: NodeId, rows: usize) -> Vec<Option<NodeId>> {
    if rows == 0 {
        return Vec::new();
    }
    let siblings = forest.siblings(selected);
    let index = forest.sibling_index(selected);
    let center = rows - 1;
    let half = rows / 2;

    // slot `center` holds the selection, slots around it its neighbours
    let slot = |i: usize| -> Option<NodeId> {
        (index + i)
            .checked_sub(center)
            .and_then(|n| siblings.get(n).copied())
    };
    let before = index.min(center);
    let after = (siblings.len() - 1 - index).min(center);
    let start = center - before;
    let end = center + after;

    let first = if end - start < rows {
        start
    } else if end <= center + half {
        end - center
    } else if start >= half {
        start
    } else {
        half
    };

    (first..first + rows).map(slot).collect()
}

/// Scrollbar thumb as fractions of the track, measured from the top
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollThumb {
    pub offset: f32,
    pub size: f32,
}

impl ScrollThumb {
    /// Thumb start and length in cells of a track `track` cells long
    pub fn cells(&self, track: u16) -> (u16, u16) {
        let len = ((self.size * track as f32).round() as u16).clamp(1, track.max(1));
        let start = ((self.offset * track as f32).round() as u16).min(track.saturating_sub(len));
        (start, len)
    }
}

/// Thumb for `count` siblings with the selection at `index`, `None` when
/// everything fits
pub fn scrollbar(count: usize, index: usize, rows: usize) -> Option<ScrollThumb> {
    if rows == 0 || count <= rows {
        return None;
    }
    let hidden = (count - (rows - 1)) as f32;
    let size = (1.0 / hidden).sqrt();
    let progress = ((index as f32 - (rows / 2) as f32) / hidden).clamp(0.0, 1.0);
    Some(ScrollThumb {
        offset: (1.0 - size) * progress,
        size,
    })
}

/// What a row shows on its value side
#[derive(Debug, Clone, PartialEq)]
pub enum ValueView {
    Empty,
    Toggle(bool),
    Text(String),
    Scroll {
        value: i32,
        min: i32,
        max: i32,
    },
    Binds {
        slots: [String; BIND_SLOTS],
        active: usize,
    },
    /// Submenu entry, enterable when it has children
    Submenu {
        enterable: bool,
    },
}

impl ValueView {
    pub fn text(&self) -> String {
        match self {
            ValueView::Empty => String::new(),
            ValueView::Toggle(true) => TEXT_ENABLED.to_string(),
            ValueView::Toggle(false) => TEXT_DISABLED.to_string(),
            ValueView::Text(text) => text.clone(),
            ValueView::Scroll { value, .. } => value.to_string(),
            ValueView::Binds { slots, .. } => slots.join(" "),
            ValueView::Submenu { enterable: true } => ">".to_string(),
            ValueView::Submenu { enterable: false } => String::new(),
        }
    }

    /// Fill ratio of a scroll value, 0.0 to 1.0
    pub fn ratio(&self) -> Option<f64> {
        match *self {
            ValueView::Scroll { value, min, max } if max > min => {
                Some((f64::from(value - min) / f64::from(max - min)).clamp(0.0, 1.0))
            }
            ValueView::Scroll { .. } => Some(0.0),
            _ => None,
        }
    }
}

/// Text of one key code
pub fn key_text(code: u32) -> String {
    if code == KEY_INVALID {
        TEXT_UNBOUND.to_string()
    } else {
        format!("{:04X}", code)
    }
}

/// Value side of a node. `capturing` marks the active bind slot as waiting
/// for a key.
pub fn value_view(forest: &Forest, host: &dyn Host, id: NodeId, capturing: bool) -> ValueView {
    match &forest.node(id).payload {
        Payload::Toggle { value } => ValueView::Toggle(value.get()),
        Payload::Choice { index, choices } => ValueView::Text(
            usize::try_from(index.get())
                .ok()
                .and_then(|i| choices.get(i))
                .cloned()
                .unwrap_or_default(),
        ),
        Payload::ChoiceLevel { index } => {
            ValueView::Text(host.level_name(usize::try_from(index.get()).unwrap_or(0)))
        }
        Payload::ChoiceStar { index } => {
            ValueView::Text(format!("Star {}", i64::from(index.get()) + 1))
        }
        Payload::Scroll {
            value, min, max, ..
        } => ValueView::Scroll {
            value: value.get(),
            min: *min,
            max: *max,
        },
        Payload::Bind { binds, slot, .. } => {
            let codes = binds.get();
            let slots = std::array::from_fn(|i| {
                if capturing && i == *slot {
                    TEXT_CAPTURING.to_string()
                } else {
                    key_text(codes[i])
                }
            });
            ValueView::Binds {
                slots,
                active: *slot,
            }
        }
        Payload::Button { .. } => ValueView::Empty,
        Payload::Submenu { child, .. } => ValueView::Submenu {
            enterable: child.is_some(),
        },
    }
}

/// Header: the parent's title inside a submenu, else the menu's name
pub fn header_title(forest: &Forest, root: Root, selected: NodeId) -> String {
    match forest.node(selected).parent() {
        Some(parent) => forest.node(parent).title.clone(),
        None => match root {
            Root::Declared => DECLARED_MENU_TITLE.to_string(),
            Root::Converted => CONVERTED_MENU_TITLE.to_string(),
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: NodeId,
    pub label: String,
    pub selected: bool,
    pub value: ValueView,
}

/// Everything needed to draw the open menu
#[derive(Debug, Clone, PartialEq)]
pub struct MenuView {
    pub title: String,
    pub rows: Vec<Option<RowView>>,
    pub thumb: Option<ScrollThumb>,
    pub position: usize,
    pub count: usize,
}

impl MenuView {
    /// View of the navigator's open menu, `None` while closed
    pub fn build(
        forest: &Forest,
        host: &dyn Host,
        navigator: &Navigator,
        rows: usize,
    ) -> Option<MenuView> {
        let (root, selected, binding) = match navigator.state() {
            MenuState::Closed => return None,
            MenuState::Open { menu, selected } => (menu, selected, false),
            MenuState::Binding { menu, selected, .. } => (menu, selected, true),
        };

        let count = forest.sibling_count(selected);
        let position = forest.sibling_index(selected);
        let rows = visible_window(forest, selected, rows)
            .into_iter()
            .map(|slot| {
                slot.map(|id| {
                    let is_selected = id == selected;
                    RowView {
                        id,
                        label: forest.node(id).label.clone(),
                        selected: is_selected,
                        value: value_view(forest, host, id, binding && is_selected),
                    }
                })
            })
            .collect::<Vec<_>>();

        Some(MenuView {
            title: header_title(forest, root, selected),
            thumb: scrollbar(count, position, rows.len()),
            rows,
            position,
            count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::builder::{Cursor, MenuBuilder};

    fn flat(count: usize) -> (Forest, Vec<NodeId>) {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let mut ids = Vec::new();
        {
            let mut b = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared);
            for i in 0..count {
                ids.push(b.button(&format!("n{}", i), "N", "x").unwrap());
            }
        }
        (forest, ids)
    }

    fn window_indices(forest: &Forest, ids: &[NodeId], selected: usize) -> Vec<Option<usize>> {
        visible_window(forest, ids[selected], VISIBLE_ROWS)
            .into_iter()
            .map(|slot| slot.map(|id| ids.iter().position(|&x| x == id).unwrap()))
            .collect()
    }

    #[test]
    fn test_short_list_starts_at_top() {
        let (forest, ids) = flat(4);
        let window = window_indices(&forest, &ids, 2);
        assert_eq!(
            window,
            vec![Some(0), Some(1), Some(2), Some(3), None, None, None]
        );
    }

    #[test]
    fn test_long_list_window() {
        let (forest, ids) = flat(20);
        let as_range = |sel: usize| -> Vec<usize> {
            window_indices(&forest, &ids, sel)
                .into_iter()
                .map(|s| s.unwrap())
                .collect()
        };
        // near the top the window stays at the first sibling
        assert_eq!(as_range(0), (0..7).collect::<Vec<_>>());
        assert_eq!(as_range(3), (0..7).collect::<Vec<_>>());
        // in the middle the selection sits on row 3
        assert_eq!(as_range(4), (1..8).collect::<Vec<_>>());
        assert_eq!(as_range(10), (7..14).collect::<Vec<_>>());
        // near the bottom the window stops at the last sibling
        assert_eq!(as_range(17), (13..20).collect::<Vec<_>>());
        assert_eq!(as_range(19), (13..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_exactly_full() {
        let (forest, ids) = flat(7);
        for sel in 0..7 {
            let window = window_indices(&forest, &ids, sel);
            assert_eq!(window, (0..7).map(Some).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_scrollbar() {
        assert_eq!(scrollbar(7, 3, VISIBLE_ROWS), None);
        let top = scrollbar(10, 0, VISIBLE_ROWS).unwrap();
        assert_eq!(top.offset, 0.0);
        assert!((top.size - 0.5).abs() < 1e-6);
        let bottom = scrollbar(10, 9, VISIBLE_ROWS).unwrap();
        assert!((bottom.offset - 0.5).abs() < 1e-6);
        assert_eq!(bottom.cells(10), (5, 5));
    }

    struct NoKeys;

    impl Host for NoKeys {
        fn first_key_down(&self) -> Option<u32> {
            None
        }

        fn is_key_down(&self, _key: u32) -> bool {
            false
        }

        fn level_count(&self, _exclude_castle: bool) -> i32 {
            0
        }
    }

    #[test]
    fn test_star_text_at_index_limit() {
        let mut forest = Forest::new();
        let mut cursor = Cursor::default();
        let id = MenuBuilder::new(&mut forest, &mut cursor, Root::Declared)
            .choice_star("star", "Star")
            .unwrap();
        if let Payload::ChoiceStar { index } = &mut forest.node_mut(id).payload {
            index.set(i32::MAX);
        }
        let view = value_view(&forest, &NoKeys, id, false);
        assert_eq!(view.text(), "Star 2147483648");
    }

    #[test]
    fn test_value_text() {
        assert_eq!(ValueView::Toggle(true).text(), "Enabled");
        assert_eq!(key_text(KEY_INVALID), "NONE");
        assert_eq!(key_text(0x39), "0039");
        let view = ValueView::Scroll {
            value: 5,
            min: 0,
            max: 10,
        };
        assert_eq!(view.text(), "5");
        assert_eq!(view.ratio(), Some(0.5));
    }
}
