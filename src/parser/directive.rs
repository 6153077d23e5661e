//! Directive definitions for menu declaration files
//!
//! One non-empty line of a declaration file holds one directive:
//!
//! ```text
//! SUBMENU  name label title
//! TOGGLE   name label configKey initialValue
//! SCROLL   name label configKey initialValue min max step
//! CHOICE   name label configKey initialIndex choice...
//! BUTTON   name label actionName
//! BIND     name label configKey mask bind0 bind1 bind2
//! ENDMENU
//! ```
//!
//! Lines with an unknown keyword or fewer tokens than the keyword needs do not
//! produce a directive. Extra trailing tokens are ignored, except for `CHOICE`
//! where every token after the initial index is a choice label.

use crate::menu::node::BIND_SLOTS;

/// A parsed declaration line
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Submenu {
        name: String,
        label: String,
        title: String,
    },
    Toggle {
        name: String,
        label: String,
        config_key: Option<String>,
        initial: bool,
    },
    Scroll {
        name: String,
        label: String,
        config_key: Option<String>,
        initial: i32,
        min: i32,
        max: i32,
        step: i32,
    },
    Choice {
        name: String,
        label: String,
        config_key: Option<String>,
        initial: i32,
        choices: Vec<String>,
    },
    Button {
        name: String,
        label: String,
        action: String,
    },
    Bind {
        name: String,
        label: String,
        config_key: Option<String>,
        mask: u32,
        binds: [u32; BIND_SLOTS],
    },
    EndMenu,
}

impl Directive {
    /// Build a directive from the tokens of one line.
    ///
    /// Returns `None` for empty lines, unknown keywords and short lines.
    pub fn from_tokens(tokens: &[String]) -> Option<Directive> {
        let keyword = tokens.first()?;
        let arg = |i: usize| tokens[i].clone();

        let directive = match keyword.as_str() {
            "SUBMENU" if tokens.len() >= 4 => Directive::Submenu {
                name: arg(1),
                label: arg(2),
                title: arg(3),
            },
            "TOGGLE" if tokens.len() >= 5 => Directive::Toggle {
                name: arg(1),
                label: arg(2),
                config_key: config_key(&tokens[3]),
                initial: parse_int(&tokens[4]) != 0,
            },
            "SCROLL" if tokens.len() >= 8 => Directive::Scroll {
                name: arg(1),
                label: arg(2),
                config_key: config_key(&tokens[3]),
                initial: parse_int(&tokens[4]),
                min: parse_int(&tokens[5]),
                max: parse_int(&tokens[6]),
                step: parse_int(&tokens[7]),
            },
            "CHOICE" if tokens.len() >= 6 => Directive::Choice {
                name: arg(1),
                label: arg(2),
                config_key: config_key(&tokens[3]),
                initial: parse_int(&tokens[4]),
                choices: tokens[5..].to_vec(),
            },
            "BUTTON" if tokens.len() >= 4 => Directive::Button {
                name: arg(1),
                label: arg(2),
                action: arg(3),
            },
            "BIND" if tokens.len() >= 5 + BIND_SLOTS => Directive::Bind {
                name: arg(1),
                label: arg(2),
                config_key: config_key(&tokens[3]),
                mask: parse_int(&tokens[4]) as u32,
                binds: [
                    parse_int(&tokens[5]) as u32,
                    parse_int(&tokens[6]) as u32,
                    parse_int(&tokens[7]) as u32,
                ],
            },
            "ENDMENU" => Directive::EndMenu,
            _ => return None,
        };
        Some(directive)
    }

    /// The keyword this directive was declared with
    pub fn keyword(&self) -> &'static str {
        match self {
            Directive::Submenu { .. } => "SUBMENU",
            Directive::Toggle { .. } => "TOGGLE",
            Directive::Scroll { .. } => "SCROLL",
            Directive::Choice { .. } => "CHOICE",
            Directive::Button { .. } => "BUTTON",
            Directive::Bind { .. } => "BIND",
            Directive::EndMenu => "ENDMENU",
        }
    }
}

/// Parse an integer field the way the declaration format always has:
/// `0x`-prefixed hex, otherwise a leading decimal with optional sign.
/// Anything unparsable reads as 0. Hex keeps its 32-bit pattern, so
/// `0xFFFFFFFF` is `-1`.
pub fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    if text.len() > 2 && text.starts_with("0x") {
        let digits: String = text[2..]
            .chars()
            .take_while(|c| c.is_ascii_hexdigit())
            .collect();
        return u32::from_str_radix(&digits, 16)
            .map(|v| v as i32)
            .unwrap_or(0);
    }

    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let mut value: i64 = 0;
    for c in rest.chars().take_while(|c| c.is_ascii_digit()) {
        value = (value * 10 + i64::from(c as u8 - b'0')).min(i64::from(u32::MAX));
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Normalize a config key token.
///
/// `null`, `NULL` and the empty string mean "not persisted". Other keys keep
/// ASCII letters and digits and have everything else replaced by `_`.
pub fn config_key(text: &str) -> Option<String> {
    if text.is_empty() || text == "null" || text == "NULL" {
        return None;
    }
    Some(
        text.chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect(),
    )
}
