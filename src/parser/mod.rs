//! Menu declaration parser
//!
//! This module turns declaration text files into menu nodes:
//! - [`lexer`]: Tokenization (one line → tokens)
//! - [`directive`]: Keyword and arity checks (tokens → [`directive::Directive`])
//! - [`loader`]: Feeding files and directories to a
//!   [`MenuBuilder`](crate::menu::builder::MenuBuilder)
//!
//! # Format
//!
//! One directive per line, `#` comments, double quotes to keep spaces inside
//! a token. Malformed lines are skipped rather than reported so that half
//! written files still load.

pub mod directive;
pub mod lexer;
pub mod loader;
