//! Loading of declaration files into the declared menu
//!
//! Loading never fails as a whole: unreadable files are skipped with a
//! warning, short or unknown lines are skipped, duplicates are ignored by the
//! builder. The [`LoadReport`] counts what happened so callers and tests can
//! look without parsing logs.

use std::fs;
use std::ops::AddAssign;
use std::path::Path;

use log::{debug, info, warn};

use super::directive::Directive;
use super::lexer::tokenize;
use crate::errors::{MenuError, Result};
use crate::menu::builder::{BuildOutcome, MenuBuilder};

/// Extension of declaration files
pub const DECLARATION_EXTENSION: &str = "txt";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub files: usize,
    /// Lines that produced a node or closed a submenu
    pub directives: usize,
    /// Non-empty lines that were not a valid directive
    pub ignored: usize,
    pub duplicates: usize,
    pub unbalanced_endmenus: usize,
}

impl AddAssign for LoadReport {
    fn add_assign(&mut self, other: LoadReport) {
        self.files += other.files;
        self.directives += other.directives;
        self.ignored += other.ignored;
        self.duplicates += other.duplicates;
        self.unbalanced_endmenus += other.unbalanced_endmenus;
    }
}

/// Feed every line of `text` to the builder
pub fn load_source(builder: &mut MenuBuilder<'_>, text: &str) -> LoadReport {
    let mut report = LoadReport::default();

    for (line_no, line) in text.lines().enumerate() {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            continue;
        }
        let Some(directive) = Directive::from_tokens(&tokens) else {
            debug!("line {}: skipped '{}'", line_no + 1, tokens[0]);
            report.ignored += 1;
            continue;
        };
        match builder.apply(&directive) {
            BuildOutcome::Created(_) | BuildOutcome::Closed => report.directives += 1,
            BuildOutcome::Duplicate => report.duplicates += 1,
            BuildOutcome::Unbalanced => {
                warn!("line {}: unbalanced {}", line_no + 1, directive.keyword());
                report.unbalanced_endmenus += 1;
            }
        }
    }

    report
}

/// Load one declaration file
pub fn load_file(builder: &mut MenuBuilder<'_>, path: &Path) -> Result<LoadReport> {
    let bytes = fs::read(path).map_err(|source| MenuError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let mut report = load_source(builder, &text);
    report.files = 1;
    info!(
        "loaded {} ({} directives, {} ignored, {} duplicates)",
        path.display(),
        report.directives,
        report.ignored,
        report.duplicates
    );
    Ok(report)
}

/// Load every `*.txt` file of `dir` in the order the filesystem lists them.
///
/// A missing directory loads nothing.
pub fn load_directory(builder: &mut MenuBuilder<'_>, dir: &Path) -> LoadReport {
    let mut report = LoadReport::default();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("no declarations loaded from {}: {}", dir.display(), e);
            return report;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_declaration = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == DECLARATION_EXTENSION);
        if !is_declaration {
            continue;
        }
        match load_file(builder, &path) {
            Ok(file_report) => report += file_report,
            Err(e) => warn!("{}", e),
        }
    }

    report
}
