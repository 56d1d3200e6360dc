//! Loading the `package:channel` operator selection.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::domain::errors::DomainError;
use crate::domain::model::{OperatorSelection, SelectionEntry};
use crate::infra::fs;

const SEPARATOR: char = ':';

/// Parse one selection line. Segments past the second are ignored.
pub fn parse_entry(line_number: usize, line: &str) -> Result<SelectionEntry, DomainError> {
    let mut fields = line.split(SEPARATOR);
    let package = fields.next();
    let channel = fields.next();

    match (package, channel) {
        (Some(package), Some(channel)) => Ok(SelectionEntry {
            package: package.trim().to_string(),
            channel: channel.trim().to_string(),
        }),
        _ => Err(DomainError::MalformedSelection {
            line: line_number,
            content: line.to_string(),
        }),
    }
}

/// Parse a whole selection document. Empty lines are skipped; any other line without a
/// separator, whitespace-only ones included, aborts the parse.
pub fn parse_selection(contents: &str) -> Result<OperatorSelection, DomainError> {
    let mut selection = OperatorSelection::new();
    for (index, line) in contents.lines().enumerate() {
        if line.is_empty() {
            continue;
        }
        let entry = parse_entry(index + 1, line)?;
        if let Some(previous) = selection.channel_for(&entry.package)
            && previous != entry.channel
        {
            debug!(
                package = %entry.package,
                previous,
                channel = %entry.channel,
                "package selected twice, keeping the later channel"
            );
        }
        selection.insert(entry);
    }
    Ok(selection)
}

/// Read and parse the selection file at `path`.
pub fn read_selection(path: &Path) -> Result<OperatorSelection> {
    let contents = fs::read_text(path)?;
    let selection = parse_selection(&contents)
        .with_context(|| format!("invalid operator selection in {}", path.display()))?;
    debug!(packages = selection.len(), path = %path.display(), "loaded operator selection");
    Ok(selection)
}
