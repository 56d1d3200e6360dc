//! File helpers attaching the offending path to IO errors.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a whole file into memory.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Append `contents` to `path`, creating the file when missing. Existing content is never
/// truncated.
pub fn append_text(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {} for appending", path.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("failed to append to {}", path.display()))?;
    file.flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_existing_content() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("out.txt");
        fs::write(&path, "first\n")?;

        append_text(&path, "second\n")?;

        assert_eq!(read_text(&path)?, "first\nsecond\n");
        Ok(())
    }

    #[test]
    fn append_creates_missing_file() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("new.txt");

        append_text(&path, "line\n")?;

        assert_eq!(read_text(&path)?, "line\n");
        Ok(())
    }

    #[test]
    fn read_error_names_the_path() {
        let err = read_text(Path::new("/nonexistent/index.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/index.json"));
    }
}
