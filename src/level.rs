use std::path::Path;

use crate::error::LevelLoadError;

/// Raw level layout: one string per grid row, top row first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Level {
    lines: Vec<String>,
}

impl Level {
    /// Split level text into rows.
    ///
    /// Both `\n` and `\r\n` endings are accepted.  Empty lines at the very end
    /// of the file are dropped; empty lines anywhere else are kept so the grid
    /// builder can reject them as ragged rows.  A final line of spaces is a
    /// row of unmapped codes, not padding, and is kept.
    pub fn parse(text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_owned).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Read the level file at `path`.
///
/// An empty file is not an error here; it produces an empty [`Level`] which
/// the grid builder then refuses.
pub fn load_level(path: impl AsRef<Path>) -> Result<Level, LevelLoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LevelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let level = Level::parse(&text);
    tracing::debug!(path = %path.display(), rows = level.lines.len(), "level loaded");
    Ok(level)
}
