use crate::error::ScaffoldError;
use crate::fs::{Entry, list_directory};
use std::path::{Path, PathBuf};

/// Navigation state for the terminal file explorer.
#[derive(Debug)]
pub struct Explorer {
    current_dir: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    show_hidden: bool,
}

impl Explorer {
    pub fn new(directory: PathBuf, show_hidden: bool) -> Result<Self, ScaffoldError> {
        if !directory.is_dir() {
            return Err(ScaffoldError::InvalidDirectory(
                directory.to_string_lossy().to_string(),
            ));
        }

        let current_dir = directory.canonicalize()?;
        let entries = list_directory(&current_dir, show_hidden)?;
        Ok(Explorer {
            current_dir,
            entries,
            selected: 0,
            show_hidden,
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// The highlighted entry, or the current directory when it is empty.
    pub fn selected_path(&self) -> PathBuf {
        self.selected_entry()
            .map(|entry| entry.path.clone())
            .unwrap_or_else(|| self.current_dir.clone())
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Descends into the highlighted directory. Files are ignored.
    pub fn enter_selected(&mut self) -> Result<(), ScaffoldError> {
        let Some(entry) = self.selected_entry().filter(|entry| entry.is_dir) else {
            return Ok(());
        };
        let target = entry.path.clone();
        self.entries = list_directory(&target, self.show_hidden)?;
        self.current_dir = target;
        self.selected = 0;
        Ok(())
    }

    /// Moves to the parent directory, highlighting the directory just left.
    pub fn go_parent(&mut self) -> Result<(), ScaffoldError> {
        let Some(parent) = self.current_dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        let left = self.current_dir.clone();
        self.entries = list_directory(&parent, self.show_hidden)?;
        self.current_dir = parent;
        self.selected = self
            .entries
            .iter()
            .position(|entry| entry.path == left)
            .unwrap_or(0);
        Ok(())
    }

    /// Re-reads the current directory, keeping the highlighted name if it is
    /// still listed.
    pub fn refresh(&mut self) -> Result<(), ScaffoldError> {
        let previous = self.selected_entry().map(|entry| entry.name.clone());
        self.entries = list_directory(&self.current_dir, self.show_hidden)?;
        self.selected = previous
            .and_then(|name| self.entries.iter().position(|entry| entry.name == name))
            .unwrap_or_else(|| self.selected.min(self.entries.len().saturating_sub(1)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("pkg")).unwrap();
        fs::write(temp_dir.path().join("pkg/__init__.py"), "").unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("setup.py"), "").unwrap();
        temp_dir
    }

    #[test]
    fn rejects_missing_directory() {
        let result = Explorer::new(PathBuf::from("/nonexistent/explorer"), false);
        assert!(matches!(result, Err(ScaffoldError::InvalidDirectory(_))));
    }

    #[test]
    fn rejects_file_as_root() {
        let temp_dir = tree();
        let result = Explorer::new(temp_dir.path().join("setup.py"), false);
        assert!(matches!(result, Err(ScaffoldError::InvalidDirectory(_))));
    }

    #[test]
    fn selection_moves_within_bounds() {
        let temp_dir = tree();
        let mut explorer = Explorer::new(temp_dir.path().to_path_buf(), false).unwrap();

        explorer.select_previous();
        assert_eq!(explorer.selected_index(), 0);
        explorer.select_next();
        explorer.select_next();
        explorer.select_next();
        assert_eq!(explorer.selected_entry().unwrap().name, "setup.py");
    }

    #[test]
    fn enter_and_leave_directory() {
        let temp_dir = tree();
        let mut explorer = Explorer::new(temp_dir.path().to_path_buf(), false).unwrap();
        let root = explorer.current_dir().to_path_buf();

        explorer.select_next();
        explorer.enter_selected().unwrap();
        assert_eq!(explorer.current_dir(), root.join("src"));
        assert!(explorer.entries().is_empty());
        assert_eq!(explorer.selected_path(), root.join("src"));

        explorer.go_parent().unwrap();
        assert_eq!(explorer.current_dir(), root);
        assert_eq!(explorer.selected_entry().unwrap().name, "src");
    }

    #[test]
    fn entering_a_file_does_nothing() {
        let temp_dir = tree();
        let mut explorer = Explorer::new(temp_dir.path().to_path_buf(), false).unwrap();
        explorer.select_next();
        explorer.select_next();

        explorer.enter_selected().unwrap();
        assert_eq!(explorer.selected_entry().unwrap().name, "setup.py");
    }

    #[test]
    fn refresh_keeps_highlighted_name() {
        let temp_dir = tree();
        let mut explorer = Explorer::new(temp_dir.path().to_path_buf(), false).unwrap();
        explorer.select_next();
        explorer.select_next();

        fs::create_dir(temp_dir.path().join("docs")).unwrap();
        explorer.refresh().unwrap();

        assert_eq!(explorer.selected_entry().unwrap().name, "setup.py");
        assert_eq!(explorer.entries().len(), 4);
    }
}
