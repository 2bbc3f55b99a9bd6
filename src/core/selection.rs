//! Resolves the directory a new item should be created in.
//!
//! Hosts that know their selection report it through
//! [`Host::selected_resource`]. Otherwise the path is recovered by running the
//! host's copy-path action and reading it back off the shared clipboard. That
//! fallback races with anything else using the clipboard at the same moment.

use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::host::Host;
use crate::error::ScaffoldError;

/// Returns the selected directory, or the parent of the selected file.
pub fn resolve_base_directory<H: Host + ?Sized>(host: &mut H) -> Result<PathBuf, ScaffoldError> {
    let selected = match host.selected_resource() {
        Some(path) => path,
        None if !host.can_copy_selection() => return Err(ScaffoldError::NoSelection),
        None => selected_via_clipboard(host)?.ok_or(ScaffoldError::NoSelection)?,
    };
    let base = base_directory(&selected)?;
    debug!(selected = %selected.display(), base = %base.display(), "resolved base directory");
    Ok(base)
}

/// `Ok(None)` when the copy action left the clipboard unchanged.
pub fn selected_via_clipboard<H: Host + ?Sized>(
    host: &mut H,
) -> Result<Option<PathBuf>, ScaffoldError> {
    let mut guard = ClipboardGuard::acquire(host)?;
    guard.copy_selected_path()?;
    let copied = guard.clipboard().read_text()?;

    if copied == guard.original {
        return Ok(None);
    }
    Ok(Some(PathBuf::from(copied)))
}

pub fn base_directory(path: &Path) -> Result<PathBuf, ScaffoldError> {
    let metadata = fs::metadata(path)
        .map_err(|_| ScaffoldError::InvalidDirectory(path.display().to_string()))?;

    if metadata.is_dir() {
        return Ok(path.to_path_buf());
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => Ok(parent.to_path_buf()),
        _ => Ok(PathBuf::from(".")),
    }
}

/// Holds the host's clipboard text and writes it back when dropped, unless
/// the clipboard still holds it. Rewriting unchanged text would make this
/// process the clipboard owner on X11, losing the text on exit.
pub struct ClipboardGuard<'a, H: Host + ?Sized> {
    host: &'a mut H,
    original: String,
}

impl<'a, H: Host + ?Sized> ClipboardGuard<'a, H> {
    pub fn acquire(host: &'a mut H) -> Result<Self, ScaffoldError> {
        let original = host.clipboard().read_text()?;
        Ok(Self { host, original })
    }
}

impl<H: Host + ?Sized> Deref for ClipboardGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        self.host
    }
}

impl<H: Host + ?Sized> DerefMut for ClipboardGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        self.host
    }
}

impl<H: Host + ?Sized> Drop for ClipboardGuard<'_, H> {
    fn drop(&mut self) {
        let clipboard = self.host.clipboard();
        if matches!(clipboard.read_text(), Ok(current) if current == self.original) {
            return;
        }
        if let Err(err) = clipboard.write_text(&self.original) {
            warn!(error = %err, "failed to restore clipboard contents");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::mock::{CountingClipboard, MockHost};
    use crate::core::host::{Clipboard, InputOptions, Level};
    use std::panic::{self, AssertUnwindSafe};
    use tempfile::TempDir;

    fn clipboard_host(original: &str, selection: Option<PathBuf>) -> MockHost {
        MockHost {
            clipboard: CountingClipboard::with_text(original),
            explorer_selection: selection,
            ..MockHost::default()
        }
    }

    #[test]
    fn directory_resolves_to_itself() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(base_directory(temp_dir.path()).unwrap(), temp_dir.path());
    }

    #[test]
    fn file_resolves_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("main.py");
        fs::write(&file, "").unwrap();
        assert_eq!(base_directory(&file).unwrap(), temp_dir.path());
    }

    #[test]
    fn missing_path_is_invalid() {
        let result = base_directory(Path::new("/nonexistent/selection"));
        assert!(matches!(result, Err(ScaffoldError::InvalidDirectory(_))));
    }

    #[test]
    fn direct_selection_skips_clipboard() {
        let temp_dir = TempDir::new().unwrap();
        let mut host = MockHost::selecting(temp_dir.path());
        host.clipboard = CountingClipboard::with_text("keep me");
        host.fail_copy = true;

        assert_eq!(resolve_base_directory(&mut host).unwrap(), temp_dir.path());
        assert_eq!(host.clipboard.text(), "keep me");
    }

    #[test]
    fn clipboard_selection_restores_original_text() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("mod.py");
        fs::write(&file, "").unwrap();
        let mut host = clipboard_host("user text", Some(file));

        assert_eq!(resolve_base_directory(&mut host).unwrap(), temp_dir.path());
        assert_eq!(host.clipboard.text(), "user text");
    }

    #[test]
    fn unchanged_clipboard_means_no_selection() {
        let mut host = clipboard_host("user text", None);

        let result = resolve_base_directory(&mut host);
        assert!(matches!(result, Err(ScaffoldError::NoSelection)));
        assert_eq!(host.clipboard.text(), "user text");
    }

    #[test]
    fn clipboard_restored_when_copy_action_fails() {
        let mut host = clipboard_host("user text", Some(PathBuf::from("/tmp")));
        host.fail_copy = true;

        assert!(selected_via_clipboard(&mut host).is_err());
        assert_eq!(host.clipboard.text(), "user text");
    }

    #[test]
    fn clipboard_restored_on_panic() {
        let mut host = clipboard_host("user text", Some(PathBuf::from("/tmp")));

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut guard = ClipboardGuard::acquire(&mut host).unwrap();
            guard.copy_selected_path().unwrap();
            assert_eq!(guard.clipboard().read_text().unwrap(), "/tmp");
            panic!("interrupted");
        }));

        assert!(result.is_err());
        assert_eq!(host.clipboard.text(), "user text");
    }

    #[test]
    fn selection_equal_to_clipboard_reads_as_none() {
        let mut host = clipboard_host("/tmp", Some(PathBuf::from("/tmp")));

        assert_eq!(selected_via_clipboard(&mut host).unwrap(), None);
        assert_eq!(host.clipboard.text(), "/tmp");
    }

    #[test]
    fn unchanged_clipboard_is_never_rewritten() {
        let mut host = MockHost {
            clipboard: CountingClipboard::with_text("user text"),
            ..MockHost::default()
        };

        let result = resolve_base_directory(&mut host);

        assert!(matches!(result, Err(ScaffoldError::NoSelection)));
        assert_eq!(host.clipboard.writes, 0);
        assert_eq!(host.clipboard.text(), "user text");
    }

    #[test]
    fn changed_clipboard_is_written_back_once() {
        let mut host = MockHost {
            clipboard: CountingClipboard::with_text("user text"),
            explorer_selection: Some(PathBuf::from("/tmp")),
            ..MockHost::default()
        };

        assert_eq!(
            selected_via_clipboard(&mut host).unwrap(),
            Some(PathBuf::from("/tmp"))
        );
        assert_eq!(host.clipboard.writes, 1);
        assert_eq!(host.clipboard.text(), "user text");
    }

    #[derive(Default)]
    struct NoCopyHost {
        inner: MockHost,
    }

    impl Host for NoCopyHost {
        fn clipboard(&mut self) -> &mut dyn Clipboard {
            &mut self.inner.clipboard
        }

        fn can_copy_selection(&self) -> bool {
            false
        }

        fn copy_selected_path(&mut self) -> Result<(), ScaffoldError> {
            self.inner.copy_selected_path()
        }

        fn pick(&mut self, items: &[String], placeholder: &str) -> Option<String> {
            self.inner.pick(items, placeholder)
        }

        fn prompt(&mut self, options: &InputOptions) -> Option<String> {
            self.inner.prompt(options)
        }

        fn notify(&mut self, level: Level, message: &str) {
            self.inner.notify(level, message)
        }

        fn open_document(&mut self, path: &Path) -> Result<(), ScaffoldError> {
            self.inner.open_document(path)
        }
    }

    #[test]
    fn host_without_copy_action_reports_no_selection() {
        let mut host = NoCopyHost::default();
        host.inner.fail_copy = true;

        let result = resolve_base_directory(&mut host);

        assert!(matches!(result, Err(ScaffoldError::NoSelection)));
        assert_eq!(host.inner.clipboard.writes, 0);
    }
}
