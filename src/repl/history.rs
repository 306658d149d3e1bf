use crate::repl::highlighter::ReplHelper;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use std::path::{Path, PathBuf};
use std::{fs, io};
use tracing::{debug, warn};

const HISTORY_FILE_NAME: &str = "history.txt";

type ReplEditor = Editor<ReplHelper, DefaultHistory>;

/// The override if given, else `<data dir>/rsp-questions/history.txt`.
pub(crate) fn history_path(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path.or_else(|| {
        dirs::data_dir()
            .or_else(dirs::config_dir)
            .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(HISTORY_FILE_NAME))
    })
}

/// A missing file is a fresh history, not an error.
pub(crate) fn load(rl: &mut ReplEditor, path: &Path) {
    match rl.load_history(path) {
        Ok(()) => debug!(path = %path.display(), "Loaded REPL history"),
        Err(ReadlineError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No REPL history yet")
        }
        Err(e) => warn!(path = %path.display(), error = %e, "Could not load REPL history"),
    }
}

pub(crate) fn save(rl: &mut ReplEditor, path: &Path) {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %e, "Could not create history directory");
            return;
        }
    }
    match rl.save_history(path) {
        Ok(()) => debug!(path = %path.display(), "Saved REPL history"),
        Err(e) => warn!(path = %path.display(), error = %e, "Could not save REPL history"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use rustyline::history::History;

    fn editor() -> ReplEditor {
        let mut rl = ReplEditor::new().unwrap();
        rl.set_helper(Some(ReplHelper::new()));
        rl
    }

    #[test]
    fn override_path_wins() {
        let path = PathBuf::from("/tmp/custom-history.txt");
        assert_eq!(history_path(Some(path.clone())), Some(path));
    }

    #[test]
    fn default_path_ends_with_crate_history_file() {
        if let Some(path) = history_path(None) {
            assert!(path.ends_with("rsp-questions/history.txt"), "{}", path.display());
        }
    }

    #[test]
    fn history_survives_a_save_and_load_into_a_new_directory() {
        init_test_logging();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(HISTORY_FILE_NAME);

        let mut first = editor();
        load(&mut first, &path);
        assert_eq!(first.history().len(), 0);
        first.add_history_entry("(let ((x 1)) x)").unwrap();
        save(&mut first, &path);
        assert!(path.exists());

        let mut second = editor();
        load(&mut second, &path);
        assert_eq!(second.history().len(), 1);
    }
}
