//! Line-oriented file backend
//!
//! Each domain directory holds `pending.txt`, `indexed.txt` and `failed.txt`
//! (one URL per line, UTF-8) plus an append-only `errors.log`.

use crate::state::LinkSet;
use crate::storage::traits::{LinkStore, StorageError, StorageResult};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const ERROR_LOG_FILE: &str = "errors.log";

/// File-backed link store for one domain
#[derive(Debug, Clone)]
pub struct FileLinkStore {
    dir: PathBuf,
}

impl FileLinkStore {
    /// Creates a store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn set_path(&self, set: LinkSet) -> PathBuf {
        self.dir.join(set.file_name())
    }

    fn error_log_path(&self) -> PathBuf {
        self.dir.join(ERROR_LOG_FILE)
    }

    fn ensure_dir(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })
    }

    fn read_lines(path: &Path) -> StorageResult<Vec<String>> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content.lines().map(str::to_string).collect()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(StorageError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl LinkStore for FileLinkStore {
    fn load(&self, set: LinkSet) -> StorageResult<Vec<String>> {
        let path = self.set_path(set);
        let links = Self::read_lines(&path)?;
        tracing::debug!(
            "Loaded {} {} links from {}",
            links.len(),
            set,
            path.display()
        );
        Ok(links)
    }

    fn save(&mut self, set: LinkSet, links: &[String]) -> StorageResult<()> {
        self.ensure_dir()?;

        let path = self.set_path(set);
        let mut content = String::with_capacity(links.iter().map(|l| l.len() + 1).sum());
        for link in links {
            content.push_str(link);
            content.push('\n');
        }

        // Write next to the target and rename so a crash never leaves a torn file
        let tmp_path = path.with_extension("txt.tmp");
        fs::write(&tmp_path, content).map_err(|source| StorageError::Write {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &path).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Saved {} {} links to {}", links.len(), set, path.display());
        Ok(())
    }

    fn append_error(&mut self, url: &str, reason: &str) -> StorageResult<()> {
        self.ensure_dir()?;

        let path = self.error_log_path();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        // Reasons can carry response bodies; keep one entry per line
        let reason = reason.replace(['\n', '\r'], " ");
        writeln!(file, "{}: {}", url, reason).map_err(|source| StorageError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(())
    }

    fn load_errors(&self) -> StorageResult<Vec<String>> {
        Self::read_lines(&self.error_log_path())
    }
}
