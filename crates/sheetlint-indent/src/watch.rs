//! Re-check stylesheets when they change on disk.
//!
//! This module is only available with the `watch` feature.

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{DebouncedEvent, DebouncedEventKind, Debouncer, new_debouncer};
use std::collections::{BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use crate::options::IndentationOptions;
use crate::rule::{Indentation, Violation};
use crate::{Error, Result};

type EventBatch = std::result::Result<Vec<DebouncedEvent>, notify::Error>;

/// Outcome of re-checking one changed file.
#[derive(Debug)]
pub struct Recheck {
    /// The file that was checked.
    pub path: PathBuf,
    /// Violations found, or why the file could not be checked.
    pub result: Result<Vec<Violation>>,
}

/// Watches stylesheet files and re-runs the indentation rule on change.
///
/// Files that disappear are dropped from the watch set; watching them again
/// after they are recreated needs another [`watch`](Self::watch) call.
///
/// # Example
///
/// ```ignore
/// let mut watcher = IndentationWatcher::new(IndentationOptions::default())?;
/// watcher.watch("styles/app.css")?;
///
/// loop {
///     for recheck in watcher.poll() {
///         report(recheck.path, recheck.result?);
///     }
/// }
/// ```
pub struct IndentationWatcher {
    rule: Indentation,
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<EventBatch>,
    watched_paths: HashSet<PathBuf>,
}

impl IndentationWatcher {
    /// Create a watcher that checks with `options`.
    pub fn new(options: IndentationOptions) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer = new_debouncer(Duration::from_millis(100), tx)
            .map_err(|e| Error::Watch(e.to_string()))?;

        Ok(Self {
            rule: Indentation::new(options),
            debouncer,
            rx,
            watched_paths: HashSet::new(),
        })
    }

    /// The options every re-check runs with.
    pub fn options(&self) -> &IndentationOptions {
        self.rule.options()
    }

    /// Start watching a stylesheet file. The file must exist.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path
            .as_ref()
            .canonicalize()
            .map_err(|e| sheetlint_syntax::Error::io(path.as_ref(), e))?;

        if self.watched_paths.contains(&path) {
            return Ok(());
        }

        self.debouncer
            .watcher()
            .watch(&path, RecursiveMode::NonRecursive)
            .map_err(|e| Error::Watch(e.to_string()))?;

        tracing::info!("Watching stylesheet: {}", path.display());
        self.watched_paths.insert(path);
        Ok(())
    }

    /// Stop watching a stylesheet file, including one that was deleted.
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match resolve(path) {
            Ok(path) => self.forget(&path),
            Err(e) => tracing::debug!("Cannot resolve {}: {}", path.display(), e),
        }
        Ok(())
    }

    /// Re-check every watched file that changed since the last poll.
    ///
    /// Files that no longer exist are removed from the watch set instead.
    pub fn poll(&mut self) -> Vec<Recheck> {
        let changed = self.drain_changes();
        self.recheck_paths(changed)
    }

    /// Check one file with this watcher's options.
    pub fn check(&self, path: &Path) -> Recheck {
        let result = self.rule.check_file(path);
        match &result {
            Ok(violations) => tracing::info!(
                "Checked stylesheet: {} ({} violations)",
                path.display(),
                violations.len()
            ),
            Err(e) => tracing::error!("Failed to check stylesheet {}: {}", path.display(), e),
        }
        Recheck {
            path: path.to_path_buf(),
            result,
        }
    }

    /// Get the number of watched files.
    pub fn watched_count(&self) -> usize {
        self.watched_paths.len()
    }

    /// Get the watched paths.
    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.watched_paths.iter().map(|p| p.as_path())
    }

    /// Watched files named by pending events, each once, in path order.
    fn drain_changes(&mut self) -> BTreeSet<PathBuf> {
        let mut changed = BTreeSet::new();

        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => changed.extend(
                    events
                        .into_iter()
                        .filter(|event| event.kind == DebouncedEventKind::Any)
                        .map(|event| event.path)
                        .filter(|path| self.watched_paths.contains(path)),
                ),
                Ok(Err(e)) => tracing::warn!("File watcher error: {}", e),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("File watcher disconnected");
                    break;
                }
            }
        }

        changed
    }

    fn recheck_paths(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Vec<Recheck> {
        let mut rechecks = Vec::new();
        for path in paths {
            if path.exists() {
                rechecks.push(self.check(&path));
            } else {
                self.forget(&path);
            }
        }
        rechecks
    }

    fn forget(&mut self, path: &Path) {
        if !self.watched_paths.remove(path) {
            return;
        }
        // The OS watch is usually gone already once the file is deleted.
        if let Err(e) = self.debouncer.watcher().unwatch(path) {
            tracing::debug!("Failed to unwatch {}: {}", path.display(), e);
        }
        tracing::info!("Stopped watching stylesheet: {}", path.display());
    }
}

/// Canonical form of `path`; a missing file is resolved through its directory.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    let err = match path.canonicalize() {
        Ok(path) => return Ok(path),
        Err(e) => e,
    };
    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return Err(err);
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    Ok(parent.canonicalize()?.join(name))
}
