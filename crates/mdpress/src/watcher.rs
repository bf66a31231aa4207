use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};

const DEBOUNCE: Duration = Duration::from_millis(250);

/// Watches the currently loaded document for external modifications.
///
/// At most one file is watched at a time; watching a new path replaces the
/// previous watch. Change notifications are debounced by the underlying
/// watcher and delivered through `on_change` on a watcher thread, so the
/// callback should do nothing but post an event to the main loop.
#[derive(Default)]
pub struct DocumentWatcher {
    inner: Option<Debouncer<RecommendedWatcher>>,
}

impl DocumentWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn watch(&mut self, path: &Path, mut on_change: impl FnMut() + Send + 'static) -> Result<()> {
        // Drop any previous watch before installing the new one.
        self.inner = None;

        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            match result {
                Ok(events) if !events.is_empty() => on_change(),
                Ok(_) => {}
                Err(err) => eprintln!("mdpress: watch error: {err}"),
            }
        })
        .context("failed to create file watcher")?;

        debouncer
            .watcher()
            .watch(path, RecursiveMode::NonRecursive)
            .with_context(|| format!("failed to watch {}", path.display()))?;

        self.inner = Some(debouncer);
        Ok(())
    }

    pub fn unwatch(&mut self) {
        self.inner = None;
    }
}
