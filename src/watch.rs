//! File system watcher for live rebuild.
//!
//! Monitors the content, asset, and template directories plus the config
//! file. Changes are debounced, then the whole site is rebuilt. The
//! pipeline has no incremental mode, output is always a full function of
//! the sources.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │                  Event Loop                    │
//! │                                                │
//! │  ┌──────────┐    ┌──────────┐    ┌──────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│ rebuild  │  │
//! │  │ events   │    │ (300ms)  │    │ (full)   │  │
//! │  └──────────┘    └──────────┘    └──────────┘  │
//! └────────────────────────────────────────────────┘
//! ```

use crate::{build::build_site, config::SiteConfig, log, logger::WatchStatus};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

/// Rebuild the whole site, printing a per-rebuild status line.
/// Returns true on success (for cooldown tracking).
fn handle_changes(paths: &[PathBuf], config: &'static SiteConfig, status: &mut WatchStatus) -> bool {
    if paths.is_empty() {
        return false;
    }

    let root = config.get_root();
    let trigger = paths
        .iter()
        .map(|p| rel_path(p, root))
        .collect::<Vec<_>>()
        .join(", ");

    match build_site(config) {
        Ok(content) => {
            status.success(&format!(
                "rebuilt {} page(s) ({trigger})",
                content.documents.len()
            ));
            true
        }
        Err(e) => {
            status.error(&format!("build failed ({trigger})"), &format!("{e:#}"));
            false
        }
    }
}

/// Log watched paths relative to the project root.
fn log_watch_summary(config: &SiteConfig) {
    let root = config.get_root();
    let watched: Vec<_> = watch_targets(config)
        .into_iter()
        .filter(|(p, _)| p.exists())
        .map(|(p, is_dir)| {
            let suffix = if is_dir { "/" } else { "" };
            format!("{}{}", rel_path(&p, root), suffix)
        })
        .collect();

    if !watched.is_empty() {
        log!("watch"; "watching: {}", watched.join(", "));
    }
}

fn watch_targets(config: &SiteConfig) -> Vec<(PathBuf, bool)> {
    vec![
        (config.build.content.clone(), true),
        (config.build.assets.clone(), true),
        (config.build.templates.clone(), true),
        (config.config_path.clone(), false),
    ]
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    for (path, is_dir) in watch_targets(config) {
        if !path.exists() {
            continue;
        }
        let mode = if is_dir {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
    }

    log_watch_summary(config);
    println!(); // Blank line to separate init logs from change events
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

/// Start blocking file watcher with debouncing and live rebuild.
pub fn watch_for_changes_blocking(config: &'static SiteConfig) -> Result<()> {
    if !config.serve.watch {
        return Ok(());
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config)?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), config, &mut status) {
                    debouncer.mark_rebuild();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without pending changes
            _ => {}
        }
    }

    Ok(())
}
