//! Watch scheduling: filesystem change events to reconciliation runs.
//!
//! Change notifications fan in through three stages, each of which
//! narrows a burst of events toward a single run:
//!
//! 1. A notify debouncer per link lets writes settle before an event
//!    is emitted at all.
//! 2. A capacity-one dirty mailbox per link; a full mailbox means a
//!    signal is already pending, so further events merge into it.
//! 3. A per-link worker drains its mailbox, waits out a quiet window
//!    (new signals restart it), then enqueues the link on a global
//!    run queue with a single consumer, so no two reconciliations
//!    ever run concurrently.

use crate::core::{TetherError, TetherResult};
use crate::engine::ReconciliationEngine;
use crate::registry::LinkRecord;
use colored::Colorize;
use globset::{Glob, GlobSet, GlobSetBuilder};
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

/// How long writes must settle before notify reports a change.
const SETTLE_WINDOW: Duration = Duration::from_secs(1);

/// Quiet period after the last settled event before a run is
/// scheduled.
const MERGE_WINDOW: Duration = Duration::from_millis(1500);

/// Directories that never trigger a run, regardless of pattern.
const IGNORED_DIRS: &[&str] = &["node_modules", ".git"];

pub struct WatchScheduler {
    engine: Arc<ReconciliationEngine>,
    merge_window: Duration,
}

impl WatchScheduler {
    pub fn new(engine: Arc<ReconciliationEngine>) -> Self {
        Self {
            engine,
            merge_window: MERGE_WINDOW,
        }
    }

    /// Watch every record until the process is interrupted.
    ///
    /// A subscription failure for one link is reported and does not
    /// terminate watching for the others.
    pub async fn run(&self, records: Vec<LinkRecord>) -> TetherResult<()> {
        let (run_tx, mut run_rx) = mpsc::channel::<String>(records.len().max(1));
        let mut subscriptions: Vec<Debouncer<RecommendedWatcher>> = Vec::new();

        for record in &records {
            if record.watch_pattern.is_empty() {
                continue;
            }
            match self.subscribe(record, run_tx.clone()) {
                Ok(debouncer) => {
                    subscriptions.push(debouncer);
                    println!(
                        "{} {} for {}",
                        "Watching".cyan().bold(),
                        record.source_path.display(),
                        record.watch_pattern
                    );
                }
                Err(e) => {
                    eprintln!("✗ Cannot watch {}: {}", record.name, e);
                }
            }
        }

        if subscriptions.is_empty() {
            return Err(TetherError::Watch(
                "no watch subscriptions could be established".to_string(),
            ));
        }
        drop(run_tx);

        // Single consumer: process-wide concurrency-one run queue.
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    println!("\nStopping watch mode.");
                    break;
                }
                scheduled = run_rx.recv() => {
                    let Some(name) = scheduled else { break };
                    if let Err(e) = self.engine.reconcile(&[name.clone()]).await {
                        eprintln!("✗ Reconciliation failed for {}: {}", name, e);
                    }
                }
            }
        }

        Ok(())
    }

    fn subscribe(
        &self,
        record: &LinkRecord,
        run_tx: mpsc::Sender<String>,
    ) -> TetherResult<Debouncer<RecommendedWatcher>> {
        let matcher = build_matcher(&record.watch_pattern)?;
        let source_root = record.source_path.clone();
        let (dirty_tx, dirty_rx) = mpsc::channel::<()>(1);

        let mut debouncer = new_debouncer(SETTLE_WINDOW, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let relevant = events
                        .iter()
                        .any(|event| is_relevant(&source_root, &matcher, &event.path));
                    if relevant {
                        // A full mailbox already has a pending signal;
                        // this event merges into it.
                        let _ = dirty_tx.try_send(());
                    }
                }
                Err(e) => warn!(error = %e, "watch event error"),
            }
        })
        .map_err(|e| TetherError::Watch(e.to_string()))?;

        debouncer
            .watcher()
            .watch(&record.source_path, RecursiveMode::Recursive)
            .map_err(|e| {
                TetherError::Watch(format!("{}: {}", record.source_path.display(), e))
            })?;

        tokio::spawn(link_worker(
            record.name.clone(),
            dirty_rx,
            run_tx,
            self.merge_window,
        ));

        Ok(debouncer)
    }
}

/// Per-link consumer: drain dirty signals, wait out the quiet window,
/// then schedule exactly one run.
async fn link_worker(
    name: String,
    mut dirty_rx: mpsc::Receiver<()>,
    run_tx: mpsc::Sender<String>,
    merge_window: Duration,
) {
    while dirty_rx.recv().await.is_some() {
        // Any further signal restarts the quiet window.
        loop {
            match tokio::time::timeout(merge_window, dirty_rx.recv()).await {
                Ok(Some(())) => continue,
                Ok(None) => return,
                Err(_) => break,
            }
        }

        if run_tx.send(name.clone()).await.is_err() {
            return;
        }
    }
}

fn build_matcher(pattern: &str) -> TetherResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    builder.add(
        Glob::new(pattern)
            .map_err(|e| TetherError::Watch(format!("bad watch pattern '{}': {}", pattern, e)))?,
    );
    builder
        .build()
        .map_err(|e| TetherError::Watch(e.to_string()))
}

fn is_relevant(source_root: &Path, matcher: &GlobSet, changed: &Path) -> bool {
    let relative: &Path = changed.strip_prefix(source_root).unwrap_or(changed);

    let in_ignored_dir = relative.components().any(|component| {
        component
            .as_os_str()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
    });
    if in_ignored_dir {
        return false;
    }

    matcher.is_match(relative)
}
