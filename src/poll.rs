//! Background refresh worker.
//!
//! Runs on a dedicated thread hosting a single-threaded tokio runtime.
//! Every refresh (startup, manual, or periodic) is an independent
//! aggregation task; settled panels are sent to the UI thread over an
//! [`mpsc`] channel tagged with the run's sequence token.
//!
//! Starting a run aborts the one before it, so superseded chains stop using
//! the network.  The UI also applies a panel only if its token is still the
//! latest one issued by the shared [`RunSequence`], which covers a run that
//! settled just before it was superseded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc as async_mpsc;
use tokio::task::AbortHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::aggregate::{aggregate_all, Deadlines};
use crate::panel::Panel;
use crate::registry::CategoryRegistry;

/// Messages sent from the worker to the UI thread.
#[derive(Debug)]
pub enum PanelMsg {
    /// A run with this token has started fetching.
    Started(u64),
    /// A run has settled into a presentable panel.
    Settled { token: u64, panel: Panel },
}

/// Why a run was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Startup,
    Manual,
    Interval,
}

/// Monotonic run token source, shared between the worker (which issues
/// tokens) and the UI (which checks them).
#[derive(Debug, Clone, Default)]
pub struct RunSequence(Arc<AtomicU64>);

impl RunSequence {
    /// Issue the next token.  The first token is 1.
    pub fn issue(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// The most recently issued token (0 before any run).
    pub fn latest(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, token: u64) -> bool {
        token == self.latest()
    }
}

/// Handle for requesting manual refreshes.  Dropping every handle stops
/// the worker.
#[derive(Debug, Clone)]
pub struct Refresher {
    tx: async_mpsc::UnboundedSender<Trigger>,
}

impl Refresher {
    pub fn request(&self) {
        // A closed channel means the worker is gone; nothing to refresh.
        let _ = self.tx.send(Trigger::Manual);
    }
}

/// Spawn the worker thread and queue the startup run.
///
/// Returns the refresh handle and the receiver the main loop should drain
/// on every tick.
pub fn spawn(
    registry: Arc<CategoryRegistry>,
    deadlines: Deadlines,
    interval: Option<Duration>,
    sequence: RunSequence,
) -> Result<(Refresher, mpsc::Receiver<PanelMsg>)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let (trigger_tx, trigger_rx) = async_mpsc::unbounded_channel();
    let (tx, rx) = mpsc::channel();

    trigger_tx.send(Trigger::Startup)?;

    thread::Builder::new()
        .name("refresh".into())
        .spawn(move || {
            runtime.block_on(run_loop(
                registry, deadlines, interval, sequence, trigger_rx, tx,
            ))
        })?;

    Ok((Refresher { tx: trigger_tx }, rx))
}

async fn run_loop(
    registry: Arc<CategoryRegistry>,
    deadlines: Deadlines,
    interval: Option<Duration>,
    sequence: RunSequence,
    mut triggers: async_mpsc::UnboundedReceiver<Trigger>,
    tx: mpsc::Sender<PanelMsg>,
) {
    let mut ticker = interval.map(|period| {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });
    let mut in_flight: Option<AbortHandle> = None;

    loop {
        let trigger = match ticker.as_mut() {
            Some(ticker) => tokio::select! {
                trigger = triggers.recv() => trigger,
                _ = ticker.tick() => Some(Trigger::Interval),
            },
            None => triggers.recv().await,
        };
        let Some(trigger) = trigger else {
            info!("all refresh handles dropped, stopping worker");
            return;
        };

        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                debug!(superseded = sequence.latest(), "aborting superseded run");
                previous.abort();
            }
        }

        let token = sequence.issue();
        info!(token, ?trigger, categories = registry.len(), "starting aggregation run");
        // If the receiver is gone the UI has exited; stop refreshing.
        if tx.send(PanelMsg::Started(token)).is_err() {
            return;
        }

        let registry = Arc::clone(&registry);
        let tx = tx.clone();
        let run = tokio::spawn(async move {
            let panel = Panel::settle(aggregate_all(&registry, deadlines).await);
            info!(
                token,
                items = panel.items.len(),
                advisory = panel.advisory,
                "aggregation run settled"
            );
            let _ = tx.send(PanelMsg::Settled { token, panel });
        });
        in_flight = Some(run.abort_handle());
    }
}
