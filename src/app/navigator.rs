//! View navigation between the stock list and a stock detail.
//!
//! Entering a view cancels the previous view's poller and bumps the view
//! generation. Every poll result is tagged with the generation it was started
//! under, so results that arrive after the user navigated away are dropped in
//! [`Navigator::accept`].

use std::time::Duration;
use tokio::sync::mpsc;

use crate::app::dashboard::{Dashboard, StockDetail};
use crate::app::poller::PeriodicTask;
use crate::domain::error::DashError;
use crate::domain::quote::{normalize_symbol, StockQuote};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    List,
    Detail { symbol: String },
}

#[derive(Debug)]
pub enum Snapshot {
    List(Vec<StockQuote>),
    Detail(Box<StockDetail>),
}

#[derive(Debug)]
pub struct Update {
    generation: u64,
    result: Result<Snapshot, DashError>,
}

impl Update {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct Navigator {
    dashboard: Dashboard,
    interval: Duration,
    view: View,
    generation: u64,
    poller: Option<PeriodicTask>,
    updates: mpsc::UnboundedSender<Update>,
}

impl Navigator {
    /// Starts on the list view; the receiver yields poll results.
    pub fn new(dashboard: Dashboard, interval: Duration) -> (Self, mpsc::UnboundedReceiver<Update>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut navigator = Self {
            dashboard,
            interval,
            view: View::List,
            generation: 0,
            poller: None,
            updates: tx,
        };
        navigator.enter(View::List);
        (navigator, rx)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn select(&mut self, symbol: &str) {
        self.enter(View::Detail {
            symbol: normalize_symbol(symbol),
        });
    }

    pub fn back(&mut self) {
        self.enter(View::List);
    }

    /// Returns the result when it belongs to the current view, `None` when stale.
    pub fn accept(&self, update: Update) -> Option<Result<Snapshot, DashError>> {
        if update.generation != self.generation {
            tracing::debug!(
                stale = update.generation,
                current = self.generation,
                "discarding stale poll result"
            );
            return None;
        }
        Some(update.result)
    }

    fn enter(&mut self, view: View) {
        // dropping the handle cancels the previous poller
        self.poller.take();
        self.generation += 1;
        self.view = view.clone();
        tracing::debug!(generation = self.generation, ?view, "entering view");

        let generation = self.generation;
        let dashboard = self.dashboard.clone();
        let updates = self.updates.clone();
        self.poller = Some(PeriodicTask::spawn(self.interval, move || {
            let dashboard = dashboard.clone();
            let updates = updates.clone();
            let view = view.clone();
            async move {
                let result = match &view {
                    View::List => dashboard.stock_list().await.map(Snapshot::List),
                    View::Detail { symbol } => dashboard
                        .stock_detail(symbol)
                        .await
                        .map(|d| Snapshot::Detail(Box::new(d))),
                };
                let _ = updates.send(Update { generation, result });
            }
        }));
    }
}
