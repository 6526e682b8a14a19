use ratatui::widgets::ListState;
use tracing::debug;

use crate::panel::Panel;
use crate::poll::{PanelMsg, RunSequence};

/// Where the panel is in its refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Nothing fetched yet.
    Idle,
    /// The latest run is in flight.
    Fetching,
    /// Live data is on screen.
    Rendered,
    /// Every category failed; the fallback dataset is on screen.
    FallbackRendered,
}

pub struct App {
    /// The most recent panel from a non-superseded run.
    pub panel: Option<Panel>,
    /// List selection state for scrolling.
    pub list_state: ListState,
    /// Whether the user has requested to quit.
    pub quit: bool,
    /// Last run status message.
    pub status: String,
    pub state: RunState,
    sequence: RunSequence,
    refresh_requested: bool,
}

impl App {
    pub fn new(sequence: RunSequence) -> Self {
        Self {
            panel: None,
            list_state: ListState::default(),
            quit: false,
            status: "Starting…".into(),
            state: RunState::Idle,
            sequence,
            refresh_requested: false,
        }
    }

    pub fn item_count(&self) -> usize {
        self.panel.as_ref().map_or(0, |p| p.items.len())
    }

    /// Apply a worker message, dropping anything from a superseded run.
    pub fn apply(&mut self, msg: PanelMsg) {
        match msg {
            PanelMsg::Started(token) => {
                if self.sequence.is_current(token) {
                    self.state = RunState::Fetching;
                    self.status = "Loading data from APIs…".into();
                }
            }
            PanelMsg::Settled { token, panel } => {
                if !self.sequence.is_current(token) {
                    debug!(
                        token,
                        latest = self.sequence.latest(),
                        "discarding result of superseded run"
                    );
                    return;
                }
                self.state = if panel.advisory {
                    RunState::FallbackRendered
                } else {
                    RunState::Rendered
                };
                self.status = format!("Updated {}", panel.settled_at.format("%H:%M:%S"));
                self.panel = Some(panel);
                self.clamp_selection();
            }
        }
    }

    // -- refresh -------------------------------------------------------------

    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Returns `true` once per refresh request.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.item_count();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.item_count() == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if self.item_count() > 0 {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.item_count();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }

    /// A new panel may be shorter than the old one.
    fn clamp_selection(&mut self) {
        let len = self.item_count();
        match self.list_state.selected() {
            Some(_) if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AggregationResult;
    use crate::source::DataItem;
    use chrono::Local;

    fn live_panel(titles: &[&str]) -> Panel {
        Panel {
            items: titles.iter().map(|t| DataItem::new(*t, "content")).collect(),
            advisory: false,
            settled_at: Local::now(),
        }
    }

    fn app_with_token() -> (App, RunSequence, u64) {
        let sequence = RunSequence::default();
        let app = App::new(sequence.clone());
        let token = sequence.issue();
        (app, sequence, token)
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_idle() {
        let app = App::new(RunSequence::default());
        assert!(app.panel.is_none());
        assert_eq!(app.state, RunState::Idle);
        assert!(!app.quit);
        assert!(app.list_state.selected().is_none());
    }

    // -- apply ---------------------------------------------------------------

    #[test]
    fn started_then_settled_renders() {
        let (mut app, _, token) = app_with_token();

        app.apply(PanelMsg::Started(token));
        assert_eq!(app.state, RunState::Fetching);

        app.apply(PanelMsg::Settled {
            token,
            panel: live_panel(&["A", "C"]),
        });
        assert_eq!(app.state, RunState::Rendered);
        assert_eq!(app.item_count(), 2);
        assert!(app.status.starts_with("Updated"));
    }

    #[test]
    fn fallback_panel_sets_fallback_state() {
        let (mut app, _, token) = app_with_token();
        app.apply(PanelMsg::Settled {
            token,
            panel: Panel::settle(AggregationResult::default()),
        });
        assert_eq!(app.state, RunState::FallbackRendered);
        assert_eq!(app.item_count(), 3);
    }

    #[test]
    fn superseded_run_is_discarded() {
        let (mut app, sequence, old) = app_with_token();
        let new = sequence.issue();

        app.apply(PanelMsg::Settled {
            token: new,
            panel: live_panel(&["new"]),
        });
        app.apply(PanelMsg::Settled {
            token: old,
            panel: live_panel(&["old", "older"]),
        });

        let panel = app.panel.as_ref().unwrap();
        assert_eq!(panel.items[0].title(), "new");
        assert_eq!(app.item_count(), 1);
    }

    #[test]
    fn stale_start_does_not_reset_state() {
        let (mut app, sequence, old) = app_with_token();
        let new = sequence.issue();
        app.apply(PanelMsg::Settled {
            token: new,
            panel: live_panel(&["new"]),
        });
        app.apply(PanelMsg::Started(old));
        assert_eq!(app.state, RunState::Rendered);
    }

    #[test]
    fn refresh_request_is_taken_once() {
        let mut app = App::new(RunSequence::default());
        assert!(!app.take_refresh_request());
        app.request_refresh();
        assert!(app.take_refresh_request());
        assert!(!app.take_refresh_request());
    }

    // -- navigation ----------------------------------------------------------

    #[test]
    fn navigation_on_empty_is_noop() {
        let mut app = App::new(RunSequence::default());
        app.select_next();
        app.select_previous();
        app.select_first();
        app.select_last();
        assert!(app.list_state.selected().is_none());
    }

    #[test]
    fn select_next_starts_at_zero_then_clamps() {
        let (mut app, _, token) = app_with_token();
        app.apply(PanelMsg::Settled {
            token,
            panel: live_panel(&["a", "b"]),
        });

        app.select_next();
        assert_eq!(app.list_state.selected(), Some(0));
        app.select_next();
        app.select_next();
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn select_previous_clamps_at_zero() {
        let (mut app, _, token) = app_with_token();
        app.apply(PanelMsg::Settled {
            token,
            panel: live_panel(&["a", "b", "c"]),
        });

        app.select_last();
        assert_eq!(app.list_state.selected(), Some(2));
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(1));
        app.select_first();
        app.select_previous();
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn shorter_panel_clamps_selection() {
        let (mut app, sequence, token) = app_with_token();
        app.apply(PanelMsg::Settled {
            token,
            panel: live_panel(&["a", "b", "c"]),
        });
        app.select_last();

        let token = sequence.issue();
        app.apply(PanelMsg::Settled {
            token,
            panel: live_panel(&["a"]),
        });
        assert_eq!(app.list_state.selected(), Some(0));
    }
}
