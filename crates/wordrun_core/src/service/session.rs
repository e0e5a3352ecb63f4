//! Explicit UI session state.
//!
//! Owned by the top-level UI controller and passed down to screens, so no
//! screen reads navigation state from a global.

use crate::model::history::HistoryDay;

/// Top-level tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Today,
    History,
}

/// What the run screen currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunView {
    /// Today's run; `editing` exposes per-entry delete.
    Live { editing: bool },
    /// A past day, never editable.
    Archived(HistoryDay),
}

impl Default for RunView {
    fn default() -> Self {
        Self::Live { editing: false }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppSession {
    active_tab: Tab,
    run_view: RunView,
}

impl AppSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn run_view(&self) -> &RunView {
        &self.run_view
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Shows today's run with editing off.
    pub fn open_live_run(&mut self) {
        self.run_view = RunView::Live { editing: false };
    }

    pub fn open_archived_day(&mut self, day: HistoryDay) {
        self.run_view = RunView::Archived(day);
    }

    /// Flips edit mode on the live run and returns the new state.
    ///
    /// Archived views stay read-only and return `false`.
    pub fn toggle_editing(&mut self) -> bool {
        match &mut self.run_view {
            RunView::Live { editing } => {
                *editing = !*editing;
                *editing
            }
            RunView::Archived(_) => false,
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.run_view, RunView::Archived(_))
    }

    pub fn can_delete_entries(&self) -> bool {
        matches!(self.run_view, RunView::Live { editing: true })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppSession, RunView, Tab};
    use crate::model::date_key::DateKey;
    use crate::model::entry::DailyRun;
    use crate::model::history::HistoryDay;

    fn archived_day() -> HistoryDay {
        HistoryDay::from_run(DailyRun::new(DateKey::from_ymd(2024, 1, 1).unwrap()))
    }

    #[test]
    fn starts_on_today_tab_with_live_read_write_run() {
        let session = AppSession::new();
        assert_eq!(session.active_tab(), Tab::Today);
        assert_eq!(session.run_view(), &RunView::Live { editing: false });
        assert!(!session.is_read_only());
        assert!(!session.can_delete_entries());
    }

    #[test]
    fn editing_only_toggles_on_live_run() {
        let mut session = AppSession::new();
        assert!(session.toggle_editing());
        assert!(session.can_delete_entries());

        session.open_archived_day(archived_day());
        assert!(session.is_read_only());
        assert!(!session.toggle_editing());
        assert!(!session.can_delete_entries());

        session.open_live_run();
        assert_eq!(session.run_view(), &RunView::Live { editing: false });
    }

    #[test]
    fn tab_selection_is_independent_of_run_view() {
        let mut session = AppSession::new();
        session.toggle_editing();
        session.select_tab(Tab::History);
        assert_eq!(session.active_tab(), Tab::History);
        assert!(session.can_delete_entries());
    }
}
