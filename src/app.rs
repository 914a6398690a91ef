use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkRequest;
use streamed_api::{CatalogEntry, HomepageRow, Sport, StreamTarget};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Live,
    Search,
    Stream,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers: called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_homepage_loaded(&mut self, rows: Vec<HomepageRow>) {
        self.state.last_error = None;
        self.state.live.load(rows);
    }

    pub fn on_sports_loaded(&mut self, sports: Vec<Sport>) {
        self.state
            .search
            .set_sport_names(sports.iter().map(|s| s.name.as_str()));
    }

    pub fn on_search_completed(&mut self, results: Vec<CatalogEntry>) {
        self.state.last_error = None;
        self.state.search.set_results(results);
    }

    pub fn on_stream_resolved(&mut self, match_id: String, title: String, target: StreamTarget) {
        self.state.last_error = None;
        self.state.stream.resolved(match_id, title, target);
    }

    pub fn on_error(&mut self, message: String) {
        self.state.stream.pending = false;
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if next != MenuItem::Search {
            self.state.search.editing = false;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    pub fn start_editing_query(&mut self) {
        self.update_tab(MenuItem::Search);
        self.state.search.editing = true;
    }

    pub fn stop_editing_query(&mut self) {
        self.state.search.editing = false;
    }

    /// Request for the current query, sport filter and live-only flag.
    pub fn search_request(&self) -> NetworkRequest {
        let search = &self.state.search;
        NetworkRequest::Search {
            query: search.query.clone(),
            sport: search.sport_filter(),
            live_only: search.live_only,
        }
    }

    // -----------------------------------------------------------------------
    // Playback
    // -----------------------------------------------------------------------

    /// Entry under the cursor on the active tab, if that tab lists matches.
    pub fn highlighted_entry(&self) -> Option<&CatalogEntry> {
        match self.state.active_tab {
            MenuItem::Live => self.state.live.selected(),
            MenuItem::Search => self.state.search.selected_entry(),
            MenuItem::Stream | MenuItem::Help => None,
        }
    }

    /// Mark the highlighted match as resolving and switch to the Stream tab.
    /// Returns the request to send, or None when nothing is highlighted.
    pub fn begin_resolve(&mut self) -> Option<NetworkRequest> {
        let entry = self.highlighted_entry()?;
        let (match_id, title) = (entry.id.clone(), entry.display_name.clone());
        self.state.stream.begin(match_id.clone(), title.clone());
        self.update_tab(MenuItem::Stream);
        Some(NetworkRequest::ResolveStream { match_id, title })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App {
            settings: AppSettings::default(),
            state: AppState::new(),
        }
    }

    fn entry(id: &str, name: &str) -> CatalogEntry {
        CatalogEntry { id: id.into(), display_name: name.into(), ..Default::default() }
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = app();
        app.update_tab(MenuItem::Search);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Search);
    }

    #[test]
    fn leaving_search_stops_editing() {
        let mut app = app();
        app.start_editing_query();
        assert_eq!(app.state.active_tab, MenuItem::Search);
        assert!(app.state.search.editing);
        app.update_tab(MenuItem::Live);
        assert!(!app.state.search.editing);
    }

    #[test]
    fn search_request_carries_filters() {
        let mut app = app();
        app.state.search.query = "derby".into();
        app.state.search.cycle_sport();
        app.state.search.toggle_live_only();
        match app.search_request() {
            NetworkRequest::Search { query, sport, live_only } => {
                assert_eq!(query, "derby");
                assert_eq!(sport.as_deref(), Some("Football"));
                assert!(!live_only);
            }
            other => panic!("unexpected request {other:?}"),
        }
    }

    #[test]
    fn resolve_from_live_tab_switches_to_stream() {
        let mut app = app();
        app.on_homepage_loaded(vec![HomepageRow {
            sport_name: "Football".into(),
            entries: vec![entry("1", "A vs B")],
        }]);

        let request = app.begin_resolve();
        assert!(matches!(
            request,
            Some(NetworkRequest::ResolveStream { ref match_id, .. }) if match_id == "1"
        ));
        assert_eq!(app.state.active_tab, MenuItem::Stream);
        assert!(app.state.stream.pending);
        assert_eq!(app.state.stream.title.as_deref(), Some("A vs B"));
    }

    #[test]
    fn resolve_with_nothing_highlighted_is_noop() {
        let mut app = app();
        assert!(app.begin_resolve().is_none());
        assert_eq!(app.state.active_tab, MenuItem::Live);
    }

    #[test]
    fn error_clears_pending_resolve() {
        let mut app = app();
        app.state.search.set_results(vec![entry("9", "C vs D")]);
        app.update_tab(MenuItem::Search);
        app.begin_resolve();
        app.on_error("No streams found for match 9".into());
        assert!(!app.state.stream.pending);
        assert!(app.state.stream.target.is_none());
        assert_eq!(app.state.last_error.as_deref(), Some("No streams found for match 9"));
    }

    #[test]
    fn live_sports_replace_fallback_options() {
        let mut app = app();
        app.on_sports_loaded(vec![Sport { id: "darts".into(), name: "Darts".into() }]);
        assert_eq!(app.state.search.sport_options, vec!["all", "Darts"]);
    }
}
