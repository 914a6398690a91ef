use crate::app::MenuItem;
use chrono::{DateTime, Local};
use streamed_api::{
    CatalogEntry, FALLBACK_SPORT_NAMES, HomepageRow, StreamTarget, sport_filter_options,
};

// ---------------------------------------------------------------------------
// Live tab: homepage rows
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct LiveState {
    pub rows: Vec<HomepageRow>,
    pub selected_row: usize,
    pub selected_entry: usize,
    pub last_refreshed: Option<DateTime<Local>>,
    pub loaded: bool,
}

impl LiveState {
    /// Replace the rows, keeping the cursor on the same sport if it is still there.
    pub fn load(&mut self, rows: Vec<HomepageRow>) {
        let previous = self.current_row().map(|r| r.sport_name.clone());
        self.rows = rows;
        self.loaded = true;
        self.last_refreshed = Some(Local::now());

        match previous.and_then(|name| self.rows.iter().position(|r| r.sport_name == name)) {
            Some(idx) => self.selected_row = idx,
            None => {
                self.selected_row = 0;
                self.selected_entry = 0;
            }
        }
        self.clamp_entry();
    }

    pub fn current_row(&self) -> Option<&HomepageRow> {
        self.rows.get(self.selected_row)
    }

    pub fn selected(&self) -> Option<&CatalogEntry> {
        self.current_row()?.entries.get(self.selected_entry)
    }

    pub fn next_row(&mut self) {
        if self.selected_row + 1 < self.rows.len() {
            self.selected_row += 1;
            self.selected_entry = 0;
        }
    }

    pub fn prev_row(&mut self) {
        if self.selected_row > 0 {
            self.selected_row -= 1;
            self.selected_entry = 0;
        }
    }

    pub fn entry_down(&mut self) {
        let len = self.current_row().map_or(0, |r| r.entries.len());
        if self.selected_entry + 1 < len {
            self.selected_entry += 1;
        }
    }

    pub fn entry_up(&mut self) {
        self.selected_entry = self.selected_entry.saturating_sub(1);
    }

    fn clamp_entry(&mut self) {
        let len = self.current_row().map_or(0, |r| r.entries.len());
        self.selected_entry = self.selected_entry.min(len.saturating_sub(1));
    }
}

// ---------------------------------------------------------------------------
// Search tab
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct SearchState {
    pub query: String,
    /// Keystrokes go to the query while true.
    pub editing: bool,
    /// `"all"` first, then sport names. Fallback names until the live list arrives.
    pub sport_options: Vec<String>,
    pub sport_index: usize,
    pub live_only: bool,
    /// None until the first search completes.
    pub results: Option<Vec<CatalogEntry>>,
    pub selected: usize,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: String::new(),
            editing: false,
            sport_options: sport_filter_options(FALLBACK_SPORT_NAMES),
            sport_index: 0,
            live_only: true,
            results: None,
            selected: 0,
        }
    }
}

impl SearchState {
    pub fn sport_label(&self) -> &str {
        self.sport_options
            .get(self.sport_index)
            .map(String::as_str)
            .unwrap_or(streamed_api::ALL_SPORTS)
    }

    /// The sport name to send with a search, or None for "all".
    pub fn sport_filter(&self) -> Option<String> {
        match self.sport_index {
            0 => None,
            _ => Some(self.sport_label().to_owned()),
        }
    }

    pub fn cycle_sport(&mut self) {
        self.sport_index = (self.sport_index + 1) % self.sport_options.len().max(1);
    }

    pub fn toggle_live_only(&mut self) {
        self.live_only = !self.live_only;
    }

    /// Swap in the live sport names; the current pick survives if the name still exists.
    pub fn set_sport_names<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        let current = self.sport_label().to_lowercase();
        self.sport_options = sport_filter_options(names);
        self.sport_index = self
            .sport_options
            .iter()
            .position(|o| o.to_lowercase() == current)
            .unwrap_or(0);
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }

    pub fn set_results(&mut self, results: Vec<CatalogEntry>) {
        self.results = Some(results);
        self.selected = 0;
    }

    pub fn selected_entry(&self) -> Option<&CatalogEntry> {
        self.results.as_ref()?.get(self.selected)
    }

    pub fn select_down(&mut self) {
        let len = self.results.as_ref().map_or(0, Vec::len);
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Stream tab: the last resolved (or resolving) match
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StreamState {
    pub title: Option<String>,
    pub match_id: Option<String>,
    pub target: Option<StreamTarget>,
    pub pending: bool,
}

impl StreamState {
    pub fn begin(&mut self, match_id: String, title: String) {
        self.match_id = Some(match_id);
        self.title = Some(title);
        self.target = None;
        self.pending = true;
    }

    pub fn resolved(&mut self, match_id: String, title: String, target: StreamTarget) {
        self.match_id = Some(match_id);
        self.title = Some(title);
        self.target = Some(target);
        self.pending = false;
    }

    /// Shell line that plays the stream with the referer the host insists on.
    pub fn player_command(&self) -> Option<String> {
        let target = self.target.as_ref()?;
        Some(format!(
            "mpv --referrer=\"{}\" \"{}\"",
            target.referer_header, target.stream_url
        ))
    }
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub live: LiveState,
    pub search: SearchState,
    pub stream: StreamState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
