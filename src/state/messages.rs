use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use streamed_api::{CatalogEntry, HomepageRow, Sport, StreamTarget};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadHomepage,
    LoadSports,
    Search {
        query: String,
        sport: Option<String>,
        live_only: bool,
    },
    ResolveStream { match_id: String, title: String },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    HomepageLoaded { rows: Vec<HomepageRow> },
    SportsLoaded { sports: Vec<Sport> },
    SearchCompleted { results: Vec<CatalogEntry> },
    StreamResolved {
        match_id: String,
        title: String,
        target: StreamTarget,
    },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
