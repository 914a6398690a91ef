pub mod catalog;
pub mod client;
pub mod config;
pub mod resolver;
pub mod search;
pub mod service;
pub mod wire;

use serde::Serialize;

pub use client::{ApiError, ApiResult, StreamedApi};
pub use config::ApiConfig;
pub use service::Streamed;

/// Sport names offered in filter pickers before the live list has been fetched.
/// Cosmetic defaults only; the upstream sports list always wins once loaded.
pub const FALLBACK_SPORT_NAMES: [&str; 9] = [
    "Football",
    "Basketball",
    "UFC",
    "Boxing",
    "Tennis",
    "Cricket",
    "WWE",
    "Hockey",
    "Rugby",
];

/// Filter value meaning "no sport restriction".
pub const ALL_SPORTS: &str = "all";

// ---------------------------------------------------------------------------
// Domain types: decoded and validated at the client boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Sport {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Match {
    pub id: u64,
    pub team1: String,
    pub team2: String,
    pub logo1: String, // path relative to the image base
    pub logo2: String,
    /// Active stream count; zero means the match is not live right now.
    pub stream_count: u32,
}

impl Match {
    pub fn is_live(&self) -> bool {
        self.stream_count != 0
    }

    pub fn display_name(&self) -> String {
        format!("{} vs {}", self.team1, self.team2)
    }
}

/// Display-ready form of a [`Match`], rebuilt on every catalog request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub display_name: String,
    pub id: String,
    pub poster_url: String,
    pub background_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamTarget {
    pub stream_url: String,
    pub referer_header: String,
}

/// One homepage row: a sport and its currently live matches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomepageRow {
    pub sport_name: String,
    pub entries: Vec<CatalogEntry>,
}

/// `"all"` followed by the given sport names, in order.
pub fn sport_filter_options<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    std::iter::once(ALL_SPORTS)
        .chain(names)
        .map(str::to_owned)
        .collect()
}
