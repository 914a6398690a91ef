use crate::catalog::build_entries;
use crate::client::{ApiResult, StreamedApi};
use crate::{ALL_SPORTS, CatalogEntry, HomepageRow, Sport};
use futures_util::future::join_all;
use log::{debug, warn};

/// Listing and free-text search over the live catalog.
///
/// Holds no catalog of its own: every call goes back to upstream, so results
/// never carry match ids from an earlier request.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    api: StreamedApi,
}

impl SearchIndex {
    pub fn new(api: StreamedApi) -> Self {
        Self { api }
    }

    pub async fn sports(&self) -> ApiResult<Vec<Sport>> {
        self.api.fetch_sports().await
    }

    /// Live matches, optionally restricted to one sport id.
    pub async fn list_by_sport(&self, sport_id: Option<&str>) -> ApiResult<Vec<CatalogEntry>> {
        self.entries(sport_id, true).await
    }

    /// Case-insensitive substring search on display names.
    ///
    /// `sport_name` of `None` or `"all"` searches every sport. A name that
    /// matches no known sport also searches every sport rather than failing.
    pub async fn search(
        &self,
        query: &str,
        sport_name: Option<&str>,
        live_only: bool,
    ) -> ApiResult<Vec<CatalogEntry>> {
        let sport_id = self.resolve_sport_id(sport_name).await?;
        let entries = self.entries(sport_id.as_deref(), live_only).await?;
        Ok(filter_by_query(entries, query))
    }

    /// One row per upstream sport with its live matches.
    ///
    /// Rows are fetched concurrently. A row whose fetch fails is left out;
    /// only a failing sports list fails the whole call.
    pub async fn homepage_rows(&self) -> ApiResult<Vec<HomepageRow>> {
        let sports = self.api.fetch_sports().await?;
        let fetches = sports.iter().map(|sport| self.list_by_sport(Some(sport.id.as_str())));
        let results = join_all(fetches).await;

        let rows = sports
            .into_iter()
            .zip(results)
            .filter_map(|(sport, result)| match result {
                Ok(entries) => Some(HomepageRow { sport_name: sport.name, entries }),
                Err(e) => {
                    warn!("omitting homepage row {}: {e}", sport.name);
                    None
                }
            })
            .collect();
        Ok(rows)
    }

    async fn resolve_sport_id(&self, sport_name: Option<&str>) -> ApiResult<Option<String>> {
        let Some(name) = sport_name.filter(|n| !n.eq_ignore_ascii_case(ALL_SPORTS)) else {
            return Ok(None);
        };
        let sports = self.api.fetch_sports().await?;
        let id = find_sport_id(&sports, name);
        if id.is_none() {
            warn!("unknown sport {name:?}, searching all sports");
        }
        Ok(id)
    }

    async fn entries(&self, sport_id: Option<&str>, live_only: bool) -> ApiResult<Vec<CatalogEntry>> {
        let matches = self.api.fetch_matches(sport_id).await?;
        let entries = build_entries(&matches, live_only, &self.api.config().image_base());
        debug!(
            "{} of {} matches listed (sport={sport_id:?}, live_only={live_only})",
            entries.len(),
            matches.len()
        );
        Ok(entries)
    }
}

/// Id of the sport whose name equals `name`, ignoring case.
pub fn find_sport_id(sports: &[Sport], name: &str) -> Option<String> {
    let wanted = name.to_lowercase();
    sports
        .iter()
        .find(|s| s.name.to_lowercase() == wanted)
        .map(|s| s.id.clone())
}

/// Keep entries whose display name contains `query`, ignoring case. Order is kept.
pub fn filter_by_query(entries: Vec<CatalogEntry>, query: &str) -> Vec<CatalogEntry> {
    if query.is_empty() {
        return entries;
    }
    let needle = query.to_lowercase();
    entries
        .into_iter()
        .filter(|e| e.display_name.to_lowercase().contains(&needle))
        .collect()
}
