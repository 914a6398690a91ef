use crate::client::{ApiResult, StreamedApi};
use crate::config::ApiConfig;
use crate::resolver::StreamResolver;
use crate::search::SearchIndex;
use crate::{CatalogEntry, HomepageRow, Sport, StreamTarget};

/// Everything a host needs: homepage rows, search and playback resolution.
///
/// Cheap to clone; clones share one HTTP connection pool and nothing else.
#[derive(Debug, Clone)]
pub struct Streamed {
    config: ApiConfig,
    index: SearchIndex,
    resolver: StreamResolver,
}

impl Default for Streamed {
    fn default() -> Self {
        Self::new(StreamedApi::default())
    }
}

impl Streamed {
    pub fn new(api: StreamedApi) -> Self {
        Self {
            config: api.config().clone(),
            index: SearchIndex::new(api.clone()),
            resolver: StreamResolver::new(api),
        }
    }

    pub fn with_config(config: ApiConfig) -> Self {
        Self::new(StreamedApi::new(config))
    }

    pub fn from_env() -> Self {
        Self::new(StreamedApi::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn sports(&self) -> ApiResult<Vec<Sport>> {
        self.index.sports().await
    }

    pub async fn list_homepage_rows(&self) -> ApiResult<Vec<HomepageRow>> {
        self.index.homepage_rows().await
    }

    pub async fn list_by_sport(&self, sport_id: Option<&str>) -> ApiResult<Vec<CatalogEntry>> {
        self.index.list_by_sport(sport_id).await
    }

    pub async fn search(
        &self,
        query: &str,
        sport_filter: Option<&str>,
        live_only: bool,
    ) -> ApiResult<Vec<CatalogEntry>> {
        self.index.search(query, sport_filter, live_only).await
    }

    pub async fn resolve_playback(&self, match_id: &str) -> ApiResult<StreamTarget> {
        self.resolver.resolve(match_id).await
    }
}
