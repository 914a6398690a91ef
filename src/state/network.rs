use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use streamed_api::{ApiResult, Streamed};
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Serves UI network requests one at a time against the upstream.
pub struct NetworkWorker {
    service: Streamed,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        service: Streamed,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            service,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadHomepage => self.handle_load_homepage().await,
                NetworkRequest::LoadSports => self.handle_load_sports().await,
                NetworkRequest::Search { query, sport, live_only } => {
                    self.handle_search(query, sport, live_only).await
                }
                NetworkRequest::ResolveStream { match_id, title } => {
                    self.handle_resolve_stream(match_id, title).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_homepage(&self) -> ApiResult<NetworkResponse> {
        debug!("loading homepage rows");
        let rows = self.service.list_homepage_rows().await?;
        Ok(NetworkResponse::HomepageLoaded { rows })
    }

    async fn handle_load_sports(&self) -> ApiResult<NetworkResponse> {
        debug!("loading sports list");
        let sports = self.service.sports().await?;
        Ok(NetworkResponse::SportsLoaded { sports })
    }

    async fn handle_search(
        &self,
        query: String,
        sport: Option<String>,
        live_only: bool,
    ) -> ApiResult<NetworkResponse> {
        debug!("searching {query:?} sport={sport:?} live_only={live_only}");
        let results = self
            .service
            .search(&query, sport.as_deref(), live_only)
            .await?;
        Ok(NetworkResponse::SearchCompleted { results })
    }

    async fn handle_resolve_stream(
        &self,
        match_id: String,
        title: String,
    ) -> ApiResult<NetworkResponse> {
        debug!("resolving stream for match {match_id} ({title})");
        let target = self.service.resolve_playback(&match_id).await?;
        Ok(NetworkResponse::StreamResolved { match_id, title, target })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
