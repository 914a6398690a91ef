use crate::StreamTarget;
use crate::client::{ApiError, ApiResult, StreamedApi};
use log::debug;

/// Turns a match id into something a player can open.
#[derive(Debug, Clone)]
pub struct StreamResolver {
    api: StreamedApi,
}

impl StreamResolver {
    pub fn new(api: StreamedApi) -> Self {
        Self { api }
    }

    /// Fetch the match's streams and pick one. An empty list is an error, never a
    /// placeholder URL.
    pub async fn resolve(&self, match_id: &str) -> ApiResult<StreamTarget> {
        let streams = self.api.fetch_streams(match_id).await?;
        debug!("match {match_id}: {} candidate streams", streams.len());
        select_stream(streams, match_id)
    }
}

/// First stream wins. No quality or source ranking.
pub fn select_stream(streams: Vec<StreamTarget>, match_id: &str) -> ApiResult<StreamTarget> {
    streams
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NoStreamsFound(match_id.to_owned()))
}
