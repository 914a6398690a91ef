/// Upstream raw wire types: serde shapes for the streamed.su JSON endpoints.
/// These map to the domain types in lib.rs via the From impls below.
///
/// Decoding is strict: a missing or mistyped field fails the whole response,
/// so nothing loosely typed ever leaves the client.
use serde::Deserialize;

use crate::{Match, Sport};

// ---------------------------------------------------------------------------
// GET /api/sports
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct SportRecord {
    pub id: String,
    pub name: String,
}

impl From<SportRecord> for Sport {
    fn from(raw: SportRecord) -> Self {
        Sport { id: raw.id, name: raw.name }
    }
}

// ---------------------------------------------------------------------------
// GET /api/matches[?sport=<id>]
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct MatchRecord {
    pub id: u64,
    pub team1: String,
    pub team2: String,
    pub logo1: String,
    pub logo2: String,
    pub streams: u32,
}

impl From<MatchRecord> for Match {
    fn from(raw: MatchRecord) -> Self {
        Match {
            id: raw.id,
            team1: raw.team1,
            team2: raw.team2,
            logo1: raw.logo1,
            logo2: raw.logo2,
            stream_count: raw.streams,
        }
    }
}

// ---------------------------------------------------------------------------
// GET /api/streams?id=<matchId> : a bare array, not an object
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Clone)]
pub struct StreamRecord {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_record_maps_streams_to_stream_count() {
        let raw: MatchRecord = serde_json::from_str(
            r#"{"id":7,"team1":"A","team2":"B","logo1":"a.png","logo2":"b.png","streams":2}"#,
        )
        .unwrap();
        let m = Match::from(raw);
        assert_eq!(m.id, 7);
        assert_eq!(m.stream_count, 2);
        assert_eq!(m.logo2, "b.png");
    }

    #[test]
    fn match_record_rejects_missing_field() {
        let res = serde_json::from_str::<MatchRecord>(r#"{"id":7,"team1":"A","team2":"B"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn match_record_rejects_string_id() {
        let res = serde_json::from_str::<MatchRecord>(
            r#"{"id":"7","team1":"A","team2":"B","logo1":"","logo2":"","streams":0}"#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn stream_record_ignores_extra_fields() {
        let raw: Vec<StreamRecord> = serde_json::from_str(
            r#"[{"url":"http://x/1","language":"en","hd":true},{"url":"http://x/2"}]"#,
        )
        .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].url, "http://x/1");
    }
}
