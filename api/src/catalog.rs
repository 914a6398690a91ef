//! Match → catalog entry normalization.

use crate::{CatalogEntry, Match};
use log::debug;
use std::collections::HashSet;

/// Turn upstream matches into catalog entries.
///
/// With `live_only`, matches reporting zero streams are dropped. Upstream order
/// is kept; a repeated match id keeps only its first occurrence. Image paths are
/// always joined onto `image_base`, never used as-is.
pub fn build_entries(matches: &[Match], live_only: bool, image_base: &str) -> Vec<CatalogEntry> {
    let mut seen = HashSet::with_capacity(matches.len());
    matches
        .iter()
        .filter(|m| !live_only || m.is_live())
        .filter(|m| {
            let first = seen.insert(m.id);
            if !first {
                debug!("dropping duplicate match id {} ({})", m.id, m.display_name());
            }
            first
        })
        .map(|m| to_entry(m, image_base))
        .collect()
}

fn to_entry(m: &Match, image_base: &str) -> CatalogEntry {
    CatalogEntry {
        display_name: m.display_name(),
        id: m.id.to_string(),
        poster_url: format!("{image_base}{}", m.logo1),
        background_url: format!("{image_base}{}", m.logo2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://streamed.su/images/";

    fn game(id: u64, team1: &str, team2: &str, streams: u32) -> Match {
        Match {
            id,
            team1: team1.into(),
            team2: team2.into(),
            logo1: format!("{id}-home.webp"),
            logo2: format!("{id}-away.webp"),
            stream_count: streams,
        }
    }

    #[test]
    fn live_only_keeps_streaming_matches_in_order() {
        let matches = vec![
            game(1, "A", "B", 2),
            game(2, "C", "D", 0),
            game(3, "E", "F", 1),
            game(4, "G", "H", 0),
        ];
        let entries = build_entries(&matches, true, BASE);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn without_live_only_everything_passes() {
        let matches = vec![game(1, "A", "B", 0), game(2, "C", "D", 0)];
        let entries = build_entries(&matches, false, BASE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].display_name, "C vs D");
    }

    #[test]
    fn image_urls_are_prefixed_with_base() {
        let matches = vec![game(9, "A", "B", 1)];
        let entry = &build_entries(&matches, true, BASE)[0];
        assert_eq!(entry.poster_url, "https://streamed.su/images/9-home.webp");
        assert_eq!(entry.background_url, "https://streamed.su/images/9-away.webp");
    }

    #[test]
    fn end_to_end_example_entry() {
        let m = Match {
            id: 1,
            team1: "A".into(),
            team2: "B".into(),
            logo1: "a.png".into(),
            logo2: "b.png".into(),
            stream_count: 2,
        };
        let entries = build_entries(&[m], true, BASE);
        assert_eq!(
            entries,
            vec![CatalogEntry {
                display_name: "A vs B".into(),
                id: "1".into(),
                poster_url: "https://streamed.su/images/a.png".into(),
                background_url: "https://streamed.su/images/b.png".into(),
            }]
        );
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let matches = vec![game(5, "A", "B", 1), game(6, "C", "D", 1), game(5, "X", "Y", 1)];
        let entries = build_entries(&matches, true, BASE);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].display_name, "A vs B");
        assert_eq!(entries[1].id, "6");
    }

    #[test]
    fn duplicate_of_filtered_match_still_counts_if_live() {
        // The not-live copy is filtered before dedup, so the live one survives.
        let matches = vec![game(5, "A", "B", 0), game(5, "A", "B", 3)];
        let entries = build_entries(&matches, true, BASE);
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(build_entries(&[], true, BASE).is_empty());
    }
}
