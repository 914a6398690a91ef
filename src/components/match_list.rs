use streamed_api::CatalogEntry;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::widgets::Widget;

/// Scrolling list of catalog entries with a highlighted cursor row.
pub struct MatchList<'a> {
    pub entries: &'a [CatalogEntry],
    /// None draws the list without a cursor (e.g. pane not focused).
    pub selected: Option<usize>,
    pub empty_message: &'a str,
}

impl Widget for MatchList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 4 {
            return;
        }

        if self.entries.is_empty() {
            let style = Style::default().fg(Color::DarkGray);
            buf.set_string(area.x, area.y, truncate(self.empty_message, area.width), style);
            return;
        }

        let cursor = self.selected.unwrap_or(0);
        let (start, end) = visible_window(self.entries.len(), cursor, area.height as usize);
        let last_row = (end - start).saturating_sub(1);
        // Hidden-entry count, drawn at the right edge of the last visible row.
        let more = (end < self.entries.len()).then(|| format!("+{}", self.entries.len() - end));

        for (row, (idx, entry)) in self.entries[start..end]
            .iter()
            .enumerate()
            .map(|(i, e)| (i + start, e))
            .enumerate()
        {
            let is_selected = self.selected == Some(idx);
            let marker = if is_selected { "> " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let width = match &more {
                Some(more) if row == last_row => area.width.saturating_sub(more.len() as u16 + 1),
                _ => area.width,
            };
            let text = format!("{marker}{}", entry.display_name);
            buf.set_string(area.x, area.y + row as u16, truncate(&text, width), style);
        }

        if let Some(more) = more {
            let x = area.right().saturating_sub(more.len() as u16);
            let y = area.y + last_row as u16;
            buf.set_string(x, y, more, Style::default().fg(Color::DarkGray));
        }
    }
}

/// Half-open range of rows to draw so that `cursor` stays visible.
pub fn visible_window(len: usize, cursor: usize, height: usize) -> (usize, usize) {
    if height == 0 || len == 0 {
        return (0, 0);
    }
    let cursor = cursor.min(len - 1);
    let start = (cursor + 1).saturating_sub(height);
    (start, (start + height).min(len))
}

fn truncate(text: &str, width: u16) -> String {
    let max = width as usize;
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.truncate(out.trim_end().len());
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> CatalogEntry {
        CatalogEntry { display_name: name.into(), ..Default::default() }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn window_starts_at_top_until_cursor_leaves_view() {
        assert_eq!(visible_window(10, 0, 4), (0, 4));
        assert_eq!(visible_window(10, 3, 4), (0, 4));
        assert_eq!(visible_window(10, 4, 4), (1, 5));
        assert_eq!(visible_window(10, 9, 4), (6, 10));
    }

    #[test]
    fn window_handles_short_lists() {
        assert_eq!(visible_window(2, 1, 10), (0, 2));
        assert_eq!(visible_window(0, 0, 10), (0, 0));
        assert_eq!(visible_window(3, 99, 2), (1, 3));
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("Arsenal vs Chelsea", 7), "Arsena…");
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Leeds vs Fulham", 7), "Leeds…");
    }

    #[test]
    fn renders_marker_on_selected_row() {
        let entries = vec![entry("A vs B"), entry("C vs D")];
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        MatchList { entries: &entries, selected: Some(1), empty_message: "none" }
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "  A vs B");
        assert_eq!(row_text(&buf, 1), "> C vs D");
    }

    #[test]
    fn overflow_count_does_not_cover_entry_text() {
        let entries = vec![
            entry("Arsenal vs Chelsea"),
            entry("Liverpool vs Everton"),
            entry("Leeds vs Fulham"),
            entry("Spurs vs Brighton"),
        ];
        let area = Rect::new(0, 0, 16, 2);
        let mut buf = Buffer::empty(area);
        MatchList { entries: &entries, selected: Some(0), empty_message: "none" }
            .render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "> Arsenal vs Ch…");
        assert_eq!(row_text(&buf, 1), "  Liverpool…  +2");
    }

    #[test]
    fn renders_empty_message() {
        let area = Rect::new(0, 0, 20, 2);
        let mut buf = Buffer::empty(area);
        MatchList { entries: &[], selected: None, empty_message: "No live matches" }
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 0), "No live matches");
    }
}
