use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::match_list::MatchList;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 3] = &["Live", "Search", "Stream"];

const HELP_TEXT: &str = "\
q / Ctrl-C   quit
1 2 3        Live / Search / Stream tabs
?  Esc       help / back
h l  ← →     previous / next sport (Live)
j k  ↓ ↑     move cursor
Enter        resolve the highlighted match
r            reload homepage (Live), rerun search (Search), re-resolve (Stream)
/            edit search query; Enter runs it, Esc stops editing
s            cycle sport filter (Search)
o            toggle live-only (Search)
f            full screen
\"            toggle log pane";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Live => draw_live(f, layout.main, app),
            MenuItem::Search => draw_search(f, layout.main, app),
            MenuItem::Stream => draw_stream(f, layout.main, app),
            MenuItem::Help => draw_placeholder(f, layout.main, HELP_TEXT),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }
        draw_status(f, layout.status, app);
        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        log::error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Live => 0,
        MenuItem::Search => 1,
        MenuItem::Stream => 2,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_live(f: &mut Frame, area: Rect, app: &App) {
    let live = &app.state.live;

    if !live.loaded {
        let msg = match app.state.last_error.as_deref() {
            Some(err) => format!("Homepage load failed:\n{err}"),
            None => "Loading live sports...".to_string(),
        };
        draw_placeholder(f, area, &msg);
        return;
    }

    if live.rows.is_empty() {
        draw_placeholder(f, area, "Upstream lists no sports right now. Press r to reload.");
        return;
    }

    let [sports_area, matches_area] =
        Layout::horizontal([Constraint::Length(24), Constraint::Fill(1)]).areas(area);

    let sports_block = default_border(Color::White).title(" Sports ");
    let sports_inner = sports_block.inner(sports_area);
    f.render_widget(sports_block, sports_area);

    let sport_lines: Vec<Line> = live
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let text = format!("{} ({})", row.sport_name, row.entries.len());
            if idx == live.selected_row {
                Line::from(Span::styled(
                    format!("> {text}"),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else if row.entries.is_empty() {
                Line::from(Span::styled(format!("  {text}"), Style::default().fg(Color::DarkGray)))
            } else {
                Line::from(format!("  {text}"))
            }
        })
        .collect();
    let scroll = live.selected_row.saturating_sub(sports_inner.height.saturating_sub(1) as usize);
    f.render_widget(Paragraph::new(sport_lines).scroll((scroll as u16, 0)), sports_inner);

    let Some(row) = live.current_row() else {
        return;
    };
    let title = format!(" {}: live now ", row.sport_name);
    let matches_block = default_border(Color::White).title(title);
    let matches_inner = matches_block.inner(matches_area);
    f.render_widget(matches_block, matches_area);

    let [legend, list] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(matches_inner);
    f.render_widget(
        Paragraph::new("h/l=sport  j/k=move  Enter=resolve  r=reload")
            .style(Style::default().fg(Color::DarkGray)),
        legend,
    );
    f.render_widget(
        MatchList {
            entries: &row.entries,
            selected: Some(live.selected_entry),
            empty_message: "No live matches for this sport.",
        },
        list,
    );
}

fn draw_search(f: &mut Frame, area: Rect, app: &App) {
    let search = &app.state.search;

    let [input_area, filter_area, results_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let (border_color, cursor) = if search.editing {
        (Color::Yellow, "▏")
    } else {
        (Color::White, "")
    };
    let input = Paragraph::new(format!("{}{cursor}", search.query))
        .block(default_border(border_color).title(" Search (/ to edit) "));
    f.render_widget(input, input_area);

    let live_box = if search.live_only { "[x]" } else { "[ ]" };
    let filters = Line::from(vec![
        Span::raw(" Sport: "),
        Span::styled(
            format!("< {} >", search.sport_label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(format!("  (s)   Live only: {live_box} (o)   r=rerun  Enter=resolve")),
    ]);
    f.render_widget(Paragraph::new(filters), filter_area);

    let block = default_border(Color::White).title(" Results ");
    let inner = block.inner(results_area);
    f.render_widget(block, results_area);

    match search.results.as_deref() {
        None => f.render_widget(
            Paragraph::new("Type / then a team name and press Enter.")
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        ),
        Some(results) => f.render_widget(
            MatchList {
                entries: results,
                selected: (!search.editing).then_some(search.selected),
                empty_message: "No matches found.",
            },
            inner,
        ),
    }
}

fn draw_stream(f: &mut Frame, area: Rect, app: &App) {
    let stream = &app.state.stream;
    let block = default_border(Color::White).title(" Stream ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(title) = stream.title.as_deref() else {
        f.render_widget(
            Paragraph::new("Pick a match on the Live or Search tab and press Enter.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    };

    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD))),
        Line::from(vec![
            Span::styled("Match id: ", label),
            Span::raw(stream.match_id.clone().unwrap_or_default()),
        ]),
        Line::default(),
    ];

    if stream.pending {
        lines.push(Line::from("Resolving stream..."));
    } else if let Some(target) = stream.target.as_ref() {
        lines.push(Line::from(vec![
            Span::styled("Stream:   ", label),
            Span::styled(target.stream_url.clone(), Style::default().fg(Color::Green)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Referer:  ", label),
            Span::raw(target.referer_header.clone()),
        ]));
        lines.push(Line::default());
        if let Some(cmd) = stream.player_command() {
            lines.push(Line::from(Span::styled("Play with:", label)));
            lines.push(Line::from(cmd));
        }
    } else if let Some(err) = app.state.last_error.as_deref() {
        lines.push(Line::from(Span::styled(err.to_string(), Style::default().fg(Color::Red))));
        lines.push(Line::from(Span::styled("r=retry  Esc=back", label)));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let line = match (app.state.last_error.as_deref(), app.state.live.last_refreshed) {
        (Some(err), _) => Line::from(Span::styled(format!(" {err}"), Style::default().fg(Color::Red))),
        (None, Some(at)) => Line::from(Span::styled(
            format!(" Homepage refreshed {}", at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )),
        (None, None) => Line::default(),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let widget = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::White))
        .style_debug(Style::default().fg(Color::DarkGray));
    f.render_widget(widget, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        inner,
    );
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
