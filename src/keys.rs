use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // Query input swallows every other key until Enter or Esc.
    if guard.state.search.editing {
        match key_event.code {
            KeyCode::Enter => {
                guard.stop_editing_query();
                let request = guard.search_request();
                drop(guard);
                let _ = network_requests.send(request).await;
            }
            KeyCode::Esc => guard.stop_editing_query(),
            KeyCode::Backspace => guard.state.search.pop_char(),
            Char(c) => guard.state.search.push_char(c),
            _ => {}
        }
        return;
    }

    let mut request: Option<NetworkRequest> = None;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Live),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Search),
        (_, Char('3'), _) => guard.update_tab(MenuItem::Stream),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Live rows
        (MenuItem::Live, Char('l') | KeyCode::Right, _) => guard.state.live.next_row(),
        (MenuItem::Live, Char('h') | KeyCode::Left, _) => guard.state.live.prev_row(),
        (MenuItem::Live, Char('j') | KeyCode::Down, _) => guard.state.live.entry_down(),
        (MenuItem::Live, Char('k') | KeyCode::Up, _) => guard.state.live.entry_up(),
        (MenuItem::Live, Char('r'), _) => request = Some(NetworkRequest::LoadHomepage),

        // Search
        (_, Char('/'), _) => guard.start_editing_query(),
        (MenuItem::Search, Char('s'), _) => guard.state.search.cycle_sport(),
        (MenuItem::Search, Char('o'), _) => guard.state.search.toggle_live_only(),
        (MenuItem::Search, Char('r'), _) => request = Some(guard.search_request()),
        (MenuItem::Search, Char('j') | KeyCode::Down, _) => guard.state.search.select_down(),
        (MenuItem::Search, Char('k') | KeyCode::Up, _) => guard.state.search.select_up(),

        // Playback
        (MenuItem::Live | MenuItem::Search, KeyCode::Enter, _) => request = guard.begin_resolve(),
        (MenuItem::Stream, Char('r'), _) => {
            if let (Some(match_id), Some(title)) =
                (guard.state.stream.match_id.clone(), guard.state.stream.title.clone())
            {
                guard.state.stream.begin(match_id.clone(), title.clone());
                request = Some(NetworkRequest::ResolveStream { match_id, title });
            }
        }
        (MenuItem::Stream, KeyCode::Esc, _) => {
            let back = guard.state.previous_tab;
            guard.update_tab(back);
        }

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }

    drop(guard);
    if let Some(request) = request {
        let _ = network_requests.send(request).await;
    }
}
