//! Key handling: maps key presses to session intents.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use studio::session::{DispatchOutcome, Session};
use tracing::warn;

use crate::app::{App, InputMode};

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, session: &Session) {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_key(key, app, session),
        InputMode::FilterMenu => handle_filter_menu_key(key, app, session),
    }
}

fn handle_normal_key(key: KeyEvent, app: &mut App, session: &Session) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('n') => {
            // A request while busy is ignored by the session itself.
            if let Err(e) = session.spawn_draw() {
                warn!(error = %e, "draw failed");
                app.status_message = Some(e.to_string());
            }
        }
        KeyCode::Char('f') => {
            let current = session.snapshot().filter;
            app.open_filter_menu(current);
        }
        KeyCode::Char('h') => {
            app.status_message = match session.toggle_favorite() {
                Some(true) => Some("Added to favorites.".into()),
                Some(false) => Some("Removed from favorites.".into()),
                None => None,
            };
        }
        KeyCode::Char('c') => {
            let session = session.clone();
            let tx = app.status_tx.clone();
            tokio::spawn(async move {
                if let Some(msg) = outcome_message(session.copy_current_prompt().await) {
                    let _ = tx.send(msg.to_string());
                }
            });
        }
        KeyCode::Char('s') => {
            let session = session.clone();
            let tx = app.status_tx.clone();
            tokio::spawn(async move {
                if let Some(msg) = outcome_message(session.share_current_prompt().await) {
                    let _ = tx.send(msg.to_string());
                }
            });
        }
        KeyCode::Char(',') => {
            app.show_logs = !app.show_logs;
            app.log_scroll = 0;
        }
        KeyCode::Up | KeyCode::Char('k') if app.show_logs => {
            app.log_scroll = app.log_scroll.saturating_add(3);
        }
        KeyCode::Down | KeyCode::Char('j') if app.show_logs => {
            app.log_scroll = app.log_scroll.saturating_sub(3);
        }
        KeyCode::End => app.log_scroll = 0,
        _ => {}
    }
}

fn handle_filter_menu_key(key: KeyEvent, app: &mut App, session: &Session) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.filter_cursor = app.filter_cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.filter_cursor + 1 < app.filters.len() {
                app.filter_cursor += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(filter) = app.selected_filter() {
                match session.set_filter(&filter.to_string()) {
                    Ok(f) => app.status_message = Some(format!("Filter: {}", f.label())),
                    Err(e) => app.status_message = Some(e.to_string()),
                }
            }
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc | KeyCode::Char('f') => app.input_mode = InputMode::Normal,
        KeyCode::Char('q') => app.should_quit = true,
        _ => {}
    }
}

/// Status line text for a copy/share result.
///
/// Absorbed failures and skipped intents show nothing.
fn outcome_message(outcome: DispatchOutcome) -> Option<&'static str> {
    match outcome {
        DispatchOutcome::Shared => Some("Shared."),
        DispatchOutcome::Copied => Some("Copied to clipboard."),
        DispatchOutcome::Dropped | DispatchOutcome::Skipped => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use studio::catalog::{Catalog, Category, Filter};
    use studio::config::StudioConfig;
    use studio::session::SessionController;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn fixture() -> (App, Session) {
        let catalog = Arc::new(Catalog::new([
            (Category::Minimalist, vec!["Work with absence"]),
            (Category::Experimental, vec!["Make the invisible visible"]),
        ]));
        let filters = catalog.filters();
        let controller = SessionController::new(catalog, StudioConfig::default()).unwrap();
        (
            App::new(filters, "Creative Studio".into()),
            Session::new(controller),
        )
    }

    #[tokio::test]
    async fn q_and_ctrl_c_quit() {
        let (mut app, session) = fixture();
        handle_key_event(key(KeyCode::Char('q')), &mut app, &session);
        assert!(app.should_quit);

        let (mut app, session) = fixture();
        handle_key_event(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
            &session,
        );
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn filter_menu_selects_a_filter() {
        let (mut app, session) = fixture();
        handle_key_event(key(KeyCode::Char('f')), &mut app, &session);
        assert_eq!(app.input_mode, InputMode::FilterMenu);
        assert_eq!(app.filter_cursor, 0);

        handle_key_event(key(KeyCode::Down), &mut app, &session);
        handle_key_event(key(KeyCode::Down), &mut app, &session);
        handle_key_event(key(KeyCode::Down), &mut app, &session);
        assert_eq!(app.filter_cursor, 2);

        handle_key_event(key(KeyCode::Enter), &mut app, &session);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(
            session.snapshot().filter,
            Filter::Category(Category::Experimental)
        );
        assert_eq!(app.status_message.as_deref(), Some("Filter: Experimental"));
    }

    #[tokio::test]
    async fn esc_closes_menu_without_changing_filter() {
        let (mut app, session) = fixture();
        handle_key_event(key(KeyCode::Char('f')), &mut app, &session);
        handle_key_event(key(KeyCode::Down), &mut app, &session);
        handle_key_event(key(KeyCode::Esc), &mut app, &session);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(session.snapshot().filter, Filter::All);
    }

    #[tokio::test(start_paused = true)]
    async fn space_draws_and_h_toggles_favorite() {
        let (mut app, session) = fixture();

        handle_key_event(key(KeyCode::Char('h')), &mut app, &session);
        assert!(app.status_message.is_none());

        handle_key_event(key(KeyCode::Char(' ')), &mut app, &session);
        assert!(session.snapshot().busy);
        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        assert!(!session.snapshot().busy);

        handle_key_event(key(KeyCode::Char('h')), &mut app, &session);
        assert_eq!(app.status_message.as_deref(), Some("Added to favorites."));
        assert!(session.snapshot().is_favorite);

        handle_key_event(key(KeyCode::Char('h')), &mut app, &session);
        assert_eq!(
            app.status_message.as_deref(),
            Some("Removed from favorites.")
        );
    }

    #[test]
    fn absorbed_failures_show_nothing() {
        assert_eq!(outcome_message(DispatchOutcome::Dropped), None);
        assert_eq!(outcome_message(DispatchOutcome::Skipped), None);
        assert_eq!(
            outcome_message(DispatchOutcome::Copied),
            Some("Copied to clipboard.")
        );
    }
}
