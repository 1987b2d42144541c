use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use salon_core::{BookingStatus, Screen};

use crate::app::{App, InputMode};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::AutoReturn(ticket) => app.on_auto_return(ticket),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode() {
        InputMode::Editing => handle_booking_form(app, key),
        InputMode::Normal => {
            if key.code == KeyCode::Char('q') {
                app.should_quit = true;
                return;
            }
            match app.screen() {
                Screen::Dashboard => handle_dashboard(app, key),
                Screen::Chat => handle_chat(app, key),
                Screen::Inbox => handle_inbox(app, key),
                Screen::Client => handle_client(app, key),
                Screen::History => handle_history(app, key),
                // Leaves on its own timer
                Screen::Result | Screen::Booking => {}
            }
        }
    }
}

fn handle_dashboard(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.action_down(),
        KeyCode::Char('k') | KeyCode::Up => app.action_up(),
        _ => {}
    }
}

fn handle_chat(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('o') | KeyCode::Enter => app.offer_time(),
        KeyCode::Char('c') => app.open_client(),
        KeyCode::Char('y') => app.set_status(BookingStatus::Confirmed),
        KeyCode::Char('n') => app.set_status(BookingStatus::Declined),
        KeyCode::Char('j') | KeyCode::Down => app.client_down(),
        KeyCode::Char('k') | KeyCode::Up => app.client_up(),
        _ => {}
    }
}

fn handle_inbox(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.client_down(),
        KeyCode::Char('k') | KeyCode::Up => app.client_up(),
        KeyCode::Enter | KeyCode::Char('o') => app.book_from_inbox(),
        _ => {}
    }
}

fn handle_client(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.close_client(),
        KeyCode::Char('b') => app.book_from_client(),
        KeyCode::Char('h') => app.open_history(),
        _ => {}
    }
}

fn handle_history(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => app.close_history(),
        _ => {}
    }
}

fn handle_booking_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_booking(),
        KeyCode::Tab | KeyCode::Down => app.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.prev_field(),
        KeyCode::Left => app.cursor_left(),
        KeyCode::Right => app.cursor_right(),
        KeyCode::Backspace => app.delete_char(),
        KeyCode::Char(c) => app.insert_char(c),
        _ => {}
    }
}
