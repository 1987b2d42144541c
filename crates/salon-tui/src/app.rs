use std::time::Duration;

use ratatui::widgets::ListState;
use salon_core::{
    mock, ActionGroup, AutoReturn, BookingStatus, Client, DraftField, LoadRing, NavError, Screen,
    Session, Variant,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Timer that returns the result screen to chat. Aborted when dropped.
struct AutoReturnTask {
    ticket: u64,
    handle: JoinHandle<()>,
}

impl Drop for AutoReturnTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub session: Session,

    // Conversations
    pub clients: Vec<Client>,
    pub client_state: ListState,

    // Dashboard
    pub action_groups: Vec<ActionGroup>,
    pub load_ring: LoadRing,
    pub action_cursor: usize,

    // Booking form
    pub draft_field: DraftField,
    pub draft_cursor: usize, // cursor position (chars) in the focused field

    // Last rejected action, shown in the footer
    pub status_message: Option<String>,

    // Animation state
    pub animation_frame: u8, // 0-4 for the pending-action dots

    events: mpsc::UnboundedSender<AppEvent>,
    auto_return: Option<AutoReturnTask>,
}

impl App {
    pub fn new(variant: Variant, result_delay: Duration, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        let clients = mock::clients();
        let mut client_state = ListState::default();
        if !clients.is_empty() {
            client_state.select(Some(0));
        }

        Self {
            should_quit: false,
            session: Session::with_delay(variant, result_delay),

            clients,
            client_state,

            action_groups: mock::action_groups(),
            load_ring: mock::load_ring(),
            action_cursor: 0,

            draft_field: DraftField::Service,
            draft_cursor: 0,

            status_message: None,
            animation_frame: 0,

            events,
            auto_return: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.session.screen()
    }

    pub fn input_mode(&self) -> InputMode {
        if self.screen() == Screen::Booking {
            InputMode::Editing
        } else {
            InputMode::Normal
        }
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.client_state.selected().and_then(|i| self.clients.get(i))
    }

    pub fn client_down(&mut self) {
        let len = self.clients.len();
        if len > 0 {
            let i = self.client_state.selected().unwrap_or(0);
            self.client_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn client_up(&mut self) {
        let i = self.client_state.selected().unwrap_or(0);
        self.client_state.select(Some(i.saturating_sub(1)));
    }

    pub fn action_count(&self) -> usize {
        self.action_groups.iter().map(|g| g.actions.len()).sum()
    }

    pub fn action_down(&mut self) {
        let len = self.action_count();
        if len > 0 {
            self.action_cursor = (self.action_cursor + 1).min(len - 1);
        }
    }

    pub fn action_up(&mut self) {
        self.action_cursor = self.action_cursor.saturating_sub(1);
    }

    fn apply(&mut self, result: Result<(), NavError>) {
        match result {
            Ok(()) => {
                self.status_message = None;
                if self.screen() == Screen::Booking {
                    self.focus_field(DraftField::Service);
                }
            }
            Err(err) => {
                tracing::debug!(%err, "transition rejected");
                self.status_message = Some(err.to_string());
            }
        }
    }

    // Transitions
    pub fn offer_time(&mut self) {
        let result = self.session.offer_time();
        self.apply(result);
    }

    pub fn open_client(&mut self) {
        let result = self.session.open_client();
        self.apply(result);
    }

    pub fn book_from_inbox(&mut self) {
        let result = self.session.book_from_inbox();
        self.apply(result);
    }

    pub fn close_client(&mut self) {
        let result = self.session.close_client();
        self.apply(result);
    }

    pub fn book_from_client(&mut self) {
        let result = self.session.book_from_client();
        self.apply(result);
    }

    pub fn open_history(&mut self) {
        let result = self.session.open_history();
        self.apply(result);
    }

    pub fn close_history(&mut self) {
        let result = self.session.close_history();
        self.apply(result);
    }

    pub fn set_status(&mut self, status: BookingStatus) {
        self.session.set_status(status);
    }

    pub fn submit_booking(&mut self) {
        match self.session.submit_booking() {
            Ok(auto) => {
                self.status_message = None;
                self.schedule_auto_return(auto);
            }
            Err(err) => self.apply(Err(err)),
        }
    }

    fn schedule_auto_return(&mut self, auto: AutoReturn) {
        let tx = self.events.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(auto.delay).await;
            let _ = tx.send(AppEvent::AutoReturn(auto.ticket));
        });
        // Replacing the old task drops and aborts it
        self.auto_return = Some(AutoReturnTask {
            ticket: auto.ticket,
            handle,
        });
    }

    pub fn on_auto_return(&mut self, ticket: u64) {
        if let Err(err) = self.session.finish_result(ticket) {
            tracing::debug!(%err, "auto-return ignored");
            return;
        }
        if self.auto_return.as_ref().map(|t| t.ticket) == Some(ticket) {
            self.auto_return = None;
        }
    }

    pub fn has_scheduled_return(&self) -> bool {
        self.auto_return.is_some()
    }

    /// Cancel outstanding timers before the app goes away.
    pub fn teardown(&mut self) {
        self.auto_return = None;
        self.session.cancel_auto_return();
    }

    // Booking form editing
    pub fn focus_field(&mut self, field: DraftField) {
        self.draft_field = field;
        self.draft_cursor = self.session.draft().get(field).chars().count();
    }

    pub fn next_field(&mut self) {
        self.focus_field(self.draft_field.next());
    }

    pub fn prev_field(&mut self) {
        self.focus_field(self.draft_field.prev());
    }

    fn replace_field(&mut self, value: String) {
        let result = self.session.edit_draft(self.draft_field, value);
        if let Err(err) = result {
            self.status_message = Some(err.to_string());
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let mut value = self.session.draft().get(self.draft_field).to_string();
        let byte_idx = char_to_byte_index(&value, self.draft_cursor);
        value.insert(byte_idx, c);
        self.draft_cursor += 1;
        self.replace_field(value);
    }

    pub fn delete_char(&mut self) {
        if self.draft_cursor == 0 {
            return;
        }
        let mut value = self.session.draft().get(self.draft_field).to_string();
        self.draft_cursor -= 1;
        let byte_idx = char_to_byte_index(&value, self.draft_cursor);
        value.remove(byte_idx);
        self.replace_field(value);
    }

    pub fn cursor_left(&mut self) {
        self.draft_cursor = self.draft_cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        let len = self.session.draft().get(self.draft_field).chars().count();
        self.draft_cursor = (self.draft_cursor + 1).min(len);
    }

    pub fn tick_animation(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % 5;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_app(variant: Variant) -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(variant, Duration::from_millis(2500), tx), rx)
    }

    #[test]
    fn test_char_to_byte_index() {
        assert_eq!(char_to_byte_index("Мария", 0), 0);
        assert_eq!(char_to_byte_index("Мария", 2), 4);
        assert_eq!(char_to_byte_index("Мария", 10), "Мария".len());
    }

    #[test]
    fn test_client_selection_is_clamped() {
        let (mut app, _rx) = new_app(Variant::Full);
        app.client_up();
        assert_eq!(app.client_state.selected(), Some(0));
        for _ in 0..10 {
            app.client_down();
        }
        assert_eq!(app.client_state.selected(), Some(app.clients.len() - 1));
    }

    #[test]
    fn test_cyrillic_editing() {
        let (mut app, _rx) = new_app(Variant::Full);
        app.offer_time();
        assert_eq!(app.input_mode(), InputMode::Editing);
        for c in "Мрия".chars() {
            app.insert_char(c);
        }
        app.cursor_left();
        app.cursor_left();
        app.cursor_left();
        app.insert_char('а');
        assert_eq!(app.session.draft().service, "Мария");
        app.cursor_right();
        app.delete_char();
        assert_eq!(app.session.draft().service, "Маия");
        assert_eq!(app.session.draft().master, "");
    }

    #[test]
    fn test_field_focus_moves_cursor_to_end() {
        let (mut app, _rx) = new_app(Variant::Full);
        app.offer_time();
        app.insert_char('x');
        app.next_field();
        assert_eq!(app.draft_field, DraftField::Master);
        assert_eq!(app.draft_cursor, 0);
        app.prev_field();
        assert_eq!(app.draft_cursor, 1);
    }

    #[test]
    fn test_rejected_transition_sets_message() {
        let (mut app, _rx) = new_app(Variant::Basic);
        app.open_history();
        assert!(app.status_message.is_some());
        assert_eq!(app.screen(), Screen::Inbox);
        app.book_from_inbox();
        assert!(app.status_message.is_none());
        assert_eq!(app.screen(), Screen::Booking);
    }

    #[test]
    fn test_dashboard_cursor() {
        let (mut app, _rx) = new_app(Variant::Dashboard);
        for _ in 0..20 {
            app.action_down();
        }
        assert_eq!(app.action_cursor, app.action_count() - 1);
        app.action_up();
        assert_eq!(app.action_cursor, app.action_count() - 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_return_after_delay() {
        let (mut app, mut rx) = new_app(Variant::Full);
        app.offer_time();
        app.submit_booking();
        assert_eq!(app.screen(), Screen::Result);
        assert!(app.has_scheduled_return());

        tokio::time::sleep(Duration::from_millis(2499)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_millis(2)).await;
        let event = rx.recv().await.unwrap();
        let AppEvent::AutoReturn(ticket) = event else {
            panic!("unexpected event {:?}", event);
        };
        app.on_auto_return(ticket);
        assert_eq!(app.screen(), Screen::Chat);
        assert_eq!(app.session.status(), BookingStatus::Offered);
        assert!(!app.has_scheduled_return());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_timer() {
        let (mut app, mut rx) = new_app(Variant::Full);
        app.offer_time();
        app.submit_booking();
        app.teardown();
        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(app.screen(), Screen::Result);
        assert!(app.session.pending_return().is_none());
    }
}
