use std::io::{self, Stderr};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::{Stream, StreamExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// Tick interval driving the pending-action dots.
pub const TICK_INTERVAL: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
    /// Result screen timer fired for this ticket
    AutoReturn(u64),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(forward_terminal_events(EventStream::new(), tx.clone()));

        let tx_tick = tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                if tx_tick.send(AppEvent::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for tasks that feed events back into the loop (timers).
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}

fn translate(evt: Event) -> Option<AppEvent> {
    match evt {
        // Only handle key press events, not release
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Pump terminal events into the app channel until the stream ends, the
/// terminal errors, or the receiver is gone.
async fn forward_terminal_events<S>(stream: S, tx: mpsc::UnboundedSender<AppEvent>)
where
    S: Stream<Item = io::Result<Event>>,
{
    tokio::pin!(stream);
    loop {
        match stream.next().await {
            Some(Ok(evt)) => {
                if let Some(event) = translate(evt) {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Some(Err(err)) => {
                tracing::warn!(%err, "terminal event stream failed");
                break;
            }
            None => {
                tracing::warn!("terminal event stream ended");
                break;
            }
        }
    }
}

pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;

    Ok(terminal)
}

pub fn restore() -> Result<()> {
    execute!(io::stderr(), LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Install panic hook to restore terminal on panic
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use futures_util::stream;

    fn key_event(kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char('o'),
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_translate_drops_key_release() {
        assert!(matches!(translate(key_event(KeyEventKind::Press)), Some(AppEvent::Key(_))));
        assert_eq!(translate(key_event(KeyEventKind::Release)), None);
        assert_eq!(translate(Event::FocusGained), None);
        assert_eq!(translate(Event::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
    }

    #[tokio::test]
    async fn test_forwarding_stops_on_read_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let events = stream::iter(vec![
            Ok(Event::Resize(80, 24)),
            Err(io::Error::new(io::ErrorKind::Other, "tty gone")),
            Ok(Event::Resize(100, 40)),
        ]);
        forward_terminal_events(events, tx).await;
        assert_eq!(drain(&mut rx), vec![AppEvent::Resize(80, 24)]);
    }

    #[tokio::test]
    async fn test_forwarding_returns_when_stream_ends() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let events = stream::iter(vec![Ok(key_event(KeyEventKind::Press))]);
        let finished = tokio::time::timeout(
            Duration::from_secs(1),
            forward_terminal_events(events, tx),
        )
        .await;
        assert!(finished.is_ok());
        assert_eq!(drain(&mut rx).len(), 1);
    }

    #[tokio::test]
    async fn test_forwarding_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let events = stream::iter(vec![Ok(Event::Resize(1, 1))]).chain(stream::pending());
        let finished = tokio::time::timeout(
            Duration::from_secs(1),
            forward_terminal_events(events, tx),
        )
        .await;
        assert!(finished.is_ok());
    }
}
