//! Decoupled event bus for scrape progress.
//!
//! The engine emits events via [`EventBus::emit`] and front-ends subscribe via
//! [`EventBus::subscribe`]. Built on [`tokio::sync::broadcast`] so
//! multiple listeners can react independently.

use std::fmt;
use tokio::sync::broadcast;

/// Events that flow through the system.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A section front is about to be fetched.
    SourceStarted { source: String, url: String },
    /// An article page was skipped.
    PageFailed { url: String, reason: String },
    /// An article page was parsed and assembled.
    ArticleScraped { source: String, url: String },
    /// A source completed with this many articles.
    SourceFinished { source: String, articles: usize },
    /// A source failed as a whole.
    SourceFailed { source: String, reason: String },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SourceStarted { source, url } => write!(f, "[{source}] scraping {url}"),
            Event::PageFailed { url, reason } => write!(f, "  ✗ {url}: {reason}"),
            Event::ArticleScraped { source, url } => write!(f, "  [{source}] ✓ {url}"),
            Event::SourceFinished { source, articles } => {
                write!(f, "[{source}] done, {articles} article(s)")
            }
            Event::SourceFailed { source, reason } => write!(f, "[{source}] failed: {reason}"),
        }
    }
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(n: usize) -> Event {
        Event::SourceFinished {
            source: "indiewire".to_string(),
            articles: n,
        }
    }

    #[tokio::test]
    async fn emit_reaches_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.emit(finished(3));

        assert_eq!(rx.recv().await.unwrap(), finished(3));
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(Event::SourceFailed {
            source: "variety".to_string(),
            reason: "timed out".to_string(),
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert_eq!(e1, e2);
    }

    #[test]
    fn emit_without_subscribers_returns_zero() {
        let bus = EventBus::default();
        assert_eq!(bus.emit(finished(0)), 0);
    }

    #[test]
    fn emit_with_subscriber_returns_count() {
        let bus = EventBus::default();
        let _rx1 = bus.subscribe();
        let _rx2 = bus.subscribe();
        assert_eq!(bus.emit(finished(1)), 2);
    }

    #[test]
    fn display_is_one_line() {
        assert_eq!(finished(2).to_string(), "[indiewire] done, 2 article(s)");
    }
}
