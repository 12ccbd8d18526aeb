//! Transient success/error line shown above the attendance screen.
//!
//! A banner disappears after its time-to-live or when the next action
//! replaces it. Times come from `tokio::time::Instant` so paused-time tests
//! can expire it.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerMessage {
    pub kind: BannerKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Banner {
    current: Option<(BannerMessage, Instant)>,
    ttl: Duration,
}

impl Banner {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(BannerKind::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(BannerKind::Error, text.into());
    }

    fn set(&mut self, kind: BannerKind, text: String) {
        self.current = Some((BannerMessage { kind, text }, Instant::now()));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The live banner, if one is set and has not expired.
    pub fn current(&self) -> Option<&BannerMessage> {
        self.current
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < self.ttl)
            .map(|(message, _)| message)
    }

    pub fn is_error(&self) -> bool {
        self.current().is_some_and(|message| message.kind == BannerKind::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_banner_expires_after_ttl() {
        let mut banner = Banner::new(Duration::from_secs(5));
        banner.success("Clock-in completed: 09:00");
        assert!(banner.current().is_some());

        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert!(banner.current().is_some());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(banner.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_message_replaces_banner() {
        let mut banner = Banner::new(Duration::from_secs(5));
        banner.error("Clock-in failed");
        assert!(banner.is_error());
        banner.success("Clock-out completed: 18:00");
        assert!(!banner.is_error());
        assert_eq!(banner.current().map(|m| m.text.as_str()), Some("Clock-out completed: 18:00"));
    }
}
