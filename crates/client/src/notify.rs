use std::time::{Duration, Instant};

use storefront_core::config::MAX_NOTIFICATION_TTL_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
    pub expires_at: Instant,
}

/// Transient user notices, each scheduled for removal `ttl` after it was raised.
///
/// The queue never runs timers itself. The owner calls [`NotificationQueue::expire`]
/// with the current instant (typically after sleeping until
/// [`NotificationQueue::next_deadline`]) and may dismiss entries early.
#[derive(Clone, Debug)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl NotificationQueue {
    /// Lifetimes longer than [`MAX_NOTIFICATION_TTL_MS`] are clamped to it.
    pub fn new(ttl: Duration) -> Self {
        let ttl = ttl.min(Duration::from_millis(MAX_NOTIFICATION_TTL_MS));
        Self { entries: Vec::new(), next_id: 1, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> NotificationId {
        self.push_at(kind, message, Instant::now())
    }

    pub fn push_at(
        &mut self,
        kind: NotificationKind,
        message: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        // An unrepresentable deadline expires on the next sweep.
        let expires_at = now.checked_add(self.ttl).unwrap_or(now);
        self.entries.push(Notification { id, kind, message: message.into(), expires_at });
        id
    }

    /// Removes a notification before its deadline. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drops and returns every notification whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<Notification> {
        let (expired, live): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|entry| entry.expires_at <= now);
        self.entries = live;
        expired
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|entry| entry.expires_at).min()
    }

    pub fn active(&self) -> &[Notification] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(Duration::from_millis(4_000))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

use storefront_core::config::MAX_NOTIFICATION_TTL_MS;

    use super::{NotificationKind, NotificationQueue};

    #[test]
    fn notifications_expire_after_ttl() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new(Duration::from_secs(4));
        queue.push_at(NotificationKind::Success, "Products loaded successfully!", start);
        queue.push_at(NotificationKind::Info, "later", start + Duration::from_secs(2));

        assert!(queue.expire(start + Duration::from_secs(3)).is_empty());

        let expired = queue.expire(start + Duration::from_secs(4));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].message, "Products loaded successfully!");
        assert_eq!(queue.active().len(), 1);
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_secs(6)));
    }

    #[test]
    fn manual_dismissal_cancels_scheduled_removal() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new(Duration::from_secs(4));
        let first = queue.push_at(NotificationKind::Error, "Failed to load products", start);
        let second = queue.push_at(NotificationKind::Warning, "No products", start);

        assert!(queue.dismiss(first));
        assert!(!queue.dismiss(first));
        assert_eq!(queue.latest().map(|entry| entry.id), Some(second));

        let expired = queue.expire(start + Duration::from_secs(10));
        assert_eq!(expired.len(), 1);
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn oversized_ttl_is_clamped_to_one_day() {
        let start = Instant::now();
        let mut queue = NotificationQueue::new(Duration::MAX);
        assert_eq!(queue.ttl(), Duration::from_secs(86_400));

        queue.push_at(NotificationKind::Info, "kept for a day", start);
        assert_eq!(queue.next_deadline(), Some(start + Duration::from_secs(86_400)));
    }

    #[test]
    fn ids_are_unique_even_for_identical_messages() {
        let mut queue = NotificationQueue::default();
        let a = queue.push(NotificationKind::Success, "Smart Watch added to cart!");
        let b = queue.push(NotificationKind::Success, "Smart Watch added to cart!");

        assert_ne!(a, b);
        assert_eq!(queue.active().len(), 2);
    }
}
