//! Bookkeeping that lets the latest request win.

use super::cache::{CacheEvent, QueryKey};

/// Tracks which request a list view currently wants.
///
/// Every request gets a ticket and only the newest ticket is applied, so a
/// slow response for superseded parameters, or for the same parameters
/// fetched again after an invalidation, never overwrites fresher state.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    latest: Option<QueryKey>,
    ticket: u64,
    in_flight: bool,
}

impl RequestTracker {
    pub fn begin(&mut self, key: QueryKey) -> u64 {
        self.latest = Some(key);
        self.ticket += 1;
        self.in_flight = true;
        self.ticket
    }

    /// Returns true when the response for `ticket` should be applied
    pub fn complete(&mut self, ticket: u64) -> bool {
        if ticket == self.ticket {
            self.in_flight = false;
            true
        } else {
            false
        }
    }

    pub fn latest(&self) -> Option<&QueryKey> {
        self.latest.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a cache event concerns what this view shows
    pub fn should_refresh(&self, event_key: &QueryKey, event: CacheEvent) -> bool {
        let Some(latest) = self.latest.as_ref() else {
            return false;
        };
        match event {
            CacheEvent::Invalidated => latest.starts_with(event_key),
            CacheEvent::Updated => latest == event_key && !self.in_flight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(page: &str) -> QueryKey {
        QueryKey::new(["users", "admin", "list", page])
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut tracker = RequestTracker::default();
        let first = tracker.begin(key("page=1"));
        let second = tracker.begin(key("page=2"));

        assert!(!tracker.complete(first));
        assert!(tracker.is_in_flight());
        assert!(tracker.complete(second));
        assert!(!tracker.is_in_flight());
    }

    #[test]
    fn test_refetch_of_same_key_supersedes_the_old_request() {
        let mut tracker = RequestTracker::default();
        let before_delete = tracker.begin(key("page=1"));
        assert!(tracker.should_refresh(
            &QueryKey::new(["users", "admin"]),
            CacheEvent::Invalidated
        ));
        let after_delete = tracker.begin(key("page=1"));

        assert!(!tracker.complete(before_delete));
        assert!(tracker.complete(after_delete));
    }

    #[test]
    fn test_refresh_rules() {
        let mut tracker = RequestTracker::default();
        assert!(!tracker.should_refresh(&key("page=1"), CacheEvent::Invalidated));

        let ticket = tracker.begin(key("page=1"));
        // our own fetch is still running
        assert!(!tracker.should_refresh(&key("page=1"), CacheEvent::Updated));
        tracker.complete(ticket);

        assert!(tracker.should_refresh(&key("page=1"), CacheEvent::Updated));
        assert!(!tracker.should_refresh(&key("page=2"), CacheEvent::Updated));
        assert!(tracker.should_refresh(
            &QueryKey::new(["users", "admin"]),
            CacheEvent::Invalidated
        ));
        assert!(!tracker.should_refresh(
            &QueryKey::new(["vendors"]),
            CacheEvent::Invalidated
        ));
    }
}
