//! Matchers and the ordered mock registry.
//!
//! Entries at the front of the [`Registry`] take precedence. Registering an
//! entry prepends it, so the most recently registered mock wins.

use crate::config::MockResponse;
use std::collections::VecDeque;
use std::fmt;
use tracing::debug;

/// Predicate deciding whether a mock applies to a request.
///
/// Any `Fn(&R) -> bool` closure is a matcher.
pub trait Matcher<R: ?Sized> {
    fn matches(&self, request: &R) -> bool;
}

impl<R: ?Sized, F> Matcher<R> for F
where
    F: Fn(&R) -> bool,
{
    fn matches(&self, request: &R) -> bool {
        self(request)
    }
}

/// A matcher paired with its response and an optional use limit.
pub struct MockEntry<R: ?Sized> {
    id: Option<String>,
    matcher: Box<dyn Matcher<R>>,
    mock: MockResponse,
    remaining_matches: Option<u32>,
}

impl<R: ?Sized> MockEntry<R> {
    /// Create an entry that never expires.
    pub fn new(matcher: impl Matcher<R> + 'static, mock: MockResponse) -> Self {
        Self {
            id: None,
            matcher: Box::new(matcher),
            mock,
            remaining_matches: None,
        }
    }

    /// Limit the entry to `times` successful matches.
    pub fn times(mut self, times: u32) -> Self {
        self.remaining_matches = Some(times);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn mock(&self) -> &MockResponse {
        &self.mock
    }

    /// Matches left before expiry; `None` means unlimited.
    pub fn remaining_matches(&self) -> Option<u32> {
        self.remaining_matches
    }

    /// Replace the use limit; `None` makes the entry unlimited.
    pub fn set_remaining_matches(&mut self, remaining: Option<u32>) {
        self.remaining_matches = remaining;
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_matches == Some(0)
    }

    /// Run the matcher, skipping it entirely once expired.
    pub(crate) fn try_match(&self, request: &R) -> bool {
        !self.is_expired() && self.matcher.matches(request)
    }

    /// Record a successful match against the use limit.
    pub(crate) fn consume(&mut self) {
        if let Some(remaining) = self.remaining_matches.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                debug!(id = ?self.id, "Mock entry expired");
            }
        }
    }
}

impl<R: ?Sized> fmt::Debug for MockEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockEntry")
            .field("id", &self.id)
            .field("mock", &self.mock)
            .field("remaining_matches", &self.remaining_matches)
            .finish_non_exhaustive()
    }
}

/// Ordered collection of mock entries, scanned front to back.
pub struct Registry<R: ?Sized> {
    entries: VecDeque<MockEntry<R>>,
}

impl<R: ?Sized> Default for Registry<R> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<R: ?Sized> Registry<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry ahead of all existing ones.
    pub fn prepend(&mut self, entry: MockEntry<R>) {
        if entry.is_expired() {
            debug!(id = ?entry.id, "Registering mock entry that is already expired");
        }
        self.entries.push_front(entry);
    }

    /// Drop every expired entry, returning how many were removed.
    pub fn remove_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| !entry.is_expired());
        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "Removed expired mock entries");
        }
        removed
    }

    /// Remove the highest-precedence entry with the given id.
    pub fn remove(&mut self, id: &str) -> Option<MockEntry<R>> {
        let index = self.entries.iter().position(|e| e.id() == Some(id))?;
        self.entries.remove(index)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MockEntry<R>> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut MockEntry<R>> {
        self.entries.get_mut(index)
    }

    /// Iterate in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &MockEntry<R>> {
        self.entries.iter()
    }

    /// Find the first live entry accepting the request, in scan order.
    pub(crate) fn find_match(&mut self, request: &R) -> Option<(usize, &mut MockEntry<R>)> {
        self.entries
            .iter_mut()
            .enumerate()
            .find(|(_, entry)| entry.try_match(request))
    }
}

impl<R: ?Sized> fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.entries.iter()).finish()
    }
}
