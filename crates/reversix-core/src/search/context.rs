//! Cancellation of in-flight searches.

use std::time::Instant;

use thiserror::Error;

/// Raised when a search runs past its deadline. Unwinds the whole
/// in-flight recursion via `?`; the deepening driver catches it and
/// falls back to the best move of a completed depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search deadline exceeded")]
pub struct SearchCancelled;

/// Per-computation search context holding the watchdog deadline.
///
/// One context lives for exactly one best-move computation and is
/// passed to every recursive call. Expensive steps check it *before*
/// doing work.
#[derive(Debug, Clone, Copy)]
pub struct SearchContext {
    deadline: Option<Instant>,
}

impl SearchContext {
    pub fn new(deadline: Option<Instant>) -> SearchContext {
        SearchContext { deadline }
    }

    /// A context that never cancels.
    pub fn unlimited() -> SearchContext {
        SearchContext { deadline: None }
    }

    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Cancels the search once the deadline has passed.
    #[inline]
    pub fn check(&self) -> Result<(), SearchCancelled> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SearchCancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn unlimited_context_never_cancels() {
        assert_eq!(SearchContext::unlimited().check(), Ok(()));
    }

    #[test]
    fn expired_deadline_cancels() {
        let ctx = SearchContext::new(Some(Instant::now() - Duration::from_millis(1)));
        assert_eq!(ctx.check(), Err(SearchCancelled));
    }

    #[test]
    fn future_deadline_does_not_cancel() {
        let ctx = SearchContext::new(Some(Instant::now() + Duration::from_secs(60)));
        assert_eq!(ctx.check(), Ok(()));
    }
}
