//! Request ordering for asynchronous collaborator calls.
//!
//! Each request takes an id at initiation. A completion is accepted only if
//! its id is newer than the last accepted one, so a slow response that lands
//! after a newer one is dropped instead of overwriting it.

/// Initiation-order token for one request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[derive(Debug, Default)]
pub struct RequestSequencer {
    next: u64,
    applied: Option<RequestId>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the id for a new request.
    pub fn begin(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        id
    }

    /// Mark `id` as completed. Returns false when a newer request has already
    /// been accepted, meaning the result should be discarded.
    pub fn accept(&mut self, id: RequestId) -> bool {
        match self.applied {
            Some(last) if last >= id => false,
            _ => {
                self.applied = Some(id);
                true
            }
        }
    }

    /// Id of the most recently initiated request.
    pub fn latest(&self) -> Option<RequestId> {
        self.next.checked_sub(1).map(RequestId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_completions_accepted() {
        let mut seq = RequestSequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(seq.accept(a));
        assert!(seq.accept(b));
    }

    #[test]
    fn test_stale_completion_discarded() {
        let mut seq = RequestSequencer::new();
        let a = seq.begin();
        let b = seq.begin();
        assert!(seq.accept(b));
        assert!(!seq.accept(a));
        assert!(!seq.accept(b));
        assert_eq!(seq.latest(), Some(b));
    }

    #[test]
    fn test_latest_before_any_request() {
        assert_eq!(RequestSequencer::new().latest(), None);
    }
}
