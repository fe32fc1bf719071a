use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Sessions tracked before old entries are pruned
const DEFAULT_TRACKED_SESSIONS: usize = 10_000;

/// Handle for one in-flight location lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    key: String,
    seq: u64,
}

impl LookupTicket {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Orders concurrent geocoding lookups per session
///
/// A lookup takes a ticket before it starts and asks `complete` once the
/// geocoder answers. The result may be applied only if no ticket issued
/// later for the same session has already been applied, so a slow lookup
/// cannot overwrite the location chosen by a faster, newer one.
#[derive(Debug)]
pub struct LookupSequencer {
    next: AtomicU64,
    applied: Mutex<HashMap<String, u64>>,
    max_tracked: usize,
}

impl LookupSequencer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TRACKED_SESSIONS)
    }

    pub fn with_capacity(max_tracked: usize) -> Self {
        Self {
            next: AtomicU64::new(1),
            applied: Mutex::new(HashMap::new()),
            max_tracked: max_tracked.max(1),
        }
    }

    pub fn begin(&self, key: &str) -> LookupTicket {
        LookupTicket {
            key: key.to_string(),
            seq: self.next.fetch_add(1, Ordering::SeqCst),
        }
    }

    /// Returns `true` if the ticket's result should be applied
    pub fn complete(&self, ticket: &LookupTicket) -> bool {
        let mut applied = self.applied.lock().unwrap_or_else(|e| e.into_inner());

        if let Some(&last) = applied.get(&ticket.key) {
            if last > ticket.seq {
                tracing::debug!(
                    "Dropping stale lookup {} for {} (already applied {})",
                    ticket.seq,
                    ticket.key,
                    last
                );
                return false;
            }
        }

        if applied.len() >= self.max_tracked && !applied.contains_key(&ticket.key) {
            // Keep the newest half
            let mut seqs: Vec<u64> = applied.values().copied().collect();
            seqs.sort_unstable();
            let cutoff = seqs[seqs.len() / 2];
            applied.retain(|_, seq| *seq >= cutoff);
        }

        applied.insert(ticket.key.clone(), ticket.seq);
        true
    }

    pub fn tracked_sessions(&self) -> usize {
        self.applied.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl Default for LookupSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_order_lookups_apply() {
        let sequencer = LookupSequencer::new();
        let first = sequencer.begin("s1");
        assert!(sequencer.complete(&first));
        let second = sequencer.begin("s1");
        assert!(sequencer.complete(&second));
    }

    #[test]
    fn test_slow_older_lookup_is_stale() {
        let sequencer = LookupSequencer::new();
        let slow = sequencer.begin("s1");
        let fast = sequencer.begin("s1");

        assert!(sequencer.complete(&fast));
        assert!(!sequencer.complete(&slow));
    }

    #[test]
    fn test_sessions_are_independent() {
        let sequencer = LookupSequencer::new();
        let a = sequencer.begin("a");
        let b = sequencer.begin("b");

        assert!(sequencer.complete(&b));
        assert!(sequencer.complete(&a));
    }

    #[test]
    fn test_prunes_oldest_sessions() {
        let sequencer = LookupSequencer::with_capacity(4);
        for i in 0..10 {
            let ticket = sequencer.begin(&format!("session-{}", i));
            assert!(sequencer.complete(&ticket));
        }
        assert!(sequencer.tracked_sessions() <= 4);
    }
}
