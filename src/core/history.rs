use crate::models::SearchHistoryEntry;

/// Number of searches remembered per session
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// Most-recent-first list of remembered searches
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHistory {
    entries: Vec<SearchHistoryEntry>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from stored entries, already most-recent-first
    pub fn from_entries(mut entries: Vec<SearchHistoryEntry>, capacity: usize) -> Self {
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Parse persisted JSON; anything unreadable yields an empty history
    pub fn from_json(json: &str, capacity: usize) -> Self {
        match serde_json::from_str::<Vec<SearchHistoryEntry>>(json) {
            Ok(entries) => Self::from_entries(entries, capacity),
            Err(e) => {
                tracing::warn!("Discarding unreadable search history: {}", e);
                Self::new(capacity)
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Put `entry` first and drop whatever falls past capacity
    pub fn record(&mut self, entry: SearchHistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn latest(&self) -> Option<&SearchHistoryEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[SearchHistoryEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SearchHistoryEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
