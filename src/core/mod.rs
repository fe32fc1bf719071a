// Core algorithm exports
pub mod engine;
pub mod favorites;
pub mod filters;
pub mod history;
pub mod lookup;
pub mod map;
pub mod sorting;

pub use engine::{ContinueSearch, QueryEngine, SearchOutcome, DEFAULT_CONTINUE_LIMIT};
pub use favorites::Favorites;
pub use filters::LocationQuery;
pub use history::{SearchHistory, DEFAULT_HISTORY_CAPACITY};
pub use lookup::{LookupSequencer, LookupTicket};
pub use map::{viewport_for, MapState, MapView, MountedMap, ViewportRecorder};
pub use sorting::sort_listings;
