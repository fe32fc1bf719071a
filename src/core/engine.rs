use crate::core::{
    filters::{
        matches_bathrooms, matches_bedrooms, matches_keywords, matches_location, matches_pets,
        matches_price, matches_property_type, matches_short_term_lease, LocationQuery,
    },
    sorting::sort_listings,
};
use crate::models::{FilterCriteria, Listing, SearchHistoryEntry};

/// Number of listings shown in the landing-page feed
pub const DEFAULT_CONTINUE_LIMIT: usize = 6;

/// Filtered and sorted listings for one search
#[derive(Debug)]
pub struct SearchOutcome<'a> {
    pub listings: Vec<&'a Listing>,
    /// Nothing matched; the caller shows an empty state
    pub no_matches: bool,
}

/// Landing-page feed derived from the latest remembered search
#[derive(Debug)]
pub struct ContinueSearch<'a> {
    pub listings: Vec<&'a Listing>,
    /// The remembered location matched nothing and the feed fell back to
    /// the head of the whole catalog
    pub no_exact_match: bool,
}

/// Listing query orchestrator - runs the filter pipeline then sorts
///
/// # Pipeline Stages
/// 1. Property type
/// 2. Location substring
/// 3. Price range
/// 4. Bedroom threshold
/// 5. Bathroom threshold
/// 6. Keywords
/// 7. Pet policy
/// 8. Short-term lease
///
/// Sorting runs once, after the last stage.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    continue_limit: usize,
}

impl QueryEngine {
    pub fn new(continue_limit: usize) -> Self {
        Self { continue_limit }
    }

    pub fn continue_limit(&self) -> usize {
        self.continue_limit
    }

    /// Filter and sort `listings` for a location and criteria
    ///
    /// Returns borrowed listings in output order. Never falls back to
    /// unfiltered results: zero matches is an empty vector.
    pub fn query<'a>(
        &self,
        listings: &'a [Listing],
        location: &str,
        criteria: &FilterCriteria,
    ) -> Vec<&'a Listing> {
        let location = LocationQuery::parse(location);
        let more = criteria.more_options.as_ref();
        let keywords = more
            .and_then(|m| m.keywords.as_deref())
            .filter(|k| !k.is_empty());
        let pets = more.map(|m| m.selected_pets.as_slice()).unwrap_or(&[]);
        let short_term = more.map_or(false, |m| m.short_term_lease);

        let mut results: Vec<&Listing> = listings
            .iter()
            // Stage 1: Property type
            .filter(|l| matches_property_type(l, &criteria.property_type))
            // Stage 2: Location
            .filter(|l| location.as_ref().map_or(true, |q| matches_location(l, q)))
            // Stage 3: Price
            .filter(|l| {
                criteria
                    .price_range
                    .as_ref()
                    .map_or(true, |range| matches_price(l, range))
            })
            // Stage 4 & 5: Bedroom and bathroom thresholds
            .filter(|l| matches_bedrooms(l, criteria.min_bedrooms))
            .filter(|l| matches_bathrooms(l, criteria.min_bathrooms))
            // Stage 6-8: More options
            .filter(|l| keywords.map_or(true, |k| matches_keywords(l, k)))
            .filter(|l| pets.is_empty() || matches_pets(l, pets))
            .filter(|l| !short_term || matches_short_term_lease(l))
            .collect();

        sort_listings(&mut results, criteria.sort_key);

        tracing::debug!(
            "Query matched {} of {} listings (sort: {})",
            results.len(),
            listings.len(),
            criteria.sort_key.as_str()
        );

        results
    }

    /// `query` plus the no-match flag the results page renders
    pub fn search<'a>(
        &self,
        listings: &'a [Listing],
        location: &str,
        criteria: &FilterCriteria,
    ) -> SearchOutcome<'a> {
        let listings = self.query(listings, location, criteria);
        let no_matches = listings.is_empty();
        SearchOutcome {
            listings,
            no_matches,
        }
    }

    /// Landing-page feed for the most recent search
    ///
    /// Applies only the location stage. With no prior search, or when the
    /// prior search matches nothing, the head of the catalog is returned;
    /// only the second case sets `no_exact_match`.
    pub fn continue_search<'a>(
        &self,
        listings: &'a [Listing],
        last_search: Option<&SearchHistoryEntry>,
    ) -> ContinueSearch<'a> {
        let head = || listings.iter().take(self.continue_limit).collect::<Vec<_>>();

        let Some(entry) = last_search else {
            return ContinueSearch {
                listings: head(),
                no_exact_match: false,
            };
        };

        let matched: Vec<&Listing> = match LocationQuery::parse(&entry.location) {
            Some(query) => listings
                .iter()
                .filter(|l| matches_location(l, &query))
                .take(self.continue_limit)
                .collect(),
            None => head(),
        };

        if matched.is_empty() {
            tracing::debug!(
                "No listings match '{}', falling back to other locations",
                entry.location
            );
            return ContinueSearch {
                listings: head(),
                no_exact_match: true,
            };
        }

        ContinueSearch {
            listings: matched,
            no_exact_match: false,
        }
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new(DEFAULT_CONTINUE_LIMIT)
    }
}
