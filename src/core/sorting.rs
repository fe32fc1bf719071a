use std::cmp::Ordering;

use crate::models::{Listing, SortKey};

/// Reorder filtered listings in place
///
/// All orderings are stable, so ties keep their filtered order and
/// `Recommended` leaves the slice untouched.
pub fn sort_listings(listings: &mut [&Listing], key: SortKey) {
    match key {
        SortKey::Recommended => {}
        SortKey::PriceLow => listings.sort_by(|a, b| compare_price(a, b)),
        SortKey::PriceHigh => listings.sort_by(|a, b| compare_price(b, a)),
        // Non-numeric ids compare as `None` and end up after every numeric id
        SortKey::Newest => listings.sort_by(|a, b| b.numeric_id().cmp(&a.numeric_id())),
    }
}

#[inline]
fn compare_price(a: &Listing, b: &Listing) -> Ordering {
    a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal)
}
