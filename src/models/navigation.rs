use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::criteria::{
    BathroomThreshold, BedroomThreshold, CriteriaError, FilterCriteria, MoreOptions, PetPolicy,
    PriceRange, PropertyTypeFilter, SortKey,
};
use crate::models::domain::{Coordinates, SearchHistoryEntry};

/// Path of the results page that navigation links point at
pub const RESULTS_PATH: &str = "/rentals";

/// Query-string parameters accepted by the search endpoint
///
/// `lat`/`lng` and `priceMin`/`priceMax` only take effect as pairs; a lone
/// half is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_price_order"))]
pub struct SearchParams {
    #[serde(default)]
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
    #[validate(range(min = 0.0))]
    pub price_min: Option<f64>,
    #[validate(range(min = 0.0))]
    pub price_max: Option<f64>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub property_type: Option<String>,
    pub sort: Option<String>,
    pub keywords: Option<String>,
    /// Comma separated pet tags
    pub pets: Option<String>,
    pub short_term: Option<bool>,
}

fn validate_price_order(params: &SearchParams) -> Result<(), ValidationError> {
    if let (Some(min), Some(max)) = (params.price_min, params.price_max) {
        if min > max {
            let mut err = ValidationError::new("price_order");
            err.message = Some("Min cannot be greater than Max".into());
            return Err(err);
        }
    }
    Ok(())
}

/// Search request after parsing: where to look and how to filter
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTarget {
    pub location: String,
    pub coords: Option<Coordinates>,
    pub criteria: FilterCriteria,
}

impl SearchParams {
    pub fn coords(&self) -> Option<Coordinates> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => {
                Some(Coordinates::new(lng, lat)).filter(Coordinates::is_valid)
            }
            _ => None,
        }
    }

    pub fn to_target(&self) -> Result<SearchTarget, CriteriaError> {
        let price_range = match (self.price_min, self.price_max) {
            (Some(min), Some(max)) => Some(PriceRange::new(min, max)?),
            _ => None,
        };

        let min_bedrooms = match self.beds.as_deref() {
            Some(label) => label.parse()?,
            None => BedroomThreshold::Any,
        };
        let min_bathrooms = match self.baths.as_deref() {
            Some(label) => label.parse()?,
            None => BathroomThreshold::Any,
        };
        let sort_key = match self.sort.as_deref() {
            Some(key) => key.parse()?,
            None => SortKey::Recommended,
        };

        let selected_pets = self
            .pets
            .as_deref()
            .unwrap_or("")
            .split(',')
            .filter(|tag| !tag.trim().is_empty())
            .map(str::parse::<PetPolicy>)
            .collect::<Result<Vec<_>, _>>()?;

        let more_options = MoreOptions {
            keywords: self
                .keywords
                .as_ref()
                .filter(|k| !k.is_empty())
                .cloned(),
            selected_pets,
            short_term_lease: self.short_term.unwrap_or(false),
        };

        let criteria = FilterCriteria {
            property_type: PropertyTypeFilter::from(
                self.property_type.clone().unwrap_or_default(),
            ),
            price_range,
            min_bedrooms,
            min_bathrooms,
            more_options: (!more_options.is_empty()).then_some(more_options),
            sort_key,
        };

        Ok(SearchTarget {
            location: self.location.clone().unwrap_or_default(),
            coords: self.coords(),
            criteria,
        })
    }
}

/// Parameters carried by a results-page link
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NavigationParams {
    pub location: String,
    pub coords: Option<Coordinates>,
    pub price_range: Option<(f64, f64)>,
    pub beds: BedroomThreshold,
    pub property_type: PropertyTypeFilter,
}

impl NavigationParams {
    pub fn for_location(location: impl Into<String>, coords: Option<Coordinates>) -> Self {
        Self {
            location: location.into(),
            coords,
            ..Default::default()
        }
    }

    /// Form-encoded query string in a fixed key order; default filters are omitted
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if !self.location.is_empty() {
            pairs.push(("location", self.location.clone()));
        }
        if let Some(coords) = self.coords {
            pairs.push(("lat", coords.lat.to_string()));
            pairs.push(("lng", coords.lng.to_string()));
        }
        if let Some((min, max)) = self.price_range {
            pairs.push(("priceMin", min.to_string()));
            pairs.push(("priceMax", max.to_string()));
        }
        if self.beds != BedroomThreshold::Any {
            pairs.push(("beds", self.beds.label().to_string()));
        }
        if self.property_type != PropertyTypeFilter::All {
            pairs.push(("propertyType", self.property_type.label().to_string()));
        }

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn href(&self) -> String {
        let query = self.to_query_string();
        if query.is_empty() {
            RESULTS_PATH.to_string()
        } else {
            format!("{}?{}", RESULTS_PATH, query)
        }
    }
}

impl From<&SearchHistoryEntry> for NavigationParams {
    fn from(entry: &SearchHistoryEntry) -> Self {
        Self::for_location(entry.location.clone(), entry.coords)
    }
}

impl From<&SearchTarget> for NavigationParams {
    fn from(target: &SearchTarget) -> Self {
        Self {
            location: target.location.clone(),
            coords: target.coords,
            price_range: target
                .criteria
                .price_range
                .map(|range| (range.lower(), range.upper())),
            beds: target.criteria.min_bedrooms,
            property_type: target.criteria.property_type.clone(),
        }
    }
}
