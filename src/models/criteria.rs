use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Label that disables the property-type filter
pub const ALL_TYPES: &str = "All types";

/// Rejected filter input
///
/// Raised while building criteria from request parameters; the query engine
/// itself only ever sees criteria that parsed cleanly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("Unknown {kind} option: {value}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("Prices cannot be negative")]
    NegativePrice,

    #[error("Min cannot be greater than Max")]
    InvertedPriceRange,

    #[error("Prices must be finite numbers")]
    NonFinitePrice,
}

/// Inclusive price bounds; a missing bound is open
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self, CriteriaError> {
        let range = Self {
            min: Some(min),
            max: Some(max),
        };
        range.validate()?;
        Ok(range)
    }

    pub fn lower(&self) -> f64 {
        self.min.unwrap_or(0.0)
    }

    pub fn upper(&self) -> f64 {
        self.max.unwrap_or(f64::INFINITY)
    }

    #[inline]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.lower() && price <= self.upper()
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.min.into_iter().chain(self.max).any(|bound| !bound.is_finite()) {
            return Err(CriteriaError::NonFinitePrice);
        }
        if self.lower() < 0.0 || self.upper() < 0.0 {
            return Err(CriteriaError::NegativePrice);
        }
        if self.lower() > self.upper() {
            return Err(CriteriaError::InvertedPriceRange);
        }
        Ok(())
    }
}

/// "N or more" bedroom selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BedroomThreshold {
    #[default]
    Any,
    #[serde(rename = "1+")]
    One,
    #[serde(rename = "2+")]
    Two,
    #[serde(rename = "3+")]
    Three,
    #[serde(rename = "4+")]
    Four,
    #[serde(rename = "5+")]
    Five,
}

impl BedroomThreshold {
    pub const ALL: [BedroomThreshold; 6] = [
        Self::Any,
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::One => "1+",
            Self::Two => "2+",
            Self::Three => "3+",
            Self::Four => "4+",
            Self::Five => "5+",
        }
    }

    /// Minimum bedroom count, `None` for `Any`
    pub fn minimum(&self) -> Option<u32> {
        match self {
            Self::Any => None,
            Self::One => Some(1),
            Self::Two => Some(2),
            Self::Three => Some(3),
            Self::Four => Some(4),
            Self::Five => Some(5),
        }
    }
}

impl FromStr for BedroomThreshold {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CriteriaError::UnknownOption {
                kind: "bedrooms",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for BedroomThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "N or more" bathroom selector; half baths count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BathroomThreshold {
    #[default]
    Any,
    #[serde(rename = "1+")]
    One,
    #[serde(rename = "1.5+")]
    OneAndHalf,
    #[serde(rename = "2+")]
    Two,
    #[serde(rename = "3+")]
    Three,
    #[serde(rename = "4+")]
    Four,
}

impl BathroomThreshold {
    pub const ALL: [BathroomThreshold; 6] = [
        Self::Any,
        Self::One,
        Self::OneAndHalf,
        Self::Two,
        Self::Three,
        Self::Four,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::One => "1+",
            Self::OneAndHalf => "1.5+",
            Self::Two => "2+",
            Self::Three => "3+",
            Self::Four => "4+",
        }
    }

    pub fn minimum(&self) -> Option<f64> {
        match self {
            Self::Any => None,
            Self::One => Some(1.0),
            Self::OneAndHalf => Some(1.5),
            Self::Two => Some(2.0),
            Self::Three => Some(3.0),
            Self::Four => Some(4.0),
        }
    }
}

impl FromStr for BathroomThreshold {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CriteriaError::UnknownOption {
                kind: "bathrooms",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for BathroomThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Property-type selector: every type, or one label matched case-insensitively
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyTypeFilter {
    #[default]
    All,
    Only(String),
}

impl PropertyTypeFilter {
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_TYPES,
            Self::Only(label) => label,
        }
    }

    pub fn matches(&self, property_type: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(label) => label.to_lowercase() == property_type.to_lowercase(),
        }
    }
}

impl From<String> for PropertyTypeFilter {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_TYPES) {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }
}

impl From<&str> for PropertyTypeFilter {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<PropertyTypeFilter> for String {
    fn from(value: PropertyTypeFilter) -> Self {
        value.label().to_string()
    }
}

/// Pet-policy tag from the "more options" panel
///
/// Matched heuristically against listing text; there is no structured pet
/// field in the catalog yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PetPolicy {
    SmallDogs,
    LargeDogs,
    Cats,
    NoPets,
}

impl PetPolicy {
    pub const ALL: [PetPolicy; 4] = [Self::SmallDogs, Self::LargeDogs, Self::Cats, Self::NoPets];

    pub fn tag(&self) -> &'static str {
        match self {
            Self::SmallDogs => "small-dogs",
            Self::LargeDogs => "large-dogs",
            Self::Cats => "cats",
            Self::NoPets => "no-pets",
        }
    }

    /// Whether lowercased listing text satisfies this tag
    #[inline]
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::SmallDogs => text.contains("small") && text.contains("dog"),
            Self::LargeDogs => text.contains("large") && text.contains("dog"),
            Self::Cats => text.contains("cat"),
            Self::NoPets => text.contains("no pet"),
        }
    }
}

impl FromStr for PetPolicy {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|pet| pet.tag() == tag)
            .ok_or(CriteriaError::UnknownOption {
                kind: "pet",
                value: tag,
            })
    }
}

/// Optional extra filters
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoreOptions {
    #[serde(default)]
    pub keywords: Option<String>,
    #[serde(default)]
    pub selected_pets: Vec<PetPolicy>,
    #[serde(default)]
    pub short_term_lease: bool,
}

impl MoreOptions {
    pub fn is_empty(&self) -> bool {
        self.keywords.as_deref().map_or(true, str::is_empty)
            && self.selected_pets.is_empty()
            && !self.short_term_lease
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    #[serde(alias = "lot-size")]
    Recommended,
    PriceLow,
    PriceHigh,
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Newest => "newest",
        }
    }
}

impl FromStr for SortKey {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "recommended" | "lot-size" => Ok(Self::Recommended),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "newest" => Ok(Self::Newest),
            other => Err(CriteriaError::UnknownOption {
                kind: "sort",
                value: other.to_string(),
            }),
        }
    }
}

/// Structured, validated constraints applied to the catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub property_type: PropertyTypeFilter,
    #[serde(default)]
    pub price_range: Option<PriceRange>,
    #[serde(default)]
    pub min_bedrooms: BedroomThreshold,
    #[serde(default)]
    pub min_bathrooms: BathroomThreshold,
    #[serde(default)]
    pub more_options: Option<MoreOptions>,
    #[serde(default)]
    pub sort_key: SortKey,
}

impl FilterCriteria {
    pub fn validate(&self) -> Result<(), CriteriaError> {
        if let Some(range) = &self.price_range {
            range.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_open_bounds() {
        let range = PriceRange::default();
        assert_eq!(range.lower(), 0.0);
        assert!(range.upper().is_infinite());
        assert!(range.contains(1_000_000.0));
    }

    #[test]
    fn test_price_range_validation() {
        assert_eq!(PriceRange::new(-1.0, 10.0), Err(CriteriaError::NegativePrice));
        assert_eq!(PriceRange::new(20.0, 10.0), Err(CriteriaError::InvertedPriceRange));
        assert!(PriceRange::new(10.0, 10.0).is_ok());
    }

    #[test]
    fn test_price_range_rejects_non_finite_bounds() {
        assert_eq!(PriceRange::new(f64::NAN, f64::NAN), Err(CriteriaError::NonFinitePrice));
        assert_eq!(PriceRange::new(0.0, f64::INFINITY), Err(CriteriaError::NonFinitePrice));
        assert!(PriceRange::default().validate().is_ok());
    }

    #[test]
    fn test_pet_tags_parse_back() {
        for pet in PetPolicy::ALL {
            assert_eq!(pet.tag().parse::<PetPolicy>().unwrap(), pet);
        }
        assert_eq!(" Cats ".parse::<PetPolicy>().unwrap(), PetPolicy::Cats);
    }

    #[test]
    fn test_threshold_labels_parse() {
        assert_eq!("3+".parse::<BedroomThreshold>().unwrap(), BedroomThreshold::Three);
        assert_eq!("any".parse::<BedroomThreshold>().unwrap(), BedroomThreshold::Any);
        assert_eq!(
            "1.5+".parse::<BathroomThreshold>().unwrap().minimum(),
            Some(1.5)
        );
        assert!("6+".parse::<BedroomThreshold>().is_err());
        assert!("1.5+".parse::<BedroomThreshold>().is_err());
    }

    #[test]
    fn test_threshold_serde_uses_labels() {
        let json = serde_json::to_string(&BathroomThreshold::OneAndHalf).unwrap();
        assert_eq!(json, "\"1.5+\"");
        let parsed: BedroomThreshold = serde_json::from_str("\"2+\"").unwrap();
        assert_eq!(parsed, BedroomThreshold::Two);
    }

    #[test]
    fn test_property_type_filter_from_label() {
        assert_eq!(PropertyTypeFilter::from("All types"), PropertyTypeFilter::All);
        assert_eq!(PropertyTypeFilter::from(""), PropertyTypeFilter::All);
        let only = PropertyTypeFilter::from("condo");
        assert!(only.matches("Condo"));
        assert!(!only.matches("House"));
        assert!(PropertyTypeFilter::All.matches("anything"));
    }

    #[test]
    fn test_pet_policy_rules() {
        assert!(PetPolicy::SmallDogs.matches("small dogs allowed"));
        assert!(!PetPolicy::SmallDogs.matches("dogs allowed"));
        assert!(PetPolicy::LargeDogs.matches("large yard, dog friendly"));
        assert!(PetPolicy::Cats.matches("cats ok"));
        assert!(PetPolicy::NoPets.matches("strictly no pets"));
        assert!(!PetPolicy::NoPets.matches("pets welcome"));
        assert!("hamsters".parse::<PetPolicy>().is_err());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("lot-size".parse::<SortKey>().unwrap(), SortKey::Recommended);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Recommended);
        assert!("cheapest".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_more_options_is_empty() {
        assert!(MoreOptions::default().is_empty());
        let opts = MoreOptions {
            keywords: Some(String::new()),
            ..Default::default()
        };
        assert!(opts.is_empty());
        let opts = MoreOptions {
            short_term_lease: true,
            ..Default::default()
        };
        assert!(!opts.is_empty());
    }
}
