use serde::Serialize;

use crate::data_models::Query;
use crate::error::ValidationError;

/// Current values of the three dashboard inputs.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct InputCollector {
    keyword: String,
    location: String,
    business: String,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn business(&self) -> &str {
        &self.business
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_business(&mut self, business: impl Into<String>) {
        self.business = business.into();
    }

    /// Overwrite all three fields at once, as the report re-run does.
    pub fn fill(&mut self, query: &Query) {
        self.keyword = query.keyword.clone();
        self.location = query.location.clone();
        self.business = query.business.clone();
    }

    /// Snapshot the fields into a [`Query`] if keyword and location are both
    /// non-blank. Values are passed through untouched otherwise.
    pub fn validate(&self) -> Result<Query, ValidationError> {
        if self.keyword.trim().is_empty() || self.location.trim().is_empty() {
            return Err(ValidationError::MissingRequiredField);
        }
        Ok(Query::new(&self.keyword, &self.location, &self.business))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector(keyword: &str, location: &str, business: &str) -> InputCollector {
        let mut input = InputCollector::new();
        input.set_keyword(keyword);
        input.set_location(location);
        input.set_business(business);
        input
    }

    #[test]
    fn test_valid_query_keeps_values() {
        let query = collector("Dentist", "Mumbai", "Smile Dental").validate().unwrap();
        assert_eq!(query, Query::new("Dentist", "Mumbai", "Smile Dental"));
    }

    #[test]
    fn test_business_is_optional() {
        let query = collector("Dentist", "Mumbai", "").validate().unwrap();
        assert_eq!(query.business, "");
    }

    #[test]
    fn test_missing_keyword_or_location() {
        assert_eq!(
            collector("", "Mumbai", "x").validate(),
            Err(ValidationError::MissingRequiredField)
        );
        assert_eq!(
            collector("Dentist", "", "x").validate(),
            Err(ValidationError::MissingRequiredField)
        );
        assert_eq!(
            collector("", "", "").validate(),
            Err(ValidationError::MissingRequiredField)
        );
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        assert!(collector("  \t", "Mumbai", "").validate().is_err());
        assert!(collector("Dentist", "\n", "").validate().is_err());
    }

    #[test]
    fn test_fill_overwrites_every_field() {
        let mut input = collector("a", "b", "c");
        input.fill(&Query::new("Gym", "Pune", ""));
        assert_eq!(input, collector("Gym", "Pune", ""));
    }
}
