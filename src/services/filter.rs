use serde_json::Value;

/// Matching conditions for a title query
///
/// Each present condition constrains one field; all present conditions must
/// hold. Store implementations translate this into their own query language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    /// Case-insensitive substring of the title name, matched literally
    pub name: Option<String>,
    /// Exact element of the `genres` list
    pub genre: Option<String>,
    /// Exact, case-sensitive value of the `type` field
    pub kind: Option<String>,
}

impl TitleFilter {
    /// Builds a filter from optional query parameters; empty strings impose no constraint
    pub fn new(name: Option<&str>, genre: Option<&str>, kind: Option<&str>) -> Self {
        Self {
            name: non_empty(name),
            genre: non_empty(genre),
            kind: non_empty(kind),
        }
    }

    /// True when no condition is set
    pub fn is_unconstrained(&self) -> bool {
        self.name.is_none() && self.genre.is_none() && self.kind.is_none()
    }

    /// Evaluates the filter against a raw document
    pub fn matches(&self, document: &Value) -> bool {
        if let Some(name) = &self.name {
            let matched = document["name"]
                .as_str()
                .is_some_and(|value| value.to_lowercase().contains(&name.to_lowercase()));
            if !matched {
                return false;
            }
        }

        if let Some(genre) = &self.genre {
            let matched = document["genres"]
                .as_array()
                .is_some_and(|genres| genres.iter().any(|g| g.as_str() == Some(genre.as_str())));
            if !matched {
                return false;
            }
        }

        if let Some(kind) = &self.kind {
            if document["type"].as_str() != Some(kind.as_str()) {
                return false;
            }
        }

        true
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wednesday() -> Value {
        json!({
            "name": "Wednesday",
            "type": "series",
            "genres": ["Comedy", "Mystery"]
        })
    }

    #[test]
    fn test_empty_parameters_are_unconstrained() {
        let filter = TitleFilter::new(None, Some(""), None);
        assert!(filter.is_unconstrained());
        assert!(filter.matches(&wednesday()));
        assert!(filter.matches(&json!({})));
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        assert!(TitleFilter::new(Some("wed"), None, None).matches(&wednesday()));
        assert!(TitleFilter::new(Some("NESD"), None, None).matches(&wednesday()));
        assert!(!TitleFilter::new(Some("thursday"), None, None).matches(&wednesday()));
    }

    #[test]
    fn test_name_is_matched_literally() {
        let document = json!({ "name": "What If...?", "type": "series" });
        assert!(TitleFilter::new(Some("if...?"), None, None).matches(&document));
        assert!(!TitleFilter::new(Some("W.*t"), None, None).matches(&document));
    }

    #[test]
    fn test_genre_requires_exact_element() {
        assert!(TitleFilter::new(None, Some("Mystery"), None).matches(&wednesday()));
        assert!(!TitleFilter::new(None, Some("mystery"), None).matches(&wednesday()));
        assert!(!TitleFilter::new(None, Some("Myst"), None).matches(&wednesday()));
    }

    #[test]
    fn test_type_is_case_sensitive() {
        assert!(TitleFilter::new(None, None, Some("series")).matches(&wednesday()));
        assert!(!TitleFilter::new(None, None, Some("Series")).matches(&wednesday()));
    }

    #[test]
    fn test_conditions_combine_with_and() {
        let filter = TitleFilter::new(Some("wed"), Some("Comedy"), Some("movie"));
        assert!(!filter.matches(&wednesday()));

        let filter = TitleFilter::new(Some("wed"), Some("Comedy"), Some("series"));
        assert!(filter.matches(&wednesday()));
    }

    #[test]
    fn test_missing_fields_do_not_match_constraints() {
        let document = json!({ "name": "Untitled" });
        assert!(!TitleFilter::new(None, Some("Drama"), None).matches(&document));
        assert!(!TitleFilter::new(None, None, Some("movie")).matches(&document));
    }
}
