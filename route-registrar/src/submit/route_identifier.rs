/// the `selectedRouteId` a route is created under.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RouteIdentifier(String);

impl RouteIdentifier {
    /// builds `{prefix}{slug}-{sequence}` from a segment label, or
    /// `{prefix}{fallback}-{sequence}` when the label is absent or has no
    /// usable characters. `sequence` is the 1-based count of attempted
    /// rows, which keeps identifiers distinct within a run even when
    /// labels repeat.
    pub fn derive(prefix: &str, label: Option<&str>, fallback: &str, sequence: usize) -> Self {
        let base = label
            .map(slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self(format!("{prefix}{base}-{sequence}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RouteIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// lower-cases a label, turns spaces into hyphens and drops anything
/// outside `[a-z0-9-]`.
pub fn slugify(label: &str) -> String {
    label
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_derive_from_label() {
        let id = RouteIdentifier::derive("boston-", Some("Main St Bridge"), "route", 1);
        assert_eq!(id.as_str(), "boston-main-st-bridge-1");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("I-15 (NB) @ 600 S."), "i-15-nb--600-s");
        assert_eq!(slugify("Ærø Straße"), "r-strae");
    }

    #[test]
    fn test_fallback_without_label() {
        let id = RouteIdentifier::derive("", None, "salt-lake-city", 7);
        assert_eq!(id.as_str(), "salt-lake-city-7");
    }

    #[test]
    fn test_fallback_when_slug_empty() {
        let id = RouteIdentifier::derive("x-", Some("!!!"), "route", 2);
        assert_eq!(id.as_str(), "x-route-2");
    }

    #[test]
    fn test_repeated_labels_stay_distinct() {
        let ids = (1..=50)
            .map(|seq| RouteIdentifier::derive("p-", Some("Same Name"), "route", seq))
            .collect::<HashSet<_>>();
        assert_eq!(ids.len(), 50);
    }
}
