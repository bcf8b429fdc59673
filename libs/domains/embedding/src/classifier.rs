//! Query/passage classification by leading marker.

use crate::models::{ClassifiedItem, InputItem, Role};

/// Leading marker that turns an input into a search query.
pub const QUERY_MARKER: &str = "_Query_";

/// Split a raw input into its role and the text the models should see.
///
/// Only one leading marker is removed. A string that is exactly the marker
/// yields an empty query text.
pub fn classify(text: &str) -> (Role, &str) {
    match text.strip_prefix(QUERY_MARKER) {
        Some(rest) => (Role::Query, rest),
        None => (Role::Passage, text),
    }
}

impl<'a> ClassifiedItem<'a> {
    pub fn from_input(item: &'a InputItem) -> Self {
        let (role, text) = classify(&item.text);
        Self {
            position: item.position,
            role,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_makes_query_and_is_stripped() {
        assert_eq!(classify("_Query_find cats"), (Role::Query, "find cats"));
    }

    #[test]
    fn test_plain_text_is_passage_unchanged() {
        assert_eq!(classify("find cats"), (Role::Passage, "find cats"));
    }

    #[test]
    fn test_marker_only_yields_empty_query() {
        assert_eq!(classify("_Query_"), (Role::Query, ""));
    }

    #[test]
    fn test_marker_must_lead() {
        assert_eq!(classify(" _Query_x"), (Role::Passage, " _Query_x"));
        assert_eq!(classify("x_Query_"), (Role::Passage, "x_Query_"));
    }

    #[test]
    fn test_marker_is_case_sensitive() {
        assert_eq!(classify("_query_x"), (Role::Passage, "_query_x"));
    }

    #[test]
    fn test_only_first_marker_removed() {
        assert_eq!(classify("_Query__Query_x"), (Role::Query, "_Query_x"));
    }

    #[test]
    fn test_classified_item_keeps_position() {
        let item = InputItem {
            position: 7,
            text: "_Query_hi".to_string(),
        };
        let classified = ClassifiedItem::from_input(&item);
        assert_eq!(classified.position, 7);
        assert_eq!(classified.role, Role::Query);
        assert_eq!(classified.text, "hi");
    }
}
