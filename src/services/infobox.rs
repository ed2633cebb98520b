// src/services/infobox.rs

//! Infobox field extraction.
//!
//! An infobox is an ordered list of loosely structured key/value pairs.
//! Callers pass the labels they are interested in, highest priority first.
//! Entries are scanned in infobox order and a repeated label overwrites the
//! earlier one; the result is then read back in label priority order.

use std::collections::HashMap;

use crate::models::{InfoboxEntry, InfoboxValue};
use crate::utils::clean_string;

/// Cleaned value(s) of one matched entry.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Matched {
    Single(String),
    Multi(Vec<String>),
}

impl Matched {
    fn from_value(value: &InfoboxValue) -> Self {
        match value {
            InfoboxValue::Text(text) => Matched::Single(clean_string(text)),
            InfoboxValue::List(items) => {
                Matched::Multi(items.iter().map(|item| clean_string(&item.v)).collect())
            }
        }
    }
}

fn collect_matches<'k>(infobox: &[InfoboxEntry], keys: &[&'k str]) -> HashMap<&'k str, Matched> {
    let mut matched = HashMap::new();
    for entry in infobox {
        if let Some(key) = keys.iter().find(|key| **key == entry.key) {
            matched.insert(*key, Matched::from_value(&entry.value));
        }
    }
    matched
}

/// Value of the highest-priority label present in the infobox.
///
/// A multi-valued entry yields its first sub-value; an empty one yields
/// `None`.
pub fn first_match(infobox: &[InfoboxEntry], keys: &[&str]) -> Option<String> {
    let matched = collect_matches(infobox, keys);
    let key = keys.iter().find(|key| matched.contains_key(*key))?;
    match matched.get(key)? {
        Matched::Single(value) => Some(value.clone()),
        Matched::Multi(values) => values.first().cloned(),
    }
}

/// Values of every label present in the infobox, in label priority order.
///
/// Multi-valued entries are flattened. Duplicates across labels are kept.
pub fn all_matches(infobox: &[InfoboxEntry], keys: &[&str]) -> Vec<String> {
    let mut matched = collect_matches(infobox, keys);
    let mut values = Vec::new();
    for key in keys {
        match matched.remove(key) {
            Some(Matched::Single(value)) => values.push(value),
            Some(Matched::Multi(list)) => values.extend(list),
            None => {}
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InfoboxItem;

    fn text(key: &str, value: &str) -> InfoboxEntry {
        InfoboxEntry {
            key: key.to_string(),
            value: InfoboxValue::Text(value.to_string()),
        }
    }

    fn list(key: &str, values: &[&str]) -> InfoboxEntry {
        InfoboxEntry {
            key: key.to_string(),
            value: InfoboxValue::List(
                values
                    .iter()
                    .map(|v| InfoboxItem {
                        k: None,
                        v: v.to_string(),
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn first_match_follows_key_priority() {
        let infobox = vec![text("出版社", "Publisher"), text("文库", "Imprint")];
        assert_eq!(
            first_match(&infobox, &["文库", "出版社"]).as_deref(),
            Some("Imprint")
        );
        assert_eq!(
            first_match(&infobox, &["出版社", "文库"]).as_deref(),
            Some("Publisher")
        );
    }

    #[test]
    fn first_match_ignores_unlisted_keys() {
        let infobox = vec![text("页数", "320"), text("价格", "¥600")];
        assert_eq!(first_match(&infobox, &["ISBN"]), None);
        assert_eq!(first_match(&infobox, &[]), None);
    }

    #[test]
    fn first_match_takes_first_sub_value() {
        let infobox = vec![list("作者", &["A", "B"])];
        assert_eq!(first_match(&infobox, &["作者"]).as_deref(), Some("A"));
    }

    #[test]
    fn first_match_empty_list_is_absent() {
        let infobox = vec![list("作者", &[])];
        assert_eq!(first_match(&infobox, &["作者"]), None);
    }

    #[test]
    fn repeated_key_last_one_wins() {
        let infobox = vec![text("ISBN", "111"), text("ISBN", "222")];
        assert_eq!(first_match(&infobox, &["ISBN"]).as_deref(), Some("222"));
        assert_eq!(all_matches(&infobox, &["ISBN"]), vec!["222"]);
    }

    #[test]
    fn all_matches_in_priority_order_not_scan_order() {
        let infobox = vec![
            text("插画", "Illustrator"),
            text("页数", "200"),
            list("作者", &["Author A", "Author B"]),
            text("作画", "Artist"),
        ];
        assert_eq!(
            all_matches(&infobox, &["作者", "作画", "插图", "插画"]),
            vec!["Author A", "Author B", "Artist", "Illustrator"]
        );
    }

    #[test]
    fn all_matches_keeps_duplicates_across_keys() {
        let infobox = vec![text("作者", "Same"), text("插画", "Same")];
        assert_eq!(
            all_matches(&infobox, &["作者", "插画"]),
            vec!["Same", "Same"]
        );
    }

    #[test]
    fn all_matches_none_is_empty() {
        let infobox = vec![text("页数", "200")];
        assert!(all_matches(&infobox, &["作者"]).is_empty());
    }

    #[test]
    fn values_are_cleaned() {
        let infobox = vec![
            text("ISBN", "\u{200e}9784040000000"),
            list("作者", &["\u{200e}A\u{200e}"]),
        ];
        assert_eq!(
            first_match(&infobox, &["ISBN"]).as_deref(),
            Some("9784040000000")
        );
        assert_eq!(all_matches(&infobox, &["作者"]), vec!["A"]);
    }
}
