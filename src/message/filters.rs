//! Alert text for enabled and updated filter lists

use std::cmp::Ordering;

use serde::Deserialize;

use crate::message::keys;
use crate::message::timsort;
use crate::message::translator::Translator;
use crate::message::types::{AlertPayload, AlertText, FilterMetadata};

/// Order of names in the "filters updated" alert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOrder {
    /// Filters of the same group are ordered by display number, filters of
    /// different groups compare equal. This is not a total order, so the
    /// result depends on input order: a group can end up split around another.
    #[default]
    Legacy,
    /// Group id ascending, then display number ascending
    GroupThenDisplayNumber,
}

/// Title and one line per filter, ascending by display number
pub fn filters_enabled(translator: &dyn Translator, filters: &[FilterMetadata]) -> AlertPayload {
    let mut sorted: Vec<&FilterMetadata> = filters.iter().collect();
    sorted.sort_by_key(|filter| filter.display_number);

    let lines = sorted
        .into_iter()
        .map(|filter| {
            translator.get_message(
                keys::FILTER_ENABLED_DESC,
                &[("filter_name", filter.name.as_str())],
            )
        })
        .collect();

    AlertPayload {
        title: translator.get_message(keys::FILTER_ENABLED_TITLE, &[]),
        text: AlertText::Lines(lines),
    }
}

/// Result of a filter update check
///
/// `filters` is `None` when the update produced no list at all, which is
/// reported the same way as a failed update.
pub fn filters_updated(
    translator: &dyn Translator,
    success: bool,
    filters: Option<&[FilterMetadata]>,
    order: FilterOrder,
) -> AlertPayload {
    let filters = match filters {
        Some(filters) if success => filters,
        _ => {
            return AlertPayload {
                title: translator.get_message(keys::UPDATE_TITLE_ERROR, &[]),
                text: AlertText::Single(translator.get_message(keys::UPDATE_ERROR, &[])),
            };
        }
    };

    if filters.is_empty() {
        return AlertPayload {
            title: String::new(),
            text: AlertText::Single(translator.get_message(keys::UPDATE_NOT_FOUND, &[])),
        };
    }

    let mut sorted: Vec<&FilterMetadata> = filters.iter().collect();
    match order {
        FilterOrder::Legacy => legacy_sort(&mut sorted),
        FilterOrder::GroupThenDisplayNumber => {
            sorted.sort_by_key(|filter| (filter.group_id, filter.display_number))
        }
    }

    let names = sorted
        .iter()
        .map(|filter| filter.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let suffix_key = if sorted.len() > 1 {
        keys::UPDATE_FILTERS
    } else {
        keys::UPDATE_FILTER
    };

    AlertPayload {
        title: String::new(),
        text: AlertText::Single(format!(
            "{} {}",
            names,
            translator.get_message(suffix_key, &[])
        )),
    }
}

fn legacy_compare(a: &FilterMetadata, b: &FilterMetadata) -> Ordering {
    if a.group_id == b.group_id {
        a.display_number.cmp(&b.display_number)
    } else {
        Ordering::Equal
    }
}

/// Sorts with `legacy_compare`, which is not transitive.
///
/// The result depends on input order. It matches what the extension's
/// browser engine produces for the same list, including lists long enough
/// to be split into merged runs.
fn legacy_sort(items: &mut [&FilterMetadata]) {
    timsort::sort_by(items, |a, b| legacy_compare(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::translator::MessageCatalog;
    use rstest::rstest;
    use std::collections::HashMap;

    fn translator() -> MessageCatalog {
        MessageCatalog::new(HashMap::from([
            (
                keys::FILTER_ENABLED_TITLE.to_string(),
                "Filters enabled".to_string(),
            ),
            (
                keys::FILTER_ENABLED_DESC.to_string(),
                "Enabled %filter_name%".to_string(),
            ),
            (
                keys::UPDATE_TITLE_ERROR.to_string(),
                "Update failed".to_string(),
            ),
            (
                keys::UPDATE_ERROR.to_string(),
                "Could not update filters".to_string(),
            ),
            (
                keys::UPDATE_NOT_FOUND.to_string(),
                "No updates found".to_string(),
            ),
            (keys::UPDATE_FILTER.to_string(), "filter updated".to_string()),
            (
                keys::UPDATE_FILTERS.to_string(),
                "filters updated".to_string(),
            ),
        ]))
    }

    fn filter(display_number: u32, group_id: u32, name: &str) -> FilterMetadata {
        FilterMetadata {
            filter_id: display_number * 100 + group_id,
            display_number,
            group_id,
            name: name.to_string(),
        }
    }

    fn single(text: &str) -> AlertText {
        AlertText::Single(text.to_string())
    }

    #[test]
    fn filters_enabled_sorts_lines_by_display_number() {
        let filters = vec![
            filter(3, 1, "Social"),
            filter(1, 7, "Base"),
            filter(2, 1, "Tracking"),
        ];

        let payload = filters_enabled(&translator(), &filters);

        assert_eq!(payload.title, "Filters enabled");
        assert_eq!(
            payload.text,
            AlertText::Lines(vec![
                "Enabled Base".to_string(),
                "Enabled Tracking".to_string(),
                "Enabled Social".to_string(),
            ])
        );
    }

    #[test]
    fn filters_enabled_keeps_input_order_for_equal_display_numbers() {
        let filters = vec![filter(1, 1, "B"), filter(1, 2, "A")];

        let payload = filters_enabled(&translator(), &filters);

        assert_eq!(
            payload.text,
            AlertText::Lines(vec!["Enabled B".to_string(), "Enabled A".to_string()])
        );
    }

    #[test]
    fn filters_enabled_with_no_filters_has_no_lines() {
        let payload = filters_enabled(&translator(), &[]);

        assert_eq!(payload.text, AlertText::Lines(vec![]));
    }

    #[rstest]
    #[case(false, Some(vec![filter(1, 1, "Base")]))]
    #[case(false, None)]
    #[case(false, Some(vec![]))]
    #[case(true, None)]
    fn filters_updated_reports_error(
        #[case] success: bool,
        #[case] filters: Option<Vec<FilterMetadata>>,
    ) {
        let payload = filters_updated(
            &translator(),
            success,
            filters.as_deref(),
            FilterOrder::Legacy,
        );

        assert_eq!(
            payload,
            AlertPayload {
                title: "Update failed".to_string(),
                text: single("Could not update filters"),
            }
        );
    }

    #[test]
    fn filters_updated_with_empty_list_reports_not_found() {
        let payload = filters_updated(&translator(), true, Some(&[]), FilterOrder::Legacy);

        assert_eq!(
            payload,
            AlertPayload {
                title: String::new(),
                text: single("No updates found"),
            }
        );
    }

    #[rstest]
    #[case(vec![filter(1, 1, "Base")], "Base filter updated")]
    #[case(vec![filter(2, 1, "Tracking"), filter(1, 1, "Base")], "Base, Tracking filters updated")]
    #[case(
        vec![filter(3, 1, "C"), filter(1, 1, "A"), filter(2, 1, "B")],
        "A, B, C filters updated"
    )]
    fn filters_updated_joins_names_with_plural_suffix(
        #[case] filters: Vec<FilterMetadata>,
        #[case] expected: &str,
    ) {
        let payload = filters_updated(&translator(), true, Some(&filters), FilterOrder::Legacy);

        assert_eq!(payload.title, "");
        assert_eq!(payload.text, single(expected));
    }

    #[test]
    fn legacy_order_keeps_input_order_across_groups() {
        // "Late" belongs before "Early" within group 2, but the group 1 entry
        // in between compares equal to both, so nothing moves.
        let filters = vec![filter(2, 2, "Early"), filter(5, 1, "Other"), filter(1, 2, "Late")];

        let legacy = filters_updated(&translator(), true, Some(&filters), FilterOrder::Legacy);
        let grouped = filters_updated(
            &translator(),
            true,
            Some(&filters),
            FilterOrder::GroupThenDisplayNumber,
        );

        assert_eq!(legacy.text, single("Early, Other, Late filters updated"));
        assert_eq!(grouped.text, single("Other, Late, Early filters updated"));
    }

    #[test]
    fn legacy_order_inserts_after_leading_descending_run() {
        let filters = vec![
            filter(3, 1, "A3"),
            filter(1, 1, "A1"),
            filter(2, 1, "A2"),
            filter(0, 2, "B0"),
        ];

        let payload = filters_updated(&translator(), true, Some(&filters), FilterOrder::Legacy);

        assert_eq!(payload.text, single("A1, A2, A3, B0 filters updated"));
    }

    #[test]
    fn legacy_sort_matches_total_order_within_one_group() {
        let filters: Vec<FilterMetadata> = [7, 3, 9, 1, 4, 8, 2, 6, 5, 0]
            .into_iter()
            .map(|n| filter(n, 4, &format!("F{n}")))
            .collect();
        let mut sorted: Vec<&FilterMetadata> = filters.iter().collect();

        legacy_sort(&mut sorted);

        let numbers: Vec<u32> = sorted.iter().map(|f| f.display_number).collect();
        assert_eq!(numbers, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn legacy_order_of_long_list_matches_merged_runs() {
        // 70 filters split into two runs of 35 that are sorted and then merged.
        // Expected positions come from Array.prototype.sort in Node 20.
        let groups = [
            2, 4, 1, 2, 1, 4, 3, 1, 3, 4, 3, 4, 2, 1, 2, 3, 3, 2, 1, 3, 3, 3, 4, 2, 4, 4, 1, 1,
            4, 1, 4, 1, 1, 3, 3, 4, 4, 2, 3, 3, 1, 1, 1, 2, 1, 2, 4, 3, 2, 4, 1, 3, 1, 1, 3, 4,
            4, 1, 3, 4, 3, 4, 4, 4, 4, 3, 3, 3, 4, 4,
        ];
        let display_numbers = [
            149, 175, 50, 10, 133, 48, 58, 121, 184, 50, 24, 67, 139, 169, 56, 95, 187, 197,
            117, 33, 154, 11, 96, 166, 32, 65, 44, 153, 116, 82, 89, 45, 120, 63, 25, 22, 28,
            18, 88, 7, 1, 99, 198, 31, 65, 103, 142, 32, 159, 100, 146, 12, 64, 53, 112, 109,
            102, 129, 106, 198, 138, 66, 100, 192, 174, 8, 17, 7, 3, 169,
        ];
        let expected: Vec<u32> = vec![
            0, 35, 1, 2, 3, 32, 4, 5, 6, 31, 7, 21, 8, 9, 10, 24, 11, 12, 13, 14, 15, 16, 17,
            26, 18, 34, 19, 33, 20, 22, 23, 25, 27, 28, 29, 36, 30, 37, 39, 38, 40, 53, 52, 44,
            41, 42, 43, 45, 61, 49, 46, 67, 47, 48, 57, 50, 51, 58, 54, 68, 62, 56, 55, 64, 59,
            60, 63, 65, 66, 69,
        ];
        let filters: Vec<FilterMetadata> = groups
            .iter()
            .zip(display_numbers)
            .enumerate()
            .map(|(position, (&group_id, display_number))| FilterMetadata {
                filter_id: position as u32,
                display_number,
                group_id,
                name: format!("F{position}"),
            })
            .collect();
        let mut sorted: Vec<&FilterMetadata> = filters.iter().collect();

        legacy_sort(&mut sorted);

        let positions: Vec<u32> = sorted.iter().map(|f| f.filter_id).collect();
        assert_eq!(positions, expected);
    }
}
