//! Categorical filter predicate

use crate::core::field::QueryField;
use crate::query::state::ALL_FILTER;
use crate::query::view::QueryView;

/// Filter predicate: exact match of `filter_field` against `filter_value`
///
/// `"all"` matches everything. No case folding, no trimming; a missing value
/// never matches a concrete filter.
pub fn matches_filter<F: QueryField>(view: &QueryView<F>, filter_value: &str, filter_field: F) -> bool {
    if filter_value == ALL_FILTER {
        return true;
    }
    view.get(filter_field)
        .and_then(|value| value.as_text())
        .is_some_and(|text| text == filter_value)
}
