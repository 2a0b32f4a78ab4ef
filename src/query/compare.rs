//! Type-aware comparison of field values

use crate::core::field::{FieldValue, QueryField};
use crate::query::search::fold_accents;
use crate::query::state::{SortDirection, SortSpec};
use crate::query::view::QueryView;
use std::cmp::Ordering;

/// Precomputed sort key of one field value
///
/// Built once per row before sorting, so accent folding and date parsing do
/// not run on every comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    /// Collation key: accent-folded lower case, then plain lower case
    Text { folded: String, lowered: String },
    Number(f64),
    /// Milliseconds since the epoch
    Time(i64),
    /// A value of a type that has no ordering (booleans, ids)
    Unordered,
    /// Absent, null, NaN or an unparsable date
    Missing,
}

impl SortKey {
    /// Key for `value`; date-like fields are read as timestamps
    pub fn from_value(value: Option<&FieldValue>, date_like: bool) -> Self {
        let Some(value) = value else {
            return SortKey::Missing;
        };

        if date_like {
            return value.timestamp().map_or(SortKey::Missing, SortKey::Time);
        }

        match value {
            FieldValue::String(s) => SortKey::Text {
                folded: fold_accents(s),
                lowered: s.to_lowercase(),
            },
            FieldValue::Integer(_) | FieldValue::Float(_) => {
                value.as_number().map_or(SortKey::Missing, SortKey::Number)
            }
            FieldValue::DateTime(_) | FieldValue::Date(_) => {
                value.timestamp().map_or(SortKey::Missing, SortKey::Time)
            }
            FieldValue::Boolean(_) | FieldValue::Uuid(_) => SortKey::Unordered,
            FieldValue::Null => SortKey::Missing,
        }
    }

    /// Ascending comparison of two keys of the same kind
    ///
    /// `None` when the keys are of different kinds and cannot be compared.
    pub fn compare_same_kind(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (
                SortKey::Text { folded, lowered },
                SortKey::Text {
                    folded: other_folded,
                    lowered: other_lowered,
                },
            ) => Some(
                folded
                    .cmp(other_folded)
                    .then_with(|| lowered.cmp(other_lowered)),
            ),
            (SortKey::Number(a), SortKey::Number(b)) => Some(a.partial_cmp(b).unwrap_or(Ordering::Equal)),
            (SortKey::Time(a), SortKey::Time(b)) => Some(a.cmp(b)),
            (SortKey::Unordered, SortKey::Unordered) | (SortKey::Missing, SortKey::Missing) => {
                Some(Ordering::Equal)
            }
            _ => None,
        }
    }

    /// Ascending total order used for sorting
    ///
    /// Keys of different kinds are grouped by kind (text, numbers, dates,
    /// unordered, missing), which keeps the order total; a sort never sees
    /// a contradiction.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.compare_same_kind(other)
            .unwrap_or_else(|| self.rank().cmp(&other.rank()))
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Text { .. } => 0,
            SortKey::Number(_) => 1,
            SortKey::Time(_) => 2,
            SortKey::Unordered => 3,
            SortKey::Missing => 4,
        }
    }
}

/// Compare two strings the way a pt-BR collator would, ignoring case
///
/// Accents only break ties: `"Abóbora" < "Acerola"`, `"e" < "é"`.
pub fn collate(a: &str, b: &str) -> Ordering {
    fold_accents(a)
        .cmp(&fold_accents(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

/// Comparator of two field values in `direction`
///
/// Strings collate, numbers compare numerically, date-like fields compare as
/// timestamps. Equal, missing or incomparable values give `Equal`, leaving
/// the input order in place under a stable sort.
pub fn compare_values(
    a: Option<&FieldValue>,
    b: Option<&FieldValue>,
    date_like: bool,
    direction: SortDirection,
) -> Ordering {
    let a = SortKey::from_value(a, date_like);
    let b = SortKey::from_value(b, date_like);
    let ascending = match (&a, &b) {
        (SortKey::Missing, _) | (_, SortKey::Missing) => Ordering::Equal,
        _ => a.compare_same_kind(&b).unwrap_or(Ordering::Equal),
    };
    direction.apply(ascending)
}

/// Comparator of two projected entities under `sort`
pub fn compare_views<F: QueryField>(a: &QueryView<F>, b: &QueryView<F>, sort: &SortSpec<F>) -> Ordering {
    compare_values(
        a.get(sort.key),
        b.get(sort.key),
        sort.key.is_date_like(),
        sort.direction,
    )
}

/// Stable sort of projected rows
pub fn sort_views<F: QueryField>(rows: &mut Vec<&QueryView<F>>, sort: &SortSpec<F>) {
    let date_like = sort.key.is_date_like();
    let mut keyed: Vec<(SortKey, &QueryView<F>)> = rows
        .iter()
        .map(|view| (SortKey::from_value(view.get(sort.key), date_like), *view))
        .collect();

    // slice::sort_by is stable
    keyed.sort_by(|(a, _), (b, _)| sort.direction.apply(a.total_cmp(b)));

    rows.clear();
    rows.extend(keyed.into_iter().map(|(_, view)| view));
}
