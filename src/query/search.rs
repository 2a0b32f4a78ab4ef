//! Free-text search predicate

use crate::core::field::QueryField;
use crate::query::view::QueryView;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Lower-case `input` and strip its accents (`"José"` -> `"jose"`)
pub fn fold_accents(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// A normalized search term
///
/// Normalize once per query, not once per entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTerm {
    lowered: String,
    folded: String,
}

impl SearchTerm {
    /// `None` for an empty or whitespace-only term, which matches everything
    pub fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            lowered: term.to_lowercase(),
            folded: fold_accents(term),
        })
    }

    /// Whether any of `fields` contains the term
    ///
    /// Comparison is case-insensitive and also accent-insensitive. Missing and
    /// null fields never match.
    pub fn matches<F: QueryField>(&self, view: &QueryView<F>, fields: &[F]) -> bool {
        fields.iter().any(|field| {
            view.get(*field)
                .and_then(|value| value.search_text())
                .is_some_and(|text| {
                    text.contains(&self.lowered) || fold_accents(&text).contains(&self.folded)
                })
        })
    }
}

/// Search predicate: does `view` match `term` on any of `searchable_fields`?
///
/// An empty or whitespace-only term matches everything.
pub fn matches_search<F: QueryField>(view: &QueryView<F>, term: &str, searchable_fields: &[F]) -> bool {
    match SearchTerm::parse(term) {
        Some(term) => term.matches(view, searchable_fields),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Field {
        Name,
        Breed,
        Weight,
    }

    impl QueryField for Field {
        fn key(&self) -> &'static str {
            match self {
                Field::Name => "name",
                Field::Breed => "breed",
                Field::Weight => "weight",
            }
        }

        fn all() -> &'static [Self] {
            &[Field::Name, Field::Breed, Field::Weight]
        }

        fn index(&self) -> usize {
            *self as usize
        }
    }

    fn view(name: Option<&str>, breed: &str, weight: f64) -> QueryView<Field> {
        QueryView::from_values(
            0,
            [
                (Field::Name, FieldValue::from(name)),
                (Field::Breed, FieldValue::from(breed)),
                (Field::Weight, FieldValue::from(weight)),
            ],
        )
    }

    const SEARCHABLE: &[Field] = &[Field::Name, Field::Breed];

    #[test]
    fn test_empty_term_matches_everything() {
        let v = view(None, "Angus", 410.0);
        assert!(matches_search(&v, "", SEARCHABLE));
        assert!(matches_search(&v, "   ", SEARCHABLE));
    }

    #[test]
    fn test_case_insensitive_substring() {
        let v = view(Some("Mimosa"), "Angus", 410.0);
        assert!(matches_search(&v, "ang", SEARCHABLE));
        assert!(matches_search(&v, "ANG", SEARCHABLE));
        assert!(matches_search(&v, "mos", SEARCHABLE));
        assert!(!matches_search(&v, "nelore", SEARCHABLE));
    }

    #[test]
    fn test_only_searchable_fields_are_searched() {
        let v = view(Some("Mimosa"), "Angus", 410.0);
        assert!(!matches_search(&v, "410", SEARCHABLE));
        assert!(matches_search(&v, "410", &[Field::Weight]));
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let v = view(None, "Nelore", 300.0);
        assert!(matches_search(&v, "nel", SEARCHABLE));
        assert!(!matches_search(&v, "mimosa", SEARCHABLE));
    }

    #[test]
    fn test_accent_insensitive() {
        let v = view(Some("Estrela do Sertão"), "Gir Leiteiro", 380.0);
        assert!(matches_search(&v, "sertao", SEARCHABLE));
        assert!(matches_search(&v, "SERTÃO", SEARCHABLE));
    }

    #[test]
    fn test_term_is_trimmed() {
        let v = view(Some("Mimosa"), "Red Angus", 410.0);
        assert!(matches_search(&v, "angus ", SEARCHABLE));
        assert!(matches_search(&v, "  red angus", SEARCHABLE));
        assert!(!matches_search(&v, " angusx ", SEARCHABLE));
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("José Conceição"), "jose conceicao");
    }
}
