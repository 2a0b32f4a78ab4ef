//! Query state owned by a list page: search text, filter, sort and page

use crate::core::field::QueryField;
use crate::query::paginate::Paginator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Filter value meaning "no filtering"
pub const ALL_FILTER: &str = "all";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Orient an ascending comparison
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Sort field and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec<F> {
    pub key: F,
    pub direction: SortDirection,
}

impl<F: QueryField> SortSpec<F> {
    pub fn new(key: F, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn asc(key: F) -> Self {
        Self::new(key, SortDirection::Asc)
    }

    pub fn desc(key: F) -> Self {
        Self::new(key, SortDirection::Desc)
    }

    /// Parse a sort expression
    ///
    /// # Format
    /// - `field:asc` or `field` (ascending)
    /// - `field:desc` (descending)
    ///
    /// Unknown fields or directions yield `None`.
    pub fn parse(expr: &str) -> Option<Self> {
        let (field, direction) = match expr.split_once(':') {
            Some((field, direction)) => (field, direction.parse::<SortDirection>().ok()?),
            None => (expr, SortDirection::Asc),
        };
        F::parse(field.trim()).map(|key| Self::new(key, direction))
    }
}

impl<F: QueryField> fmt::Display for SortSpec<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key.key(), self.direction.as_str())
    }
}

/// What happens to the current page when the search or filter changes
///
/// The paginator never resets itself; this is the owning page's choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPolicy {
    /// Keep the current page (it may end up out of range and show nothing)
    Keep,
    /// Go back to page 1
    #[default]
    FirstPage,
}

/// Query state of one list page
///
/// Mutated only through the setters. The pipeline is a pure function of
/// (collection, state, descriptor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState<F> {
    search_term: String,
    filter_value: String,
    sort: Option<SortSpec<F>>,
    paginator: Paginator,
    reset_policy: ResetPolicy,
}

impl<F: QueryField> QueryState<F> {
    /// Fresh state: no search, `"all"` filter, the given sort, page 1
    pub fn new(sort: Option<SortSpec<F>>) -> Self {
        Self {
            search_term: String::new(),
            filter_value: ALL_FILTER.to_string(),
            sort,
            paginator: Paginator::new(),
            reset_policy: ResetPolicy::default(),
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filter_value(&self) -> &str {
        &self.filter_value
    }

    pub fn sort(&self) -> Option<SortSpec<F>> {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.search_term {
            self.search_term = term;
            self.apply_reset_policy();
        }
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value != self.filter_value {
            self.filter_value = value;
            self.apply_reset_policy();
        }
    }

    /// Sort by `key`; sorting again by the same key flips the direction
    pub fn handle_sort(&mut self, key: F) {
        self.sort = Some(match self.sort {
            Some(current) if current.key == key => {
                SortSpec::new(key, current.direction.toggle())
            }
            _ => SortSpec::asc(key),
        });
    }

    /// Set the sort explicitly (`None` falls back to the descriptor's default)
    pub fn set_sort(&mut self, sort: Option<SortSpec<F>>) {
        self.sort = sort;
    }

    /// Request a page; rejected (no-op, `false`) outside `1..=total_pages`
    pub fn handle_page_change(&mut self, page: i64, total_pages: usize) -> bool {
        self.paginator.handle_page_change(page, total_pages)
    }

    fn apply_reset_policy(&mut self) {
        if self.reset_policy == ResetPolicy::FirstPage {
            self.paginator.reset();
        }
    }
}

/// Raw list parameters, as carried in a URL query string
///
/// # Example
/// ```text
/// ?search=nelore&filter=active&sort=birth_date:desc&page=2
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Free-text search
    pub search: String,

    /// Filter value (`"all"` or empty means no filtering)
    pub filter: Option<String>,

    /// Sort expression (`field:asc` / `field:desc`)
    pub sort: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<i64>,
}

impl QueryParams {
    /// Apply the parameters on top of `initial`, a page's initial state
    ///
    /// The initial state supplies the default sort and the reset policy.
    /// Unknown sort fields and invalid pages are ignored. The requested page
    /// is kept as long as it is at least 1; whether it is in range is only
    /// known once the result set is computed.
    pub fn into_state<F: QueryField>(self, initial: QueryState<F>) -> QueryState<F> {
        let mut state = initial;
        state.search_term = self.search;
        if let Some(filter) = self.filter.filter(|f| !f.trim().is_empty()) {
            state.filter_value = filter;
        }
        if let Some(sort) = self.sort.as_deref().and_then(SortSpec::parse) {
            state.sort = Some(sort);
        }
        if let Some(page) = self.page {
            state.paginator.handle_page_change(page, usize::MAX);
        }
        state
    }
}
