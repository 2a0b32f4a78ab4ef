//! Search → filter → sort pipeline and the per-page list controller

use crate::core::entity::{ProjectionContext, Queryable};
use crate::core::field::QueryField;
use crate::query::compare::sort_views;
use crate::query::filter::matches_filter;
use crate::query::paginate::{DEFAULT_ITEMS_PER_PAGE, PageResult, page_window, paginate, total_pages};
use crate::query::search::SearchTerm;
use crate::query::state::{QueryParams, QueryState, ResetPolicy, SortDirection, SortSpec};
use crate::query::view::{QueryView, project_all};
use serde::Serialize;
use std::sync::Arc;

/// A table column of a list page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column<F: 'static> {
    pub field: F,
    pub label: &'static str,
    pub sortable: bool,
}

impl<F: QueryField> Column<F> {
    pub const fn new(field: F, label: &'static str) -> Self {
        Self {
            field,
            label,
            sortable: true,
        }
    }

    pub const fn unsortable(field: F, label: &'static str) -> Self {
        Self {
            field,
            label,
            sortable: false,
        }
    }
}

/// Declarative description of one entity's list page
///
/// The single pipeline is configured per entity type by this descriptor
/// instead of one hand-written filtering hook per entity.
#[derive(Debug, Clone, PartialEq)]
pub struct ListDescriptor<F: 'static> {
    /// Entity type name (e.g., "animal")
    pub entity_type: &'static str,

    /// Fields matched by the free-text search
    pub searchable_fields: &'static [F],

    /// Categorical filter field, if the page has a filter
    pub filter_field: Option<F>,

    /// Sort applied when the state has none
    pub default_sort: Option<SortSpec<F>>,

    /// Rows per page
    pub items_per_page: usize,

    /// Whether search and filter changes go back to page 1
    pub reset_policy: ResetPolicy,

    /// Table columns, in display order
    pub columns: &'static [Column<F>],
}

impl<F: QueryField> ListDescriptor<F> {
    pub fn new(entity_type: &'static str, searchable_fields: &'static [F]) -> Self {
        Self {
            entity_type,
            searchable_fields,
            filter_field: None,
            default_sort: None,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            reset_policy: ResetPolicy::default(),
            columns: &[],
        }
    }

    pub fn with_filter(mut self, field: F) -> Self {
        self.filter_field = Some(field);
        self
    }

    pub fn with_default_sort(mut self, sort: SortSpec<F>) -> Self {
        self.default_sort = Some(sort);
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page.max(1);
        self
    }

    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    pub fn with_columns(mut self, columns: &'static [Column<F>]) -> Self {
        self.columns = columns;
        self
    }

    /// Initial query state of a page using this descriptor
    pub fn initial_state(&self) -> QueryState<F> {
        QueryState::new(self.default_sort).with_reset_policy(self.reset_policy)
    }
}

/// An entity that has a list page
pub trait ListEntity: Queryable {
    /// Built-in descriptor of the entity's list page
    fn list_descriptor() -> ListDescriptor<Self::Field>;
}

/// Run the pipeline over precomputed projections
///
/// 1. drop rows not matching the search term
/// 2. drop rows not matching the filter (skipped without a filter field)
/// 3. stable sort by the state's sort, else the descriptor's default, else
///    keep the filtered order
pub fn query_views<'v, F: QueryField>(
    views: &'v [QueryView<F>],
    state: &QueryState<F>,
    descriptor: &ListDescriptor<F>,
) -> Vec<&'v QueryView<F>> {
    let term = SearchTerm::parse(state.search_term());

    let mut rows: Vec<&QueryView<F>> = views
        .iter()
        .filter(|view| {
            term.as_ref()
                .is_none_or(|term| term.matches(view, descriptor.searchable_fields))
        })
        .filter(|view| {
            descriptor
                .filter_field
                .is_none_or(|field| matches_filter(view, state.filter_value(), field))
        })
        .collect();

    if let Some(sort) = state.sort().or(descriptor.default_sort) {
        sort_views(&mut rows, &sort);
    }

    rows
}

/// Run the pipeline over a collection
///
/// The collection is only read; the result borrows from it.
pub fn query<'a, T: Queryable>(
    collection: &'a [T],
    state: &QueryState<T::Field>,
    descriptor: &ListDescriptor<T::Field>,
    context: &ProjectionContext,
) -> Vec<&'a T> {
    let views = project_all(collection, context);
    query_views(&views, state, descriptor)
        .into_iter()
        .map(|view| &collection[view.position()])
        .collect()
}

/// Ticket of one collection fetch, see [`ListQuery::begin_fetch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Column header state for the table component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnModel {
    pub key: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub sort: Option<SortDirection>,
}

/// Pagination block of the table component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationModel {
    pub current_page: usize,
    pub total_pages: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub has_pagination: bool,
    pub pages: Vec<Option<usize>>,
}

/// Search box of the table component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchModel {
    pub value: String,
}

/// Everything the generic table component renders
#[derive(Debug, Clone, Serialize)]
pub struct TableModel<'a, T> {
    pub columns: Vec<ColumnModel>,
    pub data: Vec<&'a T>,
    pub pagination: PaginationModel,
    pub search: SearchModel,
}

/// The part of a query state the filtered and sorted result depends on
///
/// The page is left out: paging only slices the cached order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResultKey<F> {
    search_term: String,
    filter_value: String,
    sort: Option<SortSpec<F>>,
}

impl<F: QueryField> ResultKey<F> {
    fn of(state: &QueryState<F>) -> Self {
        Self {
            search_term: state.search_term().to_string(),
            filter_value: state.filter_value().to_string(),
            sort: state.sort(),
        }
    }

    fn matches(&self, state: &QueryState<F>) -> bool {
        self.search_term == state.search_term()
            && self.filter_value == state.filter_value()
            && self.sort == state.sort()
    }
}

/// List controller of one registration page
///
/// Owns the collection and the query state. Projections are rebuilt only
/// when a different collection is installed; the filtered and sorted result
/// is recomputed only when the collection, the search term, the filter or
/// the sort changed since the last read. Page changes reuse it.
#[derive(Debug)]
pub struct ListQuery<T: Queryable> {
    descriptor: ListDescriptor<T::Field>,
    context: ProjectionContext,
    collection: Arc<[T]>,
    views: Vec<QueryView<T::Field>>,
    state: QueryState<T::Field>,
    cache: Option<(ResultKey<T::Field>, Vec<usize>)>,
    recomputations: usize,
    last_ticket: u64,
}

impl<T: ListEntity> ListQuery<T> {
    /// Controller using the entity's built-in descriptor
    pub fn for_entity() -> Self {
        Self::new(T::list_descriptor())
    }
}

impl<T: Queryable> ListQuery<T> {
    /// Controller over an empty collection
    pub fn new(descriptor: ListDescriptor<T::Field>) -> Self {
        Self::with_context(descriptor, ProjectionContext::today())
    }

    /// Controller whose computed fields are anchored on `context`
    pub fn with_context(descriptor: ListDescriptor<T::Field>, context: ProjectionContext) -> Self {
        let state = descriptor.initial_state();
        Self {
            descriptor,
            context,
            collection: Arc::from(Vec::new()),
            views: Vec::new(),
            state,
            cache: None,
            recomputations: 0,
            last_ticket: 0,
        }
    }

    pub fn descriptor(&self) -> &ListDescriptor<T::Field> {
        &self.descriptor
    }

    pub fn state(&self) -> &QueryState<T::Field> {
        &self.state
    }

    pub fn collection(&self) -> &Arc<[T]> {
        &self.collection
    }

    /// How many times the pipeline actually ran
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    /// Install a collection; a no-op for the collection already installed
    ///
    /// The current page is kept: going back to page 1 on new data is the
    /// caller's decision.
    pub fn set_collection(&mut self, collection: Arc<[T]>) {
        if Arc::ptr_eq(&self.collection, &collection) {
            return;
        }
        self.views = project_all(&collection, &self.context);
        self.collection = collection;
        self.cache = None;
    }

    /// Start a fetch; only the newest ticket's result will be applied
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        FetchTicket(self.last_ticket)
    }

    /// Apply a fetched collection unless a newer fetch has been started
    ///
    /// Returns `false` (and drops the data) for a stale ticket.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, collection: Arc<[T]>) -> bool {
        if ticket.0 != self.last_ticket {
            tracing::warn!(
                entity_type = self.descriptor.entity_type,
                ticket = ticket.0,
                latest = self.last_ticket,
                "discarding stale fetch result"
            );
            return false;
        }
        self.set_collection(collection);
        true
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.state.set_search_term(term);
    }

    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.state.set_filter_value(value);
    }

    pub fn handle_sort(&mut self, key: T::Field) {
        self.state.handle_sort(key);
    }

    /// Sort by a key given as text; unknown keys are ignored
    pub fn handle_sort_key(&mut self, key: &str) -> bool {
        match T::Field::parse(key) {
            Some(field) => {
                self.state.handle_sort(field);
                true
            }
            None => {
                tracing::debug!(
                    entity_type = self.descriptor.entity_type,
                    key,
                    "ignoring unknown sort key"
                );
                false
            }
        }
    }

    /// Request a page; out-of-range requests are ignored
    pub fn handle_page_change(&mut self, page: i64) -> bool {
        let total = self.total_pages();
        self.state.handle_page_change(page, total)
    }

    /// Replace the whole state
    pub fn set_state(&mut self, state: QueryState<T::Field>) {
        self.state = state;
    }

    /// Restore the state from URL parameters
    ///
    /// Starts from this page's initial state, so the descriptor's default
    /// sort and reset policy hold for anything the parameters leave out.
    pub fn apply_params(&mut self, params: QueryParams) {
        self.state = params.into_state(self.descriptor.initial_state());
    }

    /// Number of pages of the current result, at least 1
    pub fn total_pages(&mut self) -> usize {
        let total_items = self.positions().len();
        total_pages(total_items, self.descriptor.items_per_page)
    }

    /// Every matching entity, filtered and sorted
    pub fn results(&mut self) -> Vec<&T> {
        self.refresh();
        let collection = &self.collection;
        self.cached_positions()
            .iter()
            .map(|position| &collection[*position])
            .collect()
    }

    /// The current page of results
    pub fn page(&mut self) -> PageResult<&T> {
        let current_page = self.state.current_page();
        let items_per_page = self.descriptor.items_per_page;
        let rows = self.results();
        paginate(&rows, current_page, items_per_page)
    }

    /// Model of the generic table component for the current page
    pub fn table(&mut self) -> TableModel<'_, T> {
        let sort = self.state.sort().or(self.descriptor.default_sort);
        let columns = self
            .descriptor
            .columns
            .iter()
            .map(|column| ColumnModel {
                key: column.field.key(),
                label: column.label,
                sortable: column.sortable,
                sort: sort
                    .filter(|sort| sort.key == column.field)
                    .map(|sort| sort.direction),
            })
            .collect();
        let search = SearchModel {
            value: self.state.search_term().to_string(),
        };

        let page = self.page();
        let pagination = PaginationModel {
            current_page: page.current_page,
            total_pages: page.total_pages,
            items_per_page: page.items_per_page,
            total_items: page.total_items,
            has_pagination: page.has_pagination,
            pages: page_window(page.total_pages, page.current_page, 1, 2),
        };

        TableModel {
            columns,
            data: page.items,
            pagination,
            search,
        }
    }

    fn positions(&mut self) -> &[usize] {
        self.refresh();
        self.cached_positions()
    }

    fn cached_positions(&self) -> &[usize] {
        self.cache
            .as_ref()
            .map(|(_, positions)| positions.as_slice())
            .unwrap_or_default()
    }

    fn refresh(&mut self) {
        if self
            .cache
            .as_ref()
            .is_some_and(|(key, _)| key.matches(&self.state))
        {
            return;
        }

        let positions: Vec<usize> = query_views(&self.views, &self.state, &self.descriptor)
            .into_iter()
            .map(QueryView::position)
            .collect();
        self.recomputations += 1;

        tracing::debug!(
            entity_type = self.descriptor.entity_type,
            total = self.views.len(),
            matched = positions.len(),
            "list query recomputed"
        );

        self.cache = Some((ResultKey::of(&self.state), positions));
    }
}
