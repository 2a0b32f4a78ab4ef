//! List query pipeline: search, filter, sort and paginate entity collections
//!
//! ```text
//! collection ──project──> QueryView ──search──> ──filter──> ──sort──> ──paginate──> page
//! ```
//!
//! Every registration page runs the same pipeline, configured by a
//! [`ListDescriptor`] for its entity type.

pub mod compare;
pub mod filter;
pub mod paginate;
pub mod pipeline;
pub mod search;
pub mod state;
pub mod view;

pub use compare::{SortKey, collate, compare_values, compare_views, sort_views};
pub use filter::matches_filter;
pub use paginate::{
    DEFAULT_ITEMS_PER_PAGE, PageResult, Paginator, clamp_page, page_window, paginate, total_pages,
};
pub use pipeline::{
    Column, ColumnModel, FetchTicket, ListDescriptor, ListEntity, ListQuery, PaginationModel, SearchModel,
    TableModel, query, query_views,
};
pub use search::{SearchTerm, fold_accents, matches_search};
pub use state::{ALL_FILTER, QueryParams, QueryState, ResetPolicy, SortDirection, SortSpec};
pub use view::{QueryView, project_all};
