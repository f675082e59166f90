//! View state persistence for the console's tables

pub mod store;
pub mod view_state;

pub use store::{BrowserStore, MemoryStore, StateStore};
pub use view_state::{
    SortColumn, SortDirection, TableViewState, ViewStateStore, DEFAULT_PAGE_SIZE, PAGE_SIZES,
};
