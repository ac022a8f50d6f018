//! Questions: posting, lookup and listings
//!
//! Listing criteria are closed enums. Request strings are mapped through a
//! fixed table; nothing user-supplied ever reaches the store as text.

mod catalog;
mod listing;

pub use catalog::{Post, QuestionCatalog};
pub use listing::{QuestionFilter, SortColumn, SortOrder, SortSpec, PAGE_SIZE};
