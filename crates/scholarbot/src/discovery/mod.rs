//! Scholarship discovery: the catalog record shape, the list query engine shared with the
//! application tracker, and per-session bookmarks.

pub mod bookmarks;
pub mod domain;
pub mod query;

pub use bookmarks::{BookmarkChange, BookmarkSet};
pub use domain::{featured, ScholarshipId, ScholarshipRecord};
pub use query::{filter, FieldFilter, ListQuery, QueryParams, Queryable};
