//! Read-side query model
//!
//! Queries are plain data: a disjunction of field predicates plus an
//! optional page. The store translates them to SQL; nothing here knows
//! about SQL.

pub mod user_query;

pub use user_query::{Field, Page, Predicate, UserQuery};
