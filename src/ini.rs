//! Main module for ini reading
//!
//! Layout, leaves first:
//!   reading    physical lines to logical lines, and line classification
//!   document   the owned Document / Section / KeyValue tree and its lookups
//!   building   stream to Document
//!   search     stream to a single value, no Document kept
//!   value      boolean / integer / float coercion of values

pub mod building;
pub mod config;
pub mod document;
pub mod error;
pub mod reading;
pub mod search;
pub mod testing;
pub mod value;
