//! Search over the in-memory note collection.
//!
//! # Responsibility
//! - Provide a lazy, restartable text filter over notes.
//!
//! # Invariants
//! - Searching never mutates the collection.
//! - Result order equals collection order.

pub mod text_filter;
