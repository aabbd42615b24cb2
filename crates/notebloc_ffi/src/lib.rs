//! Flutter bridge crate for notebloc.
//!
//! The Dart side renders the single note screen and calls `api` for every
//! user action; all note state lives in `notebloc_core`.

pub mod api;
