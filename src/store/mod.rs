//! Persistence for the attendance and payroll engine.
//!
//! The engine talks to an external key-value backend through the
//! [`KeyValueStore`] trait; [`Repository`] layers typed per-collection
//! load/save on top of it. [`MemoryKvStore`] is the built-in backend for
//! tests and single-process embedding.

mod kv;
mod repository;

pub use kv::{KeyValueStore, MemoryKvStore};
pub use repository::{Repository, keys};
