//! Relational store contract
//!
//! The core never assembles statements. Everything it needs from the
//! relational store is a closed set of typed operations on a unit of work:
//! reads return rows, writes return rows affected.
//!
//! A unit publishes nothing until `commit`. Dropping a unit without
//! committing rolls it back.

mod errors;
pub mod fault;
mod memory;
mod unit;

pub use errors::{StoreError, StoreResult};
pub use fault::FaultInjector;
pub use memory::InMemoryRelationalStore;
pub use unit::{transact, RelationalStore, UnitOfWork};
