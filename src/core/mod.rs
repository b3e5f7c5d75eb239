//! Access layer - every create, read and delete the ledger supports.
//!
//! Operations take an explicit `&DatabaseConnection` and run as their own unit of
//! work: a transaction is opened with `begin()`, committed on success, and rolled
//! back when it is dropped on an early return.

/// Seeding the whole catalog in one transaction
pub mod catalog;
/// Customer creation, lookup and cascading deletion
pub mod customer;
/// Product creation, lookup, repricing and guarded deletion
pub mod product;
/// Recording purchases and listing purchase history
pub mod purchase;
