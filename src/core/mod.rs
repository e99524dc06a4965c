//! Core business logic - framework-agnostic wallet, purchase, and catalog
//! operations over the relational store.

/// Deterministic allocation planning for deposits
pub mod allocation;
/// Fire-and-forget audit log sink
pub mod audit;
/// Actor model and capability checks
pub mod auth;
/// Product catalog and stock movements
pub mod catalog;
/// Customer lookups and the atomic wallet-balance update
pub mod customer;
/// Purchase ledger: payment application and completion side-effects
pub mod purchase;
/// The wallet engine: deposit creation, confirmation, rejection
pub mod wallet;
