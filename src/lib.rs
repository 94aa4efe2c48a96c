//! fairshare - shared expense splitting and balance tracking
//!
//! This library provides the core functionality for the fairshare
//! command-line application. A group of people record expenses that one of
//! them paid for; each expense is split equally or by custom amounts
//! between participants, and every participant share can be marked as
//! settled independently. Net balances, pairwise debts and settle-up
//! suggestions are derived from the loaded expenses on demand.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `logging`: tracing subscriber setup
//! - `models`: Core data models (people, expenses, shares, money)
//! - `ledger`: Pure split, balance, settlement and settle-up computations
//! - `storage`: Local JSON file store and the REST client behind one trait
//! - `services`: Validation and orchestration over a store
//! - `audit`: Audit logging of local writes
//! - `export`: CSV and JSON export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use fairshare::config::{FairsharePaths, Settings};
//! use fairshare::storage::open_store;
//!
//! let paths = FairsharePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?.with_env_overrides();
//! let store = open_store(&paths, &settings)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FairshareError, FairshareResult};
