//! Algebra Integration Suite
//!
//! Exercises the public verbs across every entity kind.
//!
//! ## Structure
//!
//! - **construction**: shape order, field maps, named arguments, `now`
//! - **properties**: field views, bounds and map interchange
//! - **arithmetic**: `plus`/`minus`/`merge`/`negate`/`abs` and extraction
//! - **relations**: absolute and partial interval relations
//! - **conversion**: strings, cross-kind coercion, formatting
//! - **config**: `tempora.toml` loading
//! - **scenarios**: the worked examples from the documentation
//! - **laws**: property-based algebraic laws
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test algebra
//!
//! # Only the property-based laws
//! cargo test --test algebra laws
//! ```

#[path = "../common/mod.rs"]
mod common;

mod arithmetic;
mod config;
mod construction;
mod conversion;
mod laws;
mod properties;
mod relations;
mod scenarios;
