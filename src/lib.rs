//! tagview - Git tag panel library
//!
//! This library provides the core of the tagview CLI: a tag-listing
//! render/select/dispatch model over an injected repository client and
//! display surface.
//!
//! # Core Concepts
//!
//! - **Report**: tags rendered as an addressable, line-indexed text report
//!   with recorded section ranges for the local block and each remote block
//! - **Selection**: character offsets in the report resolved back to
//!   validated tag references
//! - **Panel**: the dispatcher combining renderer, resolver, and repository
//!   client for refresh, delete, push, log, and create operations
//!
//! # Module Organization
//!
//! - `cli`: command-line interface using clap
//! - `client`: repository client trait and the git-backed implementation
//! - `config`: configuration loading from `.tagview.toml`
//! - `error`: error types and result aliases
//! - `model`: tag value types and grouping
//! - `panel`: the tag panel dispatcher and create-tag flow
//! - `report`: report rendering with section bookkeeping
//! - `select`: selection resolution
//! - `surface`: display surface trait and console implementation

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod panel;
pub mod report;
pub mod select;
pub mod surface;

pub use error::{Error, Result};
