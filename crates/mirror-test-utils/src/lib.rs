//! Shared test utilities for the mirror workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`tree`] — write, inspect and snapshot directory trees
//! - [`fixture`] — [`MirrorFixture`] with a source and destination root

pub mod fixture;
pub mod tree;

pub use fixture::MirrorFixture;
pub use tree::{set_mtime, snapshot, write_file};
