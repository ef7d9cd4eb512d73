//! addressing-cli
//! ==============
//!
//! Command-line interface for the `addressing-core` address metadata
//! providers.
//!
//! This crate primarily provides a binary (`addressing`). We include a small
//! library target so that docs.rs renders a documentation page and shows this
//! overview.
//!
//! Basic usage:
//!
//! ```text
//! addressing postal US 94043
//! addressing subdivision NG lagos
//! addressing --remote subdivisions CA
//! addressing import --out crates/addressing-core/data --only US,NG --overwrite
//! ```
//!
//! For programmatic access use the `addressing-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
