//! Core data model for document parts.
//!
//! This module contains:
//! - Part type tags and their extension/media-type table
//! - Parts, the three part sequences of a document, and their file naming
//! - Raw container records

mod kind;
mod part;

pub use kind::{PartCategory, PartKind};
pub use part::{Part, Parts, Record, RecordInfo, Section};
