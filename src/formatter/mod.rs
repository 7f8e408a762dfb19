//! Output formatting for exported documents
//!
//! This module provides:
//! - Conversion of Firestore values to plain JSON values
//! - Pretty-printed JSON serialization with configurable indentation
//!
//! # Design
//!
//! Conversion and serialization are kept apart: the converter runs once per
//! document while it is read, and the JSON formatter runs once per collection
//! on the finished export record.

mod helpers;
pub mod json;
pub mod value;

pub use json::JsonFormatter;
pub use value::FirestoreJsonConverter;
