//! UEN (Unique Entity Number) format validation.
//!
//! Classifies candidate identifiers against the three UEN formats issued in
//! Singapore and reports structured metadata about the match.

pub mod classifier;
pub mod entity_types;
pub mod format;

pub use classifier::{classify, clean, ValidationDetails, ValidationResult};
pub use entity_types::{entity_type, ENTITY_TYPES};
pub use format::{format_definitions, format_examples, FormatDefinition, FormatExamples, UenFormat};
