// src/extractors/mod.rs
pub mod attributes;

// Re-export key extraction types for convenience
pub use attributes::{
    AttributeExtractor,
    ExtractedAttributes,
    ExtractionOutcome,
};
