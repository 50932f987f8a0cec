// src/extractors/attributes.rs

// --- Imports ---
use crate::mapping::schema::{
    BODY_MATERIAL, COLOR_TEMPERATURE, DIMENSIONS, IP_RATING, LUMINOUS_FLUX, NOMENCLATURE, OTHER,
    POWER, VOLTAGE,
};
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
/// Attribute name used for the sentinel entry of a row that could not be processed.
pub const ERROR_ATTRIBUTE: &str = "error";

// --- Regex Patterns (Lazy Static) ---
// Group 1 is the trigger label, group 2 the captured value. The label and value
// may be separated by whitespace and one optional ':', '-' or '–'.
// Rules are applied in this order; a later rule overwrites an earlier one with the same target.
static ATTRIBUTE_RULES: Lazy<Vec<AttributeRule>> = Lazy::new(|| {
    [
        (r"(?i)(потребляемая мощность|мощность)\s*[:\-–]?\s*(\d+\s*Вт)", POWER),
        (r"(?i)(световой поток)\s*[:\-–]?\s*(\d+\s*лм)", LUMINOUS_FLUX),
        (r"(?i)(цветовая температура|Цвет\. температура, К)\s*[:\-–]?\s*(\d+\s*[КK])", COLOR_TEMPERATURE),
        // IP codes and series names are recognised without a label too
        (r"(?i)(?:(степень защиты|IP)\s*[:\-–]?\s*)?(IP\d+)", IP_RATING),
        (r"(?i)(размеры|габариты)\s*[:\-–]?\s*(\d+\s*[хx]\s*\d+\s*[хx]\s*\d+)", DIMENSIONS),
        (r"(?i)(напряжение питания|Напряжение, В)\s*[:\-–]?\s*([\d\-–]+\s*[Вv])", VOLTAGE),
        (r"(?i)(материалы|Материал корпуса)\s*[:\-–]?\s*(.+?)(?:,|\n?\z)", BODY_MATERIAL),
        (r"(?i)(?:(серия)\s*[:\-–]?\s*)?(РИСТ-[\w\-]+)", NOMENCLATURE),
        (r"(?i)(климатического исполнения|исполнение)\s*[:\-–]?\s*(УХЛ\d+)", OTHER),
    ]
    .iter()
    .map(|(pattern, target)| {
        AttributeRule::new(pattern, target).expect("Failed to compile ATTRIBUTE_RULES")
    })
    .collect()
});

// --- Data Structures ---

/// One (pattern, target attribute) pair.
#[derive(Debug, Clone)]
pub struct AttributeRule {
    pattern: Regex,
    target: String,
}

impl AttributeRule {
    pub fn new(pattern: &str, target: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            target: target.to_string(),
        })
    }

    /// Trimmed value captured by group 2 of the first match, if the rule fires.
    fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(2))
            .map(|value| value.as_str().trim())
    }
}

/// Attributes found in one description, kept in the order they were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedAttributes {
    entries: Vec<(String, String)>,
}

impl ExtractedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`. An existing name keeps its position and gets the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of processing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    Extracted(ExtractedAttributes),
    Failed { reason: String },
}

impl ExtractionOutcome {
    /// Flattens the outcome for column mapping. A failure becomes a single
    /// `error` entry, which the mapper routes to the catch-all column.
    pub fn into_attributes(self) -> ExtractedAttributes {
        match self {
            Self::Extracted(attributes) => attributes,
            Self::Failed { reason } => {
                let mut attributes = ExtractedAttributes::new();
                attributes.insert(ERROR_ATTRIBUTE, format!("row could not be processed: {}", reason));
                attributes
            }
        }
    }
}

// --- Main Extractor Structure ---
#[derive(Debug, Clone)]
pub struct AttributeExtractor {
    rules: Vec<AttributeRule>,
}

impl AttributeExtractor {
    /// Extractor with the built-in product attribute rules.
    pub fn new() -> Self {
        Self { rules: ATTRIBUTE_RULES.clone() }
    }

    /// Runs every rule against the whole text. Rules are independent, so one
    /// description can fill several attributes.
    pub fn extract(&self, text: &str) -> ExtractionOutcome {
        let mut attributes = ExtractedAttributes::new();
        for rule in &self.rules {
            if let Some(value) = rule.capture(text) {
                tracing::trace!("Rule for '{}' matched: '{}'", rule.target, value);
                attributes.insert(rule.target.as_str(), value);
            }
        }
        ExtractionOutcome::Extracted(attributes)
    }
}

impl Default for AttributeExtractor {
    fn default() -> Self {
        Self::new()
    }
}
