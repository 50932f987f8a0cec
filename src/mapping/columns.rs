// src/mapping/columns.rs
use crate::extractors::ExtractedAttributes;
use crate::mapping::schema::OutputSchema;

/// One report row: a value slot for every schema column, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRecord {
    values: Vec<Option<String>>,
}

impl FormRecord {
    fn empty(width: usize) -> Self {
        Self { values: vec![None; width] }
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}

/// Projects extraction results onto an `OutputSchema`.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapper {
    schema: OutputSchema,
}

impl ColumnMapper {
    pub fn new(schema: OutputSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    /// Schema columns are set directly. Any other non-empty attribute is
    /// appended to the catch-all column as `"name: value; "`, in encounter order.
    pub fn project(&self, attributes: &ExtractedAttributes) -> FormRecord {
        let mut record = FormRecord::empty(self.schema.len());
        let catch_all = self.schema.catch_all();

        for (name, value) in attributes.iter() {
            match self.schema.position(name) {
                Some(index) => record.values[index] = Some(value.to_string()),
                None if !value.is_empty() => {
                    tracing::trace!("Attribute '{}' has no column, moving it to catch-all", name);
                    record.values[catch_all]
                        .get_or_insert_with(String::new)
                        .push_str(&format!("{}: {}; ", name, value));
                }
                None => {}
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::schema::{IP_RATING, NOMENCLATURE, OTHER, POWER};

    fn value<'r>(mapper: &ColumnMapper, record: &'r FormRecord, column: &str) -> Option<&'r str> {
        mapper.schema().position(column).and_then(|index| record.get(index))
    }

    fn is_blank(record: &FormRecord) -> bool {
        record.values().iter().all(Option::is_none)
    }

    fn attributes(pairs: &[(&str, &str)]) -> ExtractedAttributes {
        let mut attrs = ExtractedAttributes::new();
        for (name, value) in pairs {
            attrs.insert(*name, *value);
        }
        attrs
    }

    #[test]
    fn test_record_always_has_every_column() {
        let mapper = ColumnMapper::default();
        let record = mapper.project(&ExtractedAttributes::new());
        assert_eq!(record.values().len(), 27);
        assert!(is_blank(&record));
    }

    #[test]
    fn test_known_columns_are_set() {
        let mapper = ColumnMapper::default();
        let record = mapper.project(&attributes(&[(POWER, "50 Вт"), (IP_RATING, "IP65")]));
        assert_eq!(value(&mapper, &record, POWER), Some("50 Вт"));
        assert_eq!(value(&mapper, &record, IP_RATING), Some("IP65"));
        assert_eq!(value(&mapper, &record, NOMENCLATURE), None);
        assert_eq!(value(&mapper, &record, OTHER), None);
        assert_eq!(record.values().iter().filter(|v| v.is_some()).count(), 2);
    }

    #[test]
    fn test_unknown_attributes_accumulate_in_catch_all() {
        let mapper = ColumnMapper::default();
        let record = mapper.project(&attributes(&[("X", "1"), (POWER, "5 Вт"), ("Y", "2")]));
        assert_eq!(value(&mapper, &record, OTHER), Some("X: 1; Y: 2; "));
        assert_eq!(value(&mapper, &record, POWER), Some("5 Вт"));
    }

    #[test]
    fn test_empty_unknown_values_are_dropped() {
        let mapper = ColumnMapper::default();
        let record = mapper.project(&attributes(&[("X", ""), ("Y", "2")]));
        assert_eq!(value(&mapper, &record, OTHER), Some("Y: 2; "));

        let record = mapper.project(&attributes(&[("X", "")]));
        assert!(is_blank(&record));
    }

    #[test]
    fn test_direct_catch_all_value_is_overwritten_in_order() {
        let mapper = ColumnMapper::default();
        // A direct write replaces whatever was accumulated before it
        let record = mapper.project(&attributes(&[("X", "1"), (OTHER, "УХЛ1")]));
        assert_eq!(value(&mapper, &record, OTHER), Some("УХЛ1"));

        let record = mapper.project(&attributes(&[(OTHER, "УХЛ1"), ("X", "1")]));
        assert_eq!(value(&mapper, &record, OTHER), Some("УХЛ1X: 1; "));
    }

    #[test]
    fn test_custom_schema() {
        let schema = OutputSchema::new(&["Power", "Misc"], "Misc").unwrap();
        let mapper = ColumnMapper::new(schema);
        let record = mapper.project(&attributes(&[("Power", "1 W"), ("Color", "red")]));
        assert_eq!(record.values(), &[Some("1 W".to_string()), Some("Color: red; ".to_string())]);
    }
}
