// src/mapping/schema.rs

// --- Column Names ---
// Columns that extraction rules write to directly.
pub const NOMENCLATURE: &str = "Номенклатура";
pub const POWER: &str = "Мощность, Вт";
pub const LUMINOUS_FLUX: &str = "Св. поток, Лм";
pub const IP_RATING: &str = "IP";
pub const DIMENSIONS: &str = "Габариты, мм (L,b,h)";
pub const COLOR_TEMPERATURE: &str = "Цвет. температура, К";
pub const VOLTAGE: &str = "Напряжение, В";
pub const BODY_MATERIAL: &str = "Материал корпуса";
pub const OTHER: &str = "Прочее";

/// The "Form 2" report layout, in output order. `OTHER` is the catch-all and stays last.
pub const FORM_2_COLUMNS: [&str; 27] = [
    NOMENCLATURE,
    POWER,
    LUMINOUS_FLUX,
    IP_RATING,
    DIMENSIONS,
    "Длина, мм",
    "Ширина, мм",
    "Высота, мм",
    "Рассеиватель",
    COLOR_TEMPERATURE,
    "Вес, кг",
    VOLTAGE,
    "Температура эксплуатации",
    "Срок службы/работы светильника",
    "Тип КСС",
    "Род тока",
    "Гарантия",
    "Индекс цветопередачи, CRI, Ra",
    "Цвет корпуса",
    "Коэффициент пульсаций",
    "Коэффициент мощности, Pf",
    "Класс взрывозащиты, Ex",
    "Класс пожароопасности",
    "Класс защиты от поражения электрическим током",
    BODY_MATERIAL,
    "Тип",
    OTHER,
];

/// Known aliases for some report columns.
///
/// Extraction does not consult this table; the rule patterns carry their own
/// trigger keywords. It is only listed by `--list-columns`.
pub const COLUMN_SYNONYMS: [(&str, &[&str]); 8] = [
    (POWER, &["мощность", "энергопотребление", "Вт", "W"]),
    (LUMINOUS_FLUX, &["световой поток", "Лм", "Lm"]),
    (IP_RATING, &["степень защиты", "IP"]),
    ("Длина, мм", &["длина", "L"]),
    ("Ширина, мм", &["ширина", "B"]),
    ("Высота, мм", &["высота", "H", "h"]),
    ("Гарантия", &["гарантийный срок", "срок гарантии"]),
    (OTHER, &[]),
];

/// Fixed, ordered set of output columns with one catch-all column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSchema {
    columns: Vec<String>,
    catch_all: usize,
}

impl OutputSchema {
    /// Builds a schema from `columns`; `catch_all` must be one of them.
    /// Returns `None` when it is not.
    #[cfg(test)]
    pub fn new<S: AsRef<str>>(columns: &[S], catch_all: &str) -> Option<Self> {
        let columns: Vec<String> = columns.iter().map(|c| c.as_ref().to_string()).collect();
        let catch_all = columns.iter().position(|c| c == catch_all)?;
        Some(Self { columns, catch_all })
    }

    /// The standard "Form 2" report schema.
    pub fn form2() -> Self {
        Self {
            columns: FORM_2_COLUMNS.iter().map(|c| c.to_string()).collect(),
            catch_all: FORM_2_COLUMNS.len() - 1,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn catch_all(&self) -> usize {
        self.catch_all
    }
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self::form2()
    }
}

/// Aliases recorded for `column`, empty when none are known.
pub fn synonyms_for(column: &str) -> &'static [&'static str] {
    COLUMN_SYNONYMS
        .iter()
        .find(|(name, _)| *name == column)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form2_layout() {
        let schema = OutputSchema::form2();
        assert_eq!(schema.len(), 27);
        assert_eq!(schema.columns()[0], NOMENCLATURE);
        assert_eq!(schema.columns()[schema.catch_all()], OTHER);
        assert_eq!(schema.position(IP_RATING), Some(3));
        assert_eq!(schema.position("error"), None);
    }

    #[test]
    fn test_column_names_are_unique() {
        let mut names = FORM_2_COLUMNS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FORM_2_COLUMNS.len());
    }

    #[test]
    fn test_every_synonym_entry_names_a_column() {
        let schema = OutputSchema::form2();
        for (column, _) in COLUMN_SYNONYMS {
            assert!(schema.position(column).is_some(), "unknown column {column}");
        }
        assert_eq!(synonyms_for(POWER), &["мощность", "энергопотребление", "Вт", "W"]);
        assert!(synonyms_for(OTHER).is_empty());
        assert!(synonyms_for(VOLTAGE).is_empty());
    }

    #[test]
    fn test_custom_schema_requires_catch_all() {
        assert!(OutputSchema::new(&["A", "B"], "Other").is_none());
        let schema = OutputSchema::new(&["A", "Other", "B"], "Other").unwrap();
        assert_eq!(schema.catch_all(), 1);
    }
}
