use super::parsing::parse_finite_number;
use crate::datamodel::Row;
use std::collections::HashMap;

/// Numeric values of each column, in row order, plus the number of rows seen.
///
/// A column exists once it produced its first numeric value. Columns are kept
/// in that order, which is the order used for tie-breaks and for the summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericColumns {
    columns: Vec<(String, Vec<f64>)>,
    positions: HashMap<String, usize>,
    row_count: usize,
}

impl NumericColumns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a Row>,
    {
        let mut columns = Self::new();
        for row in rows {
            columns.push_row(row);
        }
        columns
    }

    /// Adds one row. Fields that are not numbers are skipped, not counted.
    pub fn push_row(&mut self, row: &Row) {
        self.row_count += 1;
        for (name, raw_value) in row.iter() {
            let Some(value) = parse_finite_number(raw_value) else {
                continue;
            };
            match self.positions.get(name) {
                Some(&position) => self.columns[position].1.push(value),
                None => {
                    self.positions.insert(name.to_string(), self.columns.len());
                    self.columns.push((name.to_string(), vec![value]));
                }
            }
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of numeric columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.positions
            .get(name)
            .map(|&position| self.columns[position].1.as_slice())
    }

    /// The first column that produced a number.
    pub fn first(&self) -> Option<(&str, &[f64])> {
        self.iter().next()
    }
}
