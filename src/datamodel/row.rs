use smallvec::SmallVec;

pub type RowFields = SmallVec<[(String, String); 8]>;

/// One record of the input, as ordered `(column name, raw value)` pairs.
///
/// Rows do not share a schema: a column may be missing from some rows.
/// A column holds at most one value per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: RowFields,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field. A repeated name replaces the earlier value and keeps its position.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(column, _)| *column == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| value)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (name, value) in iter {
            row.push(name, value);
        }
        row
    }
}
