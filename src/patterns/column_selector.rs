use super::numeric_columns::NumericColumns;

/// Picks the column with the most numeric values.
///
/// Ties go to the column that appeared first. `None` when there is no
/// numeric value at all.
pub fn select_main_column(columns: &NumericColumns) -> Option<(&str, &[f64])> {
    let mut main_column: Option<(&str, &[f64])> = None;
    for (name, values) in columns.iter() {
        let longest = main_column.map_or(0, |(_, main_values)| main_values.len());
        if values.len() > longest {
            main_column = Some((name, values));
        }
    }
    main_column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datamodel::Row;

    #[test]
    fn test_longest_column_wins() {
        let rows = vec![
            Row::new().with("a", "1").with("b", "1"),
            Row::new().with("a", "x").with("b", "2"),
            Row::new().with("a", "3").with("b", "3"),
        ];
        let columns = NumericColumns::from_rows(&rows);
        let (name, values) = select_main_column(&columns).unwrap();
        assert_eq!(name, "b");
        assert_eq!(values.len(), 3);
    }

    #[test]
    fn test_tie_goes_to_first_seen_column() {
        let rows = vec![
            Row::new().with("zeta", "1").with("alpha", "2"),
            Row::new().with("zeta", "3").with("alpha", "4"),
        ];
        let columns = NumericColumns::from_rows(&rows);
        for _ in 0..10 {
            assert_eq!(select_main_column(&columns).unwrap().0, "zeta");
        }
    }

    #[test]
    fn test_no_numeric_column() {
        let rows = vec![Row::new().with("name", "alice")];
        let columns = NumericColumns::from_rows(&rows);
        assert_eq!(select_main_column(&columns), None);
    }
}
