use super::add::parse_expense;
use crate::db::store::ExpenseStore;
use crate::error::AppError;
use crate::models::transaction::ExpenseInput;
use log::info;
use std::fs::File;
use std::path::Path;

/// Import expenses from a headerless CSV file with the columns
/// `date,amount,category[,description]`.
///
/// Every row is validated before the first insert, so a bad row leaves the
/// store untouched.
pub fn import_csv<S: ExpenseStore + ?Sized>(store: &mut S, path: &Path) -> Result<usize, AppError> {
    let file = File::open(path)?;
    let inputs = read_expenses(file)?;

    for input in &inputs {
        store.insert(input)?;
    }
    info!("Imported {} expenses from {}", inputs.len(), path.display());
    Ok(inputs.len())
}

fn read_expenses<R: std::io::Read>(reader: R) -> Result<Vec<ExpenseInput>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut inputs = Vec::new();
    for (line_index, result) in reader.records().enumerate() {
        let record = result?;
        let line = line_index + 1;

        if record.len() < 3 || record.len() > 4 {
            return Err(AppError::CsvColumns {
                line,
                found: record.len(),
            });
        }

        let date = record.get(0).unwrap_or("");
        let amount = record.get(1).unwrap_or("");
        let category = record.get(2).unwrap_or("");
        let description = record.get(3).unwrap_or("");

        let input = parse_expense(amount, category, date, description)
            .map_err(|source| AppError::Import { line, source })?;
        inputs.push(input);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryExpenseStore;
    use crate::error::ValidationError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_csv(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test CSV");
        tmp
    }

    #[test]
    fn test_import_csv_success() {
        let mut store = MemoryExpenseStore::new();
        let tmp = write_temp_csv(
            "\
2024-03-05,45.00,Food,Lunch
2024-03-06,2.50,Transport
",
        );

        let count = import_csv(&mut store, tmp.path()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.all().len(), 2);
        assert_eq!(store.all()[0].description.as_deref(), Some("Lunch"));
        assert_eq!(store.all()[1].description, None);
    }

    #[test]
    fn test_import_csv_bad_row_inserts_nothing() {
        let mut store = MemoryExpenseStore::new();
        let tmp = write_temp_csv(
            "\
2024-03-05,45.00,Food,Lunch
2024-03-06,0,Transport,Bus
",
        );

        let result = import_csv(&mut store, tmp.path());

        match result {
            Err(AppError::Import { line, source }) => {
                assert_eq!(line, 2);
                assert_eq!(source, ValidationError::AmountNotPositive);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_import_csv_wrong_column_count() {
        let mut store = MemoryExpenseStore::new();
        let tmp = write_temp_csv("2024-03-05,45.00\n");

        let result = import_csv(&mut store, tmp.path());
        assert!(result.unwrap_err().to_string().contains("line 1"));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let mut store = MemoryExpenseStore::new();
        let result = import_csv(&mut store, Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
