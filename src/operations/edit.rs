use super::add::ExpenseForm;
use crate::db::store::ExpenseStore;
use crate::error::AppError;
use crate::fmt::money;
use crate::models::transaction::Transaction;

/// Form values pre-filled from an existing expense, as the edit dialog shows
/// them.
pub fn form_for(transaction: &Transaction) -> ExpenseForm {
    let amount = money(transaction.amount);
    ExpenseForm::new(
        amount.trim_start_matches('$'),
        &transaction.category,
        &transaction.date.format("%Y-%m-%d").to_string(),
        transaction.description.as_deref().unwrap_or(""),
    )
}

/// Validate the edited form and replace the stored expense `id` with it.
pub fn update_expense<S: ExpenseStore + ?Sized>(
    store: &mut S,
    id: i64,
    form: &ExpenseForm,
) -> Result<(), AppError> {
    let input = form.parse()?;
    store.update(id, &input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory_store::MemoryExpenseStore;
    use crate::error::{StorageError, ValidationError};
    use crate::models::period::Period;
    use crate::operations::add::add_expense;

    #[test]
    fn test_form_for_prefills_values() {
        let mut store = MemoryExpenseStore::new();
        add_expense(&mut store, &ExpenseForm::new("12.5", "Food", "2024-03-05", "Tea")).unwrap();
        let form = form_for(&store.all()[0]);
        assert_eq!(form, ExpenseForm::new("12.50", "Food", "2024-03-05", "Tea"));
    }

    #[test]
    fn test_update_expense_changes_only_that_row() {
        let mut store = MemoryExpenseStore::new();
        let a = add_expense(&mut store, &ExpenseForm::new("1", "Food", "2024-03-01", "")).unwrap();
        let b = add_expense(&mut store, &ExpenseForm::new("2", "Food", "2024-03-02", "")).unwrap();

        update_expense(&mut store, b, &ExpenseForm::new("9.99", "Health", "2024-03-03", "Pharmacy"))
            .unwrap();

        let listed = store.list_for_month(Period::new(2024, 3).unwrap()).unwrap();
        let changed = listed.iter().find(|t| t.id == b).unwrap();
        let untouched = listed.iter().find(|t| t.id == a).unwrap();
        assert_eq!(changed.category, "Health");
        assert_eq!(changed.description.as_deref(), Some("Pharmacy"));
        assert_eq!(untouched.category, "Food");
        assert_eq!(money(untouched.amount), "$1.00");
    }

    #[test]
    fn test_update_expense_validates_first() {
        let mut store = MemoryExpenseStore::new();
        let id = add_expense(&mut store, &ExpenseForm::new("1", "Food", "2024-03-01", "")).unwrap();
        let writes = store.writes;

        let result = update_expense(&mut store, id, &ExpenseForm::new("1", "", "2024-03-01", ""));

        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::MissingCategory))
        ));
        assert_eq!(store.writes, writes);
    }

    #[test]
    fn test_update_expense_missing_id() {
        let mut store = MemoryExpenseStore::new();
        let result = update_expense(&mut store, 5, &ExpenseForm::new("1", "Food", "2024-03-01", ""));
        assert!(matches!(
            result,
            Err(AppError::Storage(StorageError::NotFound(5)))
        ));
    }
}
