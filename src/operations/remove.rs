use crate::db::store::ExpenseStore;
use crate::error::AppError;

pub fn delete_expense<S: ExpenseStore + ?Sized>(store: &mut S, id: i64) -> Result<(), AppError> {
    store.delete(id)?;
    Ok(())
}
