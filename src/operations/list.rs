use crate::db::store::ExpenseStore;
use crate::error::StorageError;
use crate::models::period::Period;
use crate::models::transaction::Transaction;
use rust_decimal::Decimal;

/// The rows shown in the list view for one period, with their running total.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthListing {
    pub period: Period,
    pub transactions: Vec<Transaction>,
    pub total: Decimal,
}

impl MonthListing {
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            transactions: Vec::new(),
            total: Decimal::ZERO,
        }
    }

    pub fn from_transactions(period: Period, transactions: Vec<Transaction>) -> Self {
        let total = transactions
            .iter()
            .fold(Decimal::ZERO, |acc, t| acc + t.amount);
        Self {
            period,
            transactions,
            total,
        }
    }
}

pub fn load_month<S: ExpenseStore + ?Sized>(
    store: &S,
    period: Period,
) -> Result<MonthListing, StorageError> {
    let transactions = store.list_for_month(period)?;
    Ok(MonthListing::from_transactions(period, transactions))
}
