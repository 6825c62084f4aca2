use crate::db::store::ExpenseStore;
use crate::error::StorageError;
use crate::models::period::Period;
use crate::models::transaction::{ExpenseInput, Transaction};
use chrono::Local;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// In-memory [`ExpenseStore`] for tests of the layers above storage.
#[derive(Debug, Default)]
pub struct MemoryExpenseStore {
    transactions: Vec<Transaction>,
    next_id: i64,
    /// When set, every call fails as if the database were unreachable.
    pub offline: bool,
    /// Number of write calls that reached the store.
    pub writes: usize,
}

impl MemoryExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    fn check_online(&self) -> Result<(), StorageError> {
        if self.offline {
            return Err(StorageError::Connection(rusqlite::Error::InvalidPath(
                "offline".into(),
            )));
        }
        Ok(())
    }
}

impl ExpenseStore for MemoryExpenseStore {
    fn insert(&mut self, input: &ExpenseInput) -> Result<i64, StorageError> {
        self.check_online()?;
        self.writes += 1;
        self.next_id += 1;
        self.transactions.push(Transaction {
            id: self.next_id,
            amount: input.amount,
            category: input.category.clone(),
            date: input.date,
            description: input.description.clone(),
            created_at: Local::now().naive_local(),
        });
        Ok(self.next_id)
    }

    fn list_for_month(&self, period: Period) -> Result<Vec<Transaction>, StorageError> {
        self.check_online()?;
        let mut listed: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .cloned()
            .collect();
        listed.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
        Ok(listed)
    }

    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, StorageError> {
        self.check_online()?;
        let mut totals = BTreeMap::new();
        for tx in self.transactions.iter().filter(|t| period.contains(t.date)) {
            *totals.entry(tx.category.clone()).or_insert(Decimal::ZERO) += tx.amount;
        }
        Ok(totals)
    }

    fn update(&mut self, id: i64, input: &ExpenseInput) -> Result<(), StorageError> {
        self.check_online()?;
        self.writes += 1;
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StorageError::NotFound(id))?;
        tx.amount = input.amount;
        tx.category = input.category.clone();
        tx.date = input.date;
        tx.description = input.description.clone();
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), StorageError> {
        self.check_online()?;
        self.writes += 1;
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(StorageError::NotFound(id))?;
        self.transactions.remove(pos);
        Ok(())
    }
}
