//! The service interface between the user interface and storage.

use crate::config::Config;
use crate::db::{connection, repository};
use crate::error::StorageError;
use crate::models::period::Period;
use crate::models::transaction::{ExpenseInput, Transaction};
use log::info;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Creates, reads, aggregates, updates and deletes expenses.
pub trait ExpenseStore {
    /// Store a new expense and return its identifier.
    fn insert(&mut self, input: &ExpenseInput) -> Result<i64, StorageError>;

    /// Expenses dated within `period`, newest first.
    fn list_for_month(&self, period: Period) -> Result<Vec<Transaction>, StorageError>;

    /// Total amount per category within `period`.
    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, StorageError>;

    /// Replace every mutable field of the expense `id`.
    ///
    /// Returns [`StorageError::NotFound`] if no such expense exists.
    fn update(&mut self, id: i64, input: &ExpenseInput) -> Result<(), StorageError>;

    /// Returns [`StorageError::NotFound`] if no such expense exists.
    fn delete(&mut self, id: i64) -> Result<(), StorageError>;
}

/// SQLite-backed store. Each call opens its own connection and closes it when
/// the statement finishes.
#[derive(Debug, Clone)]
pub struct SqliteExpenseStore {
    config: Config,
}

impl SqliteExpenseStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Create the database and table if absent. Safe to call on every start.
    pub fn initialize(&self) -> Result<(), StorageError> {
        connection::initialize(&self.config.database_path)?;
        info!(
            "Expense database ready at {}",
            self.config.database_path.display()
        );
        Ok(())
    }

    fn connect(&self) -> Result<rusqlite::Connection, StorageError> {
        connection::open_connection(&self.config.database_path)
    }
}

impl ExpenseStore for SqliteExpenseStore {
    fn insert(&mut self, input: &ExpenseInput) -> Result<i64, StorageError> {
        let conn = self.connect()?;
        let id = repository::insert_transaction(&conn, input)?;
        info!("Added expense {} ({} {})", id, input.category, input.amount);
        Ok(id)
    }

    fn list_for_month(&self, period: Period) -> Result<Vec<Transaction>, StorageError> {
        let conn = self.connect()?;
        repository::get_transactions_for_month(&conn, period)
    }

    fn sum_by_category(&self, period: Period) -> Result<BTreeMap<String, Decimal>, StorageError> {
        let conn = self.connect()?;
        repository::get_totals_by_category(&conn, period)
    }

    fn update(&mut self, id: i64, input: &ExpenseInput) -> Result<(), StorageError> {
        let conn = self.connect()?;
        repository::update_transaction(&conn, id, input)?;
        info!("Updated expense {}", id);
        Ok(())
    }

    fn delete(&mut self, id: i64) -> Result<(), StorageError> {
        let conn = self.connect()?;
        repository::remove_transaction(&conn, id)?;
        info!("Deleted expense {}", id);
        Ok(())
    }
}
