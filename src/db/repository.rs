use crate::error::StorageError;
use crate::models::period::Period;
use crate::models::transaction::{ExpenseInput, Transaction};
use log::debug;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

const SELECT_COLUMNS: &str = "id, amount_cents, category, date, description, created_at";

/// Amounts are validated to two decimals and below `DECIMAL(10,2)` range, so
/// this conversion is exact.
pub fn to_cents(amount: Decimal) -> i64 {
    (amount * Decimal::ONE_HUNDRED)
        .round()
        .to_i64()
        .unwrap_or(i64::MAX)
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn transaction_from_row(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: from_cents(row.get(1)?),
        category: row.get(2)?,
        date: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
    })
}

pub fn insert_transaction(conn: &Connection, input: &ExpenseInput) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO transactions (amount_cents, category, date, description) VALUES (?1, ?2, ?3, ?4)",
        params![
            to_cents(input.amount),
            &input.category,
            input.date,
            &input.description,
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!("Inserted transaction {}", id);
    Ok(id)
}

pub fn get_transactions_for_month(
    conn: &Connection,
    period: Period,
) -> Result<Vec<Transaction>, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions
         WHERE date >= ?1 AND date < ?2
         ORDER BY date DESC, id DESC",
        SELECT_COLUMNS
    ))?;

    let transactions = stmt
        .query_map(params![period.start(), period.end()], transaction_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    debug!("Loaded {} transactions for {}", transactions.len(), period);
    Ok(transactions)
}

pub fn get_totals_by_category(
    conn: &Connection,
    period: Period,
) -> Result<BTreeMap<String, Decimal>, StorageError> {
    let mut stmt = conn.prepare(
        "SELECT category, SUM(amount_cents) FROM transactions
         WHERE date >= ?1 AND date < ?2
         GROUP BY category",
    )?;

    let totals = stmt
        .query_map(params![period.start(), period.end()], |row| {
            let category: String = row.get(0)?;
            let cents: i64 = row.get(1)?;
            Ok((category, from_cents(cents)))
        })?
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    Ok(totals)
}

#[cfg(test)]
pub fn get_transaction(conn: &Connection, id: i64) -> Result<Transaction, StorageError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM transactions WHERE id = ?1",
        SELECT_COLUMNS
    ))?;
    stmt.query_row([id], transaction_from_row)
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => StorageError::NotFound(id),
            other => StorageError::Query(other),
        })
}

pub fn update_transaction(
    conn: &Connection,
    id: i64,
    input: &ExpenseInput,
) -> Result<(), StorageError> {
    let rows_affected = conn.execute(
        "UPDATE transactions
         SET amount_cents = ?1, category = ?2, date = ?3, description = ?4
         WHERE id = ?5",
        params![
            to_cents(input.amount),
            &input.category,
            input.date,
            &input.description,
            id,
        ],
    )?;

    if rows_affected == 0 {
        return Err(StorageError::NotFound(id));
    }
    Ok(())
}

pub fn remove_transaction(conn: &Connection, id: i64) -> Result<(), StorageError> {
    let rows_affected = conn.execute("DELETE FROM transactions WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(StorageError::NotFound(id));
    }
    Ok(())
}
