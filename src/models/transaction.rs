use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Categories offered by the entry form. Storage accepts any non-empty name.
pub const SUGGESTED_CATEGORIES: [&str; 8] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Education",
    "Other",
];

/// Longest category name the `transactions` table is meant to hold.
pub const MAX_CATEGORY_LEN: usize = 50;

/// One recorded expense as stored in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// The mutable fields of a transaction after validation.
///
/// Built by [`crate::operations::add::parse_expense`]; the store never sees
/// unchecked user input.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseInput {
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl ExpenseInput {
    pub fn new(
        amount: Decimal,
        category: String,
        date: NaiveDate,
        description: Option<String>,
    ) -> Self {
        Self {
            amount,
            category,
            date,
            description,
        }
    }
}

impl Transaction {
    #[cfg(test)]
    pub fn input(&self) -> ExpenseInput {
        ExpenseInput::new(
            self.amount,
            self.category.clone(),
            self.date,
            self.description.clone(),
        )
    }
}
