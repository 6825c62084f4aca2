use crate::db::store::ExpenseStore;
use crate::error::{AppError, ValidationError};
use crate::models::transaction::{ExpenseInput, MAX_CATEGORY_LEN};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 99,999,999.99, the largest value a `DECIMAL(10,2)` column holds.
const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Raw field values as typed into the add form or the edit dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseForm {
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl ExpenseForm {
    pub fn new(amount: &str, category: &str, date: &str, description: &str) -> Self {
        Self {
            amount: amount.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            description: description.to_string(),
        }
    }

    pub fn parse(&self) -> Result<ExpenseInput, ValidationError> {
        parse_expense(&self.amount, &self.category, &self.date, &self.description)
    }
}

/// Validate raw input in the order the form checks it: amount, category, date.
pub fn parse_expense(
    amount: &str,
    category: &str,
    date: &str,
    description: &str,
) -> Result<ExpenseInput, ValidationError> {
    let amount = parse_amount(amount)?;

    let category = category.trim();
    if category.is_empty() {
        return Err(ValidationError::MissingCategory);
    }
    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(ValidationError::CategoryTooLong(MAX_CATEGORY_LEN));
    }

    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(date.trim().to_string()))?;

    let description = description.trim();
    let description = if description.is_empty() {
        None
    } else {
        Some(description.to_string())
    };

    Ok(ExpenseInput::new(amount, category.to_string(), date, description))
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(ValidationError::InvalidAmount(raw.to_string()));
    }

    let amount = Decimal::from_str(digits)
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    if amount <= Decimal::ZERO {
        return Err(ValidationError::AmountNotPositive);
    }
    if amount > MAX_AMOUNT {
        return Err(ValidationError::AmountTooLarge);
    }
    Ok(amount)
}

/// Validate the form and store it. Returns the new expense id.
pub fn add_expense<S: ExpenseStore + ?Sized>(
    store: &mut S,
    form: &ExpenseForm,
) -> Result<i64, AppError> {
    let input = form.parse()?;
    Ok(store.insert(&input)?)
}
