use crate::db::store::ExpenseStore;
use crate::error::StorageError;
use crate::models::period::Period;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::collections::BTreeMap;

/// One category's part of a monthly report.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub category: String,
    pub total: Decimal,
    /// Share of the period's spending, in percent.
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportData {
    pub period: Period,
    /// Largest total first; ties ordered by category name.
    pub slices: Vec<CategorySlice>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// Nothing was spent in the period. Not an error.
    NoData(Period),
    Report(ReportData),
}

pub fn build_report<S: ExpenseStore + ?Sized>(
    store: &S,
    period: Period,
) -> Result<ReportOutcome, StorageError> {
    let totals = store.sum_by_category(period)?;
    Ok(report_from_totals(period, totals))
}

fn report_from_totals(period: Period, totals: BTreeMap<String, Decimal>) -> ReportOutcome {
    if totals.is_empty() {
        return ReportOutcome::NoData(period);
    }

    let total = totals.values().fold(Decimal::ZERO, |acc, v| acc + *v);
    let total_f64 = total.to_f64().unwrap_or(0.0);

    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(category, amount)| {
            let share = if total_f64 > 0.0 {
                amount.to_f64().unwrap_or(0.0) / total_f64 * 100.0
            } else {
                0.0
            };
            CategorySlice {
                category,
                total: amount,
                share,
            }
        })
        .collect();
    // BTreeMap iteration already sorted by name, so a stable sort keeps ties in name order.
    slices.sort_by(|a, b| b.total.cmp(&a.total));

    ReportOutcome::Report(ReportData {
        period,
        slices,
        total,
    })
}
