use crate::db::store::ExpenseStore;
use crate::models::period::Period;
use crate::operations::list::{MonthListing, load_month};
use log::warn;

/// What the running application remembers between key presses: the selected
/// periods and the rows currently on screen. Nothing here is persisted.
#[derive(Debug, Clone)]
pub struct Session {
    pub list_period: Period,
    pub report_period: Period,
    pub listing: MonthListing,
    /// Set when the last reload could not reach the store.
    pub load_error: Option<String>,
}

impl Session {
    pub fn new(period: Period) -> Self {
        Self {
            list_period: period,
            report_period: period,
            listing: MonthListing::empty(period),
            load_error: None,
        }
    }

    /// Reload the listing for `list_period`. A storage failure leaves an empty
    /// listing behind instead of an error.
    pub fn reload<S: ExpenseStore + ?Sized>(&mut self, store: &S) {
        match load_month(store, self.list_period) {
            Ok(listing) => {
                self.listing = listing;
                self.load_error = None;
            }
            Err(e) => {
                warn!("Error fetching expenses for {}: {}", self.list_period, e);
                self.listing = MonthListing::empty(self.list_period);
                self.load_error = Some(e.to_string());
            }
        }
    }
}
