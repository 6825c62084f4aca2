use thiserror::Error;

/// Input problems caught before anything reaches the store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid amount.")]
    InvalidAmount(String),

    #[error("Please enter a valid amount. The amount must be greater than zero.")]
    AmountNotPositive,

    #[error("Please enter a valid amount. The largest accepted amount is 99,999,999.99.")]
    AmountTooLarge,

    #[error("Please select a category.")]
    MissingCategory,

    #[error("Category is too long (max {0} characters).")]
    CategoryTooLong(usize),

    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate(String),
}

/// Failures of the persistence layer.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not connect to the database: {0}")]
    Connection(#[source] rusqlite::Error),

    #[error("Database error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Could not prepare the database location: {0}")]
    Io(#[from] std::io::Error),

    #[error("Expense with ID {0} not found")]
    NotFound(i64),
}

/// Everything a user action can fail with.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Storage(#[from] StorageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Line {line}: {source}")]
    Import {
        line: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid number of columns on line {line}: expected 3 or 4, got {found}")]
    CsvColumns { line: usize, found: usize },

    #[error("Terminal error: {0}")]
    Terminal(String),
}
