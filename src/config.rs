use std::path::PathBuf;

pub const DB_PATH_VAR: &str = "EXPENSE_DB_PATH";
pub const DB_DIR_VAR: &str = "DB_DIR";
pub const DB_NAME_VAR: &str = "DB_NAME";
pub const DEFAULT_DB_NAME: &str = "expense_tracker";

/// Where the expense database lives. Built once at startup and handed to the
/// store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
        }
    }

    /// Resolve the database location from the process environment.
    pub fn from_env(db_override: Option<PathBuf>) -> Self {
        Self::resolve(db_override, |key| std::env::var(key).ok())
    }

    /// Resolution order: explicit override, `EXPENSE_DB_PATH`, then
    /// `DB_DIR`/`DB_NAME` with `.db` appended to the name.
    pub fn resolve<F>(db_override: Option<PathBuf>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = db_override {
            return Self::new(path);
        }
        if let Some(path) = non_empty(DB_PATH_VAR) {
            return Self::new(path);
        }

        let name = non_empty(DB_NAME_VAR).unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        let file_name = if name.ends_with(".db") {
            name
        } else {
            format!("{}.db", name)
        };
        let dir = non_empty(DB_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(file_name))
    }
}
