pub mod add;
pub mod edit;
pub mod import;
pub mod list;
pub mod remove;
pub mod report;
