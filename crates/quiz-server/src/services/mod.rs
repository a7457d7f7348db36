//! Business logic services

pub mod catalog;
pub mod directory;
pub mod ledger;

pub use catalog::QuestionCatalog;
pub use directory::UserDirectory;
pub use ledger::ProgressLedger;
