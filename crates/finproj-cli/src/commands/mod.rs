pub mod loan;
pub mod savings;
pub mod scenarios;
