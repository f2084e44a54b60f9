pub mod balances;
pub mod check;
pub mod expenses;
pub mod friends;
pub mod setup;
pub mod ui;
