pub mod amount;
pub mod bank;
pub mod csv;
pub mod model;
pub mod shell;

pub use amount::Amount;
pub use bank::Bank;
pub use model::{AccountNumber, Command, CustomerId, NewCustomer, Transaction, TransactionKind};
