//! Error types for bank operations.

use thiserror::Error;

use crate::Amount;
use crate::model::{AccountNumber, CustomerId};

/// Top-level error returned by [`Bank`](super::Bank) operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BankError {
    #[error("customer {0} not found")]
    CustomerNotFound(CustomerId),

    #[error("customer {0} has no account")]
    NoAccount(CustomerId),

    #[error("a customer with id {0} already exists")]
    DuplicateCustomer(CustomerId),

    #[error("account {0} is not registered")]
    UnknownAccount(AccountNumber),

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

/// Error from applying a [`Transaction`](crate::Transaction) to an account.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("deposit failed: {0}")]
    Deposit(#[from] DepositError),

    #[error("withdrawal failed: {0}")]
    Withdrawal(#[from] WithdrawalError),
}

/// Error during deposit processing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DepositError {
    #[error("invalid amount {0}")]
    InvalidAmount(Amount),

    #[error("balance {balance} cannot take {requested} more")]
    Overflow { balance: Amount, requested: Amount },
}

/// Error during withdrawal processing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithdrawalError {
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Amount, requested: Amount },

    #[error("invalid amount {0}")]
    InvalidAmount(Amount),

    #[error("amount {requested} exceeds the withdrawal limit of {ceiling}")]
    ExceedsLimit { ceiling: Amount, requested: Amount },

    #[error("maximum number of withdrawals ({0}) reached")]
    MaxWithdrawals(usize),
}
