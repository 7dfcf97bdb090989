//! Core domain types for the banking simulator.

use std::fmt;

use crate::Amount;

/// Customer identifier (tax id, as typed by the operator).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account number, assigned sequentially starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountNumber(pub u32);

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind tag of a money movement, as stored in an account history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::Withdrawal => "Withdrawal",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A money movement requested against an account.
///
/// The amount is taken as given: whether it is acceptable is decided by the
/// account when the transaction is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transaction {
    /// Credit funds to the account balance.
    Deposit(Amount),
    /// Debit funds from the account balance.
    Withdrawal(Amount),
}

impl Transaction {
    pub fn amount(&self) -> Amount {
        match self {
            Transaction::Deposit(amount) | Transaction::Withdrawal(amount) => *amount,
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self {
            Transaction::Deposit(_) => TransactionKind::Deposit,
            Transaction::Withdrawal(_) => TransactionKind::Withdrawal,
        }
    }
}

/// Identity data for a customer that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub id: CustomerId,
    pub name: String,
    /// Free text, `dd-mm-yyyy` by convention.
    pub birth_date: String,
    pub address: String,
}

/// An operation against the bank, as read from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a customer.
    NewCustomer(NewCustomer),
    /// Open a checking account for an existing customer.
    NewAccount { customer: CustomerId },
    /// Deposit into the customer's first account.
    Deposit { customer: CustomerId, amount: Amount },
    /// Withdraw from the customer's first account.
    Withdraw { customer: CustomerId, amount: Amount },
}
