use crate::Amount;
use crate::bank::error::{DepositError, WithdrawalError};
use crate::bank::history::History;
use crate::model::{AccountNumber, CustomerId, TransactionKind};

/// Branch code shared by every account unless configured otherwise.
pub const DEFAULT_BRANCH: &str = "0001";

/// Capability of holding a balance that transactions can be applied to.
///
/// Implementors validate and mutate the balance; recording the transaction
/// in [`History`] is left to the caller (see
/// [`Transaction::apply`](crate::Transaction::apply)).
pub trait Account {
    fn deposit(&mut self, amount: Amount) -> Result<(), DepositError>;

    fn withdraw(&mut self, amount: Amount) -> Result<(), WithdrawalError>;

    fn ledger(&self) -> &Ledger;

    fn history_mut(&mut self) -> &mut History;

    fn balance(&self) -> Amount {
        self.ledger().balance()
    }

    fn history(&self) -> &History {
        self.ledger().history()
    }
}

/// A plain account: balance, identity and history.
#[derive(Debug, Clone)]
pub struct Ledger {
    number: AccountNumber,
    branch: String,
    owner: CustomerId,
    balance: Amount,
    history: History,
}

impl Ledger {
    pub fn new(number: AccountNumber, branch: impl Into<String>, owner: CustomerId) -> Self {
        Self {
            number,
            branch: branch.into(),
            owner,
            balance: Amount::ZERO,
            history: History::new(),
        }
    }

    pub fn number(&self) -> AccountNumber {
        self.number
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn owner(&self) -> &CustomerId {
        &self.owner
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

impl Account for Ledger {
    fn deposit(&mut self, amount: Amount) -> Result<(), DepositError> {
        if !amount.is_positive() {
            return Err(DepositError::InvalidAmount(amount));
        }

        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(DepositError::Overflow {
                balance: self.balance,
                requested: amount,
            })?;
        Ok(())
    }

    /// Insufficient funds is reported before an invalid amount.
    fn withdraw(&mut self, amount: Amount) -> Result<(), WithdrawalError> {
        if amount > self.balance {
            return Err(WithdrawalError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        if !amount.is_positive() {
            return Err(WithdrawalError::InvalidAmount(amount));
        }

        self.balance -= amount;
        Ok(())
    }

    fn ledger(&self) -> &Ledger {
        self
    }

    fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }
}

/// Withdrawal rules of a checking account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckingPolicy {
    /// Largest amount a single withdrawal may take.
    pub ceiling: Amount,
    /// Withdrawals allowed over the lifetime of the account.
    pub max_withdrawals: usize,
}

impl Default for CheckingPolicy {
    fn default() -> Self {
        Self {
            ceiling: Amount::from_units(500),
            max_withdrawals: 3,
        }
    }
}

/// A [`Ledger`] with a per-withdrawal ceiling and a withdrawal count limit.
#[derive(Debug, Clone)]
pub struct CheckingAccount {
    ledger: Ledger,
    policy: CheckingPolicy,
}

impl CheckingAccount {
    pub fn new(ledger: Ledger, policy: CheckingPolicy) -> Self {
        Self { ledger, policy }
    }

    pub fn policy(&self) -> &CheckingPolicy {
        &self.policy
    }

    pub fn number(&self) -> AccountNumber {
        self.ledger.number()
    }

    pub fn owner(&self) -> &CustomerId {
        self.ledger.owner()
    }

    /// Withdrawals recorded since the account was opened.
    ///
    /// The limit is not reset per period.
    pub fn withdrawal_count(&self) -> usize {
        self.ledger.history().count(TransactionKind::Withdrawal)
    }
}

impl Account for CheckingAccount {
    fn deposit(&mut self, amount: Amount) -> Result<(), DepositError> {
        self.ledger.deposit(amount)
    }

    /// Checks run in order: ceiling, withdrawal count, then the ledger rules.
    fn withdraw(&mut self, amount: Amount) -> Result<(), WithdrawalError> {
        let count = self.withdrawal_count();

        if amount > self.policy.ceiling {
            return Err(WithdrawalError::ExceedsLimit {
                ceiling: self.policy.ceiling,
                requested: amount,
            });
        }
        if count >= self.policy.max_withdrawals {
            return Err(WithdrawalError::MaxWithdrawals(self.policy.max_withdrawals));
        }

        self.ledger.withdraw(amount)
    }

    fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    fn history_mut(&mut self) -> &mut History {
        self.ledger.history_mut()
    }
}
