//! In-memory bank.
//!
//! The bank owns the customer and account registries and routes money
//! movements to a customer's first account. Every failure is returned to the
//! caller; nothing here is fatal.
//! Also supports an async stream of commands.

use std::fmt;

use tokio_stream::{Stream, StreamExt};
use tracing::info;

use crate::Amount;
use crate::model::{AccountNumber, Command, CustomerId, NewCustomer, Transaction};

mod account;
pub use account::{Account, CheckingAccount, CheckingPolicy, DEFAULT_BRANCH, Ledger};

mod config;
pub use config::BankConfig;

mod customer;
pub use customer::Customer;

mod error;
pub use error::{BankError, DepositError, TransactionError, WithdrawalError};

mod history;
pub use history::{History, HistoryEntry};

pub mod registry;

mod transaction;

/// Customers and their checking accounts, in creation order.
pub struct Bank {
    config: BankConfig,
    customers: Vec<Customer>,
    accounts: Vec<CheckingAccount>,
}

/// Public API
impl Bank {
    pub fn new() -> Self {
        Self::with_config(BankConfig::default())
    }

    pub fn with_config(config: BankConfig) -> Self {
        Self {
            config,
            customers: Vec::new(),
            accounts: Vec::new(),
        }
    }

    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Run the bank with the given command stream
    pub async fn run(&mut self, mut stream: impl Stream<Item = Command> + Unpin) {
        while let Some(command) = stream.next().await {
            // a rejected command must not stop the run, results are logged by `apply`
            let _ = self.apply(command);
        }
    }

    /// Apply a single command on top of the current state
    pub fn apply(&mut self, command: Command) -> Result<(), BankError> {
        match command {
            Command::NewCustomer(data) => {
                let id = data.id.clone();
                let result = self.create_customer(data).map(|_| ());
                Self::log_result("new customer", &id, None, None, &result);
                result
            }
            Command::NewAccount { customer } => {
                let result = self.create_account(&customer);
                let number = result.as_ref().ok().copied();
                let result = result.map(|_| ());
                Self::log_result("new account", &customer, number, None, &result);
                result
            }
            Command::Deposit { customer, amount } => {
                let result = self.transact(&customer, Transaction::Deposit(amount));
                Self::log_transaction("deposit", &customer, amount, result)
            }
            Command::Withdraw { customer, amount } => {
                let result = self.transact(&customer, Transaction::Withdrawal(amount));
                Self::log_transaction("withdrawal", &customer, amount, result)
            }
        }
    }

    /// Register a customer. Ids are unique across the bank.
    pub fn create_customer(&mut self, data: NewCustomer) -> Result<&Customer, BankError> {
        if registry::find_customer(&data.id, &self.customers).is_some() {
            return Err(BankError::DuplicateCustomer(data.id));
        }

        self.customers.push(Customer::new(data));
        Ok(&self.customers[self.customers.len() - 1])
    }

    /// Open a checking account for an existing customer.
    ///
    /// Numbers are sequential, starting at 1.
    pub fn create_account(&mut self, id: &CustomerId) -> Result<AccountNumber, BankError> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id() == id)
            .ok_or_else(|| BankError::CustomerNotFound(id.clone()))?;

        let number = AccountNumber(self.accounts.len() as u32 + 1);
        let ledger = Ledger::new(number, self.config.branch.clone(), id.clone());
        self.accounts.push(CheckingAccount::new(ledger, self.config.policy));
        customer.add_account(number);

        Ok(number)
    }

    /// Deposit into the customer's first account.
    pub fn deposit(&mut self, id: &CustomerId, amount: Amount) -> Result<AccountNumber, BankError> {
        self.transact(id, Transaction::Deposit(amount))
    }

    /// Withdraw from the customer's first account.
    pub fn withdraw(&mut self, id: &CustomerId, amount: Amount) -> Result<AccountNumber, BankError> {
        self.transact(id, Transaction::Withdrawal(amount))
    }

    /// History and balance of the customer's first account.
    pub fn statement(&self, id: &CustomerId) -> Result<Statement<'_>, BankError> {
        let customer = self
            .find_customer(id)
            .ok_or_else(|| BankError::CustomerNotFound(id.clone()))?;
        let number = registry::first_account(customer)?;
        let account = self
            .account(number)
            .ok_or(BankError::UnknownAccount(number))?;

        Ok(Statement { account })
    }

    pub fn find_customer(&self, id: &CustomerId) -> Option<&Customer> {
        registry::find_customer(id, &self.customers)
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Account numbers are registry positions plus 1.
    pub fn account(&self, number: AccountNumber) -> Option<&CheckingAccount> {
        self.accounts.get(Self::index_of(number)?)
    }

    /// Every account with its holder, in opening order.
    pub fn accounts(&self) -> impl Iterator<Item = AccountSummary<'_>> {
        self.accounts.iter().filter_map(|account| {
            let holder = self.find_customer(account.owner())?;
            Some(AccountSummary { account, holder })
        })
    }
}

/// Private API
impl Bank {
    /// Find the customer, select their first account, then let the customer
    /// perform `tx` on it.
    fn transact(&mut self, id: &CustomerId, tx: Transaction) -> Result<AccountNumber, BankError> {
        let customer = registry::find_customer(id, &self.customers)
            .ok_or_else(|| BankError::CustomerNotFound(id.clone()))?;
        let number = registry::first_account(customer)?;
        let account = Self::index_of(number)
            .and_then(|index| self.accounts.get_mut(index))
            .ok_or(BankError::UnknownAccount(number))?;

        customer.perform(account, &tx)?;
        Ok(number)
    }

    fn index_of(number: AccountNumber) -> Option<usize> {
        number.0.checked_sub(1).map(|index| index as usize)
    }

    fn log_transaction(
        op: &str,
        customer: &CustomerId,
        amount: Amount,
        result: Result<AccountNumber, BankError>,
    ) -> Result<(), BankError> {
        let number = result.as_ref().ok().copied();
        let result = result.map(|_| ());
        Self::log_result(op, customer, number, Some(amount), &result);
        result
    }

    /// Small helper to log `apply` results
    fn log_result<E: fmt::Display>(
        op: &str,
        customer: &CustomerId,
        account: Option<AccountNumber>,
        amount: Option<Amount>,
        result: &Result<(), E>,
    ) {
        match result {
            Ok(()) => {
                info!(
                    customer = %customer,
                    account = account.map(|n| n.0),
                    amount = amount.map(tracing::field::display),
                    "{op} applied"
                );
            }
            Err(e) => {
                info!(
                    customer = %customer,
                    amount = amount.map(tracing::field::display),
                    reason = %e,
                    "{op} skipped"
                );
            }
        }
    }
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

/// An account as shown in the account listing.
pub struct AccountSummary<'a> {
    pub account: &'a CheckingAccount,
    pub holder: &'a Customer,
}

impl fmt::Display for AccountSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch:\t\t{}", self.account.ledger().branch())?;
        writeln!(f, "Account:\t{}", self.account.number())?;
        write!(f, "Holder:\t\t{}", self.holder.name())
    }
}

/// Transactions and balance of one account.
pub struct Statement<'a> {
    pub account: &'a CheckingAccount,
}

impl fmt::Display for Statement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.account.history();
        if history.is_empty() {
            writeln!(f, "No transactions recorded.")?;
        }
        for entry in history.iter() {
            writeln!(
                f,
                "{}  {:<10} $ {:>12}",
                entry.timestamp.format("%d-%m-%Y %H:%M:%S"),
                entry.kind,
                entry.amount
            )?;
        }
        write!(f, "\nBalance:\t$ {}", self.account.balance())
    }
}
