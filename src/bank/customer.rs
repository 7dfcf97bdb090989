use crate::Transaction;
use crate::bank::account::Account;
use crate::bank::error::TransactionError;
use crate::model::{AccountNumber, CustomerId, NewCustomer};

/// A registered customer and the accounts opened for them, in opening order.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    name: String,
    birth_date: String,
    address: String,
    accounts: Vec<AccountNumber>,
}

impl Customer {
    pub fn new(data: NewCustomer) -> Self {
        Self {
            id: data.id,
            name: data.name,
            birth_date: data.birth_date,
            address: data.address,
            accounts: Vec::new(),
        }
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn accounts(&self) -> &[AccountNumber] {
        &self.accounts
    }

    pub fn add_account(&mut self, number: AccountNumber) {
        self.accounts.push(number);
    }

    /// Run `tx` against one of this customer's accounts.
    pub fn perform<A: Account + ?Sized>(
        &self,
        account: &mut A,
        tx: &Transaction,
    ) -> Result<(), TransactionError> {
        tx.apply(account)
    }
}
