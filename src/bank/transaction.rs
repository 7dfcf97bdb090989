use crate::Transaction;
use crate::bank::account::Account;
use crate::bank::error::TransactionError;

impl Transaction {
    /// Apply this transaction to `account`.
    ///
    /// The transaction is recorded in the account history only when the
    /// account accepted it.
    pub fn apply<A: Account + ?Sized>(&self, account: &mut A) -> Result<(), TransactionError> {
        match *self {
            Transaction::Deposit(amount) => account.deposit(amount)?,
            Transaction::Withdrawal(amount) => account.withdraw(amount)?,
        }
        account.history_mut().record(self);
        Ok(())
    }
}
