//! Lookups over the in-memory customer registry.

use crate::bank::customer::Customer;
use crate::bank::error::BankError;
use crate::model::{AccountNumber, CustomerId};

/// First customer whose id equals `id`, by linear scan.
pub fn find_customer<'a>(id: &CustomerId, customers: &'a [Customer]) -> Option<&'a Customer> {
    customers.iter().find(|c| c.id() == id)
}

/// The account transactions are routed to for `customer`.
///
/// Always the first account opened: a customer with several accounts cannot
/// reach the later ones through this selector.
pub fn first_account(customer: &Customer) -> Result<AccountNumber, BankError> {
    customer
        .accounts()
        .first()
        .copied()
        .ok_or_else(|| BankError::NoAccount(customer.id().clone()))
}
