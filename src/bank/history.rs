use chrono::{DateTime, Utc};

use crate::Amount;
use crate::model::{Transaction, TransactionKind};

/// One recorded money movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: TransactionKind,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

/// Append-only record of the transactions applied to one account, oldest
/// first.
///
/// Recording does not validate anything: callers only record a transaction
/// once the account has accepted it.
#[derive(Debug, Default, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tx`, stamped with the current time.
    pub fn record(&mut self, tx: &Transaction) {
        self.record_at(tx, Utc::now());
    }

    pub fn record_at(&mut self, tx: &Transaction, timestamp: DateTime<Utc>) {
        self.entries.push(HistoryEntry {
            kind: tx.kind(),
            amount: tx.amount(),
            timestamp,
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Number of entries of the given kind over the whole history.
    pub fn count(&self, kind: TransactionKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_history_is_empty() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn record_keeps_insertion_order() {
        let mut history = History::new();
        let first = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();

        history.record_at(&Transaction::Deposit(Amount::from_units(10)), first);
        // earlier timestamp, still appended last
        history.record_at(&Transaction::Withdrawal(Amount::from_units(4)), second);

        let entries = history.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, TransactionKind::Deposit);
        assert_eq!(entries[0].amount, Amount::from_units(10));
        assert_eq!(entries[0].timestamp, first);
        assert_eq!(entries[1].kind, TransactionKind::Withdrawal);
        assert_eq!(entries[1].timestamp, second);
    }

    #[test]
    fn record_stamps_current_time() {
        let before = Utc::now();
        let mut history = History::new();
        history.record(&Transaction::Deposit(Amount::from_units(1)));
        let after = Utc::now();

        let stamp = history.entries()[0].timestamp;
        assert!(before <= stamp && stamp <= after);
    }

    #[test]
    fn count_by_kind() {
        let mut history = History::new();
        history.record(&Transaction::Deposit(Amount::from_units(10)));
        history.record(&Transaction::Withdrawal(Amount::from_units(1)));
        history.record(&Transaction::Withdrawal(Amount::from_units(2)));

        assert_eq!(history.count(TransactionKind::Deposit), 1);
        assert_eq!(history.count(TransactionKind::Withdrawal), 2);
        assert_eq!(history.iter().count(), 3);
    }
}
