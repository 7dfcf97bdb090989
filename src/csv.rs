use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::amount::ParseAmountError;
use crate::bank::Account;
use crate::{Amount, Bank, Command, CustomerId, NewCustomer};

/// Errors that can occur when reading a csv script
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: csv::Error },

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized operation '{op}'")]
    UnrecognizedOp { line: usize, op: String },

    #[error("line {line}: {op} missing {field}")]
    MissingField {
        line: usize,
        op: String,
        field: &'static str,
    },

    #[error("line {line}: invalid amount: {source}")]
    InvalidAmount {
        line: usize,
        source: ParseAmountError,
    },
}

#[derive(Debug, Deserialize)]
struct InputRow {
    op: String,
    customer: String,
    #[serde(default)]
    amount: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    birth_date: Option<String>,
    #[serde(default)]
    address: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutputRow<'a> {
    account: u32,
    branch: &'a str,
    customer: &'a str,
    holder: &'a str,
    balance: String,
    withdrawals: usize,
}

/// Read bank commands from a csv script.
///
/// Header: `op,customer,amount,name,birth_date,address`. Trailing columns a
/// row does not use may be left out.
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let path = path.as_ref();
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|source| CsvError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

fn parse_row(line: usize, row: InputRow) -> Result<Command, CsvError> {
    let customer = CustomerId::new(row.customer);
    let amount = |op: &str| -> Result<Amount, CsvError> {
        let raw = row
            .amount
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| CsvError::MissingField {
                line,
                op: op.to_string(),
                field: "amount",
            })?;
        raw.parse()
            .map_err(|source| CsvError::InvalidAmount { line, source })
    };

    match row.op.as_str() {
        "customer" => {
            let name = row
                .name
                .clone()
                .filter(|name| !name.is_empty())
                .ok_or_else(|| CsvError::MissingField {
                    line,
                    op: "customer".to_string(),
                    field: "name",
                })?;
            Ok(Command::NewCustomer(NewCustomer {
                id: customer,
                name,
                birth_date: row.birth_date.clone().unwrap_or_default(),
                address: row.address.clone().unwrap_or_default(),
            }))
        }
        "account" => Ok(Command::NewAccount { customer }),
        "deposit" => Ok(Command::Deposit {
            amount: amount("deposit")?,
            customer,
        }),
        "withdraw" => Ok(Command::Withdraw {
            amount: amount("withdraw")?,
            customer,
        }),
        other => Err(CsvError::UnrecognizedOp {
            line,
            op: other.to_string(),
        }),
    }
}

/// Write every account of `bank` in csv format
pub fn write_accounts(bank: &Bank, writer: impl io::Write) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(writer);

    for summary in bank.accounts() {
        let account = summary.account;
        let row = OutputRow {
            account: account.number().0,
            branch: account.ledger().branch(),
            customer: summary.holder.id().as_str(),
            holder: summary.holder.name(),
            balance: account.balance().to_string(),
            withdrawals: account.withdrawal_count(),
        };
        writer.serialize(&row)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn read(content: &str) -> Vec<Result<Command, CsvError>> {
        let file = write_csv(content);
        read_commands(file.path()).unwrap().collect()
    }

    const HEADER: &str = "op,customer,amount,name,birth_date,address\n";

    #[test]
    fn read_customer() {
        let results = read(&format!(
            "{HEADER}customer,111,,Alice Souza,01-02-1990,\"Rua A, 1 - Recife/PE\"\n"
        ));
        assert_eq!(results.len(), 1);

        let command = results.into_iter().next().unwrap().unwrap();
        assert_eq!(
            command,
            Command::NewCustomer(NewCustomer {
                id: CustomerId::from("111"),
                name: "Alice Souza".to_string(),
                birth_date: "01-02-1990".to_string(),
                address: "Rua A, 1 - Recife/PE".to_string(),
            })
        );
    }

    #[test]
    fn read_account_with_short_row() {
        let results = read(&format!("{HEADER}account,111\n"));
        assert_eq!(results.len(), 1);
        assert_eq!(
            *results[0].as_ref().unwrap(),
            Command::NewAccount {
                customer: CustomerId::from("111")
            }
        );
    }

    #[test]
    fn read_deposit_and_withdraw() {
        let results = read(&format!(
            "{HEADER}deposit, 111, 10.5,,,\nwithdraw,111,-3,,,\n"
        ));
        assert_eq!(results.len(), 2);
        assert_eq!(
            *results[0].as_ref().unwrap(),
            Command::Deposit {
                customer: CustomerId::from("111"),
                amount: Amount::from_float(10.5),
            }
        );
        // sign is judged by the account, not the reader
        assert_eq!(
            *results[1].as_ref().unwrap(),
            Command::Withdraw {
                customer: CustomerId::from("111"),
                amount: Amount::from_units(-3),
            }
        );
    }

    #[test]
    fn read_returns_error_for_unknown_op() {
        let results = read(&format!("{HEADER}transfer,111,10,,,\n"));
        assert_eq!(results.len(), 1);
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::UnrecognizedOp { line: 2, .. }));
    }

    #[test]
    fn read_returns_error_for_missing_amount() {
        let results = read(&format!("{HEADER}deposit,111,,,,\n"));
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::MissingField {
                line: 2,
                field: "amount",
                ..
            }
        ));
        assert_eq!(err.to_string(), "line 2: deposit missing amount");
    }

    #[test]
    fn read_returns_error_for_bad_amount() {
        let results = read(&format!("{HEADER}account,111\nwithdraw,111,ten,,,\n"));
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err();
        assert!(matches!(err, CsvError::InvalidAmount { line: 3, .. }));
    }

    #[test]
    fn read_returns_error_for_nameless_customer() {
        let results = read(&format!("{HEADER}customer,111,,,,\n"));
        let err = results[0].as_ref().unwrap_err();
        assert!(matches!(
            err,
            CsvError::MissingField {
                field: "name",
                ..
            }
        ));
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_commands(dir.path().join("missing.csv"));
        assert!(matches!(result, Err(CsvError::Open { .. })));
    }

    #[test]
    fn write_accounts_lists_every_account() {
        let mut bank = Bank::new();
        for (id, name) in [("111", "Alice"), ("222", "Bob")] {
            bank.create_customer(NewCustomer {
                id: CustomerId::from(id),
                name: name.to_string(),
                birth_date: String::new(),
                address: String::new(),
            })
            .unwrap();
            bank.create_account(&CustomerId::from(id)).unwrap();
        }
        bank.deposit(&CustomerId::from("111"), Amount::from_units(100))
            .unwrap();
        bank.withdraw(&CustomerId::from("111"), Amount::from_float(25.5))
            .unwrap();

        let mut out = Vec::new();
        write_accounts(&bank, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "account,branch,customer,holder,balance,withdrawals",
                "1,0001,111,Alice,74.50,1",
                "2,0001,222,Bob,0.00,0",
            ]
        );
    }
}
