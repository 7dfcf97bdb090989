//! Interactive text menu over a [`Bank`].

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::bank::BankError;
use crate::{Amount, Bank, Command, CustomerId, NewCustomer};

const MENU: &str = "
================ MENU ================
[d]\tDeposit
[s]\tWithdraw
[e]\tStatement
[nc]\tNew account
[lc]\tList accounts
[nu]\tNew customer
[q]\tQuit
=> ";

/// Reads menu choices from `input` and writes prompts and results to `output`.
pub struct Shell<R, W> {
    bank: Bank,
    input: R,
    output: W,
}

enum Movement {
    Deposit,
    Withdraw,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(bank: Bank, input: R, output: W) -> Self {
        Self {
            bank,
            input,
            output,
        }
    }

    pub fn into_bank(self) -> Bank {
        self.bank
    }

    /// Loop until the operator quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt(MENU)? else {
                break;
            };
            debug!(choice = %choice, "menu option");

            let keep_going = match choice.as_str() {
                "d" => self.money(Movement::Deposit)?,
                "s" => self.money(Movement::Withdraw)?,
                "e" => self.statement()?,
                "nc" => self.new_account()?,
                "lc" => self.list_accounts()?,
                "nu" => self.new_customer()?,
                "q" => false,
                _ => {
                    self.failure("invalid option, please select a menu entry again")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()
    }

    /// Print `label` and read one trimmed line, `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn success(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "\n=== {message} ===")
    }

    fn failure(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "\n@@@ Operation failed! {message} @@@")
    }

    fn money(&mut self, movement: Movement) -> io::Result<bool> {
        let Some(raw) = self.prompt("Customer id: ")? else {
            return Ok(false);
        };
        let customer = CustomerId::new(raw);
        if self.bank.find_customer(&customer).is_none() {
            self.failure(BankError::CustomerNotFound(customer))?;
            return Ok(true);
        }

        let label = match movement {
            Movement::Deposit => "Deposit amount: ",
            Movement::Withdraw => "Withdrawal amount: ",
        };
        let Some(raw) = self.prompt(label)? else {
            return Ok(false);
        };
        let amount: Amount = match raw.parse() {
            Ok(amount) => amount,
            Err(e) => {
                self.failure(e)?;
                return Ok(true);
            }
        };

        let (command, done) = match movement {
            Movement::Deposit => (Command::Deposit { customer, amount }, "Deposit completed!"),
            Movement::Withdraw => (
                Command::Withdraw { customer, amount },
                "Withdrawal completed!",
            ),
        };
        match self.bank.apply(command) {
            Ok(()) => self.success(done)?,
            Err(e) => self.failure(e)?,
        }
        Ok(true)
    }

    fn statement(&mut self) -> io::Result<bool> {
        let Some(raw) = self.prompt("Customer id: ")? else {
            return Ok(false);
        };
        match self.bank.statement(&CustomerId::new(raw)) {
            Ok(statement) => {
                writeln!(self.output, "\n================ STATEMENT ================")?;
                writeln!(self.output, "{statement}")?;
                writeln!(self.output, "===========================================")?;
            }
            Err(e) => self.failure(e)?,
        }
        Ok(true)
    }

    fn new_customer(&mut self) -> io::Result<bool> {
        let Some(raw) = self.prompt("Tax id (digits only): ")? else {
            return Ok(false);
        };
        let id = CustomerId::new(raw);
        // refuse before asking for the rest of the data
        if self.bank.find_customer(&id).is_some() {
            self.failure(BankError::DuplicateCustomer(id))?;
            return Ok(true);
        }

        let Some(name) = self.prompt("Full name: ")? else {
            return Ok(false);
        };
        let Some(birth_date) = self.prompt("Birth date (dd-mm-yyyy): ")? else {
            return Ok(false);
        };
        let Some(address) = self.prompt("Address (street, nr - district - city/state): ")? else {
            return Ok(false);
        };

        let command = Command::NewCustomer(NewCustomer {
            id,
            name,
            birth_date,
            address,
        });
        match self.bank.apply(command) {
            Ok(()) => self.success("Customer created!")?,
            Err(e) => self.failure(e)?,
        }
        Ok(true)
    }

    fn new_account(&mut self) -> io::Result<bool> {
        let Some(raw) = self.prompt("Customer id: ")? else {
            return Ok(false);
        };
        let command = Command::NewAccount {
            customer: CustomerId::new(raw),
        };
        match self.bank.apply(command) {
            Ok(()) => self.success("Account created!")?,
            Err(e) => self.failure(e)?,
        }
        Ok(true)
    }

    fn list_accounts(&mut self) -> io::Result<bool> {
        let rule = "=".repeat(100);
        for summary in self.bank.accounts() {
            writeln!(self.output, "{rule}")?;
            writeln!(self.output, "{summary}")?;
        }
        Ok(true)
    }
}
