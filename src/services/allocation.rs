//! Allocation prompt service
//!
//! Drives an `Allocation` from operator input until the whole transaction
//! amount has been assigned. Each input line is a category code optionally
//! followed by an amount; leaving the amount out assigns everything that is
//! still unallocated. Lines the engine cannot use are ignored and the prompt
//! is simply shown again.

use std::io::{BufRead, Write};

use crate::display::format_category_descriptions;
use crate::error::{CardsplitError, CardsplitResult};
use crate::models::{Allocation, CategorySet, TransactionRecord, DESCRIBE_TOKEN};

/// One parsed line of operator input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand<'a> {
    /// Blank line
    Empty,
    /// `?`: list every category description
    DescribeAll,
    /// `<code> ?`: show one category description
    Describe(&'a str),
    /// `<code> [amount]`
    Allocate {
        category: &'a str,
        amount: Option<&'a str>,
    },
}

impl<'a> PromptCommand<'a> {
    /// Parse an input line; tokens past the second are ignored
    pub fn parse(line: &'a str) -> Self {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (None, _) => Self::Empty,
            (Some(DESCRIBE_TOKEN), _) => Self::DescribeAll,
            (Some(code), Some(DESCRIBE_TOKEN)) => Self::Describe(code),
            (Some(category), amount) => Self::Allocate { category, amount },
        }
    }
}

/// Result of prompting for one transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Fully allocated: one ledger cell per category
    Allocated(Vec<String>),
    /// Input ended before the transaction was fully allocated
    Aborted,
}

/// Check the round-trip invariant of a completed allocation
///
/// The engine's clamping and remainder bookkeeping should make this
/// impossible to violate; a failure means a bug, not bad input.
pub fn verify_allocation(id: &str, allocation: &Allocation<'_>) -> CardsplitResult<()> {
    if allocation.allocated_sum() != allocation.original() {
        return Err(CardsplitError::AllocationIntegrity {
            id: id.to_string(),
            allocated: allocation.allocated_sum().to_cents_string(),
            expected: allocation.original().to_cents_string(),
        });
    }
    Ok(())
}

/// Interactive allocation over any line reader and writer
pub struct AllocationPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> AllocationPrompt<R, W> {
    /// Create a new prompt
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writer used for prompts, for callers printing around them
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the reader and writer
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prompt until the record is fully allocated or input runs out
    pub fn allocate(
        &mut self,
        record: &TransactionRecord,
        categories: &CategorySet,
    ) -> CardsplitResult<PromptOutcome> {
        let mut allocation = Allocation::for_record(record, categories)?;

        while !allocation.is_fully_allocated() {
            write!(
                self.output,
                "Allocate Transaction {}[{}]: ",
                allocation.describe(),
                allocation.remainder().to_cents_string()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                log::info!("input ended while allocating {}", record.id());
                return Ok(PromptOutcome::Aborted);
            }

            match PromptCommand::parse(&line) {
                PromptCommand::Empty => {}
                PromptCommand::DescribeAll => {
                    write!(self.output, "{}", format_category_descriptions(categories, None))?;
                }
                PromptCommand::Describe(code) => {
                    write!(
                        self.output,
                        "{}",
                        format_category_descriptions(categories, Some(code))
                    )?;
                }
                PromptCommand::Allocate { category, amount } => {
                    allocation.allocate_input(category, amount);
                    log::debug!(
                        "{}: {} {:?} -> remainder {}",
                        record.id(),
                        category,
                        amount,
                        allocation.remainder()
                    );
                }
            }
        }

        verify_allocation(record.id(), &allocation)?;
        Ok(PromptOutcome::Allocated(allocation.to_output_vector()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, RawEntry};
    use chrono::DateTime;
    use std::io::Cursor;

    fn purchase(amount: &str) -> TransactionRecord {
        TransactionRecord::from_raw(RawEntry {
            id: "Redacted3".into(),
            posted: DateTime::parse_from_rfc3339("2024-11-05T12:00:00+00:00").unwrap(),
            direction: "DEBIT".into(),
            amount: Money::parse(amount).unwrap(),
            description: "Transaction 3".into(),
            memo: None,
        })
        .unwrap()
    }

    fn categories() -> CategorySet {
        CategorySet::new(vec![
            Category::with_description("ap", "Amazon Purchases"),
            Category::with_description("pc", "Petcare"),
            Category::with_description("af", "Auto Fuel"),
        ])
        .unwrap()
    }

    fn run(input: &str, record: &TransactionRecord, categories: &CategorySet) -> (PromptOutcome, String) {
        let mut prompt = AllocationPrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let outcome = prompt.allocate(record, categories).unwrap();
        let (_, output) = prompt.into_inner();
        (outcome, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(PromptCommand::parse("  \n"), PromptCommand::Empty);
        assert_eq!(PromptCommand::parse("?\n"), PromptCommand::DescribeAll);
        assert_eq!(PromptCommand::parse("ap ?"), PromptCommand::Describe("ap"));
        assert_eq!(
            PromptCommand::parse("ap 10.00 extra"),
            PromptCommand::Allocate {
                category: "ap",
                amount: Some("10.00")
            }
        );
        assert_eq!(
            PromptCommand::parse("pc"),
            PromptCommand::Allocate {
                category: "pc",
                amount: None
            }
        );
    }

    #[test]
    fn test_split_purchase() {
        let categories = categories();
        let (outcome, output) = run("ap 10.00\npc\n", &purchase("-15.96"), &categories);

        assert_eq!(
            outcome,
            PromptOutcome::Allocated(vec!["10.00".into(), "5.96".into(), String::new()])
        );
        assert!(output.contains("Allocate Transaction [ap, pc, af, ?][15.96]: "));
        assert!(output.contains("Allocate Transaction [ap(10.00), pc, af, ?][5.96]: "));
    }

    #[test]
    fn test_bad_input_reprompts() {
        let categories = categories();
        let (outcome, output) = run(
            "\nzz 1\nap -1\nap lots\n?\npc ?\naf\n",
            &purchase("-2.50"),
            &categories,
        );

        assert_eq!(
            outcome,
            PromptOutcome::Allocated(vec![String::new(), String::new(), "2.50".into()])
        );
        assert_eq!(output.matches("Allocate Transaction").count(), 7);
        assert!(output.contains("Amazon Purchases"));
        assert!(output.contains("Petcare"));
    }

    #[test]
    fn test_end_of_input_aborts() {
        let categories = categories();
        let (outcome, _) = run("ap 1.00\n", &purchase("-2.50"), &categories);
        assert_eq!(outcome, PromptOutcome::Aborted);
    }

    #[test]
    fn test_zero_amount_needs_no_input() {
        let categories = categories();
        let (outcome, output) = run("", &purchase("0.00"), &categories);
        assert_eq!(outcome, PromptOutcome::Allocated(vec![String::new(); 3]));
        assert!(output.is_empty());
    }

    #[test]
    fn test_uninitialized_categories() {
        let mut prompt = AllocationPrompt::new(Cursor::new(Vec::new()), Vec::new());
        let err = prompt
            .allocate(&purchase("-1.00"), &CategorySet::default())
            .unwrap_err();
        assert!(matches!(err, CardsplitError::UninitializedCategorySet));
    }

    #[test]
    fn test_verify_allocation() {
        let categories = categories();
        let mut allocation = Allocation::new(Money::parse("-3.00").unwrap(), &categories).unwrap();
        allocation.allocate("ap", None);
        assert!(verify_allocation("x", &allocation).is_ok());
    }
}
