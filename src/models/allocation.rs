//! Allocation model
//!
//! Splits a transaction amount across the categories of a run. Allocation is
//! single-entry: amounts are shown the way a card statement shows them, so
//! the export amount is negated on the way in. A purchase (negative DEBIT)
//! becomes a positive amount owed to its categories, while a payment or
//! refund becomes negative.
//!
//! Every category amount must carry the same sign as the transaction: a $10
//! charge can never be split as $1000 in one category and -$990 in another.
//! Calls that would break that rule, name an unknown category, or carry an
//! unparseable amount are dropped without error so an interactive caller can
//! simply ask again.

use super::category::{CategorySet, DESCRIBE_TOKEN};
use super::money::Money;
use super::transaction::TransactionRecord;
use crate::error::{CardsplitError, CardsplitResult};

/// Per-transaction allocation state
#[derive(Debug, Clone)]
pub struct Allocation<'a> {
    categories: &'a CategorySet,
    original: Money,
    remainder: Money,
    allocated: Vec<Money>,
}

impl<'a> Allocation<'a> {
    /// Start allocating `amount`, given in the export's signing convention
    ///
    /// Fails when the category set was never established.
    pub fn new(amount: Money, categories: &'a CategorySet) -> CardsplitResult<Self> {
        if !categories.is_initialized() {
            return Err(CardsplitError::UninitializedCategorySet);
        }

        let original = (-amount).round_cents();
        Ok(Self {
            categories,
            original,
            remainder: original,
            allocated: vec![Money::zero(); categories.len()],
        })
    }

    /// Start allocating a validated transaction record
    pub fn for_record(
        record: &TransactionRecord,
        categories: &'a CategorySet,
    ) -> CardsplitResult<Self> {
        Self::new(record.amount(), categories)
    }

    /// Assign an amount to a category
    ///
    /// With no amount, everything still unallocated goes to the category.
    /// Amounts past the current remainder are clamped to it. The new amount
    /// then replaces whatever the category held, and the old amount returns
    /// to the remainder.
    pub fn allocate(&mut self, category: &str, requested: Option<Money>) {
        let Some(index) = self.categories.position(category) else {
            return;
        };

        let mut amount = requested.map_or(self.remainder, |m| m.round_cents());

        if (self.is_negative() && amount.is_positive())
            || (!self.is_negative() && amount.is_negative())
        {
            return;
        }

        if amount.abs() > self.remainder.abs() {
            amount = self.remainder;
        }

        self.remainder = (self.remainder + self.allocated[index] - amount).round_cents();
        self.allocated[index] = amount;
    }

    /// Assign an amount given as operator text; unparseable text is ignored
    pub fn allocate_input(&mut self, category: &str, requested: Option<&str>) {
        let amount = match requested {
            Some(text) => match Money::parse(text) {
                Ok(amount) => Some(amount),
                Err(_) => return,
            },
            None => None,
        };
        self.allocate(category, amount);
    }

    /// The amount being allocated (export amount negated, in cents)
    pub fn original(&self) -> Money {
        self.original
    }

    /// The amount not yet assigned to any category
    pub fn remainder(&self) -> Money {
        self.remainder
    }

    /// Whether allocations are drawn from the refund/payment side
    pub fn is_negative(&self) -> bool {
        self.original.is_negative()
    }

    pub fn is_fully_allocated(&self) -> bool {
        self.remainder.is_zero()
    }

    /// Amount currently held by a category, if the category exists
    pub fn amount_for(&self, category: &str) -> Option<Money> {
        self.categories
            .position(category)
            .map(|index| self.allocated[index])
    }

    /// Sum of all category amounts, rounded to cents
    pub fn allocated_sum(&self) -> Money {
        self.allocated.iter().sum::<Money>().round_cents()
    }

    /// One ledger cell per category in column order, blank for zero
    pub fn to_output_vector(&self) -> Vec<String> {
        self.allocated
            .iter()
            .map(|amount| {
                if amount.is_zero() {
                    String::new()
                } else {
                    amount.to_cents_string()
                }
            })
            .collect()
    }

    /// Prompt text pairing each category with its current amount
    ///
    /// Produces `[ap(10.00), pc, af]`, with a trailing `?` entry when the
    /// categories carry descriptions.
    pub fn describe(&self) -> String {
        let mut paired: Vec<String> = self
            .categories
            .iter()
            .zip(&self.allocated)
            .map(|(category, amount)| {
                if amount.is_zero() {
                    category.code.clone()
                } else {
                    format!("{}({})", category.code, amount.to_cents_string())
                }
            })
            .collect();

        if self.categories.has_descriptions() {
            paired.push(DESCRIBE_TOKEN.to_string());
        }

        format!("[{}]", paired.join(", "))
    }
}
