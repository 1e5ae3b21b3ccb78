// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::book::Book;
use crate::errors::{LedgerError, LedgerResult};
use crate::history::ValueHistory;
use crate::utils::fmt_money;

/// Namespace + symbol pair identifying a commodity, e.g. CURRENCY:EUR.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommodityId {
    pub space: String,
    pub id: String,
}

impl CommodityId {
    pub fn new(space: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            id: id.into(),
        }
    }

    pub fn currency(code: &str) -> Self {
        Self::new("CURRENCY", code)
    }
}

impl fmt::Display for CommodityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.space, self.id)
    }
}

#[derive(Debug, Clone)]
pub struct Commodity {
    pub id: CommodityId,
    pub name: Option<String>,
    /// Price of one unit expressed in the book's base currency.
    pub price_history: ValueHistory,
}

impl Commodity {
    pub fn new(id: CommodityId, name: Option<String>) -> Self {
        Self {
            id,
            name,
            price_history: ValueHistory::new(),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Root,
    Equity,
    Asset,
    Bank,
    Receivable,
    Liability,
    Income,
    Expense,
    Stock,
}

impl AccountType {
    /// Map a wire-format type name. Unknown names fail, never default.
    pub fn from_name(name: &str) -> LedgerResult<Self> {
        match name {
            "ROOT" => Ok(Self::Root),
            "EQUITY" => Ok(Self::Equity),
            "ASSET" => Ok(Self::Asset),
            "BANK" => Ok(Self::Bank),
            "RECEIVABLE" => Ok(Self::Receivable),
            "LIABILITY" => Ok(Self::Liability),
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            "STOCK" => Ok(Self::Stock),
            _ => Err(LedgerError::Malformed(format!(
                "Unknown account type '{name}'"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Root => "ROOT",
            Self::Equity => "EQUITY",
            Self::Asset => "ASSET",
            Self::Bank => "BANK",
            Self::Receivable => "RECEIVABLE",
            Self::Liability => "LIABILITY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
            Self::Stock => "STOCK",
        }
    }
}

/// One node of the account tree. Cross-entity navigation goes through the
/// owning [`Book`], passed explicitly; entities hold ids, not references.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountType,
    pub parent_id: Option<Uuid>,
    pub commodity_id: CommodityId,
}

impl Account {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn parent<'a>(&self, book: &'a Book) -> Option<&'a Account> {
        self.parent_id.and_then(|id| book.get_account(&id))
    }

    /// Direct children, in name order.
    pub fn children<'a>(&self, book: &'a Book) -> Vec<&'a Account> {
        book.accounts()
            .into_iter()
            .filter(|account| account.parent_id == Some(self.id))
            .collect()
    }

    pub fn commodity<'a>(&self, book: &'a Book) -> LedgerResult<&'a Commodity> {
        book.commodity(&self.commodity_id)
    }

    pub fn transactions<'a>(&self, book: &'a Book) -> Vec<&'a Transaction> {
        book.transactions()
            .iter()
            .filter(|transaction| {
                transaction
                    .positions()
                    .iter()
                    .any(|position| position.account_id == self.id)
            })
            .collect()
    }

    /// Net quantity moved on this account per transaction date. Same-date
    /// positions are summed.
    pub fn quantity_changes(&self, book: &Book) -> ValueHistory {
        let mut changes = ValueHistory::new();
        for transaction in book.transactions() {
            for position in transaction.positions() {
                if position.account_id == self.id {
                    changes.add_assign_at(transaction.date, position.quantity);
                }
            }
        }
        changes
    }

    /// Running unit count held in the account over time.
    pub fn quantity_history(&self, book: &Book) -> ValueHistory {
        self.quantity_changes(book).balances_from_changes()
    }

    /// Balance in the book's base currency. For accounts in another
    /// commodity, every date of either the quantity history or the price
    /// history (from the first quantity date on) carries quantity times
    /// price, both looked up with step-function semantics.
    pub fn balance_history(&self, book: &Book) -> LedgerResult<ValueHistory> {
        let quantity_history = self.quantity_history(book);
        if self.commodity_id == *book.base_currency() {
            return Ok(quantity_history);
        }
        let Some(first) = quantity_history.first_date() else {
            return Ok(quantity_history);
        };

        let price_history = &self.commodity(book)?.price_history;
        let mut dates: Vec<NaiveDate> = quantity_history
            .iter()
            .map(|(date, _)| date)
            .chain(
                price_history
                    .iter()
                    .map(|(date, _)| date)
                    .filter(|date| *date >= first),
            )
            .collect();
        dates.sort_unstable();
        dates.dedup();

        let mut balances = ValueHistory::new();
        for date in dates {
            let balance = quantity_history.value_at(date)? * price_history.value_at(date)?;
            balances.insert(date, balance);
        }
        Ok(balances)
    }

    /// Realized per-date delta in base-currency value, covering both
    /// quantity changes and price movement.
    pub fn balance_changes(&self, book: &Book) -> LedgerResult<ValueHistory> {
        Ok(self.balance_history(book)?.changes_from_balances())
    }

    /// Own balance changes plus every descendant's, accumulated per exact
    /// date (dates missing from one side count as zero).
    pub fn total_balance_changes(&self, book: &Book) -> LedgerResult<ValueHistory> {
        let mut changes = self.balance_changes(book)?;
        for child in self.children(book) {
            for (date, delta) in child.total_balance_changes(book)?.iter() {
                changes.add_assign_at(date, delta);
            }
        }
        Ok(changes)
    }

    /// Consolidated balance of the account and its whole subtree over time.
    pub fn total_balance_history(&self, book: &Book) -> LedgerResult<ValueHistory> {
        Ok(self.total_balance_changes(book)?.balances_from_changes())
    }
}

/// One leg of a double-entry transaction. `value` is in the reporting
/// currency, `quantity` in the account's native commodity; the two differ
/// for non-currency accounts such as stock lots.
#[derive(Debug, Clone)]
pub struct Position {
    pub account_id: Uuid,
    pub value: Decimal,
    pub quantity: Decimal,
}

impl Position {
    pub fn account<'a>(&self, book: &'a Book) -> LedgerResult<&'a Account> {
        book.account(&self.account_id)
    }
}

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    positions: Vec<Position>,
}

impl Transaction {
    /// Construct after validating the double-entry invariant: position
    /// values must sum to zero.
    pub fn new(
        id: Uuid,
        date: NaiveDate,
        description: impl Into<String>,
        positions: Vec<Position>,
    ) -> LedgerResult<Self> {
        let sum: Decimal = positions.iter().map(|p| p.value).sum();
        if !sum.is_zero() {
            return Err(LedgerError::Integrity(format!(
                "Transaction {id} position values sum to {sum}, expected zero"
            )));
        }
        Ok(Self {
            id,
            date,
            description: description.into(),
            positions,
        })
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Render as a balanced two-column statement: non-negative values on the
    /// left, negative on the right with the sign dropped, amounts
    /// right-aligned per column.
    pub fn statement(&self, book: &Book) -> LedgerResult<String> {
        fn block(rows: &[(String, String)]) -> Vec<String> {
            let name_width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
            let amount_width = rows.iter().map(|(_, amount)| amount.len()).max().unwrap_or(0);
            rows.iter()
                .map(|(name, amount)| format!("{name:<name_width$} {amount:>amount_width$}"))
                .collect()
        }

        let mut left = Vec::new();
        let mut right = Vec::new();
        for position in &self.positions {
            let name = position.account(book)?.name.clone();
            if position.value >= Decimal::ZERO {
                left.push((name, fmt_money(&position.value)));
            } else {
                right.push((name, fmt_money(&-position.value)));
            }
        }
        let mut left = block(&left);
        let mut right = block(&right);

        let left_width = left.first().map(|line| line.len()).unwrap_or(0);
        let right_width = right.first().map(|line| line.len()).unwrap_or(0);
        let lines = left.len().max(right.len());
        left.resize(lines, " ".repeat(left_width));
        right.resize(lines, " ".repeat(right_width));

        let body: Vec<String> = left
            .iter()
            .zip(right.iter())
            .map(|(l, r)| format!("{l} | {r}"))
            .collect();
        Ok(format!(
            "Transaction {}\n{} {}\n{}\n{}",
            self.id,
            self.date,
            self.description,
            "-".repeat(left_width + right_width + 3),
            body.join("\n")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_type_mapping_fails_closed() {
        assert_eq!(AccountType::from_name("BANK").unwrap(), AccountType::Bank);
        assert_eq!(AccountType::from_name("STOCK").unwrap(), AccountType::Stock);
        let err = AccountType::from_name("CHECKING").unwrap_err();
        assert!(matches!(err, LedgerError::Malformed(_)));
    }

    #[test]
    fn unbalanced_transaction_is_rejected() {
        let account_id = Uuid::new_v4();
        let positions = vec![
            Position {
                account_id,
                value: Decimal::new(1000, 2),
                quantity: Decimal::new(1000, 2),
            },
            Position {
                account_id,
                value: Decimal::new(-999, 2),
                quantity: Decimal::new(-999, 2),
            },
        ];
        let err = Transaction::new(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2023, 1, 5).unwrap(),
            "off by a cent",
            positions,
        )
        .unwrap_err();
        assert!(matches!(err, LedgerError::Integrity(_)));
    }
}
