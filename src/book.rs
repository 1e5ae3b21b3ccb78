// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use flate2::read::GzDecoder;
use uuid::Uuid;

use crate::errors::{LedgerError, LedgerResult};
use crate::history::ValueHistory;
use crate::models::{Account, AccountType, Commodity, CommodityId, Position, Transaction};
use crate::utils::{parse_fraction, parse_iso_date};
use crate::xml::XmlElement;

/// Aggregate root owning every parsed entity, keyed by id. Populated once by
/// the loader and read-only afterwards; all cross-entity navigation resolves
/// through these mappings.
#[derive(Debug, Clone)]
pub struct Book {
    base_currency: CommodityId,
    accounts_by_id: HashMap<Uuid, Account>,
    commodities_by_id: HashMap<CommodityId, Commodity>,
    transactions: Vec<Transaction>,
}

impl Default for Book {
    fn default() -> Self {
        Self::new(CommodityId::currency("EUR"))
    }
}

impl Book {
    pub fn new(base_currency: CommodityId) -> Self {
        Self {
            base_currency,
            accounts_by_id: HashMap::new(),
            commodities_by_id: HashMap::new(),
            transactions: Vec::new(),
        }
    }

    pub fn base_currency(&self) -> &CommodityId {
        &self.base_currency
    }

    pub fn add_commodity(&mut self, commodity: Commodity) {
        self.commodities_by_id.insert(commodity.id.clone(), commodity);
    }

    pub fn add_account(&mut self, account: Account) -> LedgerResult<()> {
        if self.accounts_by_id.contains_key(&account.id) {
            return Err(LedgerError::Integrity(format!(
                "Account '{}' ({}) already added to book",
                account.name, account.id
            )));
        }
        self.accounts_by_id.insert(account.id, account);
        Ok(())
    }

    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn account(&self, id: &Uuid) -> LedgerResult<&Account> {
        self.accounts_by_id
            .get(id)
            .ok_or_else(|| LedgerError::UnknownRef(format!("No account with id {id}")))
    }

    pub fn get_account(&self, id: &Uuid) -> Option<&Account> {
        self.accounts_by_id.get(id)
    }

    /// First account with the given name, in name-sorted order.
    pub fn account_by_name(&self, name: &str) -> LedgerResult<&Account> {
        self.accounts()
            .into_iter()
            .find(|account| account.name == name)
            .ok_or_else(|| LedgerError::UnknownRef(format!("No account named '{name}'")))
    }

    pub fn commodity(&self, id: &CommodityId) -> LedgerResult<&Commodity> {
        self.commodities_by_id
            .get(id)
            .ok_or_else(|| LedgerError::UnknownRef(format!("No commodity {id}")))
    }

    /// All accounts, in name order (id as tie-break).
    pub fn accounts(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts_by_id.values().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        accounts
    }

    pub fn commodities(&self) -> Vec<&Commodity> {
        let mut commodities: Vec<&Commodity> = self.commodities_by_id.values().collect();
        commodities.sort_by(|a, b| (&a.id.space, &a.id.id).cmp(&(&b.id.space, &b.id.id)));
        commodities
    }

    pub fn root_accounts(&self) -> Vec<&Account> {
        self.accounts()
            .into_iter()
            .filter(|account| account.is_root())
            .collect()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions within the inclusive [from, to] date range.
    pub fn transactions_between(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|transaction| {
                from.map_or(true, |date| transaction.date >= date)
                    && to.map_or(true, |date| transaction.date <= date)
            })
            .collect()
    }

    /// Consolidated net-worth series: the summed total balance histories of
    /// every root child that is not an income, expense, or equity account.
    pub fn equity_history(&self) -> LedgerResult<ValueHistory> {
        let mut equity = ValueHistory::new();
        for root in self.root_accounts() {
            for account in root.children(self) {
                if !matches!(
                    account.kind,
                    AccountType::Income | AccountType::Expense | AccountType::Equity
                ) {
                    equity = equity.merge(&account.total_balance_history(self)?)?;
                }
            }
        }
        Ok(equity)
    }

    pub fn load(path: &Path) -> LedgerResult<Book> {
        Self::load_with_base(path, CommodityId::currency("EUR"))
    }

    /// Decompress and parse a gzip XML ledger. Fails fast on the first
    /// structural error; a partial book is never returned.
    pub fn load_with_base(path: &Path, base_currency: CommodityId) -> LedgerResult<Book> {
        let file = File::open(path)?;
        let mut xml = String::new();
        GzDecoder::new(BufReader::new(file)).read_to_string(&mut xml)?;
        Self::from_xml(&xml, base_currency)
    }

    /// Parse order matters: commodities, then prices, then accounts, then
    /// transactions; each pass resolves ids parsed by the ones before it.
    pub fn from_xml(xml: &str, base_currency: CommodityId) -> LedgerResult<Book> {
        let root = XmlElement::parse(xml)?;
        let book_element = root.require_child("book")?;
        let mut book = Book::new(base_currency);

        for element in book_element.children("commodity") {
            book.add_commodity(parse_commodity(element)?);
        }

        if let Some(pricedb) = book_element.child("pricedb") {
            for element in pricedb.children("price") {
                let commodity_id = parse_commodity_id(element.require_child("commodity")?)?;
                let date =
                    parse_iso_date(element.require_child("time")?.require_child("date")?.text())?;
                let value = parse_fraction(element.require_child("value")?.text())?;
                let commodity =
                    book.commodities_by_id.get_mut(&commodity_id).ok_or_else(|| {
                        LedgerError::UnknownRef(format!(
                            "Price refers to unknown commodity {commodity_id}"
                        ))
                    })?;
                commodity.price_history.insert(date, value);
            }
        }

        for element in book_element.children("account") {
            book.add_account(parse_account(element)?)?;
        }

        for element in book_element.children("transaction") {
            let transaction = parse_transaction(element, &book)?;
            book.add_transaction(transaction);
        }

        Ok(book)
    }
}

fn parse_uuid(s: &str, what: &str) -> LedgerResult<Uuid> {
    Uuid::parse_str(s.trim())
        .map_err(|_| LedgerError::Malformed(format!("Invalid {what} id '{s}'")))
}

fn parse_commodity_id(element: &XmlElement) -> LedgerResult<CommodityId> {
    Ok(CommodityId::new(
        element.require_child("space")?.text(),
        element.require_child("id")?.text(),
    ))
}

fn parse_commodity(element: &XmlElement) -> LedgerResult<Commodity> {
    let name = element.child("name").map(|e| e.text().to_string());
    Ok(Commodity::new(parse_commodity_id(element)?, name))
}

fn parse_account(element: &XmlElement) -> LedgerResult<Account> {
    let id = parse_uuid(element.require_child("id")?.text(), "account")?;
    let name = element.require_child("name")?.text().to_string();
    let kind = AccountType::from_name(element.require_child("type")?.text())?;
    let parent_id = element
        .child("parent")
        .map(|e| parse_uuid(e.text(), "parent account"))
        .transpose()?;
    let commodity_id = parse_commodity_id(element.require_child("commodity")?)?;
    Ok(Account {
        id,
        name,
        kind,
        parent_id,
        commodity_id,
    })
}

fn parse_transaction(element: &XmlElement, book: &Book) -> LedgerResult<Transaction> {
    let id = parse_uuid(element.require_child("id")?.text(), "transaction")?;
    let date = parse_iso_date(
        element
            .require_child("date-posted")?
            .require_child("date")?
            .text(),
    )?;
    let description = element.require_child("description")?.text().to_string();

    let mut positions = Vec::new();
    for split in element.require_child("splits")?.children("split") {
        let account_id = parse_uuid(split.require_child("account")?.text(), "split account")?;
        // Splits must reference accounts parsed in the earlier pass.
        book.account(&account_id)?;
        positions.push(Position {
            account_id,
            value: parse_fraction(split.require_child("value")?.text())?,
            quantity: parse_fraction(split.require_child("quantity")?.text())?,
        });
    }

    Transaction::new(id, date, description, positions)
}
