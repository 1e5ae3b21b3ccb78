// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use cashbook::book::Book;
use cashbook::errors::LedgerError;
use cashbook::history::ValueHistory;
use cashbook::models::{Account, AccountType, Commodity, CommodityId, Position, Transaction};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn eur_account(book: &mut Book, name: &str, kind: AccountType, parent: Option<Uuid>) -> Uuid {
    let id = Uuid::new_v4();
    book.add_account(Account {
        id,
        name: name.to_string(),
        kind,
        parent_id: parent,
        commodity_id: CommodityId::currency("EUR"),
    })
    .unwrap();
    id
}

fn position(account_id: Uuid, value: &str) -> Position {
    Position {
        account_id,
        value: dec(value),
        quantity: dec(value),
    }
}

fn sample_book() -> (Book, Uuid, Uuid, Uuid) {
    let mut book = Book::new(CommodityId::currency("EUR"));
    book.add_commodity(Commodity::new(
        CommodityId::currency("EUR"),
        Some("Euro".to_string()),
    ));
    let root = eur_account(&mut book, "Root Account", AccountType::Root, None);
    let cash = eur_account(&mut book, "Cash", AccountType::Bank, Some(root));
    let groceries = eur_account(&mut book, "Groceries", AccountType::Expense, Some(root));
    (book, root, cash, groceries)
}

#[test]
fn statement_renders_two_balanced_columns() {
    let (mut book, _root, cash, groceries) = sample_book();
    let id = Uuid::parse_str("10000000000000000000000000000001").unwrap();
    let transaction = Transaction::new(
        id,
        date("2023-01-05"),
        "Weekly shop",
        vec![position(groceries, "50.00"), position(cash, "-50.00")],
    )
    .unwrap();
    book.add_transaction(transaction);

    let rendered = book.transactions()[0].statement(&book).unwrap();
    let expected = format!(
        "Transaction {id}\n\
         2023-01-05 Weekly shop\n\
         {}\n\
         Groceries 50.00 | Cash 50.00",
        "-".repeat(28)
    );
    assert_eq!(rendered, expected);
}

#[test]
fn statement_pads_the_shorter_column() {
    let (mut book, _root, cash, groceries) = sample_book();
    let rent = eur_account(&mut book, "Rent", AccountType::Expense, None);
    let transaction = Transaction::new(
        Uuid::new_v4(),
        date("2023-01-05"),
        "Rent and shop",
        vec![
            position(rent, "700.00"),
            position(groceries, "30.00"),
            position(cash, "-730.00"),
        ],
    )
    .unwrap();
    book.add_transaction(transaction);

    let rendered = book.transactions()[0].statement(&book).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[2], "-".repeat(30));
    assert_eq!(lines[3], "Rent      700.00 | Cash 730.00");
    assert_eq!(lines[4], format!("Groceries  30.00 | {}", " ".repeat(11)));
}

#[test]
fn date_range_filter_is_inclusive() {
    let (mut book, _root, cash, groceries) = sample_book();
    for (day, description) in [
        ("2023-01-01", "first"),
        ("2023-01-15", "second"),
        ("2023-01-31", "third"),
    ] {
        let transaction = Transaction::new(
            Uuid::new_v4(),
            date(day),
            description,
            vec![position(groceries, "10.00"), position(cash, "-10.00")],
        )
        .unwrap();
        book.add_transaction(transaction);
    }

    let all = book.transactions_between(None, None);
    assert_eq!(all.len(), 3);

    let from_first = book.transactions_between(Some(date("2023-01-01")), None);
    assert_eq!(from_first.len(), 3);

    let middle = book.transactions_between(Some(date("2023-01-02")), Some(date("2023-01-31")));
    let descriptions: Vec<&str> = middle.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descriptions, vec!["second", "third"]);

    let none = book.transactions_between(Some(date("2023-02-01")), None);
    assert!(none.is_empty());
}

#[test]
fn same_date_positions_sum_into_one_point() {
    let (mut book, _root, cash, groceries) = sample_book();
    // two legs on the same account within one transaction
    let split_payment = Transaction::new(
        Uuid::new_v4(),
        date("2023-01-05"),
        "Split payment",
        vec![
            position(groceries, "30.00"),
            position(groceries, "20.00"),
            position(cash, "-50.00"),
        ],
    )
    .unwrap();
    // and a second transaction on the same date
    let second = Transaction::new(
        Uuid::new_v4(),
        date("2023-01-05"),
        "Top-up",
        vec![position(groceries, "5.00"), position(cash, "-5.00")],
    )
    .unwrap();
    book.add_transaction(split_payment);
    book.add_transaction(second);

    let groceries = book.account_by_name("Groceries").unwrap();
    assert_eq!(
        groceries.quantity_changes(&book),
        ValueHistory::from_pairs([(date("2023-01-05"), dec("55.00"))])
    );
}

#[test]
fn account_lookup_by_unknown_name_fails() {
    let (book, ..) = sample_book();
    let err = book.account_by_name("Nope").unwrap_err();
    assert!(matches!(err, LedgerError::UnknownRef(_)));
}

#[test]
fn account_transactions_only_contain_own_positions() {
    let (mut book, _root, cash, groceries) = sample_book();
    let salary = eur_account(&mut book, "Salary", AccountType::Income, None);
    let shop = Transaction::new(
        Uuid::new_v4(),
        date("2023-01-05"),
        "Shop",
        vec![position(groceries, "50.00"), position(cash, "-50.00")],
    )
    .unwrap();
    let payday = Transaction::new(
        Uuid::new_v4(),
        date("2023-01-25"),
        "Payday",
        vec![position(cash, "2000.00"), position(salary, "-2000.00")],
    )
    .unwrap();
    book.add_transaction(shop);
    book.add_transaction(payday);

    let groceries = book.account_by_name("Groceries").unwrap();
    let transactions = groceries.transactions(&book);
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].description, "Shop");

    let cash = book.account_by_name("Cash").unwrap();
    assert_eq!(cash.transactions(&book).len(), 2);
}
