// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{LedgerError, LedgerResult};

/// Sparse date-indexed series with step-function semantics: the value at a
/// date is the most recently recorded value at or before it. Dates are kept
/// strictly increasing; inserting at an existing date overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueHistory {
    dates: Vec<NaiveDate>,
    values: Vec<Decimal>,
}

impl ValueHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (NaiveDate, Decimal)>) -> Self {
        let mut history = Self::new();
        for (date, value) in pairs {
            history.insert(date, value);
        }
        history
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn last_value(&self) -> Option<Decimal> {
        self.values.last().copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.binary_search(&date).is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Value recorded at the rightmost date on or before `date`.
    pub fn value_at(&self, date: NaiveDate) -> LedgerResult<Decimal> {
        if self.is_empty() {
            return Err(LedgerError::NoData("empty value history".into()));
        }
        let idx = self.dates.partition_point(|d| *d <= date);
        if idx == 0 {
            return Err(LedgerError::NoData(format!(
                "No value for {date}; history ranges from {} to {}",
                self.dates[0],
                self.dates[self.dates.len() - 1]
            )));
        }
        Ok(self.values[idx - 1])
    }

    /// Insert keeping dates sorted; an exact date match overwrites in place.
    pub fn insert(&mut self, date: NaiveDate, value: Decimal) {
        match self.dates.binary_search(&date) {
            Ok(idx) => self.values[idx] = value,
            Err(idx) => {
                self.dates.insert(idx, date);
                self.values.insert(idx, value);
            }
        }
    }

    /// Add `delta` to the point recorded at exactly `date`, creating it when
    /// absent. Missing dates count as zero.
    pub fn add_assign_at(&mut self, date: NaiveDate, delta: Decimal) {
        match self.dates.binary_search(&date) {
            Ok(idx) => self.values[idx] += delta,
            Err(idx) => {
                self.dates.insert(idx, date);
                self.values.insert(idx, delta);
            }
        }
    }

    /// Treat the series as per-date deltas and return running totals over the
    /// same dates.
    pub fn balances_from_changes(&self) -> ValueHistory {
        let mut running = Decimal::ZERO;
        let values = self
            .values
            .iter()
            .map(|value| {
                running += value;
                running
            })
            .collect();
        ValueHistory {
            dates: self.dates.clone(),
            values,
        }
    }

    /// Inverse of [`ValueHistory::balances_from_changes`]: the first value is
    /// kept, every later value becomes the difference from its predecessor.
    pub fn changes_from_balances(&self) -> ValueHistory {
        if self.is_empty() {
            return self.clone();
        }
        let mut values = Vec::with_capacity(self.len());
        values.push(self.values[0]);
        for pair in self.values.windows(2) {
            values.push(pair[1] - pair[0]);
        }
        ValueHistory {
            dates: self.dates.clone(),
            values,
        }
    }

    /// Pointwise sum of two histories. Points of the earlier-starting series
    /// before the other's first date are kept verbatim; from there on the
    /// date set is the union of both series and each point carries the sum
    /// of the two step-function lookups. Commutative; merging with an empty
    /// history returns the other operand unchanged.
    pub fn merge(&self, other: &ValueHistory) -> LedgerResult<ValueHistory> {
        if self.is_empty() {
            return Ok(other.clone());
        }
        if other.is_empty() {
            return Ok(self.clone());
        }
        if self.dates[0] > other.dates[0] {
            return other.merge(self);
        }

        let threshold = other.dates[0];
        let split = self.dates.partition_point(|d| *d < threshold);
        let mut merged = ValueHistory {
            dates: self.dates[..split].to_vec(),
            values: self.values[..split].to_vec(),
        };

        let mut union: Vec<NaiveDate> = self.dates[split..]
            .iter()
            .chain(other.dates.iter())
            .copied()
            .collect();
        union.sort_unstable();
        union.dedup();

        for date in union {
            let sum = self.value_at(date)? + other.value_at(date)?;
            merged.dates.push(date);
            merged.values.push(sum);
        }
        Ok(merged)
    }
}
