// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures raised while loading a ledger or querying its histories.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed ledger: {0}")]
    Malformed(String),

    #[error("Integrity error: {0}")]
    Integrity(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Unknown reference: {0}")]
    UnknownRef(String),
}

pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
