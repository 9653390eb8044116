// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Error type shared across the ttrec workspace.
///
/// Per-event computation never fails: insufficient objects degrade to empty
/// or absent results. Errors only arise from invalid configuration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TtrecError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotSupported(String),
}

impl TtrecError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn not_supported(message: impl Into<String>) -> Self {
        Self::NotSupported(message.into())
    }
}
