use std::fmt;
use thiserror::Error;

use crate::account::AddressError;
use crate::bank::BankError;

/// Which identifier of a request failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRole {
    Creator,
    Sender,
    Receiver,
}

impl fmt::Display for AddressRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressRole::Creator => write!(f, "creator"),
            AddressRole::Sender => write!(f, "from"),
            AddressRole::Receiver => write!(f, "to"),
        }
    }
}

/// Ledger call that rejected a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerStep {
    Mint,
    ForwardToCreator,
    Send,
}

impl fmt::Display for LedgerStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerStep::Mint => write!(f, "failed to mint coins"),
            LedgerStep::ForwardToCreator => write!(f, "failed to send coins to creator"),
            LedgerStep::Send => write!(f, "failed to send coins"),
        }
    }
}

/// Errors returned by the token message and query handlers.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid {role} address: {source}")]
    InvalidAddress {
        role: AddressRole,
        #[source]
        source: AddressError,
    },
    #[error("amount must be greater than 0")]
    InvalidAmount,
    #[error("{step}: {source}")]
    LedgerFailure {
        step: LedgerStep,
        #[source]
        source: BankError,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TokenError {
    /// Minted supply is parked in the module account and was not forwarded.
    ///
    /// Nothing is rolled back; the operator has to reconcile the module
    /// balance out of band.
    pub fn requires_reconciliation(&self) -> bool {
        matches!(
            self,
            TokenError::LedgerFailure {
                step: LedgerStep::ForwardToCreator,
                ..
            }
        )
    }
}

/// Per-account genesis validation failures, reported in check order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("vesting start-time must be before end-time (start {start_time}, end {end_time})")]
    VestingScheduleInvalid { start_time: i64, end_time: i64 },
    #[error("invalid module account: {0}")]
    ModuleAccountInvalid(String),
    #[error("invalid base account: {0}")]
    BaseAccountInvalid(String),
}
