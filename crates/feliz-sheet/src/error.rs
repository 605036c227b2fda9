//! Errors raised while editing a quote sheet
use crate::sheet::StoneId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    #[error("SHEET/unknown stone row {0}")]
    UnknownStone(StoneId),

    #[error("SHEET/at least one stone row must remain")]
    LastStone,
}
