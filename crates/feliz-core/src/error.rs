//! Error model for everything around the engine.
//!
//! The engine itself is total; only loading pricing rules can fail.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("CONFIG/{0}")]
    Config(String),

    #[error("RULES/{0}")]
    InvalidRules(String),
}
