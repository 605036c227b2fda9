//! Feliz Core: jewelry quotation engine
//!
//! Computes a 14k and an 18k quote from gold weight, market gold price,
//! service lines and stones. The engine is a pure function: it keeps no
//! state, performs no I/O and never fails.
//!
//! # Example
//!
//! ```
//! use feliz_core::{compute_quotation, GoldAlloy, QuotationInput, ServiceKind};
//!
//! let input = QuotationInput::new(2000.0, 10.0, GoldAlloy::Yellow)
//!     .with_service(ServiceKind::Goldsmith, 500.0, 1.0)
//!     .with_stone(100.0, 400.0, 1.0);
//!
//! let quote = compute_quotation(&input);
//! println!("14k: {:.2}  18k: {:.2}", quote.k14.final_total, quote.k18.final_total);
//! assert_eq!(quote.k14.stone_cost, quote.k18.stone_cost);
//! ```
//!
//! Form text goes through [`RawQuotationInput`], which coerces anything
//! unparsable to zero:
//!
//! ```
//! use feliz_core::{QuotationEngine, RawQuotationInput};
//!
//! let raw: RawQuotationInput =
//!     serde_json::from_str(r#"{ "pricePerGram": "2000", "grams": "abc" }"#).unwrap();
//! let quote = QuotationEngine::default().compute(&raw.coerce());
//! assert_eq!(quote.k18.final_total, 0.0);
//! ```

pub mod engine;
pub mod error;
pub mod model;
pub mod numeric;
pub mod rules;

pub use engine::{compute_quotation, QuotationEngine, QuotationPair, QuotationResult};
pub use error::QuoteError;
pub use model::{
    GoldAlloy, NumericField, QuotationInput, RawQuotationInput, RawServiceLine, RawStoneRow,
    ServiceKind, ServiceLine, StoneRow,
};
pub use numeric::{parse_numeric_or_zero, sanitize};
pub use rules::{DownpaymentPolicy, KaratTier, LossRates, PricingRules, TierProfile};

/// Engine version reported by the API
pub const FELIZ_VERSION: &str = "1.0.0";
