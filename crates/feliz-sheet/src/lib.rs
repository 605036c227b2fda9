//! Feliz Sheet: editable quote form state
//!
//! The quotation engine is stateless; this crate owns the state a form edits
//! between engine calls: the typed text of every field, the alloy selection
//! and a list of stone rows keyed by stable ids.
//!
//! # Example
//!
//! ```
//! use feliz_core::{QuotationEngine, ServiceKind};
//! use feliz_sheet::{LineField, QuoteSheet, StoneField};
//!
//! let mut sheet = QuoteSheet::new();
//! sheet.set_price_of_gold("2000");
//! sheet.set_grams("10");
//! sheet.update_line(ServiceKind::Goldsmith, LineField::Rate, "500");
//! sheet.update_line(ServiceKind::Goldsmith, LineField::Qty, "1");
//!
//! let stone = sheet.stones()[0].id;
//! sheet.update_stone(stone, StoneField::Price, "400").unwrap();
//! sheet.update_stone(stone, StoneField::Qty, "1").unwrap();
//!
//! let quote = sheet.quote(&QuotationEngine::default());
//! assert_eq!(quote.k18.stone_cost, 600.0);
//! ```

pub mod error;
pub mod sheet;

pub use error::SheetError;
pub use sheet::{LineEntry, LineField, QuoteSheet, StoneEntry, StoneField, StoneId};
