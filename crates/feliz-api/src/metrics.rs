//! Prometheus metrics for issued quotations, served at `/metrics`.
use feliz_core::QuotationPair;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Upper bounds of the final-total histogram, in currency units
const FINAL_TOTAL_BUCKETS: [f64; 8] = [
    5_000.0, 10_000.0, 25_000.0, 50_000.0, 100_000.0, 250_000.0, 500_000.0, 1_000_000.0,
];

pub struct QuoteMetrics {
    registry: Registry,
    quotations: IntCounterVec,
    final_totals: HistogramVec,
}

impl QuoteMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let quotations = IntCounterVec::new(
            Opts::new("feliz_quotations_total", "Quotations computed, per karat tier"),
            &["tier"],
        )?;
        let final_totals = HistogramVec::new(
            HistogramOpts::new("feliz_quote_final_total", "Final quoted amount, per karat tier")
                .buckets(FINAL_TOTAL_BUCKETS.to_vec()),
            &["tier"],
        )?;

        registry.register(Box::new(quotations.clone()))?;
        registry.register(Box::new(final_totals.clone()))?;

        Ok(Self {
            registry,
            quotations,
            final_totals,
        })
    }

    /// Record both tiers of a computed quotation
    pub fn observe(&self, pair: &QuotationPair) {
        for result in pair.iter() {
            let tier = result.tier.as_str();
            self.quotations.with_label_values(&[tier]).inc();
            self.final_totals
                .with_label_values(&[tier])
                .observe(result.final_total);
        }
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feliz_core::{compute_quotation, QuotationInput};

    #[test]
    fn test_observe_counts_both_tiers() {
        let metrics = QuoteMetrics::new().unwrap();
        metrics.observe(&compute_quotation(&QuotationInput::default()));
        metrics.observe(&compute_quotation(&QuotationInput::default()));

        let text = metrics.encode().unwrap();
        assert!(text.contains(r#"feliz_quotations_total{tier="14k"} 2"#));
        assert!(text.contains(r#"feliz_quotations_total{tier="18k"} 2"#));
        assert!(text.contains("feliz_quote_final_total_bucket"));
    }
}
