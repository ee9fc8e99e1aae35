//! Rental pricing
//!
//! A vehicle's base price covers its base included duration; every day past
//! that is charged a flat per-day overage rate. The rate is a deployment
//! constant ([`crate::config::PricingConfig`]), not a per-vehicle attribute.
//! All amounts are integers in the smallest currency unit.

use super::span::DateSpan;

/// Pricing policy applied to every quote.
#[derive(Debug, Clone)]
pub struct PricingPolicy {
    /// Surcharge per day beyond the base included duration.
    pub overage_rate: i64,
    /// Currency code (ISO 4217)
    pub currency: String,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            overage_rate: 20_000,
            currency: "UZS".to_string(),
        }
    }
}

impl PricingPolicy {
    /// Price a date span against a vehicle's base price and included duration.
    ///
    /// Pure and deterministic; the span is already validated (`start <= end`).
    pub fn quote(&self, base_price: i64, base_duration_days: i64, span: &DateSpan) -> RentalQuote {
        let total_days = span.total_days();
        let extra_days = (total_days - base_duration_days).max(0);
        let overage_cost = extra_days * self.overage_rate;

        RentalQuote {
            total_days,
            included_days: base_duration_days,
            extra_days,
            base_price,
            overage_cost,
            total_price: base_price + overage_cost,
            currency: self.currency.clone(),
        }
    }
}

/// Priced breakdown for a requested span.
#[derive(Debug, Clone)]
pub struct RentalQuote {
    pub total_days: i64,
    /// Days covered by the base price.
    pub included_days: i64,
    /// Days charged at the overage rate.
    pub extra_days: i64,
    pub base_price: i64,
    pub overage_cost: i64,
    pub total_price: i64,
    pub currency: String,
}

impl RentalQuote {
    /// Format the total as a human-readable string, e.g. "1200.00 UZS".
    pub fn format_total(&self) -> String {
        let major = self.total_price / 100;
        let minor = self.total_price % 100;
        format!("{}.{:02} {}", major, minor, self.currency)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
    }

    fn span(s: u32, e: u32) -> DateSpan {
        DateSpan::new(day(s), day(e)).expect("valid span")
    }

    fn policy(rate: i64) -> PricingPolicy {
        PricingPolicy {
            overage_rate: rate,
            currency: "UZS".to_string(),
        }
    }

    #[test]
    fn span_within_base_duration_costs_base_price() {
        // five-day span, five included days
        let q = policy(20_000).quote(100, 5, &span(1, 5));
        assert_eq!(q.total_days, 5);
        assert_eq!(q.extra_days, 0);
        assert_eq!(q.overage_cost, 0);
        assert_eq!(q.total_price, 100);
    }

    #[test]
    fn extra_days_charged_at_overage_rate() {
        // seven-day span, five included days, two extra
        let q = policy(20_000).quote(100, 5, &span(1, 7));
        assert_eq!(q.total_days, 7);
        assert_eq!(q.extra_days, 2);
        assert_eq!(q.total_price, 100 + 2 * 20_000);
    }

    #[test]
    fn shorter_than_base_still_costs_base_price() {
        let q = policy(20_000).quote(500, 5, &span(1, 2));
        assert_eq!(q.total_price, 500);
    }

    #[test]
    fn price_never_decreases_as_end_moves_later() {
        let p = policy(7_500);
        let mut previous = 0;
        for end in 1..=20 {
            let q = p.quote(100_000, 4, &span(1, end));
            assert!(
                q.total_price >= previous,
                "price dropped at end day {}: {} < {}",
                end,
                q.total_price,
                previous
            );
            previous = q.total_price;
        }
    }

    #[test]
    fn breakdown_fields_are_consistent() {
        let q = policy(10_000).quote(250_000, 3, &span(1, 10));
        assert_eq!(q.included_days, 3);
        assert_eq!(q.extra_days, 7);
        assert_eq!(q.overage_cost, 70_000);
        assert_eq!(q.total_price, q.base_price + q.overage_cost);
    }

    #[test]
    fn format_total_uses_two_decimals() {
        let q = policy(0).quote(123_450, 5, &span(1, 3));
        assert_eq!(q.format_total(), "1234.50 UZS");
    }
}
