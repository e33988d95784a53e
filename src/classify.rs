// ---------------------------------------------------------------------------
// RateTier – threshold bucket of a suicide rate
// ---------------------------------------------------------------------------

/// Severity bucket derived from a suicide rate (per 100k).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RateTier {
    High,
    Moderate,
    Low,
}

/// Ordered ladder of `(exclusive lower bound, tier)` pairs, scanned top-down.
/// A rate that clears no bound falls through to [`RateTier::Low`].
pub const RATE_LADDER: [(f64, RateTier); 2] =
    [(15.0, RateTier::High), (10.0, RateTier::Moderate)];

/// All tiers in legend order.
pub const ALL_TIERS: [RateTier; 3] = [RateTier::High, RateTier::Moderate, RateTier::Low];

/// Classify a rate: `> 15` is high, `(10, 15]` moderate, everything else low.
///
/// Pure comparisons only; negative rates are low and NaN never clears a bound.
pub fn classify_rate(rate: f64) -> RateTier {
    RATE_LADDER
        .iter()
        .find(|(bound, _)| rate > *bound)
        .map(|&(_, tier)| tier)
        .unwrap_or(RateTier::Low)
}

// ---------------------------------------------------------------------------
// Tier style table
// ---------------------------------------------------------------------------

/// Marker appearance for one tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierStyle {
    /// CSS colour name, resolved to pixels by [`crate::color::named_color`].
    pub color: &'static str,
    /// Marker radius in screen points.
    pub radius: f32,
}

impl RateTier {
    pub fn style(self) -> TierStyle {
        match self {
            RateTier::High => TierStyle {
                color: "red",
                radius: 10.0,
            },
            RateTier::Moderate => TierStyle {
                color: "orange",
                radius: 8.0,
            },
            RateTier::Low => TierStyle {
                color: "green",
                radius: 6.0,
            },
        }
    }

    pub fn legend_label(self) -> &'static str {
        match self {
            RateTier::High => "High Suicide Rate",
            RateTier::Moderate => "Moderate Suicide Rate",
            RateTier::Low => "Low Suicide Rate",
        }
    }
}

/// The map legend: `(label, colour name)` for each tier, high first.
pub fn legend_entries() -> Vec<(&'static str, &'static str)> {
    ALL_TIERS
        .iter()
        .map(|tier| (tier.legend_label(), tier.style().color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exclusive_on_the_lower_side() {
        assert_eq!(classify_rate(15.0), RateTier::Moderate);
        assert_eq!(classify_rate(15.000_001), RateTier::High);
        assert_eq!(classify_rate(10.0), RateTier::Low);
        assert_eq!(classify_rate(10.000_001), RateTier::Moderate);
    }

    #[test]
    fn partition_is_total_and_exclusive() {
        let mut r = -20.0;
        while r <= 60.0 {
            let tier = classify_rate(r);
            let high = r > 15.0;
            let moderate = r > 10.0 && r <= 15.0;
            let low = r <= 10.0;
            assert_eq!(
                [high, moderate, low].iter().filter(|b| **b).count(),
                1,
                "rate {r}"
            );
            assert_eq!(tier == RateTier::High, high, "rate {r}");
            assert_eq!(tier == RateTier::Moderate, moderate, "rate {r}");
            assert_eq!(tier == RateTier::Low, low, "rate {r}");
            r += 0.25;
        }
    }

    #[test]
    fn odd_inputs_never_panic() {
        assert_eq!(classify_rate(-3.0), RateTier::Low);
        assert_eq!(classify_rate(f64::NAN), RateTier::Low);
        assert_eq!(classify_rate(f64::INFINITY), RateTier::High);
    }

    #[test]
    fn style_table() {
        assert_eq!(RateTier::High.style(), TierStyle { color: "red", radius: 10.0 });
        assert_eq!(RateTier::Moderate.style(), TierStyle { color: "orange", radius: 8.0 });
        assert_eq!(RateTier::Low.style(), TierStyle { color: "green", radius: 6.0 });
    }

    #[test]
    fn legend_is_high_to_low() {
        assert_eq!(
            legend_entries(),
            vec![
                ("High Suicide Rate", "red"),
                ("Moderate Suicide Rate", "orange"),
                ("Low Suicide Rate", "green"),
            ]
        );
    }
}
