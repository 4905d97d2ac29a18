//! Carbon aggregation
//!
//! Reduces per-user carbon records to the two figures shown on the
//! carbon-footprint cards.

use serde::Serialize;
use std::fmt;

use super::types::CarbonRecord;

/// Aggregated carbon figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarbonSummary {
    /// Number of records aggregated
    pub record_count: usize,
    /// Mean payback period in years, `None` when there are no records
    pub average_payback_years: Option<f64>,
    /// Sum of all emissions in tons
    pub total_emission_tons: f64,
}

impl CarbonSummary {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

impl fmt::Display for CarbonSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average_payback_years {
            Some(avg) => write!(
                f,
                "avg payback {:.2} years, total emission {:.2} tons ({} records)",
                avg, self.total_emission_tons, self.record_count
            ),
            None => write!(f, "no carbon records"),
        }
    }
}

/// Aggregate a list of carbon records in a single pass
pub fn aggregate(records: &[CarbonRecord]) -> CarbonSummary {
    let (payback_sum, emission_sum) = records
        .iter()
        .fold((0.0_f64, 0.0_f64), |(p, e), r| {
            (p + r.payback_years, e + r.emission_tons)
        });

    let average_payback_years = if records.is_empty() {
        None
    } else {
        Some(payback_sum / records.len() as f64)
    };

    CarbonSummary {
        record_count: records.len(),
        average_payback_years,
        total_emission_tons: emission_sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_is_unavailable_not_nan() {
        let summary = aggregate(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.average_payback_years, None);
        assert_eq!(summary.total_emission_tons, 0.0);
        assert_eq!(summary.to_string(), "no carbon records");
    }

    #[test]
    fn test_single_record() {
        let summary = aggregate(&[CarbonRecord::new(7.0, 3.5)]);
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.average_payback_years, Some(7.0));
        assert_eq!(summary.total_emission_tons, 3.5);
    }

    #[test]
    fn test_sum_invariant() {
        let sets: Vec<Vec<CarbonRecord>> = vec![
            vec![CarbonRecord::new(1.0, 2.0), CarbonRecord::new(3.0, 4.0)],
            vec![
                CarbonRecord::new(4.5, 10.25),
                CarbonRecord::new(8.0, 0.75),
                CarbonRecord::new(12.0, 5.0),
            ],
            (0..50)
                .map(|i| CarbonRecord::new(i as f64 * 0.3, (i % 7) as f64 + 0.1))
                .collect(),
        ];

        for records in sets {
            let expected: f64 = records.iter().map(|r| r.emission_tons).sum();
            let summary = aggregate(&records);
            assert!(approx_eq(summary.total_emission_tons, expected));
        }
    }

    #[test]
    fn test_mean_invariant() {
        let records: Vec<CarbonRecord> = (1..=20)
            .map(|i| CarbonRecord::new(i as f64 * 1.5, 1.0))
            .collect();
        let expected = records.iter().map(|r| r.payback_years).sum::<f64>() / 20.0;

        let avg = aggregate(&records).average_payback_years.unwrap();
        assert!(approx_eq(avg, expected));
        assert!(avg.is_finite());
    }

    #[test]
    fn test_display() {
        let summary = aggregate(&[CarbonRecord::new(5.0, 2.0), CarbonRecord::new(7.0, 3.0)]);
        assert_eq!(
            summary.to_string(),
            "avg payback 6.00 years, total emission 5.00 tons (2 records)"
        );
    }
}
