//! Batch results, summaries and display filtering.

use crate::types::{Availability, CheckResult};
use serde::Serialize;
use std::collections::HashSet;
use std::time::Duration;

/// Everything a finished batch produced.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// One result per requested pair, in checking order
    pub results: Vec<CheckResult>,

    /// Set when the session died and later pairs were skipped
    pub session_error: Option<String>,

    /// Wall time of the batch
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::from_results(&self.results)
    }
}

/// Counts of one extension's outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionCounts {
    pub extension: String,
    pub available: usize,
    pub taken: usize,
    pub unknown: usize,
}

/// Counts per availability value, overall and per extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub available: usize,
    pub taken: usize,
    pub unknown: usize,
    /// Extensions in first-seen order
    pub by_extension: Vec<ExtensionCounts>,
}

impl BatchSummary {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let mut summary = BatchSummary {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            let idx = match summary
                .by_extension
                .iter()
                .position(|c| c.extension == result.extension)
            {
                Some(idx) => idx,
                None => {
                    summary.by_extension.push(ExtensionCounts {
                        extension: result.extension.clone(),
                        ..Default::default()
                    });
                    summary.by_extension.len() - 1
                }
            };
            let counts = &mut summary.by_extension[idx];

            match result.available {
                Availability::Yes => {
                    summary.available += 1;
                    counts.available += 1;
                }
                Availability::No => {
                    summary.taken += 1;
                    counts.taken += 1;
                }
                Availability::Unknown => {
                    summary.unknown += 1;
                    counts.unknown += 1;
                }
            }
        }

        summary
    }

    /// Count for a single availability value.
    pub fn count(&self, availability: Availability) -> usize {
        match availability {
            Availability::Yes => self.available,
            Availability::No => self.taken,
            Availability::Unknown => self.unknown,
        }
    }

    /// Share of results with the given value, in percent.
    pub fn percentage(&self, availability: Availability) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(availability) as f64 * 100.0 / self.total as f64
        }
    }
}

/// Selects which results to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFilter {
    shown: HashSet<Availability>,
}

impl Default for ResultFilter {
    /// Show everything.
    fn default() -> Self {
        Self {
            shown: Availability::ALL.into_iter().collect(),
        }
    }
}

impl ResultFilter {
    /// Show only the given values.
    pub fn only<I: IntoIterator<Item = Availability>>(values: I) -> Self {
        Self {
            shown: values.into_iter().collect(),
        }
    }

    pub fn shows(&self, availability: Availability) -> bool {
        self.shown.contains(&availability)
    }

    pub fn matches(&self, result: &CheckResult) -> bool {
        self.shows(result.available)
    }

    /// Results passing the filter, in their original order.
    pub fn apply<'a>(&self, results: &'a [CheckResult]) -> Vec<&'a CheckResult> {
        results.iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<CheckResult> {
        vec![
            CheckResult::new("alpha", ".com", Availability::Yes, "a"),
            CheckResult::new("alpha", ".ai", Availability::No, "b"),
            CheckResult::new("beta", ".com", Availability::Unknown, "c"),
            CheckResult::new("beta", ".ai", Availability::No, "d"),
        ]
    }

    #[test]
    fn test_summary_counts() {
        let summary = BatchSummary::from_results(&sample());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.available, 1);
        assert_eq!(summary.taken, 2);
        assert_eq!(summary.unknown, 1);
        assert_eq!(summary.percentage(Availability::No), 50.0);
    }

    #[test]
    fn test_summary_by_extension() {
        let summary = BatchSummary::from_results(&sample());
        assert_eq!(
            summary.by_extension,
            vec![
                ExtensionCounts {
                    extension: ".com".to_string(),
                    available: 1,
                    taken: 0,
                    unknown: 1,
                },
                ExtensionCounts {
                    extension: ".ai".to_string(),
                    available: 0,
                    taken: 2,
                    unknown: 0,
                },
            ]
        );
    }

    #[test]
    fn test_empty_summary_percentage() {
        let summary = BatchSummary::from_results(&[]);
        assert_eq!(summary.percentage(Availability::Yes), 0.0);
    }

    #[test]
    fn test_filter() {
        let results = sample();
        let all = ResultFilter::default().apply(&results);
        assert_eq!(all.len(), 4);

        let taken = ResultFilter::only([Availability::No]).apply(&results);
        let names: Vec<&str> = taken.iter().map(|r| r.full_domain.as_str()).collect();
        assert_eq!(names, vec!["alpha.ai", "beta.ai"]);
    }
}
