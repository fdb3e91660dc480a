//! Console report.

use std::fmt;

use crate::recommender::ScoredItem;

/// Short US-style date, e.g. `12/10/2024`.
const SHORT_DATE: &str = "%-m/%-d/%Y";

/// Human-readable listing of recommendations.
///
/// ```text
/// Top 3 Recommended Events:
/// - Community Meeting (Community) on 12/10/2024
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    top_n: usize,
    recommendations: &'a [ScoredItem],
    show_scores: bool,
}

impl<'a> Report<'a> {
    /// Creates a report without scores.
    #[must_use]
    pub const fn new(top_n: usize, recommendations: &'a [ScoredItem]) -> Self {
        Self {
            top_n,
            recommendations,
            show_scores: false,
        }
    }

    /// Appends each item's score to its line.
    #[must_use]
    pub fn with_scores(mut self, show: bool) -> Self {
        self.show_scores = show;
        self
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Top {} Recommended Events:", self.top_n)?;
        for rec in self.recommendations {
            write!(
                f,
                "- {} ({}) on {}",
                rec.item.name(),
                rec.item.category(),
                rec.item.date().format(SHORT_DATE)
            )?;
            if self.show_scores {
                write!(f, " [score {:.4}]", rec.score)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
