//! Review aggregation: average rating, per-star distribution and grouping.
//!
//! Percentages are rounded per bucket and are not normalised, so the five
//! buckets may sum to 99 or 101. Ratings that are not an integer in `1..=5`
//! are left out of every bucket and group but still count toward the total
//! and the average.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::product::Feedback;

/// Star values in display order.
pub const STARS_DESCENDING: [u8; 5] = [5, 4, 3, 2, 1];

/// Number of reviews shown per star group before it is expanded.
pub const GROUP_PREVIEW_LEN: usize = 3;

/// Arithmetic mean of all ratings, or zero when there are none.
pub fn average_rating(feedbacks: &[Feedback]) -> f64 {
    if feedbacks.is_empty() {
        return 0.0;
    }
    let sum: f64 = feedbacks.iter().map(|f| f.rating).sum();
    sum / feedbacks.len() as f64
}

/// Count and share of reviews for one star value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingBucket {
    pub star: u8,
    pub count: usize,
    /// `round(100 * count / total)`, zero when there are no reviews.
    pub percentage: u8,
}

/// Per-star counts and percentages, five buckets from 5 stars down to 1.
pub fn rating_distribution(feedbacks: &[Feedback]) -> Vec<RatingBucket> {
    let mut counts = [0usize; 5];
    for star in feedbacks.iter().filter_map(Feedback::star) {
        counts[usize::from(star - 1)] += 1;
    }

    let total = feedbacks.len();
    STARS_DESCENDING
        .iter()
        .map(|&star| {
            let count = counts[usize::from(star - 1)];
            RatingBucket {
                star,
                count,
                percentage: percentage(count, total),
            }
        })
        .collect()
}

fn percentage(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u8
}

/// Reviews sharing one star value, in their original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingGroup<'a> {
    pub star: u8,
    pub entries: Vec<&'a Feedback>,
}

impl<'a> RatingGroup<'a> {
    /// Number of reviews in the group.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reviews to display: the first few, or all of them when expanded.
    pub fn visible(&self, expanded: bool) -> &[&'a Feedback] {
        if expanded {
            &self.entries
        } else {
            &self.entries[..self.entries.len().min(GROUP_PREVIEW_LEN)]
        }
    }

    /// Reviews hidden behind the "+N more" affordance when collapsed.
    pub fn hidden_count(&self) -> usize {
        self.entries.len().saturating_sub(GROUP_PREVIEW_LEN)
    }

    /// Check if the group needs an expand toggle at all.
    pub fn is_expandable(&self) -> bool {
        self.hidden_count() > 0
    }
}

/// Group reviews by star value.
///
/// Only stars that actually occur get a key. Iterate with `.values().rev()`
/// for display order (5 stars first).
pub fn group_by_rating(feedbacks: &[Feedback]) -> BTreeMap<u8, RatingGroup<'_>> {
    let mut groups: BTreeMap<u8, RatingGroup<'_>> = BTreeMap::new();
    for feedback in feedbacks {
        let Some(star) = feedback.star() else {
            continue;
        };
        groups
            .entry(star)
            .or_insert_with(|| RatingGroup {
                star,
                entries: Vec::new(),
            })
            .entries
            .push(feedback);
    }
    groups
}

/// Product reviews summary for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub average_rating: f64,
    pub distribution: Vec<RatingBucket>,
}

impl ReviewSummary {
    /// Build the summary from a product's feedback.
    pub fn from_feedbacks(feedbacks: &[Feedback]) -> Self {
        Self {
            total: feedbacks.len(),
            average_rating: average_rating(feedbacks),
            distribution: rating_distribution(feedbacks),
        }
    }

    /// Average rating with one decimal, e.g. `4.3`.
    pub fn display_average(&self) -> String {
        format!("{:.1}", self.average_rating)
    }

    /// Whole stars to fill in the star bar.
    pub fn rounded_stars(&self) -> u8 {
        self.average_rating.round().clamp(0.0, 5.0) as u8
    }

    /// Distribution bucket for a star value.
    pub fn bucket(&self, star: u8) -> Option<&RatingBucket> {
        self.distribution.iter().find(|b| b.star == star)
    }
}
