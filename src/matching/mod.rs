//! Pure matching logic: compatibility scoring, listing queries, ranking and
//! the aggregate statistics shown next to them.

pub mod compatibility;
pub mod listing;
pub mod recommendations;
pub mod statistics;

pub use compatibility::{animal_chart, breakdown, score, ChartPoint, CompatibilityBreakdown};

/// Rounds to one decimal place, the precision every score and average is
/// shown at. Ties go to the even digit, so 2.25 becomes 2.2.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Arithmetic mean rounded to one decimal; `None` for an empty input.
pub(crate) fn mean1<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(round1(sum / count as f64))
    }
}
