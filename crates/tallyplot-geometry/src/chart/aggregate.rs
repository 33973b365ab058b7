//! Aggregation of raw records into a chart series.
//!
//! Records are grouped by a key, their extracted values summed (or counted),
//! then optionally sorted, capped to the top N groups, label-truncated and
//! colored. Records whose key or value is missing are excluded and counted
//! instead of aborting the aggregation.
//!
//! # Example
//!
//! ```
//! use tallyplot_geometry::chart::{AggregateOptions, aggregate_counts};
//!
//! let records = ["A", "A", "B"];
//! let result = aggregate_counts(records, |r| Some(*r), &AggregateOptions::unlimited());
//!
//! let labels: Vec<_> = result.series.iter().map(|p| (p.label.as_str(), p.value)).collect();
//! assert_eq!(labels, vec![("A", 2.0), ("B", 1.0)]);
//! ```

use super::style::{Palette, SERIES_COLORS};
use super::types::{DataPoint, Series};
use crate::Color;
use tallyplot_core::alloc::index_map_with_capacity;
use tallyplot_core::profiling::profile_scope;

/// Default number of groups kept by [`AggregateOptions::default`].
pub const DEFAULT_TOP_N: usize = 8;

/// Default label length limit, in characters.
pub const DEFAULT_LABEL_MAX_CHARS: usize = 12;

/// Marker appended to truncated labels.
pub const DEFAULT_ELLIPSIS: &str = "...";

/// Options controlling post-grouping steps.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOptions {
    /// Keep at most this many groups. Lossy unless `collect_rest_as` is set.
    pub top_n: Option<usize>,
    /// Sort groups by value, largest first. Ties keep first-seen order.
    pub sort_descending: bool,
    /// Truncate labels longer than this many characters.
    pub label_max_chars: Option<usize>,
    /// Appended to truncated labels.
    pub ellipsis: String,
    /// Fold groups beyond `top_n` into one bucket with this label.
    ///
    /// The bucket takes the last of the `top_n` slots.
    pub collect_rest_as: Option<String>,
    /// Colors assigned by final index to groups without a record color.
    pub palette: Vec<Color>,
}

impl Default for AggregateOptions {
    /// Sorted, top eight, twelve-character labels, default palette.
    fn default() -> Self {
        Self {
            top_n: Some(DEFAULT_TOP_N),
            sort_descending: true,
            label_max_chars: Some(DEFAULT_LABEL_MAX_CHARS),
            ellipsis: DEFAULT_ELLIPSIS.to_string(),
            collect_rest_as: None,
            palette: SERIES_COLORS.to_vec(),
        }
    }
}

impl AggregateOptions {
    /// Keep every group in first-seen order with full labels.
    pub fn unlimited() -> Self {
        Self {
            top_n: None,
            sort_descending: false,
            label_max_chars: None,
            ..Default::default()
        }
    }

    /// Set the top-N cap.
    pub fn with_top_n(mut self, top_n: Option<usize>) -> Self {
        self.top_n = top_n;
        self
    }

    /// Enable or disable descending sort.
    pub fn with_sort_descending(mut self, sort: bool) -> Self {
        self.sort_descending = sort;
        self
    }

    /// Set the label length limit.
    pub fn with_label_max_chars(mut self, max: Option<usize>) -> Self {
        self.label_max_chars = max;
        self
    }

    /// Set the marker appended to truncated labels.
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Fold overflow groups into a bucket named `label`.
    pub fn with_rest_as(mut self, label: impl Into<String>) -> Self {
        self.collect_rest_as = Some(label.into());
        self
    }

    /// Replace the fallback palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }
}

/// Result of an aggregation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregation {
    /// Grouped, ordered, colored points.
    pub series: Series,
    /// Sum of every valid extracted value, before top-N truncation.
    pub input_total: f64,
    /// Records excluded because their key or value was missing or invalid.
    pub skipped: usize,
    /// Groups removed by top-N without being folded into a bucket.
    pub truncated_groups: usize,
    /// Sum of the values of `truncated_groups`.
    pub truncated_total: f64,
    /// Groups folded into the `collect_rest_as` bucket.
    pub folded_groups: usize,
}

impl Aggregation {
    /// Whether any value was lost to top-N truncation.
    pub fn is_lossy(&self) -> bool {
        self.truncated_groups > 0
    }

    /// Share of every group in the output total, in percent.
    pub fn percentages(&self) -> Vec<f64> {
        self.series.percentages()
    }
}

struct Bucket {
    value: f64,
    color: Option<Color>,
}

/// Group records by key and count them (each valid record contributes `1`).
pub fn aggregate_counts<R, K, FK>(
    records: impl IntoIterator<Item = R>,
    key_fn: FK,
    options: &AggregateOptions,
) -> Aggregation
where
    K: Into<String>,
    FK: FnMut(&R) -> Option<K>,
{
    aggregate_with_colors(records, key_fn, |_| Some(1.0), |_| None, options)
}

/// Group records by key and sum the values extracted by `value_fn`.
pub fn aggregate<R, K, FK, FV>(
    records: impl IntoIterator<Item = R>,
    key_fn: FK,
    value_fn: FV,
    options: &AggregateOptions,
) -> Aggregation
where
    K: Into<String>,
    FK: FnMut(&R) -> Option<K>,
    FV: FnMut(&R) -> Option<f64>,
{
    aggregate_with_colors(records, key_fn, value_fn, |_| None, options)
}

/// Aggregate pre-grouped `(key, value)` pairs, e.g. a counts map.
///
/// Repeated keys are merged.
pub fn aggregate_pairs<K>(
    pairs: impl IntoIterator<Item = (K, f64)>,
    options: &AggregateOptions,
) -> Aggregation
where
    K: Into<String> + Clone,
{
    aggregate(pairs, |(k, _)| Some(k.clone()), |(_, v)| Some(*v), options)
}

/// Group records by key, summing values and taking the first color any
/// record of the group provides.
pub fn aggregate_with_colors<R, K, FK, FV, FC>(
    records: impl IntoIterator<Item = R>,
    key_fn: FK,
    value_fn: FV,
    color_fn: FC,
    options: &AggregateOptions,
) -> Aggregation
where
    K: Into<String>,
    FK: FnMut(&R) -> Option<K>,
    FV: FnMut(&R) -> Option<f64>,
    FC: FnMut(&R) -> Option<Color>,
{
    aggregate_with_palette(
        records,
        key_fn,
        value_fn,
        color_fn,
        options,
        &options.palette,
    )
}

/// Like [`aggregate_with_colors`], but groups without a record color take
/// their color from `palette` instead of `options.palette`.
pub fn aggregate_with_palette<R, K, FK, FV, FC>(
    records: impl IntoIterator<Item = R>,
    mut key_fn: FK,
    mut value_fn: FV,
    mut color_fn: FC,
    options: &AggregateOptions,
    palette: &dyn Palette,
) -> Aggregation
where
    K: Into<String>,
    FK: FnMut(&R) -> Option<K>,
    FV: FnMut(&R) -> Option<f64>,
    FC: FnMut(&R) -> Option<Color>,
{
    profile_scope!("aggregate");

    let records = records.into_iter();
    let mut groups = index_map_with_capacity::<String, Bucket>(records.size_hint().0.min(64));
    let mut skipped = 0usize;
    let mut input_total = 0.0;

    for record in records {
        let Some(key) = key_fn(&record) else {
            skipped += 1;
            continue;
        };
        let value = match value_fn(&record) {
            Some(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                skipped += 1;
                continue;
            }
        };

        input_total += value;
        let bucket = groups.entry(key.into()).or_insert(Bucket {
            value: 0.0,
            color: None,
        });
        bucket.value += value;
        if bucket.color.is_none() {
            bucket.color = color_fn(&record);
        }
    }

    if skipped > 0 {
        tracing::warn!("Aggregation skipped {} malformed record(s)", skipped);
    }

    let mut entries: Vec<(String, Bucket)> = groups.into_iter().collect();
    if options.sort_descending {
        // Stable, so equal values keep first-seen order.
        entries.sort_by(|a, b| b.1.value.total_cmp(&a.1.value));
    }

    let mut truncated_groups = 0;
    let mut truncated_total = 0.0;
    let mut folded_groups = 0;

    if let Some(top_n) = options.top_n
        && entries.len() > top_n
    {
        match &options.collect_rest_as {
            Some(rest_label) => {
                let keep = top_n.saturating_sub(1);
                let rest = entries.split_off(keep);
                folded_groups = rest.len();
                let rest_value = rest.iter().map(|(_, b)| b.value).sum();
                entries.push((
                    rest_label.clone(),
                    Bucket {
                        value: rest_value,
                        color: None,
                    },
                ));
            }
            None => {
                let rest = entries.split_off(top_n);
                truncated_groups = rest.len();
                truncated_total = rest.iter().map(|(_, b)| b.value).sum();
            }
        }
    }

    let points: Vec<DataPoint> = entries
        .into_iter()
        .enumerate()
        .map(|(index, (label, bucket))| DataPoint {
            label: truncate_label(&label, options.label_max_chars, &options.ellipsis),
            value: bucket.value,
            color: Some(bucket.color.unwrap_or_else(|| palette.color(index))),
        })
        .collect();

    tracing::trace!(
        "Aggregated {} group(s), total {}, truncated {}, folded {}",
        points.len(),
        input_total,
        truncated_groups,
        folded_groups
    );

    Aggregation {
        series: Series::new(points),
        input_total,
        skipped,
        truncated_groups,
        truncated_total,
        folded_groups,
    }
}

/// Shorten `label` to `max_chars` characters plus `ellipsis`.
///
/// Counts characters, not bytes, so multi-byte labels are never split
/// inside a code point. Labels within the limit are returned unchanged.
pub fn truncate_label(label: &str, max_chars: Option<usize>, ellipsis: &str) -> String {
    match max_chars {
        Some(max) if label.chars().count() > max => {
            let mut out: String = label.chars().take(max).collect();
            out.push_str(ellipsis);
            out
        }
        _ => label.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Incident {
        kind: Option<&'static str>,
        cost: Option<f64>,
    }

    fn incident(kind: Option<&'static str>, cost: Option<f64>) -> Incident {
        Incident { kind, cost }
    }

    #[test]
    fn test_counts_in_insertion_order() {
        let result = aggregate_counts(["A", "A", "B"], |r| Some(*r), &AggregateOptions::unlimited());
        let pairs: Vec<_> = result
            .series
            .iter()
            .map(|p| (p.label.clone(), p.value))
            .collect();
        assert_eq!(pairs, vec![("A".to_string(), 2.0), ("B".to_string(), 1.0)]);
        assert_eq!(result.skipped, 0);
        assert_eq!(result.input_total, 3.0);
    }

    #[test]
    fn test_sorted_descending() {
        let options = AggregateOptions::unlimited().with_sort_descending(true);
        let result = aggregate_counts(["B", "A", "A"], |r| Some(*r), &options);
        let labels: Vec<_> = result.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B"]);
    }

    #[test]
    fn test_sort_ties_keep_first_seen_order() {
        let options = AggregateOptions::unlimited().with_sort_descending(true);
        let result = aggregate_counts(["C", "B", "A"], |r| Some(*r), &options);
        let labels: Vec<_> = result.series.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_malformed_records_skipped() {
        let records = vec![
            incident(Some("fire"), Some(10.0)),
            incident(None, Some(5.0)),
            incident(Some("flood"), None),
            incident(Some("fire"), Some(f64::NAN)),
            incident(Some("fire"), Some(-2.0)),
            incident(Some("flood"), Some(4.0)),
        ];
        let result = aggregate(
            &records,
            |r| r.kind,
            |r| r.cost,
            &AggregateOptions::unlimited(),
        );
        assert_eq!(result.skipped, 4);
        assert_eq!(result.input_total, 14.0);
        assert_eq!(result.series.total(), 14.0);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<&str> = Vec::new();
        let result = aggregate_counts(records, |r| Some(*r), &AggregateOptions::default());
        assert!(result.series.is_empty());
        assert_eq!(result.input_total, 0.0);
        assert!(!result.is_lossy());
    }

    #[test]
    fn test_top_n_is_lossy_and_reported() {
        let pairs = (0..10).map(|i| (format!("k{i}"), (10 - i) as f64));
        let options = AggregateOptions::unlimited()
            .with_sort_descending(true)
            .with_top_n(Some(8));
        let result = aggregate_pairs(pairs, &options);
        assert_eq!(result.series.len(), 8);
        assert!(result.is_lossy());
        assert_eq!(result.truncated_groups, 2);
        assert_eq!(result.truncated_total, 3.0);
        assert_eq!(result.series.total() + result.truncated_total, result.input_total);
    }

    #[test]
    fn test_top_n_folds_rest() {
        let pairs = (0..10).map(|i| (format!("k{i}"), 1.0));
        let options = AggregateOptions::unlimited()
            .with_top_n(Some(4))
            .with_rest_as("Other");
        let result = aggregate_pairs(pairs, &options);
        assert_eq!(result.series.len(), 4);
        assert_eq!(result.folded_groups, 7);
        assert!(!result.is_lossy());
        let last = result.series.get(3).unwrap();
        assert_eq!(last.label, "Other");
        assert_eq!(last.value, 7.0);
        assert_eq!(result.series.total(), result.input_total);
    }

    #[test]
    fn test_label_truncation() {
        assert_eq!(truncate_label("Slip and fall", Some(10), "..."), "Slip and f...");
        assert_eq!(truncate_label("Short", Some(10), "..."), "Short");
        assert_eq!(truncate_label("exactly ten", Some(11), "..."), "exactly ten");
        assert_eq!(truncate_label("héllo wörld", Some(4), "…"), "héll…");
        assert_eq!(truncate_label("anything", None, "..."), "anything");
    }

    #[test]
    fn test_external_palette_cycles_over_every_group() {
        let keys: Vec<String> = (0..10).map(|i| format!("g{i}")).collect();
        let result = aggregate_with_palette(
            keys.iter().map(String::as_str),
            |k| Some(*k),
            |_| Some(1.0),
            |_| None,
            &AggregateOptions::unlimited(),
            &crate::chart::SeriesPalette,
        );
        let colors: Vec<_> = result.series.iter().map(|p| p.color.unwrap()).collect();
        assert_eq!(colors.len(), 10);
        assert_ne!(colors[0], colors[1]);
        assert_eq!(colors[8], SERIES_COLORS[0]);
        assert_eq!(colors[9], SERIES_COLORS[1]);
    }

    #[test]
    fn test_palette_and_record_colors() {
        let red = Color::rgb(1.0, 0.0, 0.0);
        let palette = vec![Color::BLACK, Color::WHITE];
        let options = AggregateOptions::unlimited().with_palette(palette.clone());
        let result = aggregate_with_colors(
            ["a", "b", "c"],
            |r| Some(*r),
            |_| Some(1.0),
            |r| (*r == "b").then_some(red),
            &options,
        );
        let colors: Vec<_> = result.series.iter().map(|p| p.color.unwrap()).collect();
        assert_eq!(colors, vec![Color::BLACK, red, Color::BLACK]);
    }

    #[test]
    fn test_merges_repeated_pairs() {
        let result = aggregate_pairs(
            [("x", 1.5), ("y", 2.0), ("x", 0.5)],
            &AggregateOptions::unlimited(),
        );
        assert_eq!(result.series.len(), 2);
        assert_eq!(result.series.get(0).unwrap().value, 2.0);
    }
}
