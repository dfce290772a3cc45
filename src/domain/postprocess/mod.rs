// Post-processing - Expand raw intervals and merge close neighbours

use std::collections::BTreeMap;

use crate::domain::config::PostProcessConfig;
use crate::domain::model::{Fragment, Interval};

/// Widen every interval by the configured margins; starts never go below zero
pub fn expand(intervals: &[Interval], pre_margin: f64, post_margin: f64) -> Vec<Interval> {
    intervals
        .iter()
        .map(|interval| Interval {
            video_id: interval.video_id.clone(),
            start: (interval.start - pre_margin).max(0.0),
            end: interval.end + post_margin,
        })
        .collect()
}

/// Merge intervals of the same video whose gap is at most `max_gap`.
///
/// Output is ordered by video id, then start.
pub fn merge(intervals: &[Interval], max_gap: f64) -> Vec<Fragment> {
    let mut groups: BTreeMap<&str, Vec<&Interval>> = BTreeMap::new();
    for interval in intervals {
        groups
            .entry(interval.video_id.as_str())
            .or_default()
            .push(interval);
    }

    let mut fragments = Vec::with_capacity(intervals.len());
    for (video_id, mut group) in groups {
        group.sort_by(|a, b| a.start.total_cmp(&b.start));

        let mut current: Option<(f64, f64)> = None;
        for interval in group {
            current = match current {
                None => Some((interval.start, interval.end)),
                Some((cur_start, cur_end)) if interval.start - cur_end <= max_gap => {
                    Some((cur_start, cur_end.max(interval.end)))
                }
                Some((cur_start, cur_end)) => {
                    fragments.push(fragment(video_id, cur_start, cur_end));
                    Some((interval.start, interval.end))
                }
            };
        }
        if let Some((cur_start, cur_end)) = current {
            fragments.push(fragment(video_id, cur_start, cur_end));
        }
    }
    fragments
}

/// Expand then merge, producing the final fragment list
pub fn postprocess(intervals: &[Interval], config: &PostProcessConfig) -> Vec<Fragment> {
    let expanded = expand(intervals, config.pre_margin, config.post_margin);
    merge(&expanded, config.max_merge_gap)
}

fn fragment(video_id: &str, start: f64, end: f64) -> Fragment {
    Fragment {
        video_id: video_id.to_string(),
        start,
        end,
    }
}
