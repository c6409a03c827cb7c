//! Line reconstruction from positioned text fragments.
//!
//! Fragments come out of a text-extraction backend in whatever order the
//! document's content stream drew them. Reading order is recovered by
//! clustering fragments on their baseline and sorting each cluster left to
//! right. Pages are never reordered by geometry: page 1's lines always come
//! before page 2's.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::models::document::{Line, Page, TextFragment};

/// Baseline clustering mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LineGrouping {
    /// Fragments whose baselines round to the same integer share a line.
    Rounded,
    /// Fragments within `units` of the current line's anchor baseline share
    /// a line. The anchor is the highest fragment of the cluster.
    Tolerance { units: f32 },
}

impl Default for LineGrouping {
    fn default() -> Self {
        Self::Rounded
    }
}

/// Reconstruct ordered lines from fragments of one or more pages.
///
/// Fragments are partitioned by their `page` field; pages come out in
/// ascending index order, lines within a page top to bottom.
pub fn reconstruct(fragments: &[TextFragment], grouping: LineGrouping) -> Vec<Line> {
    let mut by_page: BTreeMap<u32, Vec<&TextFragment>> = BTreeMap::new();
    for fragment in fragments {
        by_page.entry(fragment.page).or_default().push(fragment);
    }

    by_page
        .into_iter()
        .flat_map(|(page, fragments)| reconstruct_page(page, fragments, grouping))
        .collect()
}

/// Reconstruct lines for already separated pages.
///
/// Pages are taken in ascending index order; two pages with the same index
/// keep their relative order.
pub fn reconstruct_pages(pages: &[Page], grouping: LineGrouping) -> Vec<Line> {
    let mut ordered: Vec<&Page> = pages.iter().collect();
    ordered.sort_by_key(|page| page.index);

    ordered
        .into_iter()
        .flat_map(|page| reconstruct_page(page.index, page.fragments.iter().collect(), grouping))
        .collect()
}

fn reconstruct_page(page: u32, fragments: Vec<&TextFragment>, grouping: LineGrouping) -> Vec<Line> {
    let clusters = match grouping {
        LineGrouping::Rounded => cluster_rounded(fragments),
        LineGrouping::Tolerance { units } => cluster_tolerance(fragments, f64::from(units)),
    };

    let lines: Vec<Line> = clusters
        .into_iter()
        .filter_map(|(y, mut members)| {
            members.sort_by(|a, b| a.x.total_cmp(&b.x));
            let text = members
                .iter()
                .map(|f| f.text.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            let text = text.trim();
            (!text.is_empty()).then(|| Line::new(page, y, text))
        })
        .collect();

    trace!("Page {}: {} lines reconstructed", page, lines.len());
    lines
}

/// Round half up, so that 10.5 and 10.6 land on 11 but 10.4 on 10.
fn round_baseline(y: f64) -> i64 {
    (y + 0.5).floor() as i64
}

fn cluster_rounded(fragments: Vec<&TextFragment>) -> Vec<(f64, Vec<&TextFragment>)> {
    let mut rows: BTreeMap<i64, Vec<&TextFragment>> = BTreeMap::new();
    for fragment in fragments {
        rows.entry(round_baseline(fragment.y))
            .or_default()
            .push(fragment);
    }

    rows.into_iter()
        .rev()
        .map(|(y, members)| (y as f64, members))
        .collect()
}

fn cluster_tolerance(
    mut fragments: Vec<&TextFragment>,
    units: f64,
) -> Vec<(f64, Vec<&TextFragment>)> {
    fragments.sort_by(|a, b| match b.y.total_cmp(&a.y) {
        Ordering::Equal => a.x.total_cmp(&b.x),
        other => other,
    });

    let mut clusters: Vec<(f64, Vec<&TextFragment>)> = Vec::new();
    for fragment in fragments {
        match clusters.last_mut() {
            Some((anchor, members)) if (fragment.y - *anchor).abs() <= units => {
                members.push(fragment);
            }
            _ => clusters.push((fragment.y, vec![fragment])),
        }
    }
    clusters
}
