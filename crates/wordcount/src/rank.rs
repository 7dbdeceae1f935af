use std::cmp::Ordering;

use crate::entry::WordEntry;
use crate::table::FrequencyTable;

/// A live entry together with its table key.
pub type Ranked<'a> = (&'a str, &'a WordEntry);

/// Most frequent first; equal counts fall back to the key.
pub fn compare(a: &Ranked<'_>, b: &Ranked<'_>) -> Ordering {
    b.1.total_count()
        .cmp(&a.1.total_count())
        .then_with(|| a.0.cmp(b.0))
}

pub fn rank(table: &FrequencyTable) -> Vec<Ranked<'_>> {
    let mut ranked: Vec<Ranked<'_>> = table.iter().collect();
    ranked.sort_by(compare);
    ranked
}

/// The first `n` ranked entries plus every entry tied with the `n`-th.
pub fn top<'r, 'a>(ranked: &'r [Ranked<'a>], n: usize) -> &'r [Ranked<'a>] {
    if n == 0 {
        return &[];
    }
    if n >= ranked.len() {
        return ranked;
    }
    let cutoff = ranked[n - 1].1.total_count();
    let end = ranked[n..]
        .iter()
        .position(|(_, entry)| entry.total_count() != cutoff)
        .map_or(ranked.len(), |extra| n + extra);
    &ranked[..end]
}
