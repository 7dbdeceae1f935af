//! Uniform context sampling.
//!
//! Sampling never reorders: picked items come back in the order they were
//! recorded. The generator is always supplied by the caller.

use rand::Rng;

use crate::entry::{ContextSnapshot, WordEntry};

/// Pick exactly `min(m, items.len())` items in one pass, each subset equally likely.
pub fn select<'a, T, R>(items: &'a [T], m: usize, rng: &mut R) -> Vec<&'a T>
where
    R: Rng + ?Sized,
{
    let n = items.len();
    let wanted = m.min(n);
    let mut picked = Vec::with_capacity(wanted);
    for (seen, item) in items.iter().enumerate() {
        let needed = wanted - picked.len();
        if needed == 0 {
            break;
        }
        if rng.gen_range(0..n - seen) < needed {
            picked.push(item);
        }
    }
    picked
}

/// Split `m` samples over variants in proportion to their counts.
///
/// The shares always sum to `min(m, total)` and never exceed a variant's count.
pub fn shares(counts: &[u64], m: usize) -> Vec<usize> {
    let total: u64 = counts.iter().sum();
    if total <= m as u64 {
        return counts.iter().map(|&c| c as usize).collect();
    }

    let (m_wide, total_wide) = (m as u128, total as u128);
    let mut shares: Vec<usize> = counts
        .iter()
        .map(|&c| ((2 * m_wide * c as u128 + total_wide) / (2 * total_wide)) as usize)
        .collect();

    let mut sum: usize = shares.iter().sum();
    while sum > m {
        let Some(largest) = index_of_largest(&shares) else {
            break;
        };
        shares[largest] -= 1;
        sum -= 1;
    }
    while sum < m {
        let Some(smallest) = index_with_room(&shares, counts) else {
            break;
        };
        shares[smallest] += 1;
        sum += 1;
    }
    shares
}

fn index_of_largest(shares: &[usize]) -> Option<usize> {
    let max = *shares.iter().max()?;
    if max == 0 {
        return None;
    }
    shares.iter().position(|&s| s == max)
}

/// Smallest nonzero share that can still grow, else the smallest that can.
fn index_with_room(shares: &[usize], counts: &[u64]) -> Option<usize> {
    let with_room = || {
        shares
            .iter()
            .zip(counts)
            .enumerate()
            .filter(|&(_, (&s, &c))| (s as u64) < c)
            .map(|(i, (&s, _))| (i, s))
    };
    with_room()
        .filter(|&(_, s)| s > 0)
        .min_by_key(|&(_, s)| s)
        .or_else(|| with_room().min_by_key(|&(_, s)| s))
        .map(|(i, _)| i)
}

/// Draw up to `m` contexts of `entry`, stratified by variant.
///
/// Returns `(form, context)` pairs grouped by variant in variant order.
pub fn sample_contexts<'e, R>(
    entry: &'e WordEntry,
    m: usize,
    rng: &mut R,
) -> Vec<(&'e str, &'e ContextSnapshot)>
where
    R: Rng + ?Sized,
{
    let variants = entry.variants();
    if let [only] = variants {
        return select(only.contexts(), m, rng)
            .into_iter()
            .map(|c| (only.form(), c))
            .collect();
    }

    let shares = shares(&entry.counts(), m);
    let mut picked = Vec::with_capacity(shares.iter().sum());
    for (variant, share) in variants.iter().zip(shares) {
        picked.extend(
            select(variant.contexts(), share, rng)
                .into_iter()
                .map(|c| (variant.form(), c)),
        );
    }
    picked
}
