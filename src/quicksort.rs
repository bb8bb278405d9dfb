use crate::heapsort::heapsort;
use crate::pivot;
use crate::smallsort::insertion_sort;
use crate::{SortKey, INSERTION_THRESHOLD, LARGE_DATA_THRESHOLD};

/// Sorts `v[low..=high]`.
///
/// `leftmost` is true while the range abuts the left end of the slice; every other
/// range has the pivot that split it off sitting at `v[low - 1]`, known to be less
/// than or equal to all of its elements. `height` counts down the unbalanced
/// partitions the range may still produce before heap sort takes over.
///
/// `ROOT` marks the top-level frame. It partitions at least once before
/// considering the small-range and depth cutoffs, which recursive frames check up
/// front; by then even its leftover right side has a predecessor element, so its
/// terminal insertion sort can run unguarded.
pub(crate) fn quicksort<T: SortKey, const ROOT: bool>(
    v: &mut [T],
    mut leftmost: bool,
    mut low: usize,
    mut high: usize,
    mut height: i32,
) {
    // The left side of each partition recurses, the right side iterates.
    let mut x = high - low;

    loop {
        if !ROOT {
            if x < INSERTION_THRESHOLD {
                insertion_sort::<T, false>(v, leftmost, low, high);
                return;
            }

            if height < 0 {
                heapsort(v, low, high);
                return;
            }
        }

        let (sl, mid, sr) = pivot::prepare(v, low, high);

        if !leftmost {
            // If the pivot that borders this range on the left shows up among the
            // middle candidates, the range starts with a run of its duplicates.
            // Move the run onto its final position in one pass and continue to the
            // right of it. This is what makes all-equal inputs linear.
            let h = v[low - 1];
            if h == v[sl] || h == v[mid] || h == v[sr] {
                low = partition_left(v, low, high, h);

                if low >= high {
                    return;
                }

                x = high - low;
                continue;
            }
        }

        let (l, g, work) = partition(v, low, high, mid);

        let eighth = x >> 3;
        let ls = l - low;
        let gs = high - g;

        let mut recurse_left = true;

        if ls >= eighth && gs >= eighth {
            // The partition is fairly balanced. If it also moved next to nothing,
            // gamble that both sides are nearly sorted and finish them with the
            // bailing insertion sort; whichever side exhausts its move budget
            // falls back into quicksort below.
            if !work {
                if insertion_sort::<T, true>(v, leftmost, low, l) {
                    if insertion_sort::<T, true>(v, false, g, high) {
                        return;
                    }
                    recurse_left = false;
                }
            }
        } else {
            // Unbalanced. Perturb a few elements to break up whatever pattern
            // produced this pivot, and charge the depth budget.
            scramble(v, low, l, ls);
            scramble(v, g, high, gs);
            height -= 1;
        }

        if recurse_left {
            quicksort::<T, false>(v, leftmost, low, l, height);
        }

        low = g;
        x = high - low;

        if ROOT {
            if x < INSERTION_THRESHOLD {
                insertion_sort::<T, false>(v, false, low, high);
                return;
            }

            if height < 0 {
                heapsort(v, low, high);
                return;
            }
        }

        leftmost = false;
    }
}

/// Lomuto partition of `v[low..=high]` around the pivot parked at `mid`.
///
/// Elements travel through a gap in the data, two moves per step instead of the
/// three a swap costs, and the left cursor advances by the comparison result
/// rather than a branch. Returns `(l, g, work)` where `v[low..=l] < p`,
/// `v[g..=high] >= p` and the pivot sits between the two; `work` reports whether
/// the partition moved a significant share of the range.
fn partition<T: SortKey>(v: &mut [T], low: usize, high: usize, mid: usize) -> (usize, usize, bool) {
    let x = high - low;
    let p = v[mid];

    let mut l = low;
    let mut k = high + 1;
    let work;

    // SAFETY: `v[mid] == p` stops the upward scan at `mid` at the latest, the
    // downward scan is bounded by `l`, and the main loop keeps `l <= g <= k`, so
    // every access stays inside `[low, high]`.
    unsafe {
        // Skip the prefix that is already on the correct side.
        while *v.get_unchecked(l) < p {
            l += 1;
        }

        // Open the gap at l. Its previous occupant replaces the pivot, and a value
        // below the pivot takes its place so the downward scan can run without an
        // index check of its own; the explicit `k == l` bound covers the one case
        // where the stopper wraps around (p equal to the type minimum).
        *v.get_unchecked_mut(mid) = *v.get_unchecked(l);
        *v.get_unchecked_mut(l) = p.wrapping_pred();

        loop {
            k -= 1;
            if k == l || *v.get_unchecked(k) < p {
                break;
            }
        }

        // If both skip scans together covered most of the range, the partition has
        // little left to do, and insertion sorting the halves afterwards is not
        // worth trying.
        work = (l - low) + (high - k) < (x >> 1);

        let mut g = l;
        while g < k {
            *v.get_unchecked_mut(g) = *v.get_unchecked(l);
            g += 1;
            *v.get_unchecked_mut(l) = *v.get_unchecked(g);
            l += (*v.get_unchecked(l) < p) as usize;
        }

        *v.get_unchecked_mut(g) = *v.get_unchecked(l);
        *v.get_unchecked_mut(l) = p;
    }

    // Keep the pivot out of both sides.
    (
        l - (l > low) as usize,
        l + (l < high) as usize,
        work,
    )
}

/// Partitions `v[low..=high]` into elements equal to `h` followed by elements
/// greater than `h`, and returns the first index past the equal run. `h` is the
/// pivot at `v[low - 1]`, so the range holds nothing smaller.
fn partition_left<T: SortKey>(v: &mut [T], low: usize, high: usize, h: T) -> usize {
    let mut g = high + 1;
    let mut l = low;

    // SAFETY: the caller verified that a candidate inside the range equals `h`, so
    // the downward scan stops in bounds; the stopper written at `g` differs from
    // `h` by the SortKey contract and bounds the upward scan; the Lomuto pass
    // keeps `l <= k <= g`.
    unsafe {
        // Entries greater than h at the back are already in place.
        loop {
            g -= 1;
            if *v.get_unchecked(g) <= h {
                break;
            }
        }

        // Same trick at the front for the equal run, with a stopper standing in
        // for an index check.
        let e = *v.get_unchecked(g);
        *v.get_unchecked_mut(g) = h.wrapping_succ();
        while *v.get_unchecked(l) == h {
            l += 1;
        }
        *v.get_unchecked_mut(g) = e;

        let mut k = l;
        let p = *v.get_unchecked(l);
        while k < g {
            *v.get_unchecked_mut(k) = *v.get_unchecked(l);
            k += 1;
            *v.get_unchecked_mut(l) = *v.get_unchecked(k);
            l += (*v.get_unchecked(l) == h) as usize;
        }

        *v.get_unchecked_mut(k) = *v.get_unchecked(l);
        *v.get_unchecked_mut(l) = p;
        l + (p == h) as usize
    }
}

/// Swaps a handful of elements across the quarter marks of an unbalanced side to
/// break up adversarial pivot patterns before the next partition.
fn scramble<T: SortKey>(v: &mut [T], low: usize, high: usize, len: usize) {
    if len >= INSERTION_THRESHOLD {
        let q = len >> 2;

        v.swap(low, low + q);
        v.swap(high, high - q);

        if len > LARGE_DATA_THRESHOLD {
            v.swap(low + 1, low + q + 1);
            v.swap(low + 2, low + q + 2);
            v.swap(high - 2, high - (q + 2));
            v.swap(high - 1, high - (q + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multiset(v: &[i32]) -> std::collections::HashMap<i32, usize> {
        let mut m = std::collections::HashMap::new();
        for &e in v {
            *m.entry(e).or_insert(0) += 1;
        }
        m
    }

    #[test]
    fn partition_splits_around_pivot() {
        let mut v: Vec<i32> = (0..200).map(|i| (i * 73) % 199).collect();
        let before = multiset(&v);

        let mid = 100;
        let p = v[mid];
        let (l, g, _) = partition(&mut v, 0, 199, mid);

        assert!(v[..=l].iter().all(|e| *e < p));
        assert!(v[g..].iter().all(|e| *e >= p));
        assert_eq!(multiset(&v), before);
    }

    #[test]
    fn partition_reports_presorted_ranges_as_cheap() {
        let mut v: Vec<i32> = (0..200).collect();
        let (_, _, work) = partition(&mut v, 0, 199, 100);
        assert!(!work);

        let mut v: Vec<i32> = (0..200).map(|i| (i * 73) % 199).collect();
        let (_, _, work) = partition(&mut v, 0, 199, 100);
        assert!(work);
    }

    #[test]
    fn partition_survives_minimum_valued_pivot() {
        let mut v = vec![i32::MIN; 128];
        let before = multiset(&v);

        let (l, g, _) = partition(&mut v, 0, 127, 64);

        assert_eq!(l, 0);
        assert!(g >= 1);
        assert_eq!(multiset(&v), before);
    }

    #[test]
    fn partition_left_collapses_equal_run() {
        // v[0] plays the bordering pivot.
        let mut v = vec![2, 2, 7, 2, 5, 2, 9, 2, 3];
        let before = multiset(&v);

        let next = partition_left(&mut v, 1, 8, 2);

        assert_eq!(next, 5);
        assert!(v[1..next].iter().all(|e| *e == 2));
        assert!(v[next..].iter().all(|e| *e > 2));
        assert_eq!(multiset(&v), before);
    }

    #[test]
    fn scramble_is_a_permutation() {
        let mut v: Vec<i32> = (0..300).collect();
        let before = multiset(&v);

        scramble(&mut v, 0, 299, 299);

        assert_ne!(v, (0..300).collect::<Vec<_>>());
        assert_eq!(multiset(&v), before);
    }

    #[test]
    fn scramble_leaves_short_ranges_alone() {
        let mut v: Vec<i32> = (0..50).collect();
        scramble(&mut v, 0, 49, 49);
        assert_eq!(v, (0..50).collect::<Vec<_>>());
    }
}
