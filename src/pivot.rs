use crate::SortKey;

/// Prepares `v[low..=high]` for partitioning and returns the positions of the
/// three middle pivot candidates `(sl, mid, sr)`; the pivot itself is left at
/// `mid`.
///
/// Five candidates are sampled at roughly the 6th, 3rd, half, 2/3rd and 5/6th
/// marks of the range. If any adjacent candidate pair is non-descending the five
/// are insertion sorted in place, which also serves as a median-of-five pivot
/// choice. If all pairs are strictly descending the whole range very likely is
/// too, so it is reversed around the midpoint instead; Lomuto partitioning
/// degrades badly on descending data, and the reversal turns it into the best
/// case. One leftover out-of-place element in even ranges is fine, the partition
/// absorbs it.
pub(crate) fn prepare<T: SortKey>(v: &mut [T], low: usize, high: usize) -> (usize, usize, usize) {
    let x = high - low;

    // A cheap approximation of a third and a sixth of the range, no division.
    let y = x >> 2;
    let third = y + (y >> 1);
    let sixth = third >> 1;

    let mid = low + (x >> 1);
    let sl = low + third;
    let sr = high - third;
    let mut cl = low + sixth;
    let mut cr = high - sixth;

    // Bitwise OR keeps the six comparisons branchless.
    if (v[low] <= v[cl])
        | (v[cl] <= v[sl])
        | (v[sl] <= v[mid])
        | (v[mid] <= v[sr])
        | (v[sr] <= v[cr])
        | (v[cr] <= v[high])
    {
        // Widen the candidate window to the range ends when those hold the
        // extrema.
        if v[low] < v[cl] {
            cl = low;
        }
        if v[high] > v[cr] {
            cr = high;
        }

        // Unrolled five element insertion sort. Every displaced element cascades
        // further down as long as it keeps undercutting.
        if v[sl] < v[cl] {
            v.swap(sl, cl);
        }

        if v[mid] < v[sl] {
            let e = v[mid];
            v[mid] = v[sl];
            v[sl] = e;
            if e < v[cl] {
                v[sl] = v[cl];
                v[cl] = e;
            }
        }

        if v[sr] < v[mid] {
            let e = v[sr];
            v[sr] = v[mid];
            v[mid] = e;
            if e < v[sl] {
                v[mid] = v[sl];
                v[sl] = e;
                if e < v[cl] {
                    v[sl] = v[cl];
                    v[cl] = e;
                }
            }
        }

        if v[cr] < v[sr] {
            let e = v[cr];
            v[cr] = v[sr];
            v[sr] = e;
            if e < v[mid] {
                v[sr] = v[mid];
                v[mid] = e;
                if e < v[sl] {
                    v[mid] = v[sl];
                    v[sl] = e;
                    if e < v[cl] {
                        v[sl] = v[cl];
                        v[cl] = e;
                    }
                }
            }
        }
    } else {
        let mut u = low;
        let mut q = high;
        while u < mid {
            v.swap(u, q);
            u += 1;
            q -= 1;
        }
    }

    (sl, mid, sr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_sorted() {
        let mut v: Vec<i32> = (0..100).map(|i| (i * 37) % 100).collect();
        let (sl, mid, sr) = prepare(&mut v, 0, 99);

        assert!(v[sl] <= v[mid]);
        assert!(v[mid] <= v[sr]);
    }

    #[test]
    fn descending_range_is_reversed() {
        let mut v: Vec<i32> = (0..101).rev().collect();
        let (_, mid, _) = prepare(&mut v, 0, 100);

        assert_eq!(v, (0..101).collect::<Vec<_>>());
        assert_eq!(v[mid], mid as i32);
    }

    #[test]
    fn reversal_leaves_even_ranges_almost_sorted() {
        let mut v: Vec<i32> = (0..100).rev().collect();
        prepare(&mut v, 0, 99);

        let out_of_place = v.windows(2).filter(|w| w[0] > w[1]).count();
        assert!(out_of_place <= 2);
    }
}
