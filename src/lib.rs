//! Blipsort, an in-place unstable sort for primitive integer keys.

use crate::quicksort::quicksort;
use crate::smallsort::insertion_sort;

mod heapsort;
mod pivot;
mod quicksort;
mod smallsort;

/// Ranges narrower than this are finished off by insertion sort.
pub(crate) const INSERTION_THRESHOLD: usize = 88;

/// Move budget of the optimistic insertion sorts. Once a post-partition insertion
/// sort has shifted more than this many elements it gives up and quicksort resumes.
pub(crate) const ASCENDING_THRESHOLD: usize = 8;

/// Ranges longer than this get the wider eight-element scramble after an
/// unbalanced partition.
pub(crate) const LARGE_DATA_THRESHOLD: usize = 128;

/// Element contract for [`sort`].
///
/// The partition loops park temporary stopper values next to a gap in the data so
/// that their inner scans need no index bound. [`wrapping_pred`] supplies the
/// stopper for the "first element below the pivot" scan, [`wrapping_succ`] the one
/// for the "first element not equal to the pivot" scan.
///
/// # Safety
///
/// Unchecked memory accesses inside the sort are justified by comparison results,
/// so implementations must guarantee:
///
/// * `Ord` is a total order, and `PartialEq`/`PartialOrd` agree with it. An
///   inconsistent order makes the sort read out of bounds.
/// * `wrapping_succ(x) != x` for every value `x`.
/// * Comparisons have no side effects on the compared values.
///
/// All primitive integer types implement the trait via their wrapping arithmetic.
///
/// [`wrapping_pred`]: SortKey::wrapping_pred
/// [`wrapping_succ`]: SortKey::wrapping_succ
pub unsafe trait SortKey: Copy + Ord {
    /// The value one below `self`, wrapping around at the numeric minimum.
    fn wrapping_pred(self) -> Self;

    /// The value one above `self`, wrapping around at the numeric maximum.
    fn wrapping_succ(self) -> Self;
}

macro_rules! impl_sort_key {
    ($($t:ty)*) => {
        $(
            // SAFETY: integer ordering is total and wrapping by one never maps a
            // value onto itself.
            unsafe impl SortKey for $t {
                #[inline(always)]
                fn wrapping_pred(self) -> Self {
                    self.wrapping_sub(1)
                }

                #[inline(always)]
                fn wrapping_succ(self) -> Self {
                    self.wrapping_add(1)
                }
            }
        )*
    };
}

impl_sort_key!(i8 i16 i32 i64 i128 isize u8 u16 u32 u64 u128 usize);

/// Sorts the slice in ascending order, but might not preserve the order of equal
/// elements.
///
/// This sort is unstable (i.e., may reorder equal elements), in-place (i.e., does
/// not allocate), and *O*(*n* \* log(*n*)) worst-case, with *O*(*n*) behavior on
/// fully ascending, fully descending and all-equal inputs.
///
/// # Current implementation
///
/// The algorithm is an introspective quicksort built around a Lomuto partition
/// that moves elements through a gap in the data instead of swapping them, and
/// advances its cursor by a comparison result rather than a branch. Five sampled
/// candidates pick the pivot and double as a cheap pattern probe: strictly
/// descending candidates trigger a wholesale reversal of the range, and a
/// candidate equal to the pivot bordering the range on the left reroutes into a
/// partition that collapses runs of duplicates. Balanced partitions gamble on
/// insertion sort with a small move budget, unbalanced ones perturb the range and
/// pay into a depth budget whose exhaustion falls back to heap sort.
///
/// # Examples
///
/// ```
/// let mut v = [-5i32, 4, 1, -3, 2];
///
/// blipsort::sort(&mut v);
/// assert!(v == [-5, -3, 1, 2, 4]);
/// ```
#[inline(always)]
pub fn sort<T: SortKey>(v: &mut [T]) {
    let len = v.len();

    if len < 2 {
        return;
    }

    if len < INSERTION_THRESHOLD {
        insertion_sort::<T, false>(v, true, 0, len - 1);
        return;
    }

    // floor(log2(len)) unbalanced partitions are tolerated before heap sort takes
    // over.
    quicksort::<T, true>(v, true, 0, len - 1, len.ilog2() as i32);
}

#[test]
fn key_contract() {
    assert_eq!(i32::MIN.wrapping_pred(), i32::MAX);
    assert_eq!(i8::MAX.wrapping_succ(), i8::MIN);
    assert_eq!(u64::MIN.wrapping_pred(), u64::MAX);
    assert_ne!(0u32.wrapping_succ(), 0u32);
}
