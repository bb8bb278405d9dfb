use std::cell::Cell;
use std::cmp::Ordering;

thread_local! {
    static COMP_COUNT: Cell<u64> = Cell::new(0);
}

/// An `i32` whose comparisons bump a thread local counter. The sorts under test
/// are single threaded, so resetting the counter, sorting, and reading it back
/// yields the exact number of key comparisons that call performed. This is how
/// the suite checks the linear-comparison guarantees on pattern inputs.
#[derive(Copy, Clone, Debug)]
pub struct CountedKey(pub i32);

pub fn reset_comparison_count() {
    COMP_COUNT.with(|c| c.set(0));
}

pub fn comparison_count() -> u64 {
    COMP_COUNT.with(|c| c.get())
}

fn bump() {
    COMP_COUNT.with(|c| c.set(c.get() + 1));
}

impl PartialEq for CountedKey {
    fn eq(&self, other: &Self) -> bool {
        bump();
        self.0 == other.0
    }
}

impl Eq for CountedKey {}

impl PartialOrd for CountedKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CountedKey {
    fn cmp(&self, other: &Self) -> Ordering {
        bump();
        self.0.cmp(&other.0)
    }
}

// SAFETY: the ordering mirrors i32 exactly (total and consistent), comparisons
// never mutate the keys, and wrapping by one never maps a value onto itself.
unsafe impl blipsort::SortKey for CountedKey {
    fn wrapping_pred(self) -> Self {
        CountedKey(self.0.wrapping_sub(1))
    }

    fn wrapping_succ(self) -> Self {
        CountedKey(self.0.wrapping_add(1))
    }
}
