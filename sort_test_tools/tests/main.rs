use sort_test_tools::instantiate_sort_tests;
use sort_test_tools::Sort;

// The suite itself is validated against the standard library sort.
struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "rust_std_unstable".into()
    }

    fn sort<T>(v: &mut [T])
    where
        T: blipsort::SortKey,
    {
        v.sort_unstable();
    }
}

instantiate_sort_tests!(SortImpl);
