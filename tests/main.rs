use sort_test_tools::instantiate_sort_tests;
use sort_test_tools::Sort;

struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "blipsort".into()
    }

    fn sort<T>(v: &mut [T])
    where
        T: blipsort::SortKey,
    {
        blipsort::sort(v);
    }
}

instantiate_sort_tests!(SortImpl);
