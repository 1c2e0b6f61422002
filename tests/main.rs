use sort_test_tools::{instantiate_sort_tests, patterns, Sort};

struct SortImpl {}

impl Sort for SortImpl {
    fn name() -> String {
        "pdqsort_unstable".into()
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord,
    {
        pdqsort::sort(arr);
    }

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        pdqsort::sort_by(arr, compare);
    }
}

instantiate_sort_tests!(SortImpl);

// --- Properties beyond the shared suite ---

fn count_comps(v: &mut [i32]) -> usize {
    let mut comps = 0;
    pdqsort::sort_by(v, |a, b| {
        comps += 1;
        a.cmp(b)
    });
    comps
}

#[test]
fn idempotent() {
    let mut v = patterns::random(2_048);
    pdqsort::sort(&mut v);
    let once = v.clone();

    pdqsort::sort(&mut v);
    assert_eq!(v, once);
}

#[test]
fn linear_comps_on_low_entropy_patterns() {
    // The already-sorted probe and the equal-block shortcut keep these
    // patterns at a handful of comparisons per element.
    let pattern_fns: [fn(usize) -> Vec<i32>; 3] = [
        patterns::ascending,
        patterns::descending,
        patterns::all_equal,
    ];

    for len in [100, 1_000, 10_000, 100_000] {
        for pattern_fn in pattern_fns {
            let mut v = pattern_fn(len);
            let comps = count_comps(&mut v);

            assert!(v.windows(2).all(|w| w[0] <= w[1]));
            assert!(comps <= 4 * len, "len: {len} comps: {comps}");
        }
    }
}

#[test]
fn push_middle_restores_identity() {
    for len in [10, 100, 1_000, 10_000] {
        let mut v = patterns::push_middle(len);
        pdqsort::sort(&mut v);
        assert_eq!(v, patterns::ascending(len));
    }
}

#[test]
fn pipe_organ_scenario() {
    let mut v = patterns::pipe_organ(1_000);
    let mut expected = v.clone();
    expected.sort();

    pdqsort::sort(&mut v);
    assert_eq!(v, expected);
}

#[cfg(not(miri))]
#[test]
fn shuffled_million() {
    let len = 1_000_000;

    let mut v = patterns::shuffled(len);
    pdqsort::sort(&mut v);

    // A permutation of 0..len sorts to the identity. Linear recursion depth
    // would blow the test thread's stack long before this completes.
    assert_eq!(v, patterns::ascending(len));
}

/// An input crafted to feed median-of-3 pivot selection the second-smallest
/// remaining element on every round, which drives a plain quicksort
/// quadratic.
fn median_of_3_killer(len: usize) -> Vec<i32> {
    assert!(len % 2 == 0);
    let k = len / 2;
    let mut v = vec![0i32; len];

    for i in 1..=k {
        if i % 2 == 1 {
            v[i - 1] = i as i32;
            v[i] = (k + i) as i32;
        }
        v[k + i - 1] = (2 * i) as i32;
    }

    v
}

#[cfg(not(miri))]
#[test]
fn adversarial_stays_n_log_n() {
    for len in [1 << 10, 1 << 14, 1 << 16] {
        let mut v = median_of_3_killer(len);
        let comps = count_comps(&mut v);

        assert!(v.windows(2).all(|w| w[0] <= w[1]));

        // The pattern-breaking swaps and the heapsort fallback must hold the
        // comparison count to O(n * log(n)), with a generous constant.
        let log2_len = usize::BITS - len.leading_zeros();
        assert!(
            comps <= 20 * len * log2_len as usize,
            "len: {len} comps: {comps}"
        );
    }
}
