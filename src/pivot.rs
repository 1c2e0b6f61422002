//! Median-of-3 pivot selection.

/// Sorts the three elements at positions `a`, `b` and `c` of `v` so that
/// `v[a] <= v[b] <= v[c]`, using at most three comparisons and three swaps.
///
/// The driver calls this with `(lo + len/2, lo, hi - 1)`, which deposits the
/// median at `lo` where the partition expects its pivot, leaves an element
/// greater than or equal to the median at `hi - 1` and one less than or equal
/// to it at `lo + len/2`. Those two bound the partition scans from within the
/// subrange.
pub(crate) fn sort3<T, F>(v: &mut [T], a: usize, b: usize, c: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    if !is_less(&v[b], &v[a]) {
        if !is_less(&v[c], &v[b]) {
            return;
        }

        v.swap(b, c);
        if is_less(&v[b], &v[a]) {
            v.swap(a, b);
        }

        return;
    }

    if is_less(&v[c], &v[b]) {
        v.swap(a, c);
        return;
    }

    v.swap(a, b);
    if is_less(&v[c], &v[b]) {
        v.swap(b, c);
    }
}
