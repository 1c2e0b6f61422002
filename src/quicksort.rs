//! The recursion/iteration scheme and the two partitioners.

use core::mem::ManuallyDrop;
use core::ptr;

use crate::{heapsort, pivot, smallsort};
use crate::{GapGuard, INSERTION_SORT_THRESHOLD};

/// Sorts `v[lo..hi]` recursively.
///
/// `leftmost` is true while the subrange starts at the front of `v`; for all
/// right-hand continuations `v[lo - 1]` holds a pivot placed by an earlier
/// partition, which is what the unguarded insertion sort and the equal-block
/// shortcut rely on.
///
/// `limit` is the number of allowed highly unbalanced partitions before
/// switching to heapsort. Callers pass at least 1.
pub(crate) fn quicksort<T, F>(
    v: &mut [T],
    mut lo: usize,
    hi: usize,
    mut leftmost: bool,
    mut limit: u32,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    // Only the left partition recurses; the right one continues in this loop.
    // Together with the partition limit that caps the stack depth at
    // O(log(len)).
    loop {
        let len = hi - lo;

        // Insertion sort is faster for short subranges.
        if len < INSERTION_SORT_THRESHOLD {
            if leftmost {
                smallsort::insertion_sort(&mut v[lo..hi], is_less);
            } else {
                // `v[lo - 1]` is a pivot from an earlier partition, no
                // element of `v[lo..hi]` is less than it.
                smallsort::insertion_sort_unguarded(&mut v[lo - 1..hi], is_less);
            }
            return;
        }

        // Median-of-3, deposits the pivot at `lo` and leaves scan sentinels
        // at `lo + len / 2` and `hi - 1`.
        pivot::sort3(v, lo + len / 2, lo, hi - 1, is_less);

        // If the element left of the subrange compares equal to the chosen
        // pivot, the pivot is the smallest element in the subrange. Carve off
        // the run of elements equal to it, that run needs no further sorting.
        // Inputs with few distinct keys spend most of their partitions here,
        // which is what makes them linear.
        if !leftmost && !is_less(&v[lo - 1], &v[lo]) {
            let mid = lo + partition_left(&mut v[lo..hi], is_less);
            lo = mid + 1;
            continue;
        }

        let (mid, already_partitioned) = partition_right(&mut v[lo..hi], is_less);
        let pivot_pos = lo + mid;

        // The pivot landing in the outer eighth on either side counts as a
        // highly unbalanced partition.
        let l_len = pivot_pos - lo;
        let highly_unbalanced = l_len < len / 8 || l_len > len - len / 8;

        if highly_unbalanced {
            limit -= 1;
            if limit == 0 {
                // Too many bad pivots, this input is not quicksort-friendly.
                // Heapsort keeps the worst case at O(n * log(n)).
                heapsort::heapsort(&mut v[lo..hi], is_less);
                return;
            }

            // Scatter a few elements on both sides. The swaps are local and
            // deterministic, yet break the known quicksort adversaries.
            break_patterns(&mut v[lo..pivot_pos]);
            break_patterns(&mut v[pivot_pos + 1..hi]);
        } else if already_partitioned {
            // A decently balanced partition that needed no swaps strongly
            // suggests an already sorted subrange. Probe both sides with the
            // move-bounded insertion sort; if both complete we are done.
            if smallsort::partial_insertion_sort(&mut v[lo..pivot_pos], is_less)
                && smallsort::partial_insertion_sort(&mut v[pivot_pos + 1..hi], is_less)
            {
                return;
            }
        }

        quicksort(v, lo, pivot_pos, leftmost, limit, is_less);
        lo = pivot_pos + 1;
        leftmost = false;
    }
}

/// Partitions `v` around the pivot at `v[0]`, elements equal to the pivot go
/// to the right-hand side. Expects a median-of-3 pivot, see [`pivot::sort3`].
///
/// Returns the position of the pivot after partitioning and whether `v`
/// already was correctly partitioned: every element left of the returned
/// position is less than the pivot, everything right of it is not.
///
/// The scans stop on the sentinels `sort3` left in the subrange. They carry
/// an explicit range bound anyway, so a comparator that fails to be a strict
/// weak ordering can produce garbage order but never an out-of-range access.
fn partition_right<T, F>(v: &mut [T], is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len >= 2);

    // SAFETY: `first` moves right and `last` left, both checked against each
    // other before every read, and `first` starts past the pivot slot, so all
    // reads hit initialized elements inside `v` and never the gap at `v[0]`.
    // The pivot lifted into `gap` is written back on every exit path,
    // including a panicking comparator.
    unsafe {
        let v_base = v.as_mut_ptr();

        // Move the pivot into a local for the duration of the scans.
        let mut gap = GapGuard {
            pos: v_base,
            value: ManuallyDrop::new(ptr::read(v_base)),
        };

        let mut first = v_base.add(1);
        let mut last = v_base.add(len);

        // Find the first element greater than or equal to the pivot; the
        // median-of-3 guarantees one exists before `last`.
        while first < last && is_less(&*first, &*gap.value) {
            first = first.add(1);
        }

        // Find the last element strictly smaller than the pivot.
        while first < last && !is_less(&*last.sub(1), &*gap.value) {
            last = last.sub(1);
        }

        // If the first pair that would need a swap does not exist, the
        // subrange already was correctly partitioned.
        let already_partitioned = first >= last;

        // Keep swapping pairs on the wrong sides of the pivot. The freshly
        // swapped pair bounds each following scan. `ptr::swap` rather than
        // the nonoverlapping variant: a comparator that contradicts itself
        // can steer both scans onto the same element.
        while first < last {
            ptr::swap(first, last.sub(1));
            first = first.add(1);
            last = last.sub(1);

            while first < last && is_less(&*first, &*gap.value) {
                first = first.add(1);
            }
            while first < last && !is_less(&*last.sub(1), &*gap.value) {
                last = last.sub(1);
            }
        }

        // Put the pivot in its final place: the boundary element moves into
        // the gap at `v[0]` (it is smaller than the pivot, or is the gap
        // itself), and the guard deposits the pivot at the boundary.
        let pivot_pos = first.sub(1);
        ptr::copy(pivot_pos, gap.pos, 1);
        gap.pos = pivot_pos;

        (pivot_pos.offset_from(v_base) as usize, already_partitioned)
    }
}

/// Counterpart of [`partition_right`] for subranges whose left neighbor
/// compares equal to the pivot at `v[0]`: elements equal to the pivot go to
/// the left-hand side, strictly greater ones to the right.
///
/// Returns the position of the pivot after partitioning. The caller resumes
/// sorting one past it, the equal run left of it is already in order.
fn partition_left<T, F>(v: &mut [T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len >= 2);

    // SAFETY: Mirror image of `partition_right`, see there.
    unsafe {
        let v_base = v.as_mut_ptr();

        let mut gap = GapGuard {
            pos: v_base,
            value: ManuallyDrop::new(ptr::read(v_base)),
        };

        let mut first = v_base.add(1);
        let mut last = v_base.add(len);

        // Find the last element less than or equal to the pivot.
        while first < last && is_less(&*gap.value, &*last.sub(1)) {
            last = last.sub(1);
        }

        // Find the first element strictly greater than the pivot.
        while first < last && !is_less(&*gap.value, &*first) {
            first = first.add(1);
        }

        while first < last {
            ptr::swap(first, last.sub(1));
            first = first.add(1);
            last = last.sub(1);

            while first < last && is_less(&*gap.value, &*last.sub(1)) {
                last = last.sub(1);
            }
            while first < last && !is_less(&*gap.value, &*first) {
                first = first.add(1);
            }
        }

        let pivot_pos = first.sub(1);
        ptr::copy(pivot_pos, gap.pos, 1);
        gap.pos = pivot_pos;

        pivot_pos.offset_from(v_base) as usize
    }
}

/// Swaps a handful of elements of `side` to fixed nearby positions, breaking
/// the pattern that just produced a highly unbalanced partition. No-op for
/// sides the driver will insertion sort anyway.
fn break_patterns<T>(side: &mut [T]) {
    let len = side.len();
    if len >= INSERTION_SORT_THRESHOLD {
        side.swap(0, len / 4);
        side.swap(len - 1, len - len / 4);
    }
}
