//! Insertion-sort family used for short subranges and for the
//! already-sorted probe.

use core::mem::ManuallyDrop;
use core::ptr;

use crate::GapGuard;

/// Maximum number of element moves the already-sorted probe tolerates before
/// giving up on the subrange.
const PARTIAL_INSERTION_SORT_LIMIT: usize = 8;

/// Sorts `v` using insertion sort, which is *O*(*n*^2) worst-case.
pub(crate) fn insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let v_base = v.as_mut_ptr();

    for cur in 1..len {
        // SAFETY: `cur` and `cur - 1` are in bounds, and the sift loop only
        // walks left while `sift > 0`, so every access stays inside `v`. The
        // element lifted into `gap` is written back on every exit path,
        // including an unwinding comparator.
        unsafe {
            let cur_ptr = v_base.add(cur);

            // Compare first, an element already in position costs one
            // comparison and no moves.
            if is_less(&*cur_ptr, &*cur_ptr.sub(1)) {
                let mut gap = GapGuard {
                    pos: cur_ptr,
                    value: ManuallyDrop::new(ptr::read(cur_ptr)),
                };

                let mut sift = cur;
                loop {
                    let sift_1 = v_base.add(sift - 1);
                    ptr::copy_nonoverlapping(sift_1, gap.pos, 1);
                    gap.pos = sift_1;
                    sift -= 1;

                    if sift == 0 || !is_less(&*gap.value, &*v_base.add(sift - 1)) {
                        break;
                    }
                }
                // `gap` drops here and fills the insertion point.
            }
        }
    }
}

/// Sorts `v[1..]`, assuming `v[0]` is less than or equal to every element of
/// `v[1..]`. That predecessor is the sentinel that terminates each sift scan,
/// which makes the per-step bounds check of `insertion_sort` unnecessary.
pub(crate) fn insertion_sort_unguarded<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 3 {
        return;
    }

    let v_base = v.as_mut_ptr();

    for cur in 2..len {
        // SAFETY: `cur >= 2`, so `cur` and `cur - 1` are in bounds and the
        // sift scan reads positions `>= 0` and writes positions `>= 1` only.
        // The gap is filled again on every exit path.
        unsafe {
            let cur_ptr = v_base.add(cur);

            if is_less(&*cur_ptr, &*cur_ptr.sub(1)) {
                let mut gap = GapGuard {
                    pos: cur_ptr,
                    value: ManuallyDrop::new(ptr::read(cur_ptr)),
                };

                let mut sift = cur;
                loop {
                    let sift_1 = v_base.add(sift - 1);
                    ptr::copy_nonoverlapping(sift_1, gap.pos, 1);
                    gap.pos = sift_1;
                    sift -= 1;

                    if !is_less(&*gap.value, &*v_base.add(sift - 1)) {
                        break;
                    }

                    // Unreachable for a strict weak ordering, the sentinel at
                    // `v[0]` fails the comparison above first. Keeps a
                    // comparator that contradicts itself inside the range.
                    if sift == 1 {
                        break;
                    }
                }
            }
        }
    }
}

/// Partially sorts `v` like `insertion_sort`, but gives up once the total
/// number of shifted elements exceeds a small budget.
///
/// Returns `true` if `v` is sorted on return. On `false` the partial work is
/// left in place: `v` still holds the same multiset, and the caller treats
/// the subrange as unsorted.
pub(crate) fn partial_insertion_sort<T, F>(v: &mut [T], is_less: &mut F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return true;
    }

    let v_base = v.as_mut_ptr();
    let mut moved = 0;

    for cur in 1..len {
        if moved > PARTIAL_INSERTION_SORT_LIMIT {
            return false;
        }

        // SAFETY: Identical to `insertion_sort`, the budget check above does
        // not affect which positions are accessed.
        unsafe {
            let cur_ptr = v_base.add(cur);

            if is_less(&*cur_ptr, &*cur_ptr.sub(1)) {
                let mut gap = GapGuard {
                    pos: cur_ptr,
                    value: ManuallyDrop::new(ptr::read(cur_ptr)),
                };

                let mut sift = cur;
                loop {
                    let sift_1 = v_base.add(sift - 1);
                    ptr::copy_nonoverlapping(sift_1, gap.pos, 1);
                    gap.pos = sift_1;
                    moved += 1;
                    sift -= 1;

                    if sift == 0 || !is_less(&*gap.value, &*v_base.add(sift - 1)) {
                        break;
                    }
                }
            }
        }
    }

    true
}
