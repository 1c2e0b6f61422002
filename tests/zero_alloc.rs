//! Lives in its own test binary so no concurrently running test can touch
//! the allocation counter.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingAllocator {
    allocs: AtomicUsize,
}

// SAFETY: Defers all actual memory management to `System`.
unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        self.allocs.fetch_add(1, Ordering::SeqCst);
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator {
    allocs: AtomicUsize::new(0),
};

#[test]
fn sort_does_not_allocate() {
    let mut v = sort_test_tools::patterns::random(1 << 16);
    let mut v_by = v.clone();

    let allocs_before = ALLOC.allocs.load(Ordering::SeqCst);

    pdqsort::sort(&mut v);
    pdqsort::sort_by(&mut v_by, |a, b| a.cmp(b));

    let allocs_after = ALLOC.allocs.load(Ordering::SeqCst);
    assert_eq!(allocs_before, allocs_after);

    assert!(v.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(v, v_by);
}
