use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use dispview::core::{share, Grid, ViewBuilder};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn view_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let store = share(Grid::new([32, 32], 0u32));
    let mut aliased = ViewBuilder::<u32, 2>::new(&[8, 8])
        .start(&[4, 4])
        .alias(store.clone())
        .build()
        .unwrap();
    let mut private = ViewBuilder::<u32, 2>::new(&[32, 32])
        .fill_pointer(&[8, 8])
        .build()
        .unwrap();

    // Warm-up.
    let _ = aliased.resize(&[8, 8], Some(&[4, 4]));
    let _ = aliased.resize(&[64, 64], None);
    let _ = private.resize(&[8, 8], None);

    let allocs = with_alloc_counting(|| {
        // Element access through both ownership modes.
        for i in 0..64 {
            let _ = aliased.row_major_set(i, i as u32);
            let _ = private.row_major_set(i, i as u32);
            let _ = aliased.row_major_get(i);
            let _ = private.get([i % 8, i / 8]);
        }

        // Out-of-bounds access is an error value, not an allocation.
        let _ = aliased.get([8, 0]);
        let _ = private.row_major_get(1000);

        // Window moves inside existing capacity.
        for step in 0..16usize {
            let _ = aliased.resize(&[8, 8], Some(&[step, step]));
            let _ = private.resize(&[8 + step, 8 + step], None);
        }

        // Refused growth of an aliased store.
        let _ = aliased.resize(&[64, 64], None);

        for _ in aliased.indices() {}
    });

    assert!(allocs == 0);
}
