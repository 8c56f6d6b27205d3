use holdall_any::{AnyBox, INLINE_CAPACITY};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

/// Forwards to the system allocator and counts allocations made by the current thread.
struct CountingAllocator;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

/// Number of allocations `f` performs on this thread.
fn allocations_during<R>(f: impl FnOnce() -> R) -> (usize, R) {
    let before = ALLOCATIONS.with(Cell::get);
    let result = f();
    (ALLOCATIONS.with(Cell::get) - before, result)
}

#[repr(align(16))]
#[derive(Clone, Copy)]
struct OverAligned([u8; 4]);

#[test]
fn small_payloads_stay_inline() {
    let (count, _a) = allocations_during(|| AnyBox::new(5u64));
    assert_eq!(count, 0);

    let (count, _a) = allocations_during(|| AnyBox::new([0u8; INLINE_CAPACITY]));
    assert_eq!(count, 0);

    // an empty string owns no buffer, and its header fits inline
    let (count, _a) = allocations_during(|| AnyBox::new(String::new()));
    assert_eq!(count, 0);
}

#[test]
fn cloning_an_inline_box_does_not_allocate() {
    let a = AnyBox::new(7i32);
    let (count, b) = allocations_during(|| a.clone());
    assert_eq!(count, 0);
    assert_eq!(b.cast::<i32>().unwrap(), &7);
}

#[test]
fn oversized_payloads_allocate_once() {
    let payload = [1u8; INLINE_CAPACITY + 1];
    let (count, a) = allocations_during(|| AnyBox::new(payload));
    assert_eq!(count, 1);
    assert_eq!(a.cast::<[u8; INLINE_CAPACITY + 1]>().unwrap()[INLINE_CAPACITY], 1);

    let (count, b) = allocations_during(|| a.clone());
    assert_eq!(count, 1);
    drop(b);
}

#[test]
fn over_aligned_payloads_allocate_once() {
    let payload = OverAligned([3; 4]);
    let (count, a) = allocations_during(|| AnyBox::new(payload));
    assert_eq!(count, 1);
    assert_eq!(a.cast::<OverAligned>().unwrap().0, [3; 4]);
}

#[test]
fn reassignment_only_allocates_for_heap_payloads() {
    let mut a = AnyBox::new(1i32);
    let (count, _) = allocations_during(|| {
        a.emplace(2.5f64);
        a.emplace(true);
    });
    assert_eq!(count, 0);

    let big = [0u64; 8];
    let (count, _) = allocations_during(|| {
        a.emplace(big);
    });
    assert_eq!(count, 1);

    let (count, _) = allocations_during(|| a.reset());
    assert_eq!(count, 0);
}
