use crate::profiler::AllocationProfiler;
use std::alloc::{GlobalAlloc, Layout, System};

/// Forwards to the system allocator and reports every event to
/// [`AllocationProfiler`]. Recording only touches atomics, so the profiler
/// never allocates from inside an allocator call.
pub struct ProfilingAllocator;

unsafe impl GlobalAlloc for ProfilingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        // SAFETY: System is the standard allocator
        let ptr = unsafe { System.alloc(layout) };

        if !ptr.is_null() {
            AllocationProfiler::record_allocation(layout.size());
        }

        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        // SAFETY: System is the standard allocator
        let ptr = unsafe { System.alloc_zeroed(layout) };

        if !ptr.is_null() {
            AllocationProfiler::record_allocation(layout.size());
        }

        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        AllocationProfiler::record_deallocation(layout.size());
        // SAFETY: System is the standard allocator, ptr/layout come from alloc
        unsafe { System.dealloc(ptr, layout) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        // SAFETY: System is the standard allocator, ptr/layout come from alloc
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };

        if !new_ptr.is_null() {
            // Record deallocation of old size and allocation of new size
            AllocationProfiler::record_deallocation(layout.size());
            AllocationProfiler::record_allocation(new_size);
        }

        new_ptr
    }
}

#[global_allocator]
static GLOBAL: ProfilingAllocator = ProfilingAllocator;
