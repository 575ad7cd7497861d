use crate::error::BufferError;
use std::alloc::{self, Layout};
use std::fmt;
use std::ptr::{self, NonNull};
use std::slice;

/// An owning, fixed-length block of `i32`s.
///
/// The block is allocated once at construction and never grows. An empty
/// buffer holds a null pointer and never touches the allocator, which is also
/// the state a buffer is left in after its contents are transferred out with
/// [`OwningBuffer::take`].
pub struct OwningBuffer {
    data: *mut i32,
    len: usize,
}

// SAFETY: the buffer exclusively owns plain integers; no aliasing handle to
// the block ever escapes without a borrow of the buffer.
unsafe impl Send for OwningBuffer {}
// SAFETY: shared access only hands out `&i32`.
unsafe impl Sync for OwningBuffer {}

impl OwningBuffer {
    /// Creates an empty buffer with a null block.
    pub const fn new() -> Self {
        Self {
            data: ptr::null_mut(),
            len: 0,
        }
    }

    /// Copies `len` integers starting at `src` into a newly allocated block.
    ///
    /// # Safety
    ///
    /// `src` must be valid for reads of `len` consecutive `i32`s. It may be
    /// null only when `len` is zero.
    pub unsafe fn from_raw_parts(src: *const i32, len: usize) -> Self {
        if len == 0 {
            return Self::new();
        }
        // SAFETY: the caller guarantees `src` points to `len` readable integers.
        let source = unsafe { slice::from_raw_parts(src, len) };
        Self::from_slice(source)
    }

    /// Copies `src` into a newly allocated block, aborting on allocation
    /// failure the way `Vec` does.
    pub fn from_slice(src: &[i32]) -> Self {
        match Self::try_from_slice(src) {
            Ok(buffer) => buffer,
            Err(err) => allocation_failed(src.len(), err),
        }
    }

    /// Copies `src` into a newly allocated block.
    ///
    /// Fails with `AllocationFailure` only when the allocator itself returns
    /// null.
    pub fn try_from_slice(src: &[i32]) -> Result<Self, BufferError> {
        Ok(Self {
            data: allocate_copy(src)?,
            len: src.len(),
        })
    }

    /// Deep copy that reports allocation failure instead of aborting.
    pub fn try_clone(&self) -> Result<Self, BufferError> {
        Self::try_from_slice(self.as_slice())
    }

    /// Transfers the block out of `self` in O(1).
    ///
    /// `self` is left with a null block and a length of zero, so later
    /// checked access through it fails with `IndexOutOfRange` and dropping it
    /// releases nothing.
    pub fn take(&mut self) -> Self {
        let taken = Self {
            data: self.data,
            len: self.len,
        };
        self.data = ptr::null_mut();
        self.len = 0;
        taken
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn element_at(&self, index: usize) -> Result<&i32, BufferError> {
        self.as_slice().get(index).ok_or(BufferError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    pub fn element_at_mut(&mut self, index: usize) -> Result<&mut i32, BufferError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(BufferError::IndexOutOfRange { index, len })
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    pub unsafe fn element_at_unchecked(&self, index: usize) -> &i32 {
        debug_assert!(index < self.len);
        // SAFETY: the caller guarantees `index < len`, so the block is non-null
        // and the element is initialized.
        unsafe { &*self.data.add(index) }
    }

    /// # Safety
    ///
    /// `index` must be less than `self.len()`.
    pub unsafe fn element_at_unchecked_mut(&mut self, index: usize) -> &mut i32 {
        debug_assert!(index < self.len);
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { &mut *self.data.add(index) }
    }

    pub fn as_slice(&self) -> &[i32] {
        // SAFETY: `block_ptr` is dangling only when `len` is zero, which is a
        // valid empty slice; otherwise it addresses `len` initialized integers.
        unsafe { slice::from_raw_parts(self.block_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        // SAFETY: see `as_slice`; `&mut self` makes the borrow unique.
        unsafe { slice::from_raw_parts_mut(self.block_ptr(), self.len) }
    }

    pub fn iter(&self) -> slice::Iter<'_, i32> {
        self.as_slice().iter()
    }

    /// The block pointer, or a dangling aligned pointer for the null block.
    fn block_ptr(&self) -> *mut i32 {
        if self.data.is_null() {
            NonNull::dangling().as_ptr()
        } else {
            self.data
        }
    }
}

impl Drop for OwningBuffer {
    fn drop(&mut self) {
        if self.data.is_null() {
            return;
        }
        if let Ok(layout) = block_layout(self.len) {
            // SAFETY: `data` was returned by `alloc::alloc` with this exact layout
            // and has not been released; moved-from buffers hold null.
            unsafe { alloc::dealloc(self.data.cast(), layout) };
        }
    }
}

impl Clone for OwningBuffer {
    fn clone(&self) -> Self {
        Self::from_slice(self.as_slice())
    }
}

impl Default for OwningBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OwningBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for OwningBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for OwningBuffer {}

impl From<&[i32]> for OwningBuffer {
    fn from(src: &[i32]) -> Self {
        Self::from_slice(src)
    }
}

impl<'a> IntoIterator for &'a OwningBuffer {
    type Item = &'a i32;
    type IntoIter = slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn allocate_copy(src: &[i32]) -> Result<*mut i32, BufferError> {
    if src.is_empty() {
        return Ok(ptr::null_mut());
    }

    let len = src.len();
    let layout = block_layout(len)?;

    // SAFETY: `layout` has a non-zero size because `src` is non-empty.
    let data = unsafe { alloc::alloc(layout) }.cast::<i32>();
    if data.is_null() {
        return Err(BufferError::AllocationFailure { len });
    }

    // SAFETY: `data` is a fresh allocation of `len` integers, so it is valid
    // for writes and cannot overlap `src`.
    unsafe { ptr::copy_nonoverlapping(src.as_ptr(), data, len) };
    Ok(data)
}

fn block_layout(len: usize) -> Result<Layout, BufferError> {
    Layout::array::<i32>(len).map_err(|_| BufferError::AllocationFailure { len })
}

fn allocation_failed(len: usize, err: BufferError) -> ! {
    match Layout::array::<i32>(len) {
        Ok(layout) => alloc::handle_alloc_error(layout),
        Err(_) => panic!("{err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_null_block() {
        let buffer = OwningBuffer::from_slice(&[]);
        assert!(buffer.data.is_null());
        assert!(buffer.as_slice().is_empty());
    }

    #[test]
    fn take_resets_source_to_null() {
        let mut source = OwningBuffer::from_slice(&[1, 2, 3]);
        let block = source.data;

        let taken = source.take();

        assert_eq!(taken.data, block);
        assert!(source.data.is_null());
        assert_eq!(source.len, 0);
    }

    #[test]
    fn oversized_block_is_an_allocation_failure() {
        let len = usize::MAX / 2;
        assert_eq!(
            block_layout(len),
            Err(BufferError::AllocationFailure { len })
        );
        assert_eq!(block_layout(4).map(|layout| layout.size()), Ok(16));
    }

    #[test]
    fn clone_gets_its_own_block() {
        let source = OwningBuffer::from_slice(&[7; 16]);
        let copy = source.clone();
        assert_ne!(source.data, copy.data);
    }
}
