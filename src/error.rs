use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BufferError {
    /// The allocator returned null, or `len` integers do not fit in a layout.
    #[error("failed to allocate a block of {len} integers")]
    AllocationFailure { len: usize },

    #[error("index {index} is out of range for a buffer of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
