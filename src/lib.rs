pub mod allocator;
pub mod bench;
pub mod buffer;
pub mod demo;
pub mod error;
pub mod factory;
pub mod holder;
pub mod profiler;
pub mod reporter;

pub use allocator::ProfilingAllocator;
pub use bench::{BenchConfig, BenchReport, PhaseResult};
pub use buffer::OwningBuffer;
pub use error::BufferError;
pub use factory::{Construct, Probe, Via, create};
pub use holder::Holder;
pub use profiler::{AllocationProfiler, AllocationSnapshot, PhaseAllocations};
pub use reporter::Reporter;
