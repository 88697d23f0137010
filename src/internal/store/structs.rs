pub mod disk_segment_store;
pub mod memory_segment_store;

pub use disk_segment_store::DiskSegmentStore;
pub use memory_segment_store::MemorySegmentStore;
