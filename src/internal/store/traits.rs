pub mod segment_store;

pub use segment_store::{ArtifactReader, ArtifactWriter, SegmentStore};
