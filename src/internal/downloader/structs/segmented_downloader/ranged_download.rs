mod fetch_segment;
mod merge;
mod range_request;
mod ranged;
mod spawn_tasks;

pub use fetch_segment::{FetchSegmentParams, fetch_segment};
pub use merge::merge_segments;
pub(super) use ranged::{RunRangedDownloadParams, run_ranged_download};
