pub mod plan_segments;
