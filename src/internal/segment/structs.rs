pub mod plan_error;
pub mod segment;

pub use plan_error::PlanError;
pub use segment::Segment;
