pub mod capability;
pub mod probe_error;

pub use capability::Capability;
pub use probe_error::ProbeError;
