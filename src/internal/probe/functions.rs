pub mod probe_capability;
