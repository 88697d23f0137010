pub mod impl_disk_store;
pub mod impl_memory_store;
