pub mod artifact;
pub mod cache;
pub mod error;
#[cfg(test)]
pub mod impl_registry_fake;
pub mod impl_registry_http;
pub mod impl_store_fs;
#[cfg(test)]
pub mod impl_store_memory;
pub mod interface;
