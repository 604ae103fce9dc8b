pub mod json_catalog_repository;
#[cfg(test)]
pub mod memory_catalog_repository;

pub use json_catalog_repository::JsonCatalogRepository;
#[cfg(test)]
pub use memory_catalog_repository::MemoryCatalogRepository;
