pub mod image_store;
pub mod repository;
pub mod tokener;
