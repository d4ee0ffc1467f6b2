pub mod image_store;
pub mod tokener;
