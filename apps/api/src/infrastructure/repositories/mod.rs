pub mod memory_comment_repository;
pub mod memory_filter_store;
pub mod sqlx_comment_repository;
pub mod sqlx_filter_store;
