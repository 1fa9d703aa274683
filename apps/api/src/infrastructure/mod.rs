pub mod database;
pub mod filters;
pub mod repositories;
pub mod security;
