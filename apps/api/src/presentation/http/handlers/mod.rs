pub mod admin;
pub mod admin_comments;
pub mod admin_filters;
pub mod comments;
pub mod health;
