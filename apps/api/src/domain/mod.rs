pub mod comment;
pub mod moderation;
pub mod shared;
