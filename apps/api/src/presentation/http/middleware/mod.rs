pub mod admin;
pub mod client_ip;
pub mod request_id;
pub mod user;
