pub mod custom_filter;
pub mod decision;
pub mod filter_rule;
pub mod store;
