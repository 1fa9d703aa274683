pub mod context;
pub mod custom_filters;
pub mod dto;
pub mod filter_evaluator;
pub mod pipeline;
pub mod registry;
pub mod rule_evaluator;
pub mod settings;
