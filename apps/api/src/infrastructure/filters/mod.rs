pub mod content_heuristics;
pub mod link_density;

use std::sync::Arc;

use crate::application::moderation::registry::SpamFilterRegistry;

/// Registry holding the spam filters that ship with the service.
pub fn builtin_registry() -> SpamFilterRegistry {
    SpamFilterRegistry::new()
        .with_filter(Arc::new(content_heuristics::ContentHeuristicsFilter::default()))
        .with_filter(Arc::new(link_density::LinkDensityFilter::default()))
}
