use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::moderation::custom_filter::SpamFilter;

/// The custom spam filters compiled into this binary, keyed by full name.
#[derive(Clone, Default)]
pub struct SpamFilterRegistry {
    filters: BTreeMap<&'static str, Arc<dyn SpamFilter>>,
}

impl SpamFilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Arc<dyn SpamFilter>) -> Self {
        self.register(filter);
        self
    }

    pub fn register(&mut self, filter: Arc<dyn SpamFilter>) {
        let full_name = filter.full_name();
        if self.filters.insert(full_name, filter).is_some() {
            tracing::warn!(filter = full_name, "Spam filter registered twice, keeping the last one");
        }
    }

    pub fn get(&self, full_name: &str) -> Option<Arc<dyn SpamFilter>> {
        self.filters.get(full_name).cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn SpamFilter>> {
        self.filters.values()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl std::fmt::Debug for SpamFilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.filters.keys()).finish()
    }
}
