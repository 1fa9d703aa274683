use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use crate::domain::comment::entity::Comment;
use crate::domain::moderation::custom_filter::SpamFilter;

lazy_static! {
    static ref LINK_REGEX: Regex =
        Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<>\]\)]+").expect("link regex compiles");
}

pub fn count_links(text: &str) -> usize {
    LINK_REGEX.find_iter(text).count()
}

/// Flags comments carrying more links than a person normally would.
pub struct LinkDensityFilter {
    max_links: usize,
}

impl LinkDensityFilter {
    pub const FULL_NAME: &'static str = "blog_moderation::filters::LinkDensity";

    pub fn new(max_links: usize) -> Self {
        Self { max_links }
    }
}

impl Default for LinkDensityFilter {
    fn default() -> Self {
        Self::new(3)
    }
}

#[async_trait]
impl SpamFilter for LinkDensityFilter {
    fn full_name(&self) -> &'static str {
        Self::FULL_NAME
    }

    fn name(&self) -> &'static str {
        "LinkDensity"
    }

    async fn check(&self, comment: &Comment) -> anyhow::Result<bool> {
        let links = count_links(&comment.content);
        // Short comments that are mostly a link are as suspicious as link lists.
        let words = comment.content.split_whitespace().count();
        let link_heavy = links > 0 && words <= links * 2;
        Ok(links > self.max_links || link_heavy)
    }
}
