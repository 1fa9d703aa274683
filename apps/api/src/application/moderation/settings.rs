use crate::config::Config;

/// Blog-wide switches the pipeline consults on every run.
#[derive(Debug, Clone)]
pub struct ModerationSettings {
    /// When off, comments start approved with the `Auto` tag.
    pub enable_moderation: bool,
    pub trust_authenticated_users: bool,
    pub white_list_threshold: usize,
    pub black_list_threshold: usize,
    pub add_ip_to_allow_list_on_approval: bool,
    pub add_ip_to_block_list_on_rejection: bool,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            enable_moderation: true,
            trust_authenticated_users: true,
            white_list_threshold: 10,
            black_list_threshold: 10,
            add_ip_to_allow_list_on_approval: false,
            add_ip_to_block_list_on_rejection: false,
        }
    }
}

impl From<&Config> for ModerationSettings {
    fn from(config: &Config) -> Self {
        Self {
            enable_moderation: config.enable_comments_moderation,
            trust_authenticated_users: config.trust_authenticated_users,
            white_list_threshold: config.comment_white_list_count,
            black_list_threshold: config.comment_black_list_count,
            add_ip_to_allow_list_on_approval: config.add_ip_to_allow_list_on_approval,
            add_ip_to_block_list_on_rejection: config.add_ip_to_block_list_on_rejection,
        }
    }
}
