//! Trust rules: authenticated submitters and the submitter's comment history.

use super::settings::ModerationSettings;
use crate::domain::comment::entity::{Comment, Submitter};
use crate::domain::moderation::decision::{
    Decision, TAG_AUTHENTICATED, TAG_BLACK_LIST, TAG_WHITE_LIST,
};

/// Approved and rejected comment counts for one submitter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrustTally {
    pub white: usize,
    pub black: usize,
}

impl TrustTally {
    /// Counts historical comments sharing the email (case-insensitive) or the IP
    /// of `comment`. The comment itself is skipped if it is already in `history`.
    pub fn compute(comment: &Comment, history: &[Comment]) -> Self {
        let email = comment.email.trim();
        let ip = comment.ip.trim();

        history
            .iter()
            .filter(|past| past.id != comment.id)
            .filter(|past| {
                let same_email = !email.is_empty() && past.email.trim().eq_ignore_ascii_case(email);
                let same_ip = !ip.is_empty() && past.ip.trim() == ip;
                same_email || same_ip
            })
            .fold(Self::default(), |mut tally, past| {
                if past.is_approved {
                    tally.white += 1;
                } else {
                    tally.black += 1;
                }
                tally
            })
    }
}

pub fn trusts_submitter(submitter: &Submitter, settings: &ModerationSettings) -> bool {
    submitter.authenticated && settings.trust_authenticated_users
}

pub fn evaluate_trust(
    comment: &Comment,
    submitter: &Submitter,
    history: &[Comment],
    settings: &ModerationSettings,
) -> Option<Decision> {
    if trusts_submitter(submitter, settings) {
        return Some(Decision::approve(TAG_AUTHENTICATED));
    }

    let tally = TrustTally::compute(comment, history);
    tracing::debug!(
        comment_id = %comment.id,
        white = tally.white,
        black = tally.black,
        "Computed trust tally"
    );

    if tally.white >= settings.white_list_threshold {
        Some(Decision::approve(TAG_WHITE_LIST))
    } else if tally.black >= settings.black_list_threshold {
        Some(Decision::spam(TAG_BLACK_LIST))
    } else {
        None
    }
}
