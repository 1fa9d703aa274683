use async_trait::async_trait;

use crate::domain::comment::entity::Comment;
use crate::domain::moderation::custom_filter::SpamFilter;

#[derive(Debug, Clone, Default)]
pub struct ContentAssessment {
    pub score: i32,
    pub flags: Vec<String>,
}

const PROMOTION_TERMS: &[&str] = &[
    "buy now",
    "free money",
    "click here",
    "crypto giveaway",
    "limited time offer",
    "work from home",
    "cheap pills",
    "casino bonus",
    "payday loan",
    "seo services",
];

const CONTACT_BAIT_TERMS: &[&str] = &["telegram", "whatsapp", "wechat", "dm me"];

const PHARMA_TERMS: &[&str] = &["viagra", "cialis", "levitra", "xanax", "tramadol"];

fn normalize_text(input: &str) -> String {
    let mut normalized = String::with_capacity(input.len());
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch.is_whitespace() {
            normalized.push(ch.to_ascii_lowercase());
        } else {
            normalized.push(' ');
        }
    }
    normalized.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn score_category(
    normalized: &str,
    tokens: &[&str],
    terms: &[&str],
    score_each: i32,
    flag_prefix: &str,
    out_flags: &mut Vec<String>,
) -> i32 {
    let mut total = 0;

    for term in terms {
        let hit = if term.contains(' ') {
            normalized.contains(term)
        } else {
            tokens.iter().any(|token| token == term)
        };

        if hit {
            total += score_each;
            out_flags.push(format!("{}:{}", flag_prefix, term));
        }
    }

    total
}

/// Score a comment body for common comment-spam traits. Scores are clamped to 0..=100.
pub fn assess_content(content: &str) -> ContentAssessment {
    let normalized = normalize_text(content);
    let tokens: Vec<&str> = normalized.split_whitespace().collect();

    let mut flags = Vec::new();
    let mut score = 0;

    score += score_category(&normalized, &tokens, PROMOTION_TERMS, 40, "PROMOTION", &mut flags);
    score += score_category(&normalized, &tokens, PHARMA_TERMS, 50, "PHARMA", &mut flags);
    score += score_category(
        &normalized,
        &tokens,
        CONTACT_BAIT_TERMS,
        25,
        "CONTACT",
        &mut flags,
    );

    if content.contains("[url=") || content.contains("<a href") {
        score += 30;
        flags.push("MARKUP:link".to_string());
    }

    let uppercase_chars = content
        .chars()
        .filter(|c| c.is_ascii_alphabetic() && c.is_ascii_uppercase())
        .count();
    let alpha_chars = content.chars().filter(|c| c.is_ascii_alphabetic()).count();

    if alpha_chars >= 10 && (uppercase_chars as f32 / alpha_chars as f32) > 0.8 {
        score += 15;
        flags.push("SHOUTING:all_caps".to_string());
    }

    if content.matches('!').count() >= 5 {
        score += 10;
        flags.push("SHOUTING:punctuation".to_string());
    }

    ContentAssessment {
        score: score.clamp(0, 100),
        flags,
    }
}

/// Keyword and shouting heuristics over the comment body.
pub struct ContentHeuristicsFilter {
    threshold: i32,
}

impl ContentHeuristicsFilter {
    pub const FULL_NAME: &'static str = "blog_moderation::filters::ContentHeuristics";

    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: threshold.clamp(1, 100),
        }
    }
}

impl Default for ContentHeuristicsFilter {
    fn default() -> Self {
        Self::new(60)
    }
}

#[async_trait]
impl SpamFilter for ContentHeuristicsFilter {
    fn full_name(&self) -> &'static str {
        Self::FULL_NAME
    }

    fn name(&self) -> &'static str {
        "ContentHeuristics"
    }

    async fn check(&self, comment: &Comment) -> anyhow::Result<bool> {
        let assessment = assess_content(&comment.content);
        tracing::debug!(
            comment_id = %comment.id,
            score = assessment.score,
            flags = ?assessment.flags,
            "Content heuristics assessment"
        );
        Ok(assessment.score >= self.threshold)
    }

    async fn report(&self, comment: &Comment) -> anyhow::Result<()> {
        let assessment = assess_content(&comment.content);
        tracing::info!(
            comment_id = %comment.id,
            score = assessment.score,
            threshold = self.threshold,
            flags = ?assessment.flags,
            "Content heuristics misjudged a comment"
        );
        Ok(())
    }
}
