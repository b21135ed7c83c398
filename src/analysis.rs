//! Analysis report assembly.
//!
//! Takes the judged comments from a source, runs the aggregator, and packs
//! everything the dashboard renders into one response shape shared by the
//! URL and direct-text paths.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::comments::{Comment, ContentCategory, ContentRef};
use crate::sentiment::{self, AggregateSentiment, CommentStats, SentimentLabel};

/// Full result of one analysis, for either path.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub url: String,
    pub category: ContentCategory,
    pub title: String,
    pub sentiment: AggregateSentiment,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub summary: String,
    pub timestamp: DateTime<Utc>,
    pub comments: Vec<Comment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_stats: Option<CommentStats>,
}

static KEYWORD_POOL: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "technology",
        "review",
        "product",
        "service",
        "quality",
        "price",
        "value",
        "experience",
        "recommendation",
        "comparison",
    ]
});

fn default_title(category: ContentCategory) -> &'static str {
    match category {
        ContentCategory::Youtube => "Video Review: Product Demonstration and Analysis",
        ContentCategory::Ecommerce => "Customer Reviews for Product on Online Store",
        ContentCategory::News => "Breaking News: Latest Developments in Technology",
        ContentCategory::Social => "Social Media Discussions and Trending Topics",
        ContentCategory::Blog => "Blog Post: In-depth Analysis and Personal Opinions",
    }
}

/// Samples 3-7 keywords from the fixed pool, with repeats possible.
fn pick_keywords() -> Vec<String> {
    let mut rng = rand::thread_rng();
    let count = rng.gen_range(3..8);
    (0..count)
        .map(|_| KEYWORD_POOL.choose(&mut rng).unwrap().to_string())
        .collect()
}

fn label_word(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "positive",
        SentimentLabel::Negative => "negative",
        SentimentLabel::Neutral => "neutral",
    }
}

/// Builds the comment-based report: aggregate, tally, title, keywords and a
/// one-paragraph summary.
pub fn build_report(reference: &ContentRef, comments: Vec<Comment>) -> AnalysisReport {
    let judgments: Vec<_> = comments.iter().map(Comment::judgment).collect();
    let aggregate = sentiment::aggregate(&judgments);
    let stats = sentiment::tally(&judgments);
    let keywords = pick_keywords();

    let summary = format!(
        "Analysis of {} comments shows an overall {} sentiment. \
         {} positive, {} negative, and {} neutral comments were found. \
         The content discusses topics related to {}.",
        stats.total,
        label_word(aggregate.label),
        stats.positive,
        stats.negative,
        stats.neutral,
        keywords.join(", "),
    );

    AnalysisReport {
        id: Uuid::new_v4(),
        url: reference.url.clone(),
        category: reference.category,
        title: default_title(reference.category).to_string(),
        sentiment: aggregate,
        keywords,
        summary,
        timestamp: Utc::now(),
        comments,
        comment_stats: Some(stats),
    }
}

/// Builds the degenerate single-comment report for the direct-text path.
pub fn text_report(text: &str, sentiment: AggregateSentiment) -> AnalysisReport {
    let now = Utc::now();
    let summary = format!(
        "Direct text analysis classified the input as {} with {:.0}% confidence.",
        label_word(sentiment.label),
        sentiment.confidence * 100.0,
    );

    AnalysisReport {
        id: Uuid::new_v4(),
        url: String::new(),
        category: ContentCategory::Blog,
        title: "Direct Text Analysis".to_string(),
        sentiment,
        keywords: Vec::new(),
        summary,
        timestamp: now,
        comments: vec![Comment {
            id: "text-analysis".to_string(),
            text: text.to_string(),
            author: "User Input".to_string(),
            timestamp: now,
            sentiment: sentiment.label,
            likes: None,
            replies: None,
        }],
        comment_stats: None,
    }
}
