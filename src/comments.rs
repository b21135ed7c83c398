//! Comment sources.
//!
//! The aggregator only ever sees a list of judged comments; where they come
//! from is behind the [`CommentSource`] trait so real and synthetic providers
//! stay interchangeable. The default provider fabricates comments from fixed
//! template pools, mimicking a social/media comment section.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use once_cell::sync::Lazy;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use utoipa::ToSchema;

use crate::sentiment::{SentimentJudgment, SentimentLabel};

/// Content category the submitted URL belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentCategory {
    Youtube,
    Ecommerce,
    News,
    Social,
    Blog,
}

/// Reference to the content whose comments should be fetched.
#[derive(Debug, Clone)]
pub struct ContentRef {
    pub url: String,
    pub category: ContentCategory,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("comment source unavailable: {0}")]
    Unavailable(String),
}

/// One judged comment from a comment source.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    #[schema(example = "comment-1")]
    pub id: String,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
    pub sentiment: SentimentLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<u32>,
}

impl Comment {
    pub fn judgment(&self) -> SentimentJudgment {
        SentimentJudgment::new(self.sentiment)
    }
}

/// Capability interface: fetch judged comments for a content reference.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch(&self, reference: &ContentRef) -> Result<Vec<Comment>, SourceError>;
}

static POSITIVE_TEMPLATES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "I really love this content! It's exactly what I was looking for.",
        "Great quality and very informative. Would recommend to others.",
        "This exceeded my expectations. Very well done!",
        "Fantastic content, I've learned so much from this.",
        "The best I've seen on this topic, very impressive.",
    ]
});

static NEGATIVE_TEMPLATES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "I was disappointed with the quality of this content.",
        "Not what I expected at all, quite misleading.",
        "Too basic and doesn't cover important aspects of the topic.",
        "I found several inaccuracies in this content.",
        "Wouldn't recommend this to anyone, very poor quality.",
    ]
});

static NEUTRAL_TEMPLATES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "It's okay, nothing special but gets the job done.",
        "Average content, covers the basics but nothing more.",
        "Neither good nor bad, just standard information.",
        "It has some good points and some areas that could be improved.",
        "Fairly standard content on this topic.",
    ]
});

static AUTHORS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "Alex Johnson",
        "Sam Smith",
        "Taylor Wilson",
        "Jordan Lee",
        "Casey Brown",
        "Morgan Davis",
        "Riley White",
        "Quinn Miller",
        "Jamie Garcia",
    ]
});

/// Synthetic comment provider.
///
/// Generates 15-24 comments per fetch with uniformly random sentiment,
/// timestamps within the past week and small engagement counts, after an
/// artificial delay emulating upstream latency.
pub struct SyntheticSource {
    delay: Duration,
}

impl SyntheticSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CommentSource for SyntheticSource {
    async fn fetch(&self, reference: &ContentRef) -> Result<Vec<Comment>, SourceError> {
        sleep(self.delay).await;
        let count = rand::thread_rng().gen_range(15..25);
        tracing::debug!(url = %reference.url, count, "generating synthetic comments");
        Ok(generate_comments(count))
    }
}

/// Generates `count` comments with uniformly random sentiment.
pub fn generate_comments(count: usize) -> Vec<Comment> {
    let mut rng = rand::thread_rng();
    let labels = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    (0..count)
        .map(|i| {
            let sentiment = *labels.choose(&mut rng).unwrap();
            let pool = match sentiment {
                SentimentLabel::Positive => &*POSITIVE_TEMPLATES,
                SentimentLabel::Negative => &*NEGATIVE_TEMPLATES,
                SentimentLabel::Neutral => &*NEUTRAL_TEMPLATES,
            };
            let text = pool.choose(&mut rng).unwrap().to_string();
            let author = AUTHORS.choose(&mut rng).unwrap().to_string();
            let age_secs = rng.gen_range(0..7 * 24 * 60 * 60);

            Comment {
                id: format!("comment-{}", i + 1),
                text,
                author,
                timestamp: Utc::now() - ChronoDuration::seconds(age_secs),
                sentiment,
                likes: Some(rng.gen_range(0..50)),
                replies: Some(rng.gen_range(0..5)),
            }
        })
        .collect()
}

/// Routes youtube references to the YouTube path, everything else to the
/// synthetic generator.
pub struct RoutingSource {
    pub youtube: crate::youtube::YouTubeSource,
    pub synthetic: SyntheticSource,
}

#[async_trait]
impl CommentSource for RoutingSource {
    async fn fetch(&self, reference: &ContentRef) -> Result<Vec<Comment>, SourceError> {
        match reference.category {
            ContentCategory::Youtube => self.youtube.fetch(reference).await,
            _ => self.synthetic.fetch(reference).await,
        }
    }
}
