//! Trending story records from the batch RPC.
//!
//! Observed record layout:
//!
//! | slot | content |
//! |------|---------|
//! | 0    | search term |
//! | 1    | `null` or `[newsUrl, source, imageUrl, [article...]]` |
//! | 2    | country code |
//! | 3    | `[startEpochSeconds]` |
//! | 4    | `null` or `[endEpochSeconds]` |
//! | 6    | search volume |
//! | 8    | ranking score |
//! | 9    | related searches |
//! | 12   | share URL |
//!
//! Articles are `[title, url, source, time, snippet]`.

use super::envelope::unwrap_payload;
use super::slot;
use crate::error::TrendsError;
use crate::types::{ArticleRef, DailyTrendingTopics, StoryImage, TrendingStory, TrendingTopic};
use serde_json::Value;

const TITLE: usize = 0;
const MEDIA: usize = 1;
const START_TIME: usize = 3;
const END_TIME: usize = 4;
const TRAFFIC: usize = 6;
const SHARE_URL: usize = 12;

const MEDIA_NEWS_URL: usize = 0;
const MEDIA_SOURCE: usize = 1;
const MEDIA_IMAGE_URL: usize = 2;
const MEDIA_ARTICLES: usize = 3;
const MEDIA_IMAGE_ARITY: usize = 3;

const ARTICLE_TITLE: usize = 0;
const ARTICLE_URL: usize = 1;
const ARTICLE_SOURCE: usize = 2;
const ARTICLE_TIME: usize = 3;
const ARTICLE_SNIPPET: usize = 4;
const ARTICLE_ARITY: usize = 5;

/// One decoded record before output invariants are applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryRecord {
    pub title: String,
    pub traffic: String,
    pub image: Option<StoryImage>,
    pub articles: Vec<ArticleRef>,
    pub share_url: String,
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

/// Decode a batch RPC body into full and summary views
pub fn parse_trending(raw: &str) -> Result<DailyTrendingTopics, TrendsError> {
    let payload = unwrap_payload(raw)?;
    let records = decode_stories(&payload)?;
    Ok(assemble(records))
}

/// Decode every array element of the payload; other elements are skipped
pub fn decode_stories(payload: &Value) -> Result<Vec<StoryRecord>, TrendsError> {
    let items = payload
        .as_array()
        .ok_or_else(|| TrendsError::parse("Invalid data format: expected array"))?;

    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item.as_array() {
            Some(record) => records.push(decode_story(record)),
            None => tracing::trace!(index, "skipping non-array trending record"),
        }
    }

    tracing::debug!(
        records = records.len(),
        skipped = items.len() - records.len(),
        "decoded trending records"
    );
    Ok(records)
}

pub fn decode_story(record: &[Value]) -> StoryRecord {
    let media = slot::at(record, MEDIA).and_then(Value::as_array);

    let image = media
        .filter(|m| m.len() >= MEDIA_IMAGE_ARITY)
        .map(|m| StoryImage {
            news_url: slot::text(slot::at(m, MEDIA_NEWS_URL)),
            source: slot::text(slot::at(m, MEDIA_SOURCE)),
            image_url: slot::text(slot::at(m, MEDIA_IMAGE_URL)),
        });

    let articles = media
        .map(|m| slot::list(slot::at(m, MEDIA_ARTICLES)))
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_array)
        .filter(|a| a.len() >= ARTICLE_ARITY)
        .map(|a| decode_article(a))
        .collect();

    StoryRecord {
        title: slot::text(slot::at(record, TITLE)),
        traffic: slot::text_or(slot::at(record, TRAFFIC), "0"),
        image,
        articles,
        share_url: slot::text(slot::at(record, SHARE_URL)),
        start_time: slot::boxed_integer(slot::at(record, START_TIME)),
        end_time: slot::boxed_integer(slot::at(record, END_TIME)),
    }
}

fn decode_article(article: &[Value]) -> ArticleRef {
    ArticleRef {
        title: slot::text(slot::at(article, ARTICLE_TITLE)),
        url: slot::text(slot::at(article, ARTICLE_URL)),
        source: slot::text(slot::at(article, ARTICLE_SOURCE)),
        time: slot::text(slot::at(article, ARTICLE_TIME)),
        snippet: slot::text(slot::at(article, ARTICLE_SNIPPET)),
    }
}

/// Build both views from the decoded records, keeping provider order.
///
/// Negative or missing start times become 0; negative end times are dropped.
pub fn assemble(records: Vec<StoryRecord>) -> DailyTrendingTopics {
    let all_trending_stories: Vec<TrendingStory> = records
        .into_iter()
        .map(|record| TrendingStory {
            title: record.title,
            traffic: record.traffic,
            image: record.image,
            articles: record.articles,
            share_url: record.share_url,
            start_time: record
                .start_time
                .and_then(|t| u64::try_from(t).ok())
                .unwrap_or(0),
            end_time: record.end_time.and_then(|t| u64::try_from(t).ok()),
        })
        .collect();

    let summary = all_trending_stories.iter().map(TrendingTopic::from).collect();

    DailyTrendingTopics {
        all_trending_stories,
        summary,
    }
}
