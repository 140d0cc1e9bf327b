use serde::{Deserialize, Serialize};

/// News article attached to a trending story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRef {
    pub title: String,
    pub url: String,
    pub source: String,
    /// Provider-formatted relative time, e.g. "2 hours ago"
    pub time: String,
    pub snippet: String,
}

/// Lead image of a trending story
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryImage {
    pub news_url: String,
    pub source: String,
    pub image_url: String,
}

/// Full view of one trending search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingStory {
    pub title: String,
    pub traffic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<StoryImage>,
    pub articles: Vec<ArticleRef>,
    pub share_url: String,
    pub start_time: u64,
    /// Passed through from the provider; not checked against `start_time`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
}

/// Summary view of a trending search (no share URL or image)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub title: String,
    pub traffic: String,
    pub articles: Vec<ArticleRef>,
    pub start_time: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<u64>,
}

impl From<&TrendingStory> for TrendingTopic {
    fn from(story: &TrendingStory) -> Self {
        Self {
            title: story.title.clone(),
            traffic: story.traffic.clone(),
            articles: story.articles.clone(),
            start_time: story.start_time,
            end_time: story.end_time,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTrendingTopics {
    pub all_trending_stories: Vec<TrendingStory>,
    pub summary: Vec<TrendingTopic>,
}

/// Knowledge-graph entity behind a related topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicEntity {
    pub mid: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedTopic {
    pub topic: TopicEntity,
    pub value: f64,
    pub formatted_value: String,
    pub has_data: bool,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedQuery {
    pub query: String,
    pub value: f64,
    pub formatted_value: String,
    pub has_data: bool,
    pub link: String,
}

/// One relevance tier ("top", "rising") of related keywords
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedList<T> {
    pub ranked_keyword: Vec<T>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedLists<T> {
    pub ranked_list: Vec<RankedList<T>>,
}

impl<T: Clone> RankedLists<T> {
    /// All keywords of all tiers, in provider order
    pub fn flatten(&self) -> Vec<T> {
        self.ranked_list
            .iter()
            .flat_map(|list| list.ranked_keyword.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedTopicsResponse {
    pub default: RankedLists<RelatedTopic>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedQueriesResponse {
    pub default: RankedLists<RelatedQuery>,
}

/// Topics and queries for one keyword, assembled from two separate calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedData {
    pub topics: Vec<RelatedTopic>,
    pub queries: Vec<RelatedQuery>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestByRegionData {
    pub geo_code: String,
    pub geo_name: String,
    /// One entry per compared keyword
    pub value: Vec<f64>,
    pub formatted_value: Vec<String>,
    pub max_value_index: i64,
    pub has_data: Vec<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoMapData {
    pub geo_map_data: Vec<InterestByRegionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterestByRegionResponse {
    pub default: GeoMapData,
}

/// Widget descriptor returned by the explore handshake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploreWidget {
    pub id: String,
    /// Opaque request object echoed back to the widget data endpoint
    pub request: serde_json::Value,
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExploreResponse {
    pub widgets: Vec<ExploreWidget>,
}

impl ExploreResponse {
    pub fn widget(&self, id: &str) -> Option<&ExploreWidget> {
        self.widgets.iter().find(|w| w.id == id)
    }
}
