use crate::config::Config;
use crate::decode;
use crate::endpoints::{
    self, DailyTrendsOptions, Endpoint, ExploreOptions, InterestByRegionOptions, Locale,
    RealTimeTrendsOptions, TrendingHours,
};
use crate::error::TrendsError;
use crate::transport::{HttpTransport, Transport};
use crate::types::{
    DailyTrendingTopics, ExploreResponse, ExploreWidget, InterestByRegionResponse, RelatedData,
    RelatedQueriesResponse, RelatedTopicsResponse,
};
use std::sync::Arc;
use std::time::Duration;

const RELATED_TOPICS_WIDGET: &str = "RELATED_TOPICS";
const RELATED_QUERIES_WIDGET: &str = "RELATED_QUERIES";
const GEO_MAP_WIDGET: &str = "GEO_MAP";

/// Trends client - one operation per endpoint family
///
/// Holds no per-call state; a single client can serve concurrent requests.
#[derive(Clone)]
pub struct TrendsClient {
    transport: Arc<dyn Transport>,
    locale: Locale,
}

impl TrendsClient {
    pub fn new(transport: Arc<dyn Transport>, locale: Locale) -> Self {
        Self { transport, locale }
    }

    /// Build an HTTP-backed client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, TrendsError> {
        let transport = HttpTransport::new(
            Duration::from_secs(config.timeout_secs),
            &config.user_agent,
        )?;
        Ok(Self::new(Arc::new(transport), config.locale()))
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Stories trending over the last day
    pub async fn daily_trends(
        &self,
        options: &DailyTrendsOptions,
    ) -> Result<DailyTrendingTopics, TrendsError> {
        let geo = options.geo.as_deref().unwrap_or(&self.locale.geo);
        let lang = options
            .lang
            .as_deref()
            .unwrap_or_else(|| language_of(&self.locale.hl));

        let endpoint = endpoints::trending(&self.locale, geo, lang, TrendingHours::OneDay.hours());
        let body = self.fetch("daily_trends", &endpoint).await?;
        decode::parse_trending(&body)
    }

    /// Stories trending within the requested lookback window
    pub async fn real_time_trends(
        &self,
        options: &RealTimeTrendsOptions,
    ) -> Result<DailyTrendingTopics, TrendsError> {
        let geo = options.geo.as_deref().unwrap_or(&self.locale.geo);
        let lang = language_of(&self.locale.hl);

        let endpoint =
            endpoints::trending(&self.locale, geo, lang, options.trending_hours.hours());
        let body = self.fetch("real_time_trends", &endpoint).await?;
        decode::parse_trending(&body)
    }

    /// Suggestion titles for a partial keyword; a blank keyword yields no suggestions
    pub async fn autocomplete(
        &self,
        keyword: &str,
        hl: Option<&str>,
    ) -> Result<Vec<String>, TrendsError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        let hl = hl.unwrap_or(&self.locale.hl);
        let endpoint = endpoints::autocomplete(&self.locale, keyword, hl);
        let body = self.fetch("autocomplete", &endpoint).await?;
        decode::parse_autocomplete(&body)
    }

    /// Explore handshake returning the widget tokens for a keyword
    pub async fn explore(&self, options: &ExploreOptions) -> Result<ExploreResponse, TrendsError> {
        let keyword = endpoints::require_keyword(&options.keyword)?;
        let geo = options.geo.as_deref().unwrap_or(&self.locale.geo);
        let hl = options.hl.as_deref().unwrap_or(&self.locale.hl);

        let endpoint = endpoints::explore(
            &self.locale,
            vec![endpoints::comparison_item(keyword, geo, &options.time)],
            options.category,
            &options.property,
            hl,
            self.locale.timezone,
        );
        let body = self.fetch("explore", &endpoint).await?;
        decode::parse_explore(&body)
    }

    pub async fn related_topics(
        &self,
        options: &ExploreOptions,
    ) -> Result<RelatedTopicsResponse, TrendsError> {
        let explore = self.explore(options).await?;
        let widget = find_widget(&explore, RELATED_TOPICS_WIDGET)?;
        let hl = options.hl.as_deref().unwrap_or(&self.locale.hl);

        let endpoint = endpoints::related_searches(&self.locale, &widget.request, &widget.token, hl);
        let body = self.fetch("related_topics", &endpoint).await?;
        decode::parse_related_topics(&body)
    }

    pub async fn related_queries(
        &self,
        options: &ExploreOptions,
    ) -> Result<RelatedQueriesResponse, TrendsError> {
        let explore = self.explore(options).await?;
        let widget = find_widget(&explore, RELATED_QUERIES_WIDGET)?;
        let hl = options.hl.as_deref().unwrap_or(&self.locale.hl);

        let endpoint = endpoints::related_searches(&self.locale, &widget.request, &widget.token, hl);
        let body = self.fetch("related_queries", &endpoint).await?;
        decode::parse_related_queries(&body)
    }

    /// Topics and queries for one keyword, fetched as two independent calls
    pub async fn related_data(&self, options: &ExploreOptions) -> Result<RelatedData, TrendsError> {
        endpoints::require_keyword(&options.keyword)?;

        let (topics, queries) =
            futures::try_join!(self.related_topics(options), self.related_queries(options))?;
        Ok(decode::merge_related(&topics, &queries))
    }

    pub async fn interest_by_region(
        &self,
        options: &InterestByRegionOptions,
    ) -> Result<InterestByRegionResponse, TrendsError> {
        if options.keywords.is_empty() {
            return Err(TrendsError::invalid_request("at least one keyword is required"));
        }
        let keywords = options
            .keywords
            .iter()
            .map(|k| endpoints::require_keyword(k))
            .collect::<Result<Vec<_>, _>>()?;

        if options.geo.len() > 1 && options.geo.len() != keywords.len() {
            return Err(TrendsError::invalid_request(format!(
                "expected one geo or {} geos, got {}",
                keywords.len(),
                options.geo.len()
            )));
        }

        let time = options.time_window(chrono::Local::now().date_naive());
        let items = keywords
            .iter()
            .enumerate()
            .map(|(idx, keyword)| {
                let geo = options
                    .geo
                    .get(idx)
                    .or_else(|| options.geo.first())
                    .map(String::as_str)
                    .unwrap_or(&self.locale.geo);
                endpoints::comparison_item(keyword, geo, &time)
            })
            .collect();

        let hl = options.hl.as_deref().unwrap_or(&self.locale.hl);
        let timezone = options.timezone.unwrap_or(self.locale.timezone);

        let explore_endpoint =
            endpoints::explore(&self.locale, items, options.category, "", hl, timezone);
        let body = self.fetch("explore", &explore_endpoint).await?;
        let explore = decode::parse_explore(&body)?;
        let widget = find_widget(&explore, GEO_MAP_WIDGET)?;

        let mut request = widget.request.clone();
        if let Some(obj) = request.as_object_mut() {
            obj.insert(
                "resolution".to_string(),
                serde_json::Value::String(options.resolution.as_str().to_string()),
            );
        }

        let endpoint = endpoints::compared_geo(&self.locale, &request, &widget.token, hl, timezone);
        let body = self.fetch("interest_by_region", &endpoint).await?;
        decode::parse_interest_by_region(&body)
    }

    async fn fetch(&self, operation: &str, endpoint: &Endpoint) -> Result<String, TrendsError> {
        tracing::debug!(operation, path = %endpoint.path, "dispatching trends call");
        let result = self.transport.fetch(endpoint).await;
        if let Err(e) = &result {
            tracing::warn!(operation, error = %e, code = e.code(), "trends call failed");
        }
        result
    }
}

/// Widget by exact id, or the first per-keyword variant (`GEO_MAP_0`)
fn find_widget<'a>(explore: &'a ExploreResponse, id: &str) -> Result<&'a ExploreWidget, TrendsError> {
    let prefix = format!("{}_", id);
    explore
        .widget(id)
        .or_else(|| explore.widgets.iter().find(|w| w.id.starts_with(&prefix)))
        .ok_or_else(|| {
            TrendsError::parse(format!("explore response has no {} widget", id))
        })
}

/// Primary language subtag, `en-US` -> `en`
fn language_of(hl: &str) -> &str {
    hl.split(['-', '_']).next().filter(|s| !s.is_empty()).unwrap_or("en")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_language_of() {
        assert_eq!(language_of("en-US"), "en");
        assert_eq!(language_of("pt_BR"), "pt");
        assert_eq!(language_of("ja"), "ja");
        assert_eq!(language_of(""), "en");
    }

    #[test]
    fn test_find_widget_prefers_exact_id() {
        let widget = |id: &str| ExploreWidget {
            id: id.to_string(),
            request: json!({}),
            token: format!("tok-{}", id),
        };
        let explore = ExploreResponse {
            widgets: vec![widget("GEO_MAP_0"), widget("GEO_MAP")],
        };
        assert_eq!(find_widget(&explore, "GEO_MAP").unwrap().token, "tok-GEO_MAP");

        let explore = ExploreResponse {
            widgets: vec![widget("RELATED_QUERIES_0")],
        };
        assert_eq!(
            find_widget(&explore, "RELATED_QUERIES").unwrap().token,
            "tok-RELATED_QUERIES_0"
        );
        assert!(matches!(
            find_widget(&explore, "RELATED_TOPICS"),
            Err(TrendsError::Parse(_))
        ));
    }
}
