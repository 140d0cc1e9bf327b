//! Endpoint descriptors and request options.
//!
//! Nothing here performs I/O; an [`Endpoint`] is handed to a
//! [`Transport`](crate::transport::Transport) which turns it into a request.

use crate::error::TrendsError;
use chrono::NaiveDate;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

const BATCH_PATH: &str = "/_/TrendsUi/data/batchexecute";
const AUTOCOMPLETE_PATH: &str = "/trends/api/autocomplete";
const EXPLORE_PATH: &str = "/trends/api/explore";
const RELATED_SEARCHES_PATH: &str = "/trends/api/widgetdata/relatedsearches";
const COMPARED_GEO_PATH: &str = "/trends/api/widgetdata/comparedgeo";

/// RPC id of the trending-now batch call
const TRENDING_RPC_ID: &str = "i0OFE";

/// Earliest date the provider has data for
pub const FIRST_DATA_DATE: (i32, u32, u32) = (2004, 1, 1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Everything the transport needs to issue one request
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub host: String,
    pub path: String,
    /// Extra path segment, percent-encoded by the transport
    pub path_param: Option<String>,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// Form body for POST requests
    pub form: Vec<(String, String)>,
}

impl Endpoint {
    fn new(method: Method, host: &str, path: &str) -> Self {
        Self {
            method,
            host: host.to_string(),
            path: path.to_string(),
            path_param: None,
            headers: Vec::new(),
            query: Vec::new(),
            form: Vec::new(),
        }
    }

    fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    /// Full request URL with encoded path parameter and query string
    pub fn url(&self) -> Result<reqwest::Url, TrendsError> {
        let mut url = reqwest::Url::parse(&format!("https://{}{}", self.host, self.path))
            .map_err(|e| TrendsError::invalid_request(format!("invalid endpoint URL: {}", e)))?;

        if let Some(param) = &self.path_param {
            url.path_segments_mut()
                .map_err(|_| TrendsError::invalid_request("endpoint URL cannot take path segments"))?
                .push(param);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

/// Request defaults shared by every endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub host: String,
    pub hl: String,
    pub geo: String,
    /// Minutes offset from UTC, as the provider expects it
    pub timezone: i32,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            host: "trends.google.com".to_string(),
            hl: "en-US".to_string(),
            geo: "US".to_string(),
            timezone: 360,
        }
    }
}

/// Lookback window of the trending-now feed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrendingHours {
    #[default]
    FourHours,
    OneDay,
    TwoDays,
    SevenDays,
}

impl TrendingHours {
    pub fn hours(self) -> u32 {
        match self {
            TrendingHours::FourHours => 4,
            TrendingHours::OneDay => 24,
            TrendingHours::TwoDays => 48,
            TrendingHours::SevenDays => 168,
        }
    }
}

impl TryFrom<i64> for TrendingHours {
    type Error = TrendsError;

    fn try_from(hours: i64) -> Result<Self, Self::Error> {
        match hours {
            4 => Ok(TrendingHours::FourHours),
            24 => Ok(TrendingHours::OneDay),
            48 => Ok(TrendingHours::TwoDays),
            168 => Ok(TrendingHours::SevenDays),
            other => Err(TrendsError::invalid_request(format!(
                "trending hours must be one of 4, 24, 48, 168 (got {})",
                other
            ))),
        }
    }
}

impl FromStr for TrendingHours {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hours: i64 = s
            .trim()
            .parse()
            .map_err(|_| format!("not a number of hours: {}", s))?;
        TrendingHours::try_from(hours).map_err(|e| e.to_string())
    }
}

impl fmt::Display for TrendingHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hours())
    }
}

/// Geographic granularity of interest-by-region results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    Country,
    #[default]
    Region,
    City,
    Dma,
}

impl Resolution {
    pub fn as_str(self) -> &'static str {
        match self {
            Resolution::Country => "COUNTRY",
            Resolution::Region => "REGION",
            Resolution::City => "CITY",
            Resolution::Dma => "DMA",
        }
    }
}

impl FromStr for Resolution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "COUNTRY" => Ok(Resolution::Country),
            "REGION" => Ok(Resolution::Region),
            "CITY" => Ok(Resolution::City),
            "DMA" => Ok(Resolution::Dma),
            other => Err(format!(
                "unknown resolution '{}', expected COUNTRY, REGION, CITY or DMA",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyTrendsOptions {
    pub geo: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RealTimeTrendsOptions {
    pub geo: Option<String>,
    pub trending_hours: TrendingHours,
}

/// Options shared by explore, related topics/queries and related data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreOptions {
    pub keyword: String,
    pub geo: Option<String>,
    /// Time range expression, e.g. `now 7-d` or `today 12-m`
    pub time: String,
    pub category: u32,
    /// Search property: "" (web), "images", "news", "youtube", "froogle"
    pub property: String,
    pub hl: Option<String>,
}

impl ExploreOptions {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }
}

impl Default for ExploreOptions {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            geo: None,
            time: "now 1-d".to_string(),
            category: 0,
            property: String::new(),
            hl: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestByRegionOptions {
    /// One comparison item per keyword
    pub keywords: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// One geo for all keywords, or one per keyword
    pub geo: Vec<String>,
    pub resolution: Resolution,
    pub hl: Option<String>,
    pub timezone: Option<i32>,
    pub category: u32,
}

impl InterestByRegionOptions {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keywords: vec![keyword.into()],
            ..Default::default()
        }
    }

    /// `YYYY-MM-DD YYYY-MM-DD`; open bounds fall back to the first data date and today
    pub fn time_window(&self, today: NaiveDate) -> String {
        let (y, m, d) = FIRST_DATA_DATE;
        let start = self
            .start_date
            .or_else(|| NaiveDate::from_ymd_opt(y, m, d))
            .unwrap_or(today);
        let end = self.end_date.unwrap_or(today);
        format!("{} {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
    }
}

/// Reject blank keywords before anything is sent
pub fn require_keyword(keyword: &str) -> Result<&str, TrendsError> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return Err(TrendsError::invalid_request("keyword cannot be empty"));
    }
    Ok(trimmed)
}

/// Batch RPC call for the trending-now feed
pub fn trending(locale: &Locale, geo: &str, lang: &str, hours: u32) -> Endpoint {
    let args = json!([null, null, geo, 0, lang, hours, 1]).to_string();
    let f_req = json!([[[TRENDING_RPC_ID, args, null, "generic"]]]).to_string();

    let mut endpoint = Endpoint::new(Method::Post, &locale.host, BATCH_PATH)
        .with_query("rpcids", TRENDING_RPC_ID)
        .with_query("source-path", "/trending")
        .with_query("hl", lang);
    endpoint.headers.push((
        "Referer".to_string(),
        format!("https://{}/trending?geo={}", locale.host, geo),
    ));
    endpoint.form.push(("f.req".to_string(), f_req));
    endpoint
}

pub fn autocomplete(locale: &Locale, keyword: &str, hl: &str) -> Endpoint {
    let mut endpoint = Endpoint::new(Method::Get, &locale.host, AUTOCOMPLETE_PATH)
        .with_query("hl", hl)
        .with_query("tz", locale.timezone.to_string());
    endpoint.path_param = Some(keyword.to_string());
    endpoint
}

/// A single keyword/geo/time comparison item of an explore request
pub fn comparison_item(keyword: &str, geo: &str, time: &str) -> Value {
    json!({ "keyword": keyword, "geo": geo, "time": time })
}

pub fn explore(
    locale: &Locale,
    items: Vec<Value>,
    category: u32,
    property: &str,
    hl: &str,
    timezone: i32,
) -> Endpoint {
    let req = json!({
        "comparisonItem": items,
        "category": category,
        "property": property,
    });
    Endpoint::new(Method::Get, &locale.host, EXPLORE_PATH)
        .with_query("hl", hl)
        .with_query("tz", timezone.to_string())
        .with_query("req", req.to_string())
}

pub fn related_searches(locale: &Locale, request: &Value, token: &str, hl: &str) -> Endpoint {
    widget_data(locale, RELATED_SEARCHES_PATH, request, token, hl, locale.timezone)
}

pub fn compared_geo(
    locale: &Locale,
    request: &Value,
    token: &str,
    hl: &str,
    timezone: i32,
) -> Endpoint {
    widget_data(locale, COMPARED_GEO_PATH, request, token, hl, timezone)
}

fn widget_data(
    locale: &Locale,
    path: &str,
    request: &Value,
    token: &str,
    hl: &str,
    timezone: i32,
) -> Endpoint {
    Endpoint::new(Method::Get, &locale.host, path)
        .with_query("hl", hl)
        .with_query("tz", timezone.to_string())
        .with_query("req", request.to_string())
        .with_query("token", token)
}
