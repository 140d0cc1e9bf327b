//! Command-line front end
//!
//! Every command prints the discriminated `{"data": ...}` / `{"error": ...}`
//! JSON document and exits non-zero on the error variant.

use crate::client::TrendsClient;
use crate::config;
use crate::endpoints::{
    DailyTrendsOptions, ExploreOptions, InterestByRegionOptions, RealTimeTrendsOptions,
    Resolution, TrendingHours,
};
use crate::error::Response;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "trendscope")]
#[command(about = "Query Google Trends and print typed JSON")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/trendscope/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stories trending over the last day
    Daily {
        #[arg(long)]
        geo: Option<String>,
        /// Language code, e.g. "en"
        #[arg(long)]
        lang: Option<String>,
    },

    /// Stories trending within a lookback window
    Realtime {
        #[arg(long)]
        geo: Option<String>,
        /// Lookback hours: 4, 24, 48 or 168
        #[arg(long, default_value = "4")]
        hours: TrendingHours,
    },

    /// Keyword suggestions
    Autocomplete {
        keyword: String,
        #[arg(long)]
        hl: Option<String>,
    },

    /// Explore widgets and tokens for a keyword
    Explore(KeywordArgs),

    /// Topics related to a keyword
    RelatedTopics(KeywordArgs),

    /// Queries related to a keyword
    RelatedQueries(KeywordArgs),

    /// Related topics and queries together
    RelatedData(KeywordArgs),

    /// Interest by region for one or more keywords
    Region {
        #[arg(required = true)]
        keywords: Vec<String>,
        /// Repeat once per keyword to compare different geographies
        #[arg(long)]
        geo: Vec<String>,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day, YYYY-MM-DD
        #[arg(long)]
        end: Option<NaiveDate>,
        /// COUNTRY, REGION, CITY or DMA
        #[arg(long, default_value = "REGION")]
        resolution: Resolution,
        #[arg(long)]
        hl: Option<String>,
        /// Timezone offset in minutes
        #[arg(long, allow_negative_numbers = true)]
        timezone: Option<i32>,
        #[arg(long, default_value_t = 0)]
        category: u32,
    },
}

#[derive(Args)]
struct KeywordArgs {
    keyword: String,
    #[arg(long)]
    geo: Option<String>,
    /// Time range, e.g. "now 7-d" or "today 12-m"
    #[arg(long, default_value = "now 1-d")]
    time: String,
    #[arg(long, default_value_t = 0)]
    category: u32,
    /// Search property: images, news, youtube, froogle (default: web)
    #[arg(long)]
    property: Option<String>,
    #[arg(long)]
    hl: Option<String>,
}

impl From<KeywordArgs> for ExploreOptions {
    fn from(args: KeywordArgs) -> Self {
        Self {
            keyword: args.keyword,
            geo: args.geo,
            time: args.time,
            category: args.category,
            property: args.property.unwrap_or_default(),
            hl: args.hl,
        }
    }
}

pub async fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_create_config()?,
    };
    let _log_guard = crate::logging::init(&config)?;

    let client = TrendsClient::from_config(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Daily { geo, lang } => {
            let options = DailyTrendsOptions { geo, lang };
            emit(Response::from(client.daily_trends(&options).await))
        }
        Command::Realtime { geo, hours } => {
            let options = RealTimeTrendsOptions {
                geo,
                trending_hours: hours,
            };
            emit(Response::from(client.real_time_trends(&options).await))
        }
        Command::Autocomplete { keyword, hl } => {
            emit(Response::from(client.autocomplete(&keyword, hl.as_deref()).await))
        }
        Command::Explore(args) => emit(Response::from(client.explore(&args.into()).await)),
        Command::RelatedTopics(args) => emit(Response::from(client.related_topics(&args.into()).await)),
        Command::RelatedQueries(args) => emit(Response::from(client.related_queries(&args.into()).await)),
        Command::RelatedData(args) => emit(Response::from(client.related_data(&args.into()).await)),
        Command::Region {
            keywords,
            geo,
            start,
            end,
            resolution,
            hl,
            timezone,
            category,
        } => {
            let options = InterestByRegionOptions {
                keywords,
                start_date: start,
                end_date: end,
                geo,
                resolution,
                hl,
                timezone,
                category,
            };
            emit(Response::from(client.interest_by_region(&options).await))
        }
    }
}

fn emit<T: Serialize>(response: Response<T>) -> Result<ExitCode> {
    let json = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
    println!("{}", json);

    Ok(if response.is_data() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region_command() {
        let cli = Cli::try_parse_from([
            "trendscope",
            "region",
            "bitcoin",
            "ethereum",
            "--geo",
            "US",
            "--resolution",
            "city",
            "--start",
            "2024-01-01",
        ])
        .unwrap();

        match cli.command {
            Command::Region {
                keywords,
                resolution,
                start,
                ..
            } => {
                assert_eq!(keywords, vec!["bitcoin", "ethereum"]);
                assert_eq!(resolution, Resolution::City);
                assert_eq!(start, NaiveDate::from_ymd_opt(2024, 1, 1));
            }
            _ => panic!("expected region command"),
        }
    }

    #[test]
    fn test_realtime_rejects_unknown_hours() {
        assert!(Cli::try_parse_from(["trendscope", "realtime", "--hours", "12"]).is_err());
        assert!(Cli::try_parse_from(["trendscope", "realtime", "--hours", "48"]).is_ok());
    }

    #[test]
    fn test_keyword_args_into_explore_options() {
        let cli = Cli::try_parse_from(["trendscope", "related-data", "rust", "--time", "now 7-d"])
            .unwrap();
        let Command::RelatedData(args) = cli.command else {
            panic!("expected related-data command");
        };
        let options: ExploreOptions = args.into();
        assert_eq!(options.keyword, "rust");
        assert_eq!(options.time, "now 7-d");
        assert_eq!(options.property, "");
    }
}
