use super::envelope::{container_array, default_section, read_document};
use super::slot;
use crate::error::TrendsError;
use crate::types::{
    RankedList, RankedLists, RelatedData, RelatedQueriesResponse, RelatedQuery, RelatedTopic,
    RelatedTopicsResponse, TopicEntity,
};
use serde_json::Value;

// Positional layout of a related topic: [[mid, title, type], value, formattedValue, hasData, link]
const TOPIC_ENTITY: usize = 0;
const TOPIC_VALUE: usize = 1;
const TOPIC_FORMATTED: usize = 2;
const TOPIC_HAS_DATA: usize = 3;
const TOPIC_LINK: usize = 4;

const ENTITY_MID: usize = 0;
const ENTITY_TITLE: usize = 1;
const ENTITY_TYPE: usize = 2;

// Positional layout of a related query: [query, value, formattedValue, hasData, link]
const QUERY_TEXT: usize = 0;
const QUERY_VALUE: usize = 1;
const QUERY_FORMATTED: usize = 2;
const QUERY_HAS_DATA: usize = 3;
const QUERY_LINK: usize = 4;

pub fn parse_related_topics(raw: &str) -> Result<RelatedTopicsResponse, TrendsError> {
    let doc = read_document(raw)?;
    Ok(RelatedTopicsResponse {
        default: ranked_lists(&doc, decode_topic)?,
    })
}

pub fn parse_related_queries(raw: &str) -> Result<RelatedQueriesResponse, TrendsError> {
    let doc = read_document(raw)?;
    Ok(RelatedQueriesResponse {
        default: ranked_lists(&doc, decode_query)?,
    })
}

/// Combine separately decoded topics and queries without reordering or filtering
pub fn merge_related(
    topics: &RelatedTopicsResponse,
    queries: &RelatedQueriesResponse,
) -> RelatedData {
    RelatedData {
        topics: topics.default.flatten(),
        queries: queries.default.flatten(),
    }
}

fn ranked_lists<T>(
    doc: &Value,
    decode: fn(&Value) -> Option<T>,
) -> Result<RankedLists<T>, TrendsError> {
    let section = default_section(doc)?;
    let lists = container_array(section, "rankedList")?;

    let ranked_list = lists
        .iter()
        .filter_map(|list| {
            if !list.is_object() {
                tracing::trace!("skipping malformed ranked list");
                return None;
            }
            let ranked_keyword = slot::list(slot::field(list, "rankedKeyword"))
                .iter()
                .filter_map(decode)
                .collect();
            Some(RankedList { ranked_keyword })
        })
        .collect();

    Ok(RankedLists { ranked_list })
}

/// Decode a keyed or positional topic record; other shapes are dropped
pub fn decode_topic(record: &Value) -> Option<RelatedTopic> {
    match record {
        Value::Object(_) => {
            let entity = slot::field(record, "topic");
            Some(RelatedTopic {
                topic: TopicEntity {
                    mid: slot::text(entity.and_then(|e| slot::field(e, "mid"))),
                    title: slot::text(entity.and_then(|e| slot::field(e, "title"))),
                    kind: slot::text(entity.and_then(|e| slot::field(e, "type"))),
                },
                value: slot::number(slot::field(record, "value")),
                formatted_value: slot::text(slot::field(record, "formattedValue")),
                has_data: slot::flag(slot::field(record, "hasData")),
                link: slot::text(slot::field(record, "link")),
            })
        }
        Value::Array(tuple) => {
            let entity = slot::list(slot::at(tuple, TOPIC_ENTITY));
            Some(RelatedTopic {
                topic: TopicEntity {
                    mid: slot::text(slot::at(entity, ENTITY_MID)),
                    title: slot::text(slot::at(entity, ENTITY_TITLE)),
                    kind: slot::text(slot::at(entity, ENTITY_TYPE)),
                },
                value: slot::number(slot::at(tuple, TOPIC_VALUE)),
                formatted_value: slot::text(slot::at(tuple, TOPIC_FORMATTED)),
                has_data: slot::flag(slot::at(tuple, TOPIC_HAS_DATA)),
                link: slot::text(slot::at(tuple, TOPIC_LINK)),
            })
        }
        _ => {
            tracing::trace!("skipping malformed related topic");
            None
        }
    }
}

/// Decode a keyed or positional query record; other shapes are dropped
pub fn decode_query(record: &Value) -> Option<RelatedQuery> {
    match record {
        Value::Object(_) => Some(RelatedQuery {
            query: slot::text(slot::field(record, "query")),
            value: slot::number(slot::field(record, "value")),
            formatted_value: slot::text(slot::field(record, "formattedValue")),
            has_data: slot::flag(slot::field(record, "hasData")),
            link: slot::text(slot::field(record, "link")),
        }),
        Value::Array(tuple) => Some(RelatedQuery {
            query: slot::text(slot::at(tuple, QUERY_TEXT)),
            value: slot::number(slot::at(tuple, QUERY_VALUE)),
            formatted_value: slot::text(slot::at(tuple, QUERY_FORMATTED)),
            has_data: slot::flag(slot::at(tuple, QUERY_HAS_DATA)),
            link: slot::text(slot::at(tuple, QUERY_LINK)),
        }),
        _ => {
            tracing::trace!("skipping malformed related query");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(doc: Value) -> String {
        format!(")]}}',\n{}", doc)
    }

    #[test]
    fn test_parse_related_topics_keyed_records() {
        let raw = body(json!({
            "default": {
                "rankedList": [
                    {
                        "rankedKeyword": [
                            {
                                "topic": {"mid": "/m/05p0rrx", "title": "Bitcoin", "type": "Cryptocurrency"},
                                "value": 100,
                                "formattedValue": "100",
                                "hasData": true,
                                "link": "/trends/explore?q=/m/05p0rrx"
                            }
                        ]
                    },
                    {"rankedKeyword": []}
                ]
            }
        }));

        let parsed = parse_related_topics(&raw).unwrap();
        assert_eq!(parsed.default.ranked_list.len(), 2);
        let topic = &parsed.default.ranked_list[0].ranked_keyword[0];
        assert_eq!(topic.topic.mid, "/m/05p0rrx");
        assert_eq!(topic.topic.kind, "Cryptocurrency");
        assert_eq!(topic.value, 100.0);
        assert!(topic.has_data);
    }

    #[test]
    fn test_parse_related_queries_positional_records() {
        let raw = body(json!({
            "default": {
                "rankedList": [{
                    "rankedKeyword": [
                        ["bitcoin price", 100, "100", true, "/trends/explore?q=bitcoin+price"],
                        ["btc", "high", null]
                    ]
                }]
            }
        }));

        let parsed = parse_related_queries(&raw).unwrap();
        let keywords = &parsed.default.ranked_list[0].ranked_keyword;
        assert_eq!(keywords.len(), 2);
        assert_eq!(keywords[0].query, "bitcoin price");
        assert_eq!(keywords[0].link, "/trends/explore?q=bitcoin+price");
        assert_eq!(keywords[1].value, 0.0);
        assert_eq!(keywords[1].formatted_value, "");
        assert!(!keywords[1].has_data);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let raw = body(json!({
            "default": {
                "rankedList": [{
                    "rankedKeyword": ["loose string", 12, {"query": "ok"}]
                }]
            }
        }));
        let parsed = parse_related_queries(&raw).unwrap();
        assert_eq!(parsed.default.ranked_list[0].ranked_keyword.len(), 1);
        assert_eq!(parsed.default.ranked_list[0].ranked_keyword[0].query, "ok");
    }

    #[test]
    fn test_non_object_ranked_lists_are_skipped() {
        let raw = body(json!({
            "default": {
                "rankedList": [
                    "junk",
                    7,
                    {"rankedKeyword": [[["/m/1", "Rust", "Language"], 100, "100", true, "/l"]]}
                ]
            }
        }));
        let parsed = parse_related_topics(&raw).unwrap();
        assert_eq!(parsed.default.ranked_list.len(), 1);
        assert_eq!(parsed.default.ranked_list[0].ranked_keyword.len(), 1);
        assert_eq!(parsed.default.ranked_list[0].ranked_keyword[0].topic.title, "Rust");
    }

    #[test]
    fn test_parse_related_topics_positional_records() {
        let raw = body(json!({
            "default": {
                "rankedList": [{
                    "rankedKeyword": [
                        [["/m/1", "Rust", "Language"], 100, "100", true, "/l"],
                        [["/m/2", "Cargo"], 40],
                        ["not an entity", 5, "5"]
                    ]
                }]
            }
        }));

        let parsed = parse_related_topics(&raw).unwrap();
        let keywords = &parsed.default.ranked_list[0].ranked_keyword;
        assert_eq!(keywords.len(), 3);

        assert_eq!(keywords[0].topic.mid, "/m/1");
        assert_eq!(keywords[0].topic.title, "Rust");
        assert_eq!(keywords[0].topic.kind, "Language");
        assert_eq!(keywords[0].value, 100.0);
        assert_eq!(keywords[0].formatted_value, "100");
        assert!(keywords[0].has_data);
        assert_eq!(keywords[0].link, "/l");

        assert_eq!(keywords[1].topic.title, "Cargo");
        assert_eq!(keywords[1].topic.kind, "");
        assert_eq!(keywords[1].value, 40.0);
        assert_eq!(keywords[1].formatted_value, "");
        assert!(!keywords[1].has_data);
        assert_eq!(keywords[1].link, "");

        assert_eq!(keywords[2].topic.mid, "");
        assert_eq!(keywords[2].topic.title, "");
        assert_eq!(keywords[2].value, 5.0);
        assert_eq!(keywords[2].formatted_value, "5");
    }

    #[test]
    fn test_missing_ranked_list_is_empty() {
        let parsed = parse_related_topics(&body(json!({"default": {}}))).unwrap();
        assert!(parsed.default.ranked_list.is_empty());
    }

    #[test]
    fn test_malformed_container_is_parse_error() {
        for doc in [json!({}), json!({"default": []}), json!({"default": {"rankedList": "x"}})] {
            let err = parse_related_topics(&body(doc)).unwrap_err();
            assert!(matches!(err, TrendsError::Parse(_)));
        }
    }

    #[test]
    fn test_merge_keeps_order_across_tiers() {
        let topic = |title: &str| RelatedTopic {
            topic: TopicEntity {
                title: title.to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        let topics = RelatedTopicsResponse {
            default: RankedLists {
                ranked_list: vec![
                    RankedList { ranked_keyword: vec![topic("T1")] },
                    RankedList { ranked_keyword: vec![topic("T2")] },
                ],
            },
        };
        let queries = RelatedQueriesResponse::default();

        let merged = merge_related(&topics, &queries);
        let titles: Vec<_> = merged.topics.iter().map(|t| t.topic.title.as_str()).collect();
        assert_eq!(titles, vec!["T1", "T2"]);
        assert!(merged.queries.is_empty());
    }
}
