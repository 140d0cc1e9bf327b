use super::envelope::{container_array, read_document};
use super::slot;
use crate::error::TrendsError;
use crate::types::{ExploreResponse, ExploreWidget};
use serde_json::Value;

/// Decode the explore handshake; widgets without an id or token are dropped
pub fn parse_explore(raw: &str) -> Result<ExploreResponse, TrendsError> {
    let doc = read_document(raw)?;
    if doc.get("widgets").map_or(true, Value::is_null) {
        return Err(TrendsError::parse(
            "Invalid response format: missing 'widgets'",
        ));
    }

    let widgets = container_array(&doc, "widgets")?
        .iter()
        .filter_map(decode_widget)
        .collect();

    Ok(ExploreResponse { widgets })
}

fn decode_widget(widget: &Value) -> Option<ExploreWidget> {
    let id = slot::text(slot::field(widget, "id"));
    let token = slot::text(slot::field(widget, "token"));
    if id.is_empty() || token.is_empty() {
        tracing::trace!(id = %id, "skipping explore widget without id or token");
        return None;
    }

    Some(ExploreWidget {
        id,
        request: widget.get("request").cloned().unwrap_or(Value::Null),
        token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_explore_widgets() {
        let raw = format!(
            ")]}}'\n{}",
            json!({
                "widgets": [
                    {"id": "TIMESERIES", "request": {"time": "today 12-m"}, "token": "t1"},
                    {"id": "RELATED_TOPICS", "request": {"restriction": {}}, "token": "t2"},
                    {"id": "BROKEN"},
                    "nonsense"
                ]
            })
        );

        let explore = parse_explore(&raw).unwrap();
        assert_eq!(explore.widgets.len(), 2);
        let related = explore.widget("RELATED_TOPICS").unwrap();
        assert_eq!(related.token, "t2");
        assert_eq!(related.request, json!({"restriction": {}}));
        assert!(explore.widget("GEO_MAP").is_none());
    }

    #[test]
    fn test_missing_widgets_is_parse_error() {
        for raw in [")]}'\n{}", ")]}'\n{\"widgets\": null}"] {
            let err = parse_explore(raw).unwrap_err();
            assert!(matches!(err, TrendsError::Parse(_)));
            assert!(err.to_string().contains("missing 'widgets'"));
        }
    }
}
