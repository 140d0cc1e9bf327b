use super::envelope::{container_array, default_section, read_document};
use super::slot;
use crate::error::TrendsError;
use crate::types::{Coordinates, GeoMapData, InterestByRegionData, InterestByRegionResponse};
use serde_json::Value;

// [geoCode, geoName, value, formattedValue, maxValueIndex, hasData, coordinates]
const GEO_CODE: usize = 0;
const GEO_NAME: usize = 1;
const VALUE: usize = 2;
const FORMATTED_VALUE: usize = 3;
const MAX_VALUE_INDEX: usize = 4;
const HAS_DATA: usize = 5;
const COORDINATES: usize = 6;

pub fn parse_interest_by_region(raw: &str) -> Result<InterestByRegionResponse, TrendsError> {
    let doc = read_document(raw)?;
    let section = default_section(&doc)?;
    let rows = container_array(section, "geoMapData")?;

    let geo_map_data: Vec<InterestByRegionData> = rows.iter().filter_map(decode_region).collect();

    tracing::debug!(
        rows = geo_map_data.len(),
        skipped = rows.len() - geo_map_data.len(),
        "decoded interest by region"
    );

    Ok(InterestByRegionResponse {
        default: GeoMapData { geo_map_data },
    })
}

/// Decode one geography row, keyed or positional
pub fn decode_region(record: &Value) -> Option<InterestByRegionData> {
    match record {
        Value::Object(_) => Some(InterestByRegionData {
            geo_code: slot::text(slot::field(record, "geoCode")),
            geo_name: slot::text(slot::field(record, "geoName")),
            value: slot::numbers(slot::field(record, "value")),
            formatted_value: slot::texts(slot::field(record, "formattedValue")),
            max_value_index: slot::integer(slot::field(record, "maxValueIndex")).unwrap_or(0),
            has_data: slot::flags(slot::field(record, "hasData")),
            coordinates: coordinates(slot::field(record, "coordinates")),
        }),
        Value::Array(row) => Some(InterestByRegionData {
            geo_code: slot::text(slot::at(row, GEO_CODE)),
            geo_name: slot::text(slot::at(row, GEO_NAME)),
            value: slot::numbers(slot::at(row, VALUE)),
            formatted_value: slot::texts(slot::at(row, FORMATTED_VALUE)),
            max_value_index: slot::integer(slot::at(row, MAX_VALUE_INDEX)).unwrap_or(0),
            has_data: slot::flags(slot::at(row, HAS_DATA)),
            coordinates: coordinates(slot::at(row, COORDINATES)),
        }),
        _ => {
            tracing::trace!("skipping malformed region row");
            None
        }
    }
}

/// `{lat, lng}` or `[lat, lng]`; omitted unless both are numeric
fn coordinates(value: Option<&Value>) -> Option<Coordinates> {
    let (lat, lng) = match value? {
        Value::Object(_) => (value?.get("lat")?, value?.get("lng")?),
        Value::Array(pair) => (pair.first()?, pair.get(1)?),
        _ => return None,
    };
    Some(Coordinates {
        lat: lat.as_f64()?,
        lng: lng.as_f64()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(doc: Value) -> String {
        format!(")]}}',\n{}", doc)
    }

    #[test]
    fn test_keyed_rows() {
        let raw = body(json!({
            "default": {
                "geoMapData": [
                    {
                        "geoCode": "US-CA",
                        "geoName": "California",
                        "value": [100, 40],
                        "formattedValue": ["100", "40"],
                        "maxValueIndex": 0,
                        "hasData": [true, true],
                        "coordinates": {"lat": 36.77, "lng": -119.41}
                    },
                    {
                        "geoCode": "US-WY",
                        "geoName": "Wyoming",
                        "value": [0, 0],
                        "formattedValue": ["", ""],
                        "maxValueIndex": 0,
                        "hasData": [false, false]
                    }
                ]
            }
        }));

        let parsed = parse_interest_by_region(&raw).unwrap();
        let rows = &parsed.default.geo_map_data;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value, vec![100.0, 40.0]);
        assert_eq!(rows[0].coordinates, Some(Coordinates { lat: 36.77, lng: -119.41 }));
        assert_eq!(rows[1].coordinates, None);
        assert_eq!(rows[1].has_data, vec![false, false]);
    }

    #[test]
    fn test_positional_row_with_scalar_value() {
        let row = json!(["FR", "France", 87, "87", 0, true, [46.2, 2.2]]);
        let decoded = decode_region(&row).unwrap();
        assert_eq!(decoded.geo_code, "FR");
        assert_eq!(decoded.value, vec![87.0]);
        assert_eq!(decoded.formatted_value, vec!["87".to_string()]);
        assert_eq!(decoded.has_data, vec![true]);
        assert_eq!(decoded.coordinates, Some(Coordinates { lat: 46.2, lng: 2.2 }));
    }

    #[test]
    fn test_partial_coordinates_are_omitted() {
        let row = json!({"geoCode": "X", "coordinates": {"lat": 1.0}});
        assert_eq!(decode_region(&row).unwrap().coordinates, None);
        let row = json!(["X", "Y", [], [], 0, [], ["north", 2.0]]);
        assert_eq!(decode_region(&row).unwrap().coordinates, None);
    }

    #[test]
    fn test_non_record_rows_are_skipped() {
        let raw = body(json!({"default": {"geoMapData": [null, "x", {"geoCode": "DE"}]}}));
        let parsed = parse_interest_by_region(&raw).unwrap();
        assert_eq!(parsed.default.geo_map_data.len(), 1);
        assert_eq!(parsed.default.geo_map_data[0].geo_code, "DE");
    }

    #[test]
    fn test_malformed_container_is_parse_error() {
        let err = parse_interest_by_region(&body(json!({"default": {"geoMapData": {}}}))).unwrap_err();
        assert!(matches!(err, TrendsError::Parse(_)));
    }
}
