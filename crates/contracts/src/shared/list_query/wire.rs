//! Backend-ready (sanitized) filter and sort representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::{FilterCondition, FilterDataType, FilterOperator};
use super::sort::{SortDirection, SortOption};

/// Typed value container, exactly one slot is set
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TypedFilterValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedBackendFilter {
    pub field: String,
    pub operator: FilterOperator,
    pub data_type: FilterDataType,
    pub value: TypedFilterValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedBackendSort {
    pub field: String,
    pub direction: SortDirection,
}

impl TypedBackendFilter {
    /// Convert a UI condition into wire form, `None` for empty/placeholder rows
    pub fn from_condition(condition: &FilterCondition) -> Option<Self> {
        if condition.is_empty() {
            return None;
        }

        let mut value = TypedFilterValue::default();
        match condition.data_type {
            FilterDataType::String => value.string = condition.value_string.clone(),
            FilterDataType::Number => value.number = condition.value_number,
            FilterDataType::Date => value.date = condition.value_date,
            FilterDataType::Boolean => value.boolean = condition.value_boolean,
            FilterDataType::Array => value.array = condition.value_array.clone(),
        }

        Some(Self {
            field: condition.field.clone(),
            operator: condition.operator,
            data_type: condition.data_type,
            value,
        })
    }
}

/// Strip empty conditions and convert the rest, preserving order
pub fn sanitize_filters(filters: &[FilterCondition]) -> Vec<TypedBackendFilter> {
    filters
        .iter()
        .filter_map(TypedBackendFilter::from_condition)
        .collect()
}

/// Drop sort options without a field, convert the rest
pub fn sanitize_sorts(sorts: &[SortOption]) -> Vec<TypedBackendSort> {
    sorts
        .iter()
        .filter(|s| !s.field.trim().is_empty())
        .map(|s| TypedBackendSort {
            field: s.field.clone(),
            direction: s.direction,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sanitize_drops_empty_keeps_zero() {
        let filters = vec![
            FilterCondition::new("name", FilterOperator::Contains, FilterDataType::String)
                .with_string(""),
            FilterCondition::new("amount", FilterOperator::Equal, FilterDataType::Number)
                .with_number(0.0),
            FilterCondition::new("status", FilterOperator::In, FilterDataType::Array)
                .with_array(Vec::<String>::new()),
        ];

        let sanitized = sanitize_filters(&filters);
        assert_eq!(sanitized.len(), 1);
        assert_eq!(sanitized[0].field, "amount");
        assert_eq!(sanitized[0].value.number, Some(0.0));
    }

    #[test]
    fn test_only_active_slot_is_sent() {
        let f = FilterCondition::new("status", FilterOperator::Equal, FilterDataType::String)
            .with_string("published")
            .with_number(5.0);
        let wire = TypedBackendFilter::from_condition(&f).unwrap();
        assert_eq!(wire.value.string.as_deref(), Some("published"));
        assert_eq!(wire.value.number, None);

        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["data_type"], "string");
        assert_eq!(json["value"], serde_json::json!({ "string": "published" }));
    }

    #[test]
    fn test_date_value_wire_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        let f = FilterCondition::new("created_at", FilterOperator::After, FilterDataType::Date)
            .with_date(at);
        let json = serde_json::to_value(sanitize_filters(&[f])).unwrap();
        assert_eq!(json[0]["value"]["date"], "2024-03-15T14:02:26Z");
        assert_eq!(json[0]["operator"], "after");
    }

    #[test]
    fn test_sanitize_sorts() {
        let sorts = vec![
            SortOption::new("", "", SortDirection::Asc),
            SortOption::new("created_at", "Created", SortDirection::Desc),
        ];
        assert_eq!(
            sanitize_sorts(&sorts),
            vec![TypedBackendSort {
                field: "created_at".into(),
                direction: SortDirection::Desc,
            }]
        );
    }
}
