use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Filter operator as understood by the list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    /// Equal (=)
    #[serde(rename = "eq")]
    Equal,
    /// Substring match (LIKE %x%)
    Contains,
    /// Negated substring match
    NotContains,
    /// Greater than (>)
    #[serde(rename = "gt")]
    GreaterThan,
    /// Less than (<)
    #[serde(rename = "lt")]
    LessThan,
    /// In list of values
    In,
    /// Not in list of values
    NotIn,
    /// Date strictly before value
    Before,
    /// Date strictly after value
    After,
}

impl FilterOperator {
    /// Get display label for UI
    pub fn label(&self) -> &'static str {
        match self {
            FilterOperator::Equal => "is",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "does not contain",
            FilterOperator::GreaterThan => "greater than",
            FilterOperator::LessThan => "less than",
            FilterOperator::In => "is any of",
            FilterOperator::NotIn => "is none of",
            FilterOperator::Before => "before",
            FilterOperator::After => "after",
        }
    }
}

/// Which value slot of a [`FilterCondition`] is meaningful
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterDataType {
    String,
    Number,
    Date,
    Boolean,
    Array,
}

/// One predicate a user has configured on a list.
///
/// Only the value slot matching `data_type` is read; the others are kept as-is
/// so switching the type of a row in the editor does not lose what was typed.
/// The JSON shape (camelCase) is the one stored in URLs and session storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Caller-assigned, stable across edits (row identity in the editor)
    pub id: String,

    /// Backend field name (e.g. "status", "name")
    pub field: String,

    pub operator: FilterOperator,

    pub data_type: FilterDataType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_number: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_array: Option<Vec<String>>,

    /// Serialized as an ISO-8601 string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_date: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_boolean: Option<bool>,
}

impl FilterCondition {
    /// Create an empty (placeholder) condition with a fresh id
    pub fn new(
        field: impl Into<String>,
        operator: FilterOperator,
        data_type: FilterDataType,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            field: field.into(),
            operator,
            data_type,
            value_string: None,
            value_number: None,
            value_array: None,
            value_date: None,
            value_boolean: None,
        }
    }

    /// Replace the generated id (tests, fixed default filters)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_string(mut self, value: impl Into<String>) -> Self {
        self.value_string = Some(value.into());
        self
    }

    pub fn with_number(mut self, value: f64) -> Self {
        self.value_number = Some(value);
        self
    }

    pub fn with_array<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_array = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_date(mut self, value: DateTime<Utc>) -> Self {
        self.value_date = Some(value);
        self
    }

    pub fn with_boolean(mut self, value: bool) -> Self {
        self.value_boolean = Some(value);
        self
    }

    /// True when the slot selected by `data_type` holds nothing worth sending.
    ///
    /// `0`, `false` and arrays of falsy-looking elements are values, not absence.
    pub fn is_empty(&self) -> bool {
        match self.data_type {
            FilterDataType::String => self
                .value_string
                .as_deref()
                .map_or(true, |s| s.trim().is_empty()),
            FilterDataType::Number => self.value_number.map_or(true, f64::is_nan),
            FilterDataType::Date => self.value_date.is_none(),
            FilterDataType::Boolean => self.value_boolean.is_none(),
            FilterDataType::Array => self.value_array.as_ref().map_or(true, Vec::is_empty),
        }
    }
}

/// Number of conditions that would actually reach the backend
pub fn active_filter_count(filters: &[FilterCondition]) -> usize {
    filters.iter().filter(|f| !f.is_empty()).count()
}
