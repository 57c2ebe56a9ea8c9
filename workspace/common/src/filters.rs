//! Optional list filters. Every field is independent; supplied fields are
//! combined with logical AND and an empty query-string value counts as absent.

use model::entities::{expense::ExpenseCategory, student_fee_record::FeeStatus};
use serde::de::IntoDeserializer;
use serde::de::value::StringDeserializer;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::IntoParams;
use validator::Validate;

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => {
            let value: StringDeserializer<D::Error> = value.to_owned().into_deserializer();
            T::deserialize(value).map(Some)
        }
    }
}

/// Filter for listing students
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, Validate, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct StudentFilter {
    /// Case-insensitive substring of name, roll number or email
    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(length(max = 100, message = "search must be at most 100 characters"))]
    pub search: Option<String>,
    /// Exact course name (e.g. "MBA")
    #[serde(default, deserialize_with = "empty_as_none")]
    pub course: Option<String>,
}

/// Filter for listing student fee records
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, Validate, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct FeeRecordFilter {
    /// Surrogate id of the student
    pub student_id: Option<i32>,
    /// "pending" or "paid"
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<String>)]
    pub status: Option<FeeStatus>,
}

/// Filter for listing payments
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, Validate, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct PaymentFilter {
    /// Surrogate id of the paying student
    pub student_id: Option<i32>,
}

/// Filter for listing expenses
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, Validate, PartialEq)]
#[into_params(parameter_in = Query)]
pub struct ExpenseFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    #[param(value_type = Option<String>)]
    pub category: Option<ExpenseCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_mean_no_filter() {
        let filter: StudentFilter = serde_urlencoded::from_str("search=&course=").unwrap();
        assert_eq!(filter, StudentFilter::default());

        let filter: FeeRecordFilter = serde_urlencoded::from_str("status=").unwrap();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_missing_values_mean_no_filter() {
        let filter: ExpenseFilter = serde_urlencoded::from_str("").unwrap();
        assert_eq!(filter.category, None);
    }

    #[test]
    fn test_enum_filters_parse_snake_case() {
        let filter: ExpenseFilter = serde_urlencoded::from_str("category=utilities").unwrap();
        assert_eq!(filter.category, Some(ExpenseCategory::Utilities));

        let filter: FeeRecordFilter = serde_urlencoded::from_str("student_id=7&status=paid").unwrap();
        assert_eq!(filter.student_id, Some(7));
        assert_eq!(filter.status, Some(FeeStatus::Paid));
    }

    #[test]
    fn test_unknown_enum_filter_is_rejected() {
        let result: Result<ExpenseFilter, _> = serde_urlencoded::from_str("category=parties");
        assert!(result.is_err());
    }

    #[test]
    fn test_search_keeps_its_text() {
        let filter: StudentFilter = serde_urlencoded::from_str("search=Doe&course=MBA").unwrap();
        assert_eq!(filter.search.as_deref(), Some("Doe"));
        assert_eq!(filter.course.as_deref(), Some("MBA"));
    }
}
