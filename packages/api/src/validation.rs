// ABOUTME: Request shapes for the todo endpoints and their validation
// ABOUTME: Turns raw query/body input into storage inputs, collecting field-level errors

use serde::{Deserialize, Deserializer};
use tickoff_todos::{TodoCreateInput, TodoFilter, TodoUpdateInput, DEFAULT_LIMIT, MAX_LIMIT};

use crate::error::{AppError, FieldError};

/// Query parameters for listing todos.
/// Kept as raw strings so each bad value is reported against its own field.
#[derive(Debug, Default, Deserialize)]
pub struct ListTodosQuery {
    pub skip: Option<String>,
    pub limit: Option<String>,
    pub completed: Option<String>,
    pub search: Option<String>,
}

impl ListTodosQuery {
    pub fn into_filter(self) -> Result<TodoFilter, AppError> {
        let mut errors = Vec::new();

        let skip = match self.skip.as_deref() {
            None => 0,
            Some(raw) => parse_bounded("skip", raw, 0, i64::MAX).unwrap_or_else(|e| {
                errors.push(e);
                0
            }),
        };

        let limit = match self.limit.as_deref() {
            None => DEFAULT_LIMIT,
            Some(raw) => parse_bounded("limit", raw, 1, MAX_LIMIT).unwrap_or_else(|e| {
                errors.push(e);
                DEFAULT_LIMIT
            }),
        };

        let completed = match self.completed.as_deref() {
            None => None,
            Some(raw) => match parse_bool_flag(raw) {
                Some(value) => Some(value),
                None => {
                    errors.push(FieldError::new(
                        "completed",
                        "completed must be a boolean (true/false)",
                    ));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(validation_failed(errors));
        }

        Ok(TodoFilter {
            skip,
            limit,
            completed,
            search: self.search,
        })
    }
}

/// Request body for creating a todo
#[derive(Debug, Default, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTodoRequest {
    pub fn validate(self) -> Result<TodoCreateInput, AppError> {
        let title = match self.title {
            None => return Err(AppError::invalid_field("title", "title is required")),
            Some(title) => title,
        };
        validate_title(&title).map_err(|e| validation_failed(vec![e]))?;

        Ok(TodoCreateInput {
            title,
            description: self.description,
        })
    }
}

/// Request body for updating a todo.
/// The outer `Option` records whether the key was present at all, the inner
/// one whether it was `null`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
}

impl UpdateTodoRequest {
    pub fn validate(self) -> Result<TodoUpdateInput, AppError> {
        let mut errors = Vec::new();

        let title = match self.title {
            None => None,
            Some(None) => {
                errors.push(FieldError::new("title", "title cannot be null"));
                None
            }
            Some(Some(title)) => match validate_title(&title) {
                Ok(()) => Some(title),
                Err(e) => {
                    errors.push(e);
                    None
                }
            },
        };

        let completed = match self.completed {
            None => None,
            Some(None) => {
                errors.push(FieldError::new("completed", "completed cannot be null"));
                None
            }
            Some(Some(completed)) => Some(completed),
        };

        if !errors.is_empty() {
            return Err(validation_failed(errors));
        }

        Ok(TodoUpdateInput {
            title,
            description: self.description,
            completed,
        })
    }
}

/// Marks a key as present even when its value is `null`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_title(title: &str) -> Result<(), FieldError> {
    if title.trim().is_empty() {
        return Err(FieldError::new("title", "title must not be empty"));
    }
    Ok(())
}

fn parse_bounded(field: &str, raw: &str, min: i64, max: i64) -> Result<i64, FieldError> {
    let value = raw
        .trim()
        .parse::<i64>()
        .map_err(|_| FieldError::new(field, format!("{} must be an integer", field)))?;

    if value < min {
        return Err(FieldError::new(
            field,
            format!("{} must be greater than or equal to {}", field, min),
        ));
    }
    if value > max {
        return Err(FieldError::new(
            field,
            format!("{} must be less than or equal to {}", field, max),
        ));
    }
    Ok(value)
}

/// Accepts the usual spellings of a boolean query flag
pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

fn validation_failed(errors: Vec<FieldError>) -> AppError {
    let message = errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ");
    AppError::validation(message, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn details(error: AppError) -> Vec<FieldError> {
        match error {
            AppError::Validation { details, .. } => details,
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_query_defaults() {
        let filter = ListTodosQuery::default().into_filter().unwrap();
        assert_eq!(filter, TodoFilter::default());
        assert_eq!(filter.skip, 0);
        assert_eq!(filter.limit, 100);
    }

    #[rstest]
    #[case("skip", "-1")]
    #[case("skip", "abc")]
    #[case("limit", "0")]
    #[case("limit", "1001")]
    #[case("limit", "ten")]
    #[case("completed", "maybe")]
    fn test_list_query_rejects(#[case] field: &str, #[case] value: &str) {
        let mut query = ListTodosQuery::default();
        match field {
            "skip" => query.skip = Some(value.to_string()),
            "limit" => query.limit = Some(value.to_string()),
            _ => query.completed = Some(value.to_string()),
        }

        let errors = details(query.into_filter().unwrap_err());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, field);
    }

    #[test]
    fn test_list_query_reports_every_bad_field() {
        let query = ListTodosQuery {
            skip: Some("-5".to_string()),
            limit: Some("5000".to_string()),
            ..Default::default()
        };

        let fields: Vec<_> = details(query.into_filter().unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["skip", "limit"]);
    }

    #[test]
    fn test_list_query_accepts_bounds() {
        let query = ListTodosQuery {
            skip: Some("0".to_string()),
            limit: Some("1000".to_string()),
            completed: Some("TRUE".to_string()),
            search: Some("milk".to_string()),
        };

        let filter = query.into_filter().unwrap();
        assert_eq!(filter.limit, 1000);
        assert_eq!(filter.completed, Some(true));
        assert_eq!(filter.search.as_deref(), Some("milk"));
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("1", Some(true))]
    #[case("Yes", Some(true))]
    #[case("on", Some(true))]
    #[case("false", Some(false))]
    #[case("0", Some(false))]
    #[case("off", Some(false))]
    #[case("", None)]
    #[case("2", None)]
    fn test_parse_bool_flag(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool_flag(raw), expected);
    }

    #[test]
    fn test_create_requires_title() {
        let request: CreateTodoRequest =
            serde_json::from_str(r#"{"description":"no title"}"#).unwrap();
        let errors = details(request.validate().unwrap_err());
        assert_eq!(errors, vec![FieldError::new("title", "title is required")]);
    }

    #[rstest]
    #[case(r#"{"title":null}"#)]
    #[case(r#"{"title":""}"#)]
    #[case(r#"{"title":"   "}"#)]
    fn test_create_rejects_missing_or_blank_title(#[case] body: &str) {
        let request: CreateTodoRequest = serde_json::from_str(body).unwrap();
        let errors = details(request.validate().unwrap_err());
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn test_create_accepts_optional_description() {
        let request: CreateTodoRequest =
            serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_update_distinguishes_omitted_from_null() {
        let omitted: UpdateTodoRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(omitted.validate().unwrap(), TodoUpdateInput::default());

        let cleared: UpdateTodoRequest =
            serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.validate().unwrap().description, Some(None));

        let emptied: UpdateTodoRequest =
            serde_json::from_str(r#"{"description":""}"#).unwrap();
        assert_eq!(
            emptied.validate().unwrap().description,
            Some(Some(String::new()))
        );
    }

    #[test]
    fn test_update_partial_fields() {
        let request: UpdateTodoRequest =
            serde_json::from_str(r#"{"completed":true}"#).unwrap();
        let input = request.validate().unwrap();
        assert_eq!(input.completed, Some(true));
        assert!(input.title.is_none());
        assert!(input.description.is_none());
    }

    #[test]
    fn test_update_rejects_null_title_and_completed() {
        let request: UpdateTodoRequest =
            serde_json::from_str(r#"{"title":null,"completed":null}"#).unwrap();
        let fields: Vec<_> = details(request.validate().unwrap_err())
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["title", "completed"]);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let request: UpdateTodoRequest = serde_json::from_str(r#"{"title":" "}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_update_rejects_wrong_types() {
        let result: Result<UpdateTodoRequest, _> =
            serde_json::from_str(r#"{"completed":"yes"}"#);
        assert!(result.is_err());
    }
}
