// src/api/parser.rs
//! Decoding of Notion API response bodies into domain types or typed errors.

use super::client::ApiResponse;
use super::types::{NotionApiErrorResponse, PaginatedResponse};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode};
use crate::model::{Block, Page};
use reqwest::StatusCode;

/// Parse any Notion API response, success or error.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status, &result.url))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse {
            url: url.to_string(),
            reason: format!("{} (body: {})", e, preview(body)),
        }
    })
}

/// Turns a non-2xx body into a typed API error, falling back to the HTTP
/// status when the body is not a Notion error object.
fn parse_error(body: &str, status: StatusCode, url: &str) -> AppError {
    match serde_json::from_str::<NotionApiErrorResponse>(body) {
        Ok(error) => AppError::NotionApi {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status: error.status.unwrap_or(status.as_u16()),
            request_id: error.request_id,
        },
        Err(_) => AppError::NotionApi {
            code: NotionErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {} from {}: {}", status, url, preview(body)),
            status: status.as_u16(),
            request_id: None,
        },
    }
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

pub fn parse_page_response(result: ApiResponse<String>) -> Result<Page, AppError> {
    parse_api_response(result)
}

pub fn parse_pages_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Page>, AppError> {
    parse_api_response(result)
}

pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    parse_api_response(result)
}
