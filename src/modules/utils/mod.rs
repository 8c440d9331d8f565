// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use base64::{engine::general_purpose, Engine};
use chrono::DateTime;
use rand::{rng, Rng};

use super::error::code::ErrorCode;
use crate::raise_error;

pub mod shutdown;

#[macro_export]
macro_rules! foodlink_version {
    () => {
        env!("CARGO_PKG_VERSION")
    };
}

#[macro_export]
macro_rules! utc_now {
    () => {{
        use chrono::Utc;
        Utc::now().timestamp_millis()
    }};
}

#[macro_export]
macro_rules! raise_error {
    ($msg:expr, $code:expr) => {
        $crate::modules::error::FoodLinkError::Generic {
            message: $msg,
            location: snafu::Location::default(),
            code: $code,
        }
    };
}

#[macro_export]
macro_rules! id {
    ($bit_strength:expr) => {{
        // Generate a token with the given bit strength
        let token = $crate::modules::utils::generate_token_impl($bit_strength);
        // Hash the generated token
        $crate::modules::utils::hash(&token)
    }};
}

pub(crate) fn generate_token_impl(bit_strength: usize) -> String {
    let byte_length = (bit_strength + 23) / 24 * 3;
    let random_bytes: Vec<u8> = (0..byte_length).map(|_| rand::random::<u8>()).collect();
    let mut encoded = general_purpose::URL_SAFE.encode(&random_bytes);

    encoded = encoded
        .chars()
        .map(|c| {
            if c == '/' || c == '+' || c == '-' || c == '_' {
                make_single_random_char()
            } else {
                c
            }
        })
        .collect();

    encoded
}

fn make_single_random_char() -> char {
    let random_bytes: [u8; 3] = rng().random();
    let encoded = general_purpose::URL_SAFE.encode(random_bytes);
    encoded
        .chars()
        .find(|&c| c != '-' && c != '_' && c != '+' && c != '/')
        .unwrap_or('a')
}

pub fn hash(s: &str) -> u64 {
    let mut cursor = Vec::new();
    cursor.extend_from_slice(s.as_bytes());
    let mut cursor = std::io::Cursor::new(cursor);
    let hash = murmur3::murmur3_x64_128(&mut cursor, 0).unwrap();
    (hash & 0x1F_FFFF_FFFF_FFFF) as u64
}

/// Parses an RFC 3339 timestamp supplied by a client into epoch milliseconds.
pub fn parse_client_timestamp(
    value: &str,
    param_name: &str,
) -> crate::modules::error::FoodLinkResult<i64> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| {
            raise_error!(
                format!(
                    "'{}' is not a valid RFC 3339 timestamp: '{}'",
                    param_name, value
                ),
                ErrorCode::InvalidParameter
            )
        })
}

pub fn require_non_empty(
    value: &str,
    param_name: &str,
) -> crate::modules::error::FoodLinkResult<()> {
    if value.trim().is_empty() {
        return Err(raise_error!(
            format!("'{}' cannot be empty.", param_name),
            ErrorCode::InvalidParameter
        ));
    }
    Ok(())
}

pub fn validate_contact_number(input: &str) -> crate::modules::error::FoodLinkResult<()> {
    let re = regex::Regex::new(r"^\+?[0-9 \-()]{6,20}$").unwrap();
    if re.is_match(input) {
        Ok(())
    } else {
        Err(raise_error!(
            format!("'{}' is not a valid contact number.", input),
            ErrorCode::InvalidParameter
        ))
    }
}
