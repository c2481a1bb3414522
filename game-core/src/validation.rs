use std::sync::LazyLock;

use game_types::{DecimalInput, FieldError};
use regex::Regex;

use crate::sanitize::sanitize_plain_text;

pub const GAME_DESC_MAX_CHARS: usize = 256;
pub const HEX_ID_MAX_CHARS: usize = 64;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const EMAIL_LOCAL_MAX_CHARS: usize = 64;

pub const LATITUDE_LIMIT: f64 = 90.0;
pub const LONGITUDE_LIMIT: f64 = 180.0;

static HEX_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{1,64}$").expect("hex pattern compiles"));

// DECIMAL(8,5): up to three integer digits and five fractional digits
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?\d{1,3}(\.\d{1,5})?$").expect("decimal pattern compiles")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
    )
    .expect("email pattern compiles")
});

fn required<'a>(field: &str, raw: Option<&'a str>) -> Result<&'a str, FieldError> {
    raw.ok_or_else(|| FieldError::invalid(field, "must not be null"))
}

/// Trim and sanitize a game description; at most 256 characters once sanitized.
pub fn game_description(raw: Option<&str>) -> Result<String, FieldError> {
    let field = "gameDesc";
    let desc = sanitize_plain_text(required(field, raw)?.trim());

    if desc.chars().count() > GAME_DESC_MAX_CHARS {
        return Err(FieldError::invalid(
            field,
            format!("must be at most {GAME_DESC_MAX_CHARS} characters"),
        ));
    }

    Ok(desc)
}

/// Trim and check a hexadecimal identifier such as a `gameAPI` or user token.
pub fn hex_identifier(field: &str, raw: Option<&str>) -> Result<String, FieldError> {
    let id = required(field, raw)?.trim();

    if id.len() > HEX_ID_MAX_CHARS {
        return Err(FieldError::invalid(
            field,
            format!("must be at most {HEX_ID_MAX_CHARS} characters"),
        ));
    }
    if !HEX_ID.is_match(id) {
        return Err(FieldError::invalid(field, format!("{id} is not a hex string")));
    }

    Ok(id.to_string())
}

pub fn email(raw: Option<&str>) -> Result<String, FieldError> {
    let field = "email";
    let email = required(field, raw)?.trim();

    let local_len = email.split('@').next().map_or(0, str::len);
    if email.len() > EMAIL_MAX_CHARS
        || local_len > EMAIL_LOCAL_MAX_CHARS
        || !EMAIL.is_match(email)
    {
        return Err(FieldError::invalid(
            field,
            format!("{email} is not a valid email"),
        ));
    }

    Ok(email.to_string())
}

fn decimal(field: &str, raw: Option<&DecimalInput>) -> Result<f64, FieldError> {
    let raw = raw.ok_or_else(|| FieldError::invalid(field, "must not be null"))?;
    let text = raw.as_text();
    let text = text.trim();

    if !DECIMAL.is_match(text) {
        return Err(FieldError::invalid(
            field,
            format!("{text} is not a valid decimal"),
        ));
    }

    text.parse::<f64>()
        .map_err(|_| FieldError::invalid(field, format!("{text} is not a valid decimal")))
}

/// Latitude strictly between -90 and 90.
pub fn latitude(raw: Option<&DecimalInput>) -> Result<f64, FieldError> {
    let value = decimal("latitude", raw)?;
    if value <= -LATITUDE_LIMIT || value >= LATITUDE_LIMIT {
        return Err(FieldError::out_of_range("latitude", value.to_string()));
    }
    Ok(value)
}

/// Longitude between -180 and 180 inclusive.
pub fn longitude(raw: Option<&DecimalInput>) -> Result<f64, FieldError> {
    let value = decimal("longitude", raw)?;
    if !(-LONGITUDE_LIMIT..=LONGITUDE_LIMIT).contains(&value) {
        return Err(FieldError::out_of_range("longitude", value.to_string()));
    }
    Ok(value)
}

pub fn distance_max(raw: Option<f64>) -> Result<f64, FieldError> {
    let field = "distanceMax";
    let value = raw.ok_or_else(|| FieldError::invalid(field, "must not be null"))?;
    if !value.is_finite() {
        return Err(FieldError::invalid(
            field,
            format!("{value} is not a valid decimal"),
        ));
    }
    Ok(value)
}
