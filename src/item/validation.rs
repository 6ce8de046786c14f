//! Submission validation shared by items and messages.

use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::error::ItemError;
use super::types::{ItemType, NewItem, CATEGORIES, MAX_IMAGES};

/// Loose `local@domain.tld` shape check; delivery is someone else's problem.
#[expect(
    clippy::expect_used,
    reason = "Regex literal is compile-time constant and cannot fail"
)]
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX is a valid regex literal")
});

/// A validated submission, ready to become an `Item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidItem {
    pub title: String,
    pub item_type: ItemType,
    pub category: String,
    pub description: String,
    pub location_text: String,
    pub date_seen: NaiveDate,
    pub images: Vec<String>,
    pub posted_by_name: String,
    pub posted_by_email: String,
}

/// Trim `value` and fail with a field-level error when nothing is left.
pub fn require(field: &'static str, value: &str) -> Result<String, ItemError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ItemError::validation(field, "is required"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Require a well-formed email address.
pub fn require_email(field: &'static str, value: &str) -> Result<String, ItemError> {
    let email = require(field, value)?;
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(ItemError::validation(field, "is not a valid email address"))
    }
}

/// Validate a raw submission.
///
/// Required fields are checked in form order so the caller is pointed at the
/// first missing one.
pub fn validate_new_item(input: &NewItem) -> Result<ValidItem, ItemError> {
    let title = require("title", &input.title)?;
    let item_type = require("type", &input.item_type)?
        .parse::<ItemType>()
        .map_err(|_| ItemError::validation("type", "must be Lost or Found"))?;
    let category = parse_category(&require("category", &input.category)?)?;
    let date_seen = parse_date_seen(&require("dateSeen", &input.date_seen)?)?;
    let location_text = require("locationText", &input.location_text)?;
    let description = require("description", &input.description)?;
    let posted_by_name = require("postedByName", &input.posted_by_name)?;
    let posted_by_email = require_email("postedByEmail", &input.posted_by_email)?;
    let images = validate_images(&input.images)?;

    Ok(ValidItem {
        title,
        item_type,
        category,
        description,
        location_text,
        date_seen,
        images,
        posted_by_name,
        posted_by_email,
    })
}

/// Match a category case-insensitively and return its canonical spelling.
fn parse_category(value: &str) -> Result<String, ItemError> {
    CATEGORIES
        .iter()
        .find(|c| c.eq_ignore_ascii_case(value))
        .map(|c| (*c).to_string())
        .ok_or_else(|| {
            ItemError::validation(
                "category",
                format!("must be one of: {}", CATEGORIES.join(", ")),
            )
        })
}

fn parse_date_seen(value: &str) -> Result<NaiveDate, ItemError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ItemError::validation("dateSeen", "must be a date in YYYY-MM-DD form"))?;
    if date > Utc::now().date_naive() {
        return Err(ItemError::validation("dateSeen", "cannot be in the future"));
    }
    Ok(date)
}

fn validate_images(images: &[String]) -> Result<Vec<String>, ItemError> {
    let images: Vec<String> = images
        .iter()
        .map(|i| i.trim())
        .filter(|i| !i.is_empty())
        .map(str::to_string)
        .collect();
    if images.len() > MAX_IMAGES {
        return Err(ItemError::validation(
            "images",
            format!("at most {MAX_IMAGES} images are allowed"),
        ));
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> NewItem {
        NewItem {
            title: "Red Wallet".to_string(),
            item_type: "Found".to_string(),
            category: "Wallet".to_string(),
            description: "Red leather wallet, contains student ID".to_string(),
            location_text: "Student Cafeteria Table 8".to_string(),
            date_seen: "2024-01-15".to_string(),
            images: vec![],
            posted_by_name: "Mike Chen".to_string(),
            posted_by_email: "m.chen@campus.edu".to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        let valid = validate_new_item(&wallet()).unwrap();
        assert_eq!(valid.item_type, ItemType::Found);
        assert_eq!(valid.date_seen, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_trims_free_text() {
        let mut input = wallet();
        input.title = "  Red Wallet \n".to_string();
        assert_eq!(validate_new_item(&input).unwrap().title, "Red Wallet");
    }

    #[test]
    fn test_each_required_field_is_reported() {
        let cases: Vec<(&str, fn(&mut NewItem))> = vec![
            ("title", |i| i.title.clear()),
            ("type", |i| i.item_type.clear()),
            ("category", |i| i.category.clear()),
            ("dateSeen", |i| i.date_seen.clear()),
            ("locationText", |i| i.location_text.clear()),
            ("description", |i| i.description = "   ".to_string()),
            ("postedByName", |i| i.posted_by_name.clear()),
            ("postedByEmail", |i| i.posted_by_email.clear()),
        ];
        for (field, blank) in cases {
            let mut input = wallet();
            blank(&mut input);
            let err = validate_new_item(&input).unwrap_err();
            assert_eq!(err.field(), Some(field), "expected {field} to be reported");
        }
    }

    #[test]
    fn test_rejects_unknown_type() {
        let mut input = wallet();
        input.item_type = "Stolen".to_string();
        assert_eq!(validate_new_item(&input).unwrap_err().field(), Some("type"));
    }

    #[test]
    fn test_category_must_be_known() {
        let mut input = wallet();
        input.category = "id card".to_string();
        assert_eq!(validate_new_item(&input).unwrap().category, "ID Card");

        input.category = "Umbrellas".to_string();
        let err = validate_new_item(&input).unwrap_err();
        assert_eq!(err.field(), Some("category"));
        assert!(err.to_string().contains("Electronics"));
    }

    #[test]
    fn test_rejects_bad_email() {
        let mut input = wallet();
        input.posted_by_email = "not-an-email".to_string();
        assert_eq!(
            validate_new_item(&input).unwrap_err().field(),
            Some("postedByEmail")
        );
    }

    #[test]
    fn test_rejects_malformed_and_future_dates() {
        let mut input = wallet();
        input.date_seen = "15/01/2024".to_string();
        assert_eq!(validate_new_item(&input).unwrap_err().field(), Some("dateSeen"));

        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        input.date_seen = tomorrow.format("%Y-%m-%d").to_string();
        assert_eq!(validate_new_item(&input).unwrap_err().field(), Some("dateSeen"));
    }

    #[test]
    fn test_image_limit() {
        let mut input = wallet();
        input.images = (0..5).map(|i| format!("img-{i}.jpg")).collect();
        assert_eq!(validate_new_item(&input).unwrap().images.len(), 5);

        input.images.push("img-5.jpg".to_string());
        assert_eq!(validate_new_item(&input).unwrap_err().field(), Some("images"));
    }

    #[test]
    fn test_blank_image_refs_are_dropped() {
        let mut input = wallet();
        input.images = vec!["a.jpg".to_string(), "  ".to_string()];
        assert_eq!(validate_new_item(&input).unwrap().images, vec!["a.jpg"]);
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("sarah.j@campus.edu"));
        assert!(!is_valid_email("sarah@campus"));
        assert!(!is_valid_email("sarah j@campus.edu"));
    }
}
