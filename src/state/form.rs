/// New-order form input
///
/// `OrderForm` holds exactly what the user typed. `OrderForm::validate`
/// turns it into a `NewOrder` whose values are safe to use for folder
/// names and page geometry.

use crate::config::{MAX_COMMENTS_LENGTH, MAX_ORDER_ID_LENGTH};
use crate::error::ValidationError;

/// Raw text fields of the "Create New Order" form
#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub order_id: String,
    pub width: String,
    pub height: String,
    pub safe_zone: String,
    pub comments: String,
}

impl Default for OrderForm {
    /// Empty id, 100 × 100 mm with a 3 mm safe zone
    fn default() -> Self {
        Self {
            order_id: String::new(),
            width: "100".to_string(),
            height: "100".to_string(),
            safe_zone: "3".to_string(),
            comments: String::new(),
        }
    }
}

impl OrderForm {
    /// Reset all fields to their defaults
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Parse and check every field
    pub fn validate(&self) -> Result<NewOrder, ValidationError> {
        let width = parse_mm("Width", &self.width)?;
        let height = parse_mm("Height", &self.height)?;
        let safe_zone = parse_mm("Safe zone", &self.safe_zone)?;

        NewOrder::new(&self.order_id, width, height, safe_zone, &self.comments)
    }
}

fn parse_mm(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim().replace(',', ".");
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field,
            value: value.to_string(),
        })
}

/// A validated order request.
///
/// Fields are private so `NewOrder::new` (or `OrderForm::validate`) is the
/// only way to get one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    order_id: String,
    width: f64,
    height: f64,
    safe_zone: f64,
    comments: String,
}

impl NewOrder {
    /// Validate an order request. The id is trimmed first.
    pub fn new(
        order_id: &str,
        width: f64,
        height: f64,
        safe_zone: f64,
        comments: &str,
    ) -> Result<Self, ValidationError> {
        let order_id = validate_order_id(order_id)?;

        if comments.chars().count() > MAX_COMMENTS_LENGTH {
            return Err(ValidationError::CommentsTooLong {
                max: MAX_COMMENTS_LENGTH,
            });
        }

        validate_dimensions(width, height, safe_zone)?;

        Ok(Self {
            order_id,
            width,
            height,
            safe_zone,
            comments: comments.to_string(),
        })
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Width in millimetres
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Height in millimetres
    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn safe_zone(&self) -> f64 {
        self.safe_zone
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }
}

/// Trim `raw` and check it can be used as a single folder name
pub fn validate_order_id(raw: &str) -> Result<String, ValidationError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if id.chars().count() > MAX_ORDER_ID_LENGTH {
        return Err(ValidationError::IdTooLong {
            max: MAX_ORDER_ID_LENGTH,
        });
    }

    const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
    let bad_char = id.chars().any(|c| c.is_control() || RESERVED.contains(&c));
    let dot_name = id == "." || id == "..";
    // Windows silently drops these, which would break the folder lookup
    let bad_end = id.ends_with('.') || id.ends_with(' ');
    // The archive directory shares the base path with order folders
    let reserved_name = id.eq_ignore_ascii_case(crate::config::ARCHIVE_DIR);

    if bad_char || dot_name || bad_end || reserved_name {
        return Err(ValidationError::IdNotFolderSafe(id.to_string()));
    }

    Ok(id.to_string())
}

/// Width and height positive, safe zone positive and `2 × safe_zone < min(width, height)`
pub fn validate_dimensions(width: f64, height: f64, safe_zone: f64) -> Result<(), ValidationError> {
    if !(width.is_finite() && height.is_finite() && safe_zone.is_finite()) {
        return Err(ValidationError::NonPositiveDimensions);
    }
    if width <= 0.0 || height <= 0.0 {
        return Err(ValidationError::NonPositiveDimensions);
    }
    if safe_zone <= 0.0 {
        return Err(ValidationError::NonPositiveSafeZone);
    }
    if safe_zone * 2.0 >= width.min(height) {
        return Err(ValidationError::SafeZoneTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_is_valid_apart_from_id() {
        let form = OrderForm::default();
        assert_eq!(form.validate(), Err(ValidationError::EmptyId));

        let form = OrderForm {
            order_id: "  JOB-1  ".to_string(),
            ..OrderForm::default()
        };
        let order = form.validate().unwrap();
        assert_eq!(order.order_id, "JOB-1");
        assert_eq!((order.width, order.height, order.safe_zone), (100.0, 100.0, 3.0));
    }

    #[test]
    fn test_reset() {
        let mut form = OrderForm {
            order_id: "X".to_string(),
            comments: "hello".to_string(),
            ..OrderForm::default()
        };
        form.reset();
        assert_eq!(form, OrderForm::default());
    }

    #[test]
    fn test_decimal_comma() {
        let form = OrderForm {
            order_id: "A".to_string(),
            safe_zone: "2,5".to_string(),
            ..OrderForm::default()
        };
        assert_eq!(form.validate().unwrap().safe_zone, 2.5);
    }

    #[test]
    fn test_not_a_number() {
        let form = OrderForm {
            order_id: "A".to_string(),
            width: "wide".to_string(),
            ..OrderForm::default()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::NotANumber { field: "Width", .. })
        ));

        let form = OrderForm {
            order_id: "A".to_string(),
            height: "inf".to_string(),
            ..OrderForm::default()
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_dimension_rules() {
        assert_eq!(validate_dimensions(200.0, 150.0, 5.0), Ok(()));
        assert_eq!(validate_dimensions(10.0, 10.0, 4.99), Ok(()));
        assert_eq!(
            validate_dimensions(10.0, 10.0, 5.0),
            Err(ValidationError::SafeZoneTooLarge)
        );
        assert_eq!(
            validate_dimensions(300.0, 20.0, 10.0),
            Err(ValidationError::SafeZoneTooLarge)
        );
        assert_eq!(
            validate_dimensions(0.0, 10.0, 1.0),
            Err(ValidationError::NonPositiveDimensions)
        );
        assert_eq!(
            validate_dimensions(10.0, -1.0, 1.0),
            Err(ValidationError::NonPositiveDimensions)
        );
        assert_eq!(
            validate_dimensions(10.0, 10.0, 0.0),
            Err(ValidationError::NonPositiveSafeZone)
        );
        assert_eq!(
            validate_dimensions(f64::NAN, 10.0, 1.0),
            Err(ValidationError::NonPositiveDimensions)
        );
    }

    #[test]
    fn test_order_id_rules() {
        assert_eq!(validate_order_id("JOB-42"), Ok("JOB-42".to_string()));
        assert_eq!(validate_order_id("Zakázka 12"), Ok("Zakázka 12".to_string()));
        assert_eq!(validate_order_id("   "), Err(ValidationError::EmptyId));
        assert_eq!(
            validate_order_id(&"x".repeat(51)),
            Err(ValidationError::IdTooLong { max: 50 })
        );
        assert!(validate_order_id(&"x".repeat(50)).is_ok());

        for bad in ["a/b", "a\\b", "..", ".", "what?", "tab\there", "trailing.", "_DONE", "_done"] {
            assert!(
                matches!(validate_order_id(bad), Err(ValidationError::IdNotFolderSafe(_))),
                "{bad:?} accepted"
            );
        }
    }

    #[test]
    fn test_comment_limit() {
        let long = "c".repeat(901);
        assert_eq!(
            NewOrder::new("A", 100.0, 100.0, 3.0, &long),
            Err(ValidationError::CommentsTooLong { max: 900 })
        );
        assert!(NewOrder::new("A", 100.0, 100.0, 3.0, &"c".repeat(900)).is_ok());
    }

    #[test]
    fn test_new_order_checks_geometry() {
        assert_eq!(
            NewOrder::new("BAD", 10.0, 10.0, 50.0, ""),
            Err(ValidationError::SafeZoneTooLarge)
        );
        assert_eq!(
            NewOrder::new("BAD", -5.0, 10.0, 1.0, ""),
            Err(ValidationError::NonPositiveDimensions)
        );
    }
}
