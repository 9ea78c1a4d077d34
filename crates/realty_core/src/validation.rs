//! Request validation.
//!
//! Each validator collects every violated rule before failing, so callers
//! see all problems at once.

use crate::dto::{present, AddImage, ChangePrice, CreateOwner, CreateProperty, UpdateImage, UpdateProperty};
use crate::error::{CoreError, CoreResult};
use rust_decimal::Decimal;

/// Accepted image file extensions, lower case.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "bmp"];

const MIN_YEAR: i32 = 1800;
const MAX_YEAR: i32 = 2030;

/// Highest position an image may be given explicitly.
pub const MAX_DISPLAY_ORDER: u32 = 10_000;

#[derive(Debug, Default)]
struct Rules {
    errors: Vec<String>,
}

impl Rules {
    fn check(&mut self, ok: bool, message: &str) {
        if !ok {
            self.errors.push(message.to_string());
        }
    }

    fn required(&mut self, value: &str, max: usize, missing: &str, too_long: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.errors.push(missing.to_string());
        } else {
            self.max_len(Some(value), max, too_long);
        }
    }

    fn max_len(&mut self, value: Option<&str>, max: usize, message: &str) {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.errors.push(message.to_string());
        }
    }

    fn at_most(&mut self, value: Option<u32>, max: u32, message: &str) {
        self.check(value.map_or(true, |v| v <= max), message);
    }

    fn positive(&mut self, value: Option<Decimal>, message: &str) {
        self.check(value.map_or(true, |v| v > Decimal::ZERO), message);
    }

    fn non_negative(&mut self, value: Option<Decimal>, message: &str) {
        self.check(value.map_or(true, |v| v >= Decimal::ZERO), message);
    }

    fn between(&mut self, value: Option<Decimal>, min: i64, max: i64, message: &str) {
        let (min, max) = (Decimal::from(min), Decimal::from(max));
        self.check(value.map_or(true, |v| v >= min && v <= max), message);
    }

    fn finish(self) -> CoreResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::validation(self.errors))
        }
    }
}

/// Whether `zip` looks like `12345` or `12345-6789`.
#[must_use]
pub fn is_valid_zip(zip: &str) -> bool {
    let bytes = zip.as_bytes();
    let digits = |range: &[u8]| range.iter().all(u8::is_ascii_digit);
    match bytes.len() {
        5 => digits(bytes),
        10 => digits(&bytes[..5]) && bytes[5] == b'-' && digits(&bytes[6..]),
        _ => false,
    }
}

/// Lower-case extension of a path or URL, if it has one.
#[must_use]
pub fn file_extension(file: &str) -> Option<String> {
    let name = file.rsplit(['/', '\\']).next().unwrap_or(file);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn is_image_file(file: &str) -> bool {
    file_extension(file).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn optional_text_rules(rules: &mut Rules, description: Option<&str>, zip: Option<&str>) {
    rules.max_len(description, 1000, "Description cannot exceed 1000 characters");
    rules.check(zip.map_or(true, is_valid_zip), "Invalid ZIP code format");
}

pub(crate) fn create_property(req: &CreateProperty) -> CoreResult<()> {
    let mut rules = Rules::default();
    rules.required(&req.name, 150, "Property name is required", "Name cannot exceed 150 characters");
    rules.required(&req.address, 300, "Address is required", "Address cannot exceed 300 characters");
    rules.check(req.price > Decimal::ZERO, "Price must be greater than 0");
    rules.required(
        &req.code_internal,
        20,
        "Internal code is required",
        "Internal code cannot exceed 20 characters",
    );
    rules.check(
        (MIN_YEAR..=MAX_YEAR).contains(&req.year),
        "Year must be between 1800 and 2030",
    );
    rules.check(!req.owner_id.as_uuid().is_nil(), "Owner ID is required");
    optional_text_rules(&mut rules, present(&req.description), present(&req.zip_code));
    rules.at_most(req.bedrooms, 50, "Bedrooms cannot exceed 50");
    rules.at_most(req.bathrooms, 50, "Bathrooms cannot exceed 50");
    rules.at_most(req.half_bathrooms, 20, "Half bathrooms cannot exceed 20");
    rules.at_most(req.parking_spaces, 20, "Parking spaces cannot exceed 20");
    rules.positive(req.square_feet, "Square feet must be greater than 0");
    rules.positive(req.lot_size, "Lot size must be greater than 0");
    rules.between(req.latitude, -90, 90, "Latitude must be between -90 and 90");
    rules.between(req.longitude, -180, 180, "Longitude must be between -180 and 180");
    rules.non_negative(req.monthly_rent, "Monthly rent cannot be negative");
    rules.non_negative(req.property_tax, "Property tax cannot be negative");
    rules.non_negative(req.hoa_fees, "HOA fees cannot be negative");
    rules.finish()
}

pub(crate) fn update_property(req: &UpdateProperty) -> CoreResult<()> {
    let mut rules = Rules::default();
    rules.max_len(present(&req.name), 150, "Name cannot exceed 150 characters");
    rules.max_len(present(&req.address), 300, "Address cannot exceed 300 characters");
    rules.positive(req.price, "Price must be greater than 0");
    rules.check(
        req.year.map_or(true, |y| (MIN_YEAR..=MAX_YEAR).contains(&y)),
        "Year must be between 1800 and 2030",
    );
    optional_text_rules(&mut rules, present(&req.description), present(&req.zip_code));
    rules.at_most(req.bedrooms, 50, "Bedrooms cannot exceed 50");
    rules.at_most(req.bathrooms, 50, "Bathrooms cannot exceed 50");
    rules.at_most(req.half_bathrooms, 20, "Half bathrooms cannot exceed 20");
    rules.at_most(req.parking_spaces, 20, "Parking spaces cannot exceed 20");
    rules.positive(req.square_feet, "Square feet must be greater than 0");
    rules.positive(req.lot_size, "Lot size must be greater than 0");
    rules.between(req.latitude, -90, 90, "Latitude must be between -90 and 90");
    rules.between(req.longitude, -180, 180, "Longitude must be between -180 and 180");
    rules.non_negative(req.monthly_rent, "Monthly rent cannot be negative");
    rules.non_negative(req.property_tax, "Property tax cannot be negative");
    rules.non_negative(req.hoa_fees, "HOA fees cannot be negative");
    rules.finish()
}

pub(crate) fn change_price(req: &ChangePrice) -> CoreResult<()> {
    let mut rules = Rules::default();
    rules.check(req.new_price > Decimal::ZERO, "New price must be greater than 0");
    rules.max_len(present(&req.reason), 500, "Reason cannot exceed 500 characters");
    rules.finish()
}

pub(crate) fn add_image(req: &AddImage) -> CoreResult<()> {
    let mut rules = Rules::default();
    rules.check(!req.property_id.as_uuid().is_nil(), "Property ID is required");
    let file = req.file.trim();
    if file.is_empty() {
        rules.check(false, "File path is required");
    } else {
        rules.max_len(Some(file), 500, "File path cannot exceed 500 characters");
        rules.check(
            is_image_file(file),
            "File must be a valid image format (jpg, jpeg, png, gif, webp, bmp)",
        );
    }
    rules.max_len(present(&req.title), 200, "Title cannot exceed 200 characters");
    rules.max_len(present(&req.description), 500, "Description cannot exceed 500 characters");
    rules.at_most(req.display_order, MAX_DISPLAY_ORDER, "Display order cannot exceed 10000");
    rules.finish()
}

pub(crate) fn update_image(req: &UpdateImage) -> CoreResult<()> {
    let mut rules = Rules::default();
    if let Some(file) = present(&req.file) {
        rules.max_len(Some(file), 500, "File path cannot exceed 500 characters");
        rules.check(
            is_image_file(file),
            "File must be a valid image format (jpg, jpeg, png, gif, webp, bmp)",
        );
    }
    rules.max_len(present(&req.title), 200, "Title cannot exceed 200 characters");
    rules.max_len(present(&req.description), 500, "Description cannot exceed 500 characters");
    rules.at_most(req.display_order, MAX_DISPLAY_ORDER, "Display order cannot exceed 10000");
    rules.finish()
}

pub(crate) fn create_owner(req: &CreateOwner) -> CoreResult<()> {
    let mut rules = Rules::default();
    rules.required(&req.name, 100, "Owner name is required", "Name cannot exceed 100 characters");
    rules.required(&req.address, 200, "Address is required", "Address cannot exceed 200 characters");
    rules.max_len(present(&req.phone), 20, "Phone cannot exceed 20 characters");
    if let Some(email) = present(&req.email) {
        rules.max_len(Some(email), 100, "Email cannot exceed 100 characters");
        rules.check(looks_like_email(email), "Invalid email format");
    }
    rules.check(
        present(&req.document_type).is_some() == present(&req.document_number).is_some(),
        "Document type and number must be given together",
    );
    rules.max_len(present(&req.document_number), 50, "Document number cannot exceed 50 characters");
    rules.max_len(present(&req.zip_code), 10, "ZIP code cannot exceed 10 characters");
    rules.finish()
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;
    use rust_decimal_macros::dec;

    fn valid_property() -> CreateProperty {
        CreateProperty {
            name: "Beach House".into(),
            address: "1 Ocean Dr".into(),
            price: dec!(450000),
            code_internal: "BH-1".into(),
            year: 1999,
            owner_id: EntityId::new(),
            ..CreateProperty::default()
        }
    }

    fn errors(result: CoreResult<()>) -> Vec<String> {
        match result {
            Err(CoreError::Validation { errors, .. }) => errors,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_minimal_property() {
        assert!(create_property(&valid_property()).is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let req = CreateProperty {
            name: " ".into(),
            price: Decimal::ZERO,
            year: 1700,
            zip_code: Some("ABCDE".into()),
            latitude: Some(dec!(91)),
            ..valid_property()
        };
        let errs = errors(create_property(&req));
        assert!(errs.contains(&"Property name is required".to_string()));
        assert!(errs.contains(&"Price must be greater than 0".to_string()));
        assert!(errs.contains(&"Year must be between 1800 and 2030".to_string()));
        assert!(errs.contains(&"Invalid ZIP code format".to_string()));
        assert!(errs.contains(&"Latitude must be between -90 and 90".to_string()));
        assert_eq!(errs.len(), 5);
    }

    #[test]
    fn year_bounds_are_inclusive() {
        assert!(create_property(&CreateProperty { year: 1800, ..valid_property() }).is_ok());
        assert!(create_property(&CreateProperty { year: 2030, ..valid_property() }).is_ok());
        assert!(create_property(&CreateProperty { year: 2031, ..valid_property() }).is_err());
    }

    #[test]
    fn zip_formats() {
        assert!(is_valid_zip("33101"));
        assert!(is_valid_zip("33101-1234"));
        assert!(!is_valid_zip("3310"));
        assert!(!is_valid_zip("33101-12"));
        assert!(!is_valid_zip("33101_1234"));
    }

    #[test]
    fn blank_update_fields_are_ignored() {
        let req = UpdateProperty {
            name: Some("   ".into()),
            zip_code: Some(String::new()),
            ..UpdateProperty::default()
        };
        assert!(update_property(&req).is_ok());
    }

    #[test]
    fn price_change_needs_positive_price() {
        assert!(change_price(&ChangePrice::to(dec!(1))).is_ok());
        assert!(change_price(&ChangePrice::to(dec!(0))).is_err());
        let long = ChangePrice::to(dec!(5)).because("x".repeat(501));
        assert_eq!(errors(change_price(&long)), vec!["Reason cannot exceed 500 characters"]);
    }

    #[test]
    fn image_extension_rules() {
        let id = EntityId::new();
        assert!(add_image(&AddImage::new(id, "photos/front.JPG")).is_ok());
        assert!(add_image(&AddImage::new(id, "https://cdn.example/a/b.webp")).is_ok());
        assert!(add_image(&AddImage::new(id, "doc.pdf")).is_err());
        assert!(add_image(&AddImage::new(id, "noext")).is_err());
        assert_eq!(
            errors(add_image(&AddImage::new(id, "  "))),
            vec!["File path is required"]
        );
    }

    #[test]
    fn extension_helper() {
        assert_eq!(file_extension("a/b/c.PNG").as_deref(), Some("png"));
        assert_eq!(file_extension("dir.v2/file").as_deref(), None);
        assert_eq!(file_extension(".hidden"), None);
    }

    #[test]
    fn owner_rules() {
        assert!(create_owner(&CreateOwner::new("Ada", "1 Way").email("ada@example.com")).is_ok());
        assert!(create_owner(&CreateOwner::new("Ada", "1 Way").email("ada@")).is_err());
        let half_document = CreateOwner {
            document_type: Some("Passport".into()),
            ..CreateOwner::new("Ada", "1 Way")
        };
        assert!(create_owner(&half_document).is_err());
    }
}
