//! Input validation helpers for the Stockroom platform

/// Characters rejected in free-form text fields (locations, descriptions)
const FORBIDDEN_CHARS: &[char] = &[
    '\\', '@', '_', '!', '#', '$', '%', '^', '&', '*', '(', ')', '<', '>', '/', '|', '}', '{',
    '~', ':',
];

/// Validate a user-supplied quantity is a positive integer
pub fn validate_positive_quantity(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity should be greater than 0");
    }
    Ok(())
}

/// Validate free-form descriptive text: at least 3 characters, none of the
/// rejected characters
pub fn validate_free_text(input: &str) -> Result<(), &'static str> {
    if input.len() <= 2 {
        return Err("Input must be at least 3 characters");
    }
    if input.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        return Err("Input contains unsupported characters");
    }
    Ok(())
}

/// Validate an inventory location string
pub fn validate_location(location: &str) -> Result<(), &'static str> {
    validate_free_text(location)
}

/// Validate a US ZIP code (5 digits)
pub fn validate_zip_code(zip: &str) -> Result<(), &'static str> {
    if zip.len() != 5 || !zip.chars().all(|c| c.is_ascii_digit()) {
        return Err("ZIP code must be 5 digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_quantity() {
        assert!(validate_positive_quantity(1).is_ok());
        assert!(validate_positive_quantity(250).is_ok());
        assert!(validate_positive_quantity(0).is_err());
        assert!(validate_positive_quantity(-3).is_err());
    }

    #[test]
    fn test_free_text_rules() {
        assert!(validate_free_text("Blue vase").is_ok());
        assert!(validate_free_text("Shelf A1").is_ok());
        assert!(validate_free_text("ab").is_err());
        assert!(validate_free_text("bin#4").is_err());
        assert!(validate_free_text("price: high").is_err());
    }

    #[test]
    fn test_zip_code() {
        assert!(validate_zip_code("78723").is_ok());
        assert!(validate_zip_code("7872").is_err());
        assert!(validate_zip_code("78723-1234").is_err());
        assert!(validate_zip_code("ABCDE").is_err());
    }
}
