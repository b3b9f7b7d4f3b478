//! Naming utilities for code generation

/// Marker placed in front of identifiers that would otherwise start with a digit
pub const DIGIT_START_PREFIX: &str = "DigitStart_";

/// Convert a schema identifier to an exported Go / Elm type name
///
/// Underscores are dropped, a leading digit gets [`DIGIT_START_PREFIX`], and the
/// first character is upper-cased: `user_name` -> `Username`, `9lives` -> `DigitStart_9lives`.
pub fn exposed_member(name: &str) -> String {
    let stripped = name.replace('_', "");

    let prefixed = if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", DIGIT_START_PREFIX, stripped)
    } else {
        stripped
    };

    upper_first(&prefixed)
}

/// Convert a schema identifier to a field / JSON name
///
/// `ID` becomes `Id` everywhere before the first character is lower-cased,
/// so `UserID` -> `userId` and `OrderIDNumber` -> `orderIdNumber`.
pub fn camel_case(name: &str) -> String {
    lower_first(&name.replace("ID", "Id"))
}

/// Normalize a bracket-quoted identifier such as `[Unit Price]`
///
/// Drops the opening bracket and the trailing two characters, then removes spaces.
/// Names without a leading bracket are returned unchanged.
pub fn sanitize(name: &str) -> String {
    if !name.starts_with('[') {
        return name.to_string();
    }

    let mut chars: Vec<char> = name.chars().skip(1).collect();
    chars.truncate(chars.len().saturating_sub(2));
    chars.into_iter().filter(|c| *c != ' ').collect()
}

/// File stem for a table's Go entity, e.g. `Orders` -> `orders`
pub fn to_entity_file_name(member: &str) -> String {
    member.to_lowercase()
}

/// Endpoint path segment for a table, e.g. `OrderLines` -> `orderlines`
pub fn to_endpoint_name(member: &str) -> String {
    member.to_lowercase()
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exposed_member() {
        assert_eq!(exposed_member("user_name"), "Username");
        assert_eq!(exposed_member("orders"), "Orders");
        assert_eq!(exposed_member("OrderDetail"), "OrderDetail");
        assert_eq!(exposed_member("_private_"), "Private");
    }

    #[test]
    fn test_exposed_member_digit_start() {
        assert_eq!(exposed_member("9lives"), "DigitStart_9lives");
        assert_eq!(exposed_member("_2fa_codes"), "DigitStart_2facodes");
        assert!(exposed_member("9lives").starts_with(DIGIT_START_PREFIX));
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("UserID"), "userId");
        assert_eq!(camel_case("OrderIDNumber"), "orderIdNumber");
        assert_eq!(camel_case("ID"), "id");
        assert_eq!(camel_case("CustomerName"), "customerName");
        assert_eq!(camel_case("total"), "total");
    }

    #[test]
    fn test_camel_case_is_case_sensitive() {
        // Only the exact upper-case "ID" is normalized
        assert_eq!(camel_case("Identity"), "identity");
        assert_eq!(camel_case("PaidDate"), "paidDate");
        assert_eq!(camel_case("GUIDValue"), "gUIdValue");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("[Unit Price] "), "UnitPrice");
        assert_eq!(sanitize("[Order Details]]"), "OrderDetails");
        assert_eq!(sanitize("Plain Name"), "Plain Name");
        assert_eq!(sanitize("["), "");
    }

    #[test]
    fn test_degenerate_input() {
        assert_eq!(exposed_member(""), "");
        assert_eq!(exposed_member("___"), "");
        assert_eq!(camel_case(""), "");
    }

    #[test]
    fn test_file_and_endpoint_names() {
        assert_eq!(to_entity_file_name("OrderLines"), "orderlines");
        assert_eq!(to_endpoint_name("Customers"), "customers");
    }
}
