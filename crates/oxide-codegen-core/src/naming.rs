//! Identifier case conversion.

/// Converts `snake_case` to `UpperCamelCase`.
///
/// Underscores are removed and the character after each one is upper-cased,
/// as is the first character. Everything else is kept, so the conversion is
/// idempotent: `"order_item"` and `"OrderItem"` both yield `"OrderItem"`.
#[must_use]
pub fn snake_to_pascal(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut capitalize_next = true;
    for ch in name.chars() {
        if ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

/// Converts `snake_case` to `lowerCamelCase`.
///
/// Like [`snake_to_pascal`] but the first character is lower-cased.
#[must_use]
pub fn snake_to_camel(name: &str) -> String {
    let pascal = snake_to_pascal(name);
    let mut chars = pascal.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_pascal() {
        assert_eq!(snake_to_pascal("order_item"), "OrderItem");
        assert_eq!(snake_to_pascal("users"), "Users");
        assert_eq!(snake_to_pascal("created_at_utc"), "CreatedAtUtc");
        assert_eq!(snake_to_pascal("_leading"), "Leading");
        assert_eq!(snake_to_pascal("double__under"), "DoubleUnder");
        assert_eq!(snake_to_pascal(""), "");
    }

    #[test]
    fn test_snake_to_pascal_idempotent() {
        for name in ["order_item", "users", "a_b_c", "HTTPStatus", "already_Mixed_case"] {
            let once = snake_to_pascal(name);
            assert_eq!(snake_to_pascal(&once), once, "not idempotent for {name}");
        }
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("order_id"), "orderId");
        assert_eq!(snake_to_camel("id"), "id");
        assert_eq!(snake_to_camel("Email"), "email");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_snake_to_camel_idempotent() {
        for name in ["order_id", "start_item_id", "x"] {
            let once = snake_to_camel(name);
            assert_eq!(snake_to_camel(&once), once);
        }
    }
}
