//! Resource-name normalization.

/// Collection name a definition's records are stored under: pluralized, lower-cased.
///
/// `User` → `users`, `Category` → `categories`, `Address` → `addresses`.
pub fn resource_name(name: &str) -> String {
    pluralize(name).to_lowercase()
}

/// Best-effort English plural. Words that already end in a single `s` are
/// taken to be plural and returned unchanged.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.is_empty() {
        return String::new();
    }

    if lower.ends_with("ss")
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        return format!("{}es", word);
    }
    if lower.ends_with('s') {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix(&['y', 'Y'][..]) {
        let before = stem.chars().last().map(|c| c.to_ascii_lowercase());
        if !matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u') | None) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

/// Underscores at every lower→upper boundary, then lower-case: `UserProfile` → `user_profile`.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = c.is_lowercase();
        out.extend(c.to_lowercase());
    }
    out
}

pub fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn upper_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resource addressed by an API path: its first literal segment, normalized.
///
/// `/users/{id}` → `users`; a path that starts with a template segment has none.
pub fn path_resource(path: &str) -> Option<String> {
    let segment = path.split('/').find(|s| !s.is_empty())?;
    if segment.starts_with('{') {
        return None;
    }
    Some(resource_name(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_name() {
        assert_eq!(resource_name("User"), "users");
        assert_eq!(resource_name("Category"), "categories");
        assert_eq!(resource_name("Day"), "days");
        assert_eq!(resource_name("Address"), "addresses");
        assert_eq!(resource_name("Box"), "boxes");
        assert_eq!(resource_name("Branch"), "branches");
        assert_eq!(resource_name("users"), "users");
        assert_eq!(resource_name("BlogPost"), "blogposts");
        assert_eq!(resource_name(""), "");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("User"), "user");
        assert_eq!(snake_case("UserProfile"), "user_profile");
        assert_eq!(snake_case("userProfileItem"), "user_profile_item");
        assert_eq!(snake_case("HTTPServer"), "httpserver");
    }

    #[test]
    fn test_first_letter_case() {
        assert_eq!(lower_first("User"), "user");
        assert_eq!(upper_first("author"), "Author");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_path_resource() {
        assert_eq!(path_resource("/users/{id}").as_deref(), Some("users"));
        assert_eq!(path_resource("/pet").as_deref(), Some("pets"));
        assert_eq!(path_resource("//orders/"), Some("orders".to_string()));
        assert_eq!(path_resource("/{tenant}/users"), None);
        assert_eq!(path_resource("/"), None);
    }
}
