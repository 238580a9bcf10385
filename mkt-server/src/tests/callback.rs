use crate::api::callback::callback::sanitize_next;

#[test]
fn test_local_path_is_honored() {
    assert_eq!(sanitize_next(Some("/dashboard"), "/"), "/dashboard");
}

#[test]
fn test_missing_next_falls_back_to_default() {
    assert_eq!(sanitize_next(None, "/"), "/");
}

#[test]
fn test_absolute_url_falls_back_to_default() {
    assert_eq!(sanitize_next(Some("https://evil.example.com"), "/"), "/");
}

#[test]
fn test_protocol_relative_url_falls_back_to_default() {
    assert_eq!(sanitize_next(Some("//evil.example.com"), "/"), "/");
}
