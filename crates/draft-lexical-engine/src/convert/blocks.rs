use std::sync::OnceLock;

use regex::Regex;

use crate::models::lexical::ElementKind;

/// Base node kind for a non-list, non-atomic block.
pub fn element_kind(block_type: &str) -> ElementKind {
    if block_type == "blockquote" {
        ElementKind::Quote
    } else if block_type.starts_with("header") {
        ElementKind::Heading
    } else {
        ElementKind::Paragraph
    }
}

/// Alignment marker embedded in the block type string.
pub fn alignment(block_type: &str) -> Option<&'static str> {
    if block_type.contains("align-left") {
        Some("left")
    } else if block_type.contains("align-right") {
        Some("right")
    } else if block_type.contains("align-center") {
        Some("center")
    } else if block_type.contains("align-justify") {
        Some("justify")
    } else {
        None
    }
}

/// Text direction marker embedded in the block type string.
pub fn direction(block_type: &str) -> Option<&'static str> {
    if block_type.contains("direction-rtl") {
        Some("rtl")
    } else if block_type.contains("direction-ltr") {
        Some("ltr")
    } else {
        None
    }
}

/// `intent-left-N` marker (sic, spelled that way by the source editor).
pub fn indent(block_type: &str) -> Option<u32> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"intent-left-(\d+)").expect("invalid indent regex"));
    re.captures(block_type)?.get(1)?.as_str().parse().ok()
}

/// `line-height__1-5` markers carry the decimal point as a dash.
pub fn line_height(block_type: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE
        .get_or_init(|| Regex::new(r"line-height__([\d-]+)").expect("invalid line-height regex"));
    let raw = re.captures(block_type)?.get(1)?.as_str();
    Some(raw.replacen('-', ".", 1))
}

/// Strips the list-style prefix from a list item's `className`
/// (`ordered-list-lower-alpha` -> `lower-alpha`).
pub fn strip_list_class(class_name: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"ordered-list-|unordered-list-").expect("invalid list class regex")
    });
    re.replace(class_name, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("unstyled", ElementKind::Paragraph)]
    #[case("blockquote", ElementKind::Quote)]
    #[case("header-one", ElementKind::Heading)]
    #[case("header-three align-center", ElementKind::Heading)]
    #[case("unstyled align-right", ElementKind::Paragraph)]
    fn base_kinds(#[case] block_type: &str, #[case] expected: ElementKind) {
        assert_eq!(element_kind(block_type), expected);
    }

    #[rstest]
    #[case("unstyled align-left", Some("left"))]
    #[case("unstyled align-right", Some("right"))]
    #[case("header-one align-center", Some("center"))]
    #[case("unstyled align-justify", Some("justify"))]
    #[case("unstyled", None)]
    fn alignment_markers(#[case] block_type: &str, #[case] expected: Option<&str>) {
        assert_eq!(alignment(block_type), expected);
    }

    #[rstest]
    #[case("unstyled direction-rtl", Some("rtl"))]
    #[case("unstyled direction-ltr", Some("ltr"))]
    #[case("unstyled", None)]
    fn direction_markers(#[case] block_type: &str, #[case] expected: Option<&str>) {
        assert_eq!(direction(block_type), expected);
    }

    #[test]
    fn indent_marker_parses_its_level() {
        assert_eq!(indent("unstyled intent-left-3"), Some(3));
        assert_eq!(indent("unstyled"), None);
    }

    #[test]
    fn line_height_marker_restores_the_decimal_point() {
        assert_eq!(
            line_height("unstyled line-height__1-5"),
            Some("1.5".to_string())
        );
        assert_eq!(line_height("unstyled line-height__2"), Some("2".to_string()));
        assert_eq!(line_height("unstyled"), None);
    }

    #[test]
    fn list_class_prefixes_strip() {
        assert_eq!(strip_list_class("ordered-list-lower-alpha"), "lower-alpha");
        assert_eq!(strip_list_class("unordered-list-square"), "square");
        assert_eq!(strip_list_class("plain"), "plain");
    }
}
