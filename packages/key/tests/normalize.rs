//! Tests for PEM normalization of vault secret text

use budgetkey_key::pem::{PEM_FOOTER, PEM_HEADER, PEM_LINE_WIDTH};
use budgetkey_key::{normalize_pem, KeyError};
use proptest::prelude::*;

const RSA_PKCS8: &str = include_str!("fixtures/rsa_pkcs8.pem");

fn body_of(pem: &str) -> String {
    pem.lines()
        .filter(|line| !line.starts_with("-----"))
        .collect::<String>()
}

fn single_line(pem: &str) -> String {
    pem.lines().collect::<String>()
}

#[test]
fn test_well_formed_pem_is_unchanged() {
    let normalized = normalize_pem(RSA_PKCS8).unwrap();
    assert_eq!(normalized.as_slice(), RSA_PKCS8.as_bytes());
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    let padded = format!("  \n\t{RSA_PKCS8}\n\n  ");
    let normalized = normalize_pem(&padded).unwrap();
    assert_eq!(normalized.as_slice(), RSA_PKCS8.as_bytes());
}

#[test]
fn test_missing_trailing_newline_is_added() {
    let normalized = normalize_pem(RSA_PKCS8.trim_end()).unwrap();
    assert_eq!(normalized.as_slice(), RSA_PKCS8.as_bytes());
}

#[test]
fn test_escaped_newlines_are_expanded() {
    let escaped = RSA_PKCS8.trim_end().replace('\n', "\\n");
    assert!(!escaped.contains('\n'));

    let normalized = normalize_pem(&escaped).unwrap();
    let text = std::str::from_utf8(&normalized).unwrap();

    assert!(!text.contains("\\n"));
    assert_eq!(text, RSA_PKCS8);
}

#[test]
fn test_single_line_secret_is_rewrapped() {
    let collapsed = single_line(RSA_PKCS8);
    assert!(!collapsed.contains('\n'));

    let normalized = normalize_pem(&collapsed).unwrap();
    let text = std::str::from_utf8(&normalized).unwrap();

    assert_eq!(text, RSA_PKCS8);
}

#[test]
fn test_single_line_with_spaces_inside_payload() {
    let body = body_of(RSA_PKCS8);
    let spaced: String = body
        .as_bytes()
        .chunks(10)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(" ");
    let secret = format!("{PEM_HEADER} {spaced} {PEM_FOOTER}");

    let normalized = normalize_pem(&secret).unwrap();
    assert_eq!(std::str::from_utf8(&normalized).unwrap(), RSA_PKCS8);
}

#[test]
fn test_example_scenario_shape() {
    let secret = format!("{PEM_HEADER}{}{PEM_FOOTER}", body_of(RSA_PKCS8));

    let normalized = normalize_pem(&secret).unwrap();
    let text = std::str::from_utf8(&normalized).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines.len() >= 3);
    assert_eq!(lines[0], PEM_HEADER);
    assert_eq!(lines[lines.len() - 1], PEM_FOOTER);
    assert_eq!(lines[1].len(), PEM_LINE_WIDTH);
    assert!(text.ends_with('\n'));
}

#[test]
fn test_missing_markers_is_format_error() {
    let err = normalize_pem("MIIEvwIBADANBgkqhkiG9w0BAQEFAASCBKkwggSlAgEAAoIBAQ").unwrap_err();
    assert!(matches!(err, KeyError::Format(_)));
    assert!(err.is_format());
}

#[test]
fn test_missing_footer_is_format_error() {
    let err = normalize_pem(&format!("{PEM_HEADER}QUJDRA==")).unwrap_err();
    assert!(err.is_format());
}

#[test]
fn test_empty_secret_is_format_error() {
    assert!(normalize_pem("   ").unwrap_err().is_format());
}

#[test]
fn test_multi_line_text_is_not_validated() {
    // Framing is only rebuilt for single-line input; anything else is left
    // for the DER converter to reject.
    let normalized = normalize_pem("not\na key").unwrap();
    assert_eq!(normalized.as_slice(), b"not\na key\n");
}

prop_compose! {
    fn base64_payload()(body in "[A-Za-z0-9+/]{1,700}", pad in 0usize..3) -> String {
        format!("{body}{}", "=".repeat(pad))
    }
}

proptest! {
    #[test]
    fn prop_single_line_rewrap(payload in base64_payload()) {
        let secret = format!("{PEM_HEADER}{payload}{PEM_FOOTER}");
        let normalized = normalize_pem(&secret).unwrap();
        let text = std::str::from_utf8(&normalized).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let body = &lines[1..lines.len() - 1];
        prop_assert_eq!(body.len(), payload.len().div_ceil(PEM_LINE_WIDTH));
        prop_assert!(body.iter().all(|line| line.len() <= PEM_LINE_WIDTH));
        prop_assert_eq!(body.concat(), payload);
    }

    #[test]
    fn prop_normalization_is_idempotent(payload in base64_payload()) {
        let secret = format!("{PEM_HEADER}{payload}{PEM_FOOTER}");
        let once = normalize_pem(&secret).unwrap();
        let twice = normalize_pem(std::str::from_utf8(&once).unwrap()).unwrap();
        prop_assert_eq!(once.as_slice(), twice.as_slice());
    }

    #[test]
    fn prop_escaped_newlines_preserve_payload(payload in base64_payload()) {
        let wrapped: Vec<String> = payload
            .as_bytes()
            .chunks(PEM_LINE_WIDTH)
            .map(|chunk| String::from_utf8(chunk.to_vec()).unwrap())
            .collect();
        let secret = format!("{PEM_HEADER}\\n{}\\n{PEM_FOOTER}", wrapped.join("\\n"));

        let normalized = normalize_pem(&secret).unwrap();
        let text = std::str::from_utf8(&normalized).unwrap();

        prop_assert!(!text.contains("\\n"));
        prop_assert_eq!(body_of(text), payload);
    }

    #[test]
    fn prop_no_markers_single_line_fails(text in "[A-Za-z0-9+/= ]{0,200}") {
        let err = normalize_pem(&text).unwrap_err();
        prop_assert!(err.is_format());
    }
}
