use super::*;

#[test]
fn test_language_mode_accessors() {
    assert!(!LanguageMode::ES3.supports_es5_accessors());
    assert!(LanguageMode::ES5.supports_es5_accessors());
    assert!(LanguageMode::ES2015.supports_es5_accessors());
}

#[test]
fn test_language_mode_downlevel() {
    assert!(LanguageMode::ES3.needs_downlevel());
    assert!(LanguageMode::ES5.needs_downlevel());
    assert!(!LanguageMode::ES2015.needs_downlevel());
}

#[test]
fn test_language_mode_default() {
    assert_eq!(LanguageMode::default(), LanguageMode::ES5);
}
