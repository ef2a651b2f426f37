// Integration tests for the public masking API
//
// These exercise the engine, translations, named masks and key handling
// through the crate root the way a consumer would.

use maskrs_core::{
    clean_value, is_bypass_key, mask, masked_value, recompute_caret, KeyCode, MaskSpec, Matcher,
    NamedMask, NamedMaskError, PatternSlot, Translation, TranslationTable, BYPASS_KEYS,
};

#[test]
fn test_documented_examples() {
    let phone = MaskSpec::new("(00) 0000-00009");
    assert_eq!(masked_value("1198765432", &phone), "(11) 9876-5432");

    let document = MaskSpec::new("AAA.AAA.AAA-AAA");
    assert_eq!(masked_value("12345678901", &document), "123.456.789-01");

    let reverse = MaskSpec::new("#0").reversed(true);
    assert_eq!(masked_value("12345", &reverse), "12345");
}

#[test]
fn test_slots_classified_by_translation_table() {
    let spec = MaskSpec::new("(0S)");
    assert_eq!(
        spec.slots(),
        &[
            PatternSlot::Literal('('),
            PatternSlot::Placeholder('0'),
            PatternSlot::Placeholder('S'),
            PatternSlot::Literal(')'),
        ]
    );
    assert_eq!(spec.literals().collect::<String>(), "()");
}

#[test]
fn test_custom_placeholder_table() {
    let translations = TranslationTable::empty()
        .with_override('h', Translation::new(Matcher::pattern("[0-9a-f]").unwrap()))
        .with_override('0', Translation::new(Matcher::Digit));
    let spec = MaskSpec::with_translations("hh:hh 0", translations);

    assert_eq!(masked_value("ab12", &spec), "ab:12");
    // 'A' is not a placeholder in this table, so uppercase hex is rejected
    let result = mask("aB1", &spec, false);
    assert_eq!(result.masked, "a1");
    assert_eq!(result.invalid.len(), 1);
    assert_eq!(result.invalid[0].expected, "[0-9a-f]");
}

#[test]
fn test_recursive_custom_slot() {
    let translations = TranslationTable::default()
        .with_override('L', Translation::new(Matcher::Letter).recursive());
    let spec = MaskSpec::with_translations("0L", translations);
    assert!(spec.has_recursive_slot());
    assert_eq!(masked_value("1abcdef", &spec), "1abcdef");
}

#[test]
fn test_mask_never_panics_on_odd_input() {
    let spec = MaskSpec::new("(00) 0000-0000");
    for value in ["", "((((", "😀😀", "))) ---", "\u{0}\u{1}", "12345678901234567890"] {
        let result = mask(value, &spec, false);
        assert!(result.masked.chars().count() <= spec.len());
    }
}

#[test]
fn test_clean_value_of_reverse_mask() {
    let spec = MaskSpec::new("#.##0,00").reversed(true);
    assert_eq!(clean_value("1.234.567,89", &spec), "123456789");
}

#[test]
fn test_caret_after_auto_separator() {
    let spec = MaskSpec::new("000-000");
    let previous = masked_value("123", &spec);
    let next = masked_value("1234", &spec);
    assert_eq!(recompute_caret(4, &previous, &next, Some(KeyCode::for_char('4'))), 5);
}

#[test]
fn test_bypass_key_set() {
    assert_eq!(BYPASS_KEYS.len(), 11);
    for key in BYPASS_KEYS {
        assert!(is_bypass_key(key));
    }
    assert!(!is_bypass_key(KeyCode::BACKSPACE));
    assert!(!is_bypass_key(KeyCode::for_char('7')));
}

#[test]
fn test_key_names_round_trip() {
    for key in [KeyCode::BACKSPACE, KeyCode::DELETE, KeyCode::END, KeyCode::META] {
        let parsed: KeyCode = key.name().parse().unwrap();
        assert_eq!(parsed, key);
    }
    assert!("NOT_A_KEY".parse::<KeyCode>().is_err());
}

#[test]
fn test_named_mask_registration() {
    NamedMask::register(NamedMask::new("INTEGRATION_CEP", "00000-000")).unwrap();
    let cep = NamedMask::require("INTEGRATION_CEP").unwrap();
    let spec = cep.to_spec(TranslationTable::default());
    assert_eq!(masked_value("01310000", &spec), "01310-000");

    assert!(matches!(
        NamedMask::register(NamedMask::new("INTEGRATION_CEP", "0")),
        Err(NamedMaskError::NameExists(_))
    ));
}
