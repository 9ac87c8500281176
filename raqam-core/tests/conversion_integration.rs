use raqam_core::{
    extract_numbers, max_magnitude, number_to_words, to_arabic_numerals, to_eastern_numerals,
    to_western_numerals, words_to_number, NumeralConvention, ParseError, RangeError,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashSet;

#[test]
fn round_trips_every_value_below_twenty_thousand() {
    for value in 0..20_000i64 {
        let words = number_to_words(value).unwrap();
        assert_eq!(
            words_to_number(&words).unwrap(),
            value as u64,
            "round trip failed for {value}: {words}"
        );
    }
}

#[test]
fn round_trips_sampled_large_values() {
    let mut rng = StdRng::seed_from_u64(42);
    let max = max_magnitude() as i64;
    let mut samples: Vec<i64> = (0..5_000).map(|_| rng.gen_range(0..=max)).collect();
    samples.extend([
        1_000_000,
        1_000_001,
        2_000_000_000,
        10_000_000_000_000,
        100_200_300_400_500,
        max,
    ]);

    for value in samples {
        let words = number_to_words(value).unwrap();
        assert_eq!(
            words_to_number(&words).unwrap(),
            value as u64,
            "round trip failed for {value}: {words}"
        );
    }
}

#[test]
fn adjacent_values_never_collide() {
    let mut seen = HashSet::new();
    for value in 0..5_000i64 {
        let words = number_to_words(value).unwrap();
        assert!(seen.insert(words.clone()), "duplicate phrase {words}");
    }
}

#[test]
fn boundary_values_render_as_documented() {
    assert_eq!(number_to_words(0).unwrap(), "صفر");
    assert_eq!(number_to_words(1).unwrap(), "واحد");
    assert_eq!(number_to_words(100).unwrap(), "مئة");
    assert_eq!(number_to_words(1_000).unwrap(), "ألف");
    assert_eq!(number_to_words(2_000).unwrap(), "ألفان");
    assert_eq!(number_to_words(11_000).unwrap(), "أحد عشر ألف");
    assert_eq!(number_to_words(123).unwrap(), "مئة وثلاثة وعشرون");
    assert_eq!(number_to_words(2_025).unwrap(), "ألفان وخمسة وعشرون");
}

#[test]
fn out_of_range_values_fail() {
    assert!(matches!(
        number_to_words(-1),
        Err(RangeError::Negative { .. })
    ));
    assert_eq!(max_magnitude(), 999_000_000_000_000);
    assert!(number_to_words(999_000_000_000_000).is_ok());
    assert_eq!(
        number_to_words(999_000_000_000_001),
        Err(RangeError::TooLarge {
            value: 999_000_000_000_001,
            max: 999_000_000_000_000
        })
    );
    assert!(number_to_words(i64::MAX).is_err());
}

#[test]
fn unvalidated_convention_never_renders_a_different_number() {
    let mut convention = NumeralConvention::standard();
    convention.scales.entries.drain(..3);
    assert!(convention.validate().is_err());

    assert!(convention.render(5_000_000).is_err());
    assert_eq!(
        convention.render(5_000),
        Err(RangeError::MissingScale { scale_index: 1 })
    );
    assert_eq!(convention.render(5).unwrap(), "خمسة");
}

#[test]
fn parser_rejects_repeated_scale_word() {
    assert!(matches!(
        words_to_number("ألف ألف"),
        Err(ParseError::InvalidOrder { .. })
    ));
}

#[test]
fn extracts_digits_from_mixed_text() {
    assert_eq!(extract_numbers("لدي ٢٣ كتاب و 5 أقلام"), vec![23, 5]);
}

#[test]
fn script_conversion_is_idempotent() {
    for text in ["العدد ١٢٣ أو ۴۵۶", "plain 42", "", "٠٩۰۹"] {
        let once = to_western_numerals(text);
        assert_eq!(to_western_numerals(&once), once);
        assert_eq!(to_western_numerals(&to_arabic_numerals(text)), once);
        assert_eq!(to_western_numerals(&to_eastern_numerals(text)), once);
    }
}

#[test]
fn batch_conversion_keeps_input_order() {
    let convention = NumeralConvention::standard();
    let values: Vec<i64> = (0..500).map(|v| v * 7_919).chain([-3]).collect();
    let rendered = convention.render_many(&values);
    assert_eq!(rendered.len(), values.len());
    assert!(rendered.last().unwrap().is_err());

    let phrases: Vec<&str> = rendered[..values.len() - 1]
        .iter()
        .map(|r| r.as_deref().unwrap())
        .collect();
    let parsed = convention.parse_many(&phrases);
    for (value, result) in values.iter().zip(parsed) {
        assert_eq!(result.unwrap(), *value as u64);
    }
}

#[test]
fn conventions_coexist() {
    let standard = NumeralConvention::standard();
    let mut spaced = NumeralConvention::standard();
    spaced.name = "msa-spaced".to_string();
    spaced.lexicon.conjunction_attached = false;
    spaced.scales.entries.truncate(2);
    spaced.validate().unwrap();

    assert_eq!(standard.render(21).unwrap(), "واحد وعشرون");
    assert_eq!(spaced.render(21).unwrap(), "واحد و عشرون");
    assert_eq!(spaced.max_value(), 999_000_000);
    assert!(spaced.render(999_000_001).is_err());
    assert!(spaced.render(1_000_000_000).is_err());
    assert_eq!(spaced.parse("مليون و واحد").unwrap(), 1_000_001);
    assert_eq!(standard.parse("مليار").unwrap(), 1_000_000_000);
    assert!(spaced.parse("مليار").is_err());
}

#[test]
fn convention_loads_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("convention.json");

    let mut convention = NumeralConvention::standard();
    convention.name = "custom".to_string();
    convention.scales.entries[0].plural_max = 9;
    convention.to_path(&path).unwrap();

    let loaded = NumeralConvention::from_path(&path).unwrap();
    assert_eq!(loaded.name, "custom");
    assert_eq!(loaded.render(10_000).unwrap(), "عشرة ألف");
    assert_eq!(loaded.render(9_000).unwrap(), "تسعة آلاف");
    assert_eq!(loaded.parse("عشرة ألف").unwrap(), 10_000);
}

#[test]
fn invalid_convention_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");

    let mut convention = NumeralConvention::standard();
    convention.lexicon.tens.truncate(3);
    convention.to_path(&path).unwrap();
    assert!(NumeralConvention::from_path(&path).is_err());

    std::fs::write(&path, "{ not json").unwrap();
    assert!(NumeralConvention::from_path(&path).is_err());
}
