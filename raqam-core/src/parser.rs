//! Number Phrase Parser
//!
//! Turns an Arabic number phrase back into its value:
//! - Whitespace tokenization, with fused conjunction prefixes split off
//! - Longest-match lookup of one- and multi-word lexicon entries
//! - Leading and trailing prose skipped, unknown words inside the number rejected
//! - Digit-group and scale ordering validated while accumulating

use std::collections::{HashMap, HashSet};

use crate::convention::{GrammaticalForm, NumeralConvention};
use crate::error::{ConventionError, ParseError};

/// A classified number word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// Zero through nineteen. Teens are single tokens.
    One(u64),
    /// Twenty through ninety.
    Ten(u64),
    /// One hundred through nine hundred.
    Hundred(u64),
    /// A magnitude word; `index` is its scale index (1 = thousand).
    Scale { index: usize, form: GrammaticalForm },
    Conjunction,
}

impl Token {
    /// Token for a lexicon value, if the value has a word of its own.
    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            0..=19 => Some(Token::One(value)),
            20..=90 if value % 10 == 0 => Some(Token::Ten(value)),
            100..=900 if value % 100 == 0 => Some(Token::Hundred(value)),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Token::Conjunction)
    }
}

/// Surface-form lookup for one convention.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashMap<String, Token>,
    /// First words of every entry, for deciding whether to split a fused
    /// conjunction off a word.
    heads: HashSet<String>,
    conjunction: String,
    max_span: usize,
}

impl Vocabulary {
    /// Collect every surface form, failing on empty words and on one word
    /// mapping to two tokens.
    pub fn build(convention: &NumeralConvention) -> Result<Self, ConventionError> {
        let (vocabulary, problems) = Self::collect(convention);
        match problems.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(vocabulary),
        }
    }

    /// Like [`Vocabulary::build`] but keeps the first mapping of a clashing
    /// word and drops unusable ones.
    pub fn build_lenient(convention: &NumeralConvention) -> Self {
        let (vocabulary, problems) = Self::collect(convention);
        for err in problems {
            tracing::warn!(error = %err, "skipping word in {}", convention.name);
        }
        vocabulary
    }

    fn collect(convention: &NumeralConvention) -> (Self, Vec<ConventionError>) {
        let lexicon = &convention.lexicon;
        let mut vocabulary = Self {
            words: HashMap::new(),
            heads: HashSet::new(),
            conjunction: lexicon.conjunction.trim().to_string(),
            max_span: 1,
        };

        let mut entries: Vec<(&str, Option<Token>)> = vec![
            (lexicon.zero.as_str(), Some(Token::One(0))),
            (lexicon.conjunction.as_str(), Some(Token::Conjunction)),
        ];

        let mut problems = Vec::new();
        let values = (1..=19u64)
            .chain((2..=9).map(|t| t * 10))
            .chain((1..=9).map(|h| h * 100));
        for value in values {
            match lexicon.word_for(value) {
                Some(word) => entries.push((word, Token::from_value(value))),
                None => problems.push(ConventionError::invalid(format!(
                    "no word for value {value}"
                ))),
            }
        }

        for alias in &lexicon.aliases {
            entries.push((alias.word.as_str(), Token::from_value(alias.value)));
        }

        for (idx, entry) in convention.scales.entries.iter().enumerate() {
            let index = idx + 1;
            for form in [
                GrammaticalForm::Singular,
                GrammaticalForm::Dual,
                GrammaticalForm::Plural,
            ] {
                entries.push((entry.word(form), Some(Token::Scale { index, form })));
            }
            for alias in &entry.aliases {
                let form = alias.form;
                entries.push((alias.word.as_str(), Some(Token::Scale { index, form })));
            }
        }

        for (word, token) in entries {
            let result = match token {
                Some(token) => vocabulary.insert(word, token),
                None => Err(ConventionError::invalid(format!(
                    "alias {word:?} has a value with no word class"
                ))),
            };
            if let Err(err) = result {
                problems.push(err);
            }
        }

        (vocabulary, problems)
    }

    fn insert(&mut self, word: &str, token: Token) -> Result<(), ConventionError> {
        let parts: Vec<&str> = word.split_whitespace().collect();
        if parts.is_empty() {
            return Err(ConventionError::invalid("empty word in convention"));
        }
        let key = parts.join(" ");
        if let Some(existing) = self.words.get(&key) {
            if *existing != token {
                return Err(ConventionError::invalid(format!(
                    "word {key:?} maps to both {existing:?} and {token:?}"
                )));
            }
            return Ok(());
        }
        self.max_span = self.max_span.max(parts.len());
        self.heads.insert(parts[0].to_string());
        self.words.insert(key, token);
        Ok(())
    }

    pub fn lookup(&self, phrase: &str) -> Option<Token> {
        self.words.get(phrase).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One word (or matched multi-word entry) of a phrase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub text: String,
    /// Index of the first whitespace-separated word it came from.
    pub position: usize,
    /// `None` for words outside the vocabulary.
    pub token: Option<Token>,
}

struct Piece<'p> {
    text: &'p str,
    position: usize,
    conjunction: bool,
}

/// Parses number phrases against one convention.
pub struct PhraseParser<'a> {
    convention: &'a NumeralConvention,
    vocabulary: Vocabulary,
}

impl<'a> PhraseParser<'a> {
    /// Parser over a convention. Words of an invalid convention that clash or
    /// are empty are left out of the vocabulary.
    pub fn new(convention: &'a NumeralConvention) -> Self {
        Self {
            convention,
            vocabulary: Vocabulary::build_lenient(convention),
        }
    }

    /// Parser over a convention that has already been validated.
    pub fn try_new(convention: &'a NumeralConvention) -> Result<Self, ConventionError> {
        Ok(Self {
            convention,
            vocabulary: Vocabulary::build(convention)?,
        })
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    fn pieces<'p>(&self, phrase: &'p str) -> Vec<Piece<'p>> {
        let conjunction = self.vocabulary.conjunction.as_str();
        let mut pieces = Vec::new();

        for (position, word) in phrase.split_whitespace().enumerate() {
            if word == conjunction || self.vocabulary.heads.contains(word) {
                pieces.push(Piece {
                    text: word,
                    position,
                    conjunction: word == conjunction,
                });
                continue;
            }

            match word.strip_prefix(conjunction) {
                Some(rest) if self.vocabulary.heads.contains(rest) => {
                    pieces.push(Piece {
                        text: &word[..conjunction.len()],
                        position,
                        conjunction: true,
                    });
                    pieces.push(Piece {
                        text: rest,
                        position,
                        conjunction: false,
                    });
                }
                _ => pieces.push(Piece {
                    text: word,
                    position,
                    conjunction: false,
                }),
            }
        }

        pieces
    }

    /// Classify every word of `phrase`, longest match first.
    pub fn classify(&self, phrase: &str) -> Vec<Classified> {
        let pieces = self.pieces(phrase);
        let mut classified = Vec::with_capacity(pieces.len());
        let mut idx = 0;

        while idx < pieces.len() {
            let piece = &pieces[idx];
            if piece.conjunction {
                classified.push(Classified {
                    text: piece.text.to_string(),
                    position: piece.position,
                    token: Some(Token::Conjunction),
                });
                idx += 1;
                continue;
            }

            let longest = (1..=self.vocabulary.max_span).rev().find_map(|span| {
                let window = pieces.get(idx..idx + span)?;
                if window.iter().any(|p| p.conjunction) {
                    return None;
                }
                let text = window.iter().map(|p| p.text).collect::<Vec<_>>().join(" ");
                self.vocabulary.lookup(&text).map(|token| (span, text, token))
            });

            match longest {
                Some((span, text, token)) => {
                    classified.push(Classified {
                        text,
                        position: piece.position,
                        token: Some(token),
                    });
                    idx += span;
                }
                None => {
                    classified.push(Classified {
                        text: piece.text.to_string(),
                        position: piece.position,
                        token: None,
                    });
                    idx += 1;
                }
            }
        }

        classified
    }

    /// Value of the number phrase in `phrase`.
    pub fn parse(&self, phrase: &str) -> Result<u64, ParseError> {
        let classified = self.classify(phrase);

        let is_number = |c: &Classified| c.token.map_or(false, |t| t.is_numeric());
        let first = classified.iter().position(is_number);
        let last = classified.iter().rposition(is_number);
        let (Some(first), Some(last)) = (first, last) else {
            tracing::debug!(phrase, "no number words found");
            return Err(ParseError::NoNumericToken);
        };

        if first > 0 || last + 1 < classified.len() {
            tracing::trace!(
                skipped = classified.len() - (last - first + 1),
                "ignoring words around the number"
            );
        }

        let mut accumulator = Accumulator::new(self.convention);
        for word in &classified[first..=last] {
            match word.token {
                Some(token) => accumulator.push(token, word)?,
                None => {
                    return Err(ParseError::UnknownToken {
                        token: word.text.clone(),
                        position: word.position,
                    })
                }
            }
        }
        accumulator.finish()
    }
}

/// Position within the current digit group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Hundred,
    One(u64),
    Ten,
}

struct Accumulator<'a> {
    convention: &'a NumeralConvention,
    total: u64,
    group: u64,
    slot: Option<Slot>,
    /// Smallest scale consumed so far.
    last_scale: Option<usize>,
    after_conjunction: bool,
    zero: bool,
    numbers: usize,
}

impl<'a> Accumulator<'a> {
    fn new(convention: &'a NumeralConvention) -> Self {
        Self {
            convention,
            total: 0,
            group: 0,
            slot: None,
            last_scale: None,
            after_conjunction: false,
            zero: false,
            numbers: 0,
        }
    }

    fn push(&mut self, token: Token, word: &Classified) -> Result<(), ParseError> {
        let out_of_order = |reason: &'static str| ParseError::InvalidOrder {
            token: word.text.clone(),
            position: word.position,
            reason,
        };

        if token.is_numeric() {
            if self.zero || (token == Token::One(0) && self.numbers > 0) {
                return Err(out_of_order("zero cannot combine with other number words"));
            }
            self.numbers += 1;
        }

        match token {
            Token::Conjunction => {
                if self.after_conjunction {
                    return Err(out_of_order("repeated conjunction"));
                }
                self.after_conjunction = true;
                return Ok(());
            }
            Token::One(0) => self.zero = true,
            Token::Hundred(value) => {
                if self.slot.is_some() {
                    return Err(out_of_order("hundreds must open a digit group"));
                }
                self.group += value;
                self.slot = Some(Slot::Hundred);
            }
            Token::One(value) => {
                if !matches!(self.slot, None | Some(Slot::Hundred)) {
                    return Err(out_of_order("units can only follow a hundreds word"));
                }
                self.group += value;
                self.slot = Some(Slot::One(value));
            }
            Token::Ten(value) => match self.slot {
                Some(Slot::Ten) => return Err(out_of_order("two tens words in one group")),
                Some(Slot::One(units)) if units >= 10 => {
                    return Err(out_of_order("a teen cannot take a tens word"))
                }
                _ => {
                    self.group += value;
                    self.slot = Some(Slot::Ten);
                }
            },
            Token::Scale { index, form } => self.push_scale(index, form, word)?,
        }

        self.after_conjunction = false;
        Ok(())
    }

    fn push_scale(
        &mut self,
        index: usize,
        form: GrammaticalForm,
        word: &Classified,
    ) -> Result<(), ParseError> {
        if self.last_scale.map_or(false, |previous| index >= previous) {
            return Err(ParseError::InvalidOrder {
                token: word.text.clone(),
                position: word.position,
                reason: "scale words must decrease in magnitude",
            });
        }
        let Some(entry) = self.convention.scales.entry(index) else {
            return Err(ParseError::UnknownToken {
                token: word.text.clone(),
                position: word.position,
            });
        };

        let mismatch = |count| ParseError::ScaleCount {
            token: word.text.clone(),
            position: word.position,
            count,
        };

        let count = if self.group == 0 {
            match form {
                GrammaticalForm::Singular => 1,
                GrammaticalForm::Dual => 2,
                GrammaticalForm::Plural => return Err(mismatch(0)),
            }
        } else if self.after_conjunction {
            return Err(ParseError::InvalidOrder {
                token: word.text.clone(),
                position: word.position,
                reason: "a counted group cannot precede a larger scale",
            });
        } else {
            // One and two are carried by the scale word itself.
            if self.group <= 2 || entry.form_for(self.group) != form {
                return Err(mismatch(self.group));
            }
            self.group
        };

        let contribution = count
            .checked_mul(entry.multiplier)
            .ok_or(ParseError::Overflow)?;
        self.total = self
            .total
            .checked_add(contribution)
            .ok_or(ParseError::Overflow)?;
        self.group = 0;
        self.slot = None;
        self.last_scale = Some(index);
        Ok(())
    }

    fn finish(self) -> Result<u64, ParseError> {
        self.total
            .checked_add(self.group)
            .ok_or(ParseError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(phrase: &str) -> Result<u64, ParseError> {
        let convention = NumeralConvention::standard();
        PhraseParser::new(&convention).parse(phrase)
    }

    #[test]
    fn parses_single_words() {
        assert_eq!(parse("صفر").unwrap(), 0);
        assert_eq!(parse("ثلاثة").unwrap(), 3);
        assert_eq!(parse("عشرون").unwrap(), 20);
        assert_eq!(parse("مئة").unwrap(), 100);
        assert_eq!(parse("ألف").unwrap(), 1_000);
    }

    #[test]
    fn longest_match_wins_for_teens() {
        assert_eq!(parse("خمسة عشر").unwrap(), 15);
        assert_eq!(parse("اثنا عشر").unwrap(), 12);
        assert_eq!(parse("عشر").unwrap(), 10);
        assert_eq!(parse("ثلاث مئة").unwrap(), 300);
    }

    #[test]
    fn splits_fused_conjunction() {
        assert_eq!(parse("مئة وثلاثة وعشرون").unwrap(), 123);
        assert_eq!(parse("مئة و ثلاثة و عشرون").unwrap(), 123);
        assert_eq!(parse("مليون وواحد").unwrap(), 1_000_001);
        assert_eq!(parse("واحد").unwrap(), 1);
    }

    #[test]
    fn scale_forms_imply_or_check_count() {
        assert_eq!(parse("ألفان").unwrap(), 2_000);
        assert_eq!(parse("ألفين").unwrap(), 2_000);
        assert_eq!(parse("ثلاثة آلاف").unwrap(), 3_000);
        assert_eq!(parse("أحد عشر ألف").unwrap(), 11_000);
        assert_eq!(parse("مئة ألف").unwrap(), 100_000);
        assert_eq!(parse("ألفان وخمسة وعشرون").unwrap(), 2_025);
    }

    #[test]
    fn skips_prose_around_the_number() {
        assert_eq!(parse("لدي ثلاثة").unwrap(), 3);
        assert_eq!(parse("دفعت مئة وعشرين ريالا").unwrap(), 120);
        assert_eq!(parse("و خمسة و").unwrap(), 5);
    }

    #[test]
    fn rejects_unknown_word_inside_number() {
        let err = parse("مئة كتاب وثلاثة").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnknownToken {
                token: "كتاب".to_string(),
                position: 1
            }
        );
    }

    #[test]
    fn rejects_repeated_scale() {
        assert!(matches!(
            parse("ألف ألف"),
            Err(ParseError::InvalidOrder { .. })
        ));
        assert!(matches!(
            parse("ألف مليون"),
            Err(ParseError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn rejects_bad_group_order() {
        assert!(matches!(parse("عشرون ثلاثة"), Err(ParseError::InvalidOrder { .. })));
        assert!(matches!(parse("عشرون ثلاثون"), Err(ParseError::InvalidOrder { .. })));
        assert!(matches!(parse("خمسة عشر عشرون"), Err(ParseError::InvalidOrder { .. })));
        assert!(matches!(parse("ثلاثة مئة"), Err(ParseError::InvalidOrder { .. })));
        assert!(matches!(parse("خمسة وألف"), Err(ParseError::InvalidOrder { .. })));
        assert!(matches!(parse("مئة و و خمسة"), Err(ParseError::InvalidOrder { .. })));
    }

    #[test]
    fn rejects_disagreeing_scale_form() {
        assert!(matches!(parse("آلاف"), Err(ParseError::ScaleCount { count: 0, .. })));
        assert!(matches!(parse("ثلاثة ألف"), Err(ParseError::ScaleCount { count: 3, .. })));
        assert!(matches!(parse("أحد عشر آلاف"), Err(ParseError::ScaleCount { .. })));
        assert!(matches!(parse("اثنان ألف"), Err(ParseError::ScaleCount { .. })));
        assert!(matches!(parse("خمسة ألفان"), Err(ParseError::ScaleCount { .. })));
    }

    #[test]
    fn rejects_zero_in_compounds() {
        assert!(matches!(parse("صفر وخمسة"), Err(ParseError::InvalidOrder { .. })));
        assert!(matches!(parse("خمسة صفر"), Err(ParseError::InvalidOrder { .. })));
    }

    #[test]
    fn rejects_phrase_without_numbers() {
        assert_eq!(parse(""), Err(ParseError::NoNumericToken));
        assert_eq!(parse("مرحبا بالعالم"), Err(ParseError::NoNumericToken));
        assert_eq!(parse("و"), Err(ParseError::NoNumericToken));
    }

    #[test]
    fn classify_reports_tokens() {
        let convention = NumeralConvention::standard();
        let parser = PhraseParser::new(&convention);
        let tokens: Vec<Option<Token>> = parser
            .classify("ثلاثة آلاف وخمسة عشر")
            .into_iter()
            .map(|c| c.token)
            .collect();
        assert_eq!(
            tokens,
            vec![
                Some(Token::One(3)),
                Some(Token::Scale {
                    index: 1,
                    form: GrammaticalForm::Plural
                }),
                Some(Token::Conjunction),
                Some(Token::One(15)),
            ]
        );
    }

    #[test]
    fn token_classes_by_value() {
        assert_eq!(Token::from_value(7), Some(Token::One(7)));
        assert_eq!(Token::from_value(40), Some(Token::Ten(40)));
        assert_eq!(Token::from_value(600), Some(Token::Hundred(600)));
        assert_eq!(Token::from_value(45), None);
    }
}
