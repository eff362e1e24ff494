//! Transcript normalization: raw text -> (verb, item, quantity).
//!
//! Rules, in order of precedence per token:
//! 1. numeric (`12`, `2,000`, `1.5`) or number words (`twenty-five`, `two dozen`) -> number
//! 2. contraction or possessive (`i'd`, `don't`) -> ignored
//! 3. listed verb -> verb
//! 4. listed function word or `-ly` adverb -> ignored
//! 5. anything else -> content
//!
//! The verb is the first verb token. The item is the first run of adjacent
//! content tokens after that verb (or anywhere, when nothing follows it),
//! stopping at clause punctuation. The quantity is the value of the first
//! number, or 1 when there is none or it does not convert to a positive
//! integer. Later verbs, items and numbers are ignored.

use serde::Serialize;

use pantry_core::Quantity;

use crate::lexicon::{self, NumberWord};

/// Fields extracted from one transcript. Never an error: absence is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTranscript {
    /// First verb, lower-cased.
    pub verb: Option<String>,
    /// First noun phrase, in the transcript's own casing.
    pub item: Option<String>,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Digits,
    NumberWords(Vec<String>),
    Verb,
    Function,
    Content,
}

#[derive(Debug, Clone)]
struct Token {
    text: String,
    lower: String,
    kind: Kind,
    /// Trailing clause punctuation (`,` `.` `;` ...) followed this token.
    ends_clause: bool,
}

/// Extract the first verb, first item and first quantity from a transcript.
pub fn normalize(transcript: &str) -> NormalizedTranscript {
    let tokens = tokenize(transcript);

    let verb_at = tokens.iter().position(|t| t.kind == Kind::Verb);
    let verb = verb_at.map(|i| tokens[i].lower.clone());

    let item = verb_at
        .and_then(|i| first_noun_phrase(&tokens[i + 1..]))
        .or_else(|| first_noun_phrase(&tokens));
    let quantity = first_quantity(&tokens).unwrap_or(Quantity::ONE);

    tracing::debug!(
        verb = verb.as_deref().unwrap_or(""),
        item = item.as_deref().unwrap_or(""),
        quantity = quantity.get(),
        "normalized transcript"
    );

    NormalizedTranscript {
        verb,
        item,
        quantity,
    }
}

fn is_clause_punct(c: char) -> bool {
    matches!(c, ',' | '.' | ';' | ':' | '!' | '?')
}

fn tokenize(transcript: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for piece in transcript.split_whitespace() {
        let trimmed_end = piece.trim_end_matches(|c: char| c.is_ascii_punctuation());
        let ends_clause = piece[trimmed_end.len()..].chars().any(is_clause_punct);
        let text = trimmed_end.trim_start_matches(|c: char| c.is_ascii_punctuation());

        if text.is_empty() {
            // A detached "," or "." closes the previous token's clause.
            if ends_clause {
                if let Some(prev) = tokens.last_mut() {
                    prev.ends_clause = true;
                }
            }
            continue;
        }

        let lower = text.to_lowercase();
        let kind = classify(&lower, trimmed_end);
        tokens.push(Token {
            text: text.to_string(),
            lower,
            kind,
            ends_clause,
        });
    }

    tokens
}

fn classify(lower: &str, raw: &str) -> Kind {
    if is_numeric(lower) {
        return Kind::Digits;
    }
    let parts: Vec<&str> = lower.split('-').collect();
    if parts.iter().all(|p| lexicon::number_word(p).is_some()) {
        return Kind::NumberWords(parts.into_iter().map(str::to_string).collect());
    }
    if lexicon::is_elided(raw) {
        return Kind::Function;
    }
    if lexicon::is_verb(lower) {
        return Kind::Verb;
    }
    if lexicon::is_function_word(lower) || lexicon::is_adverb(lower) {
        return Kind::Function;
    }
    Kind::Content
}

/// Digits, optionally with inner `,` or `.` separators.
fn is_numeric(lower: &str) -> bool {
    let bytes = lower.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) if first.is_ascii_digit() && last.is_ascii_digit() => bytes
            .iter()
            .all(|b| b.is_ascii_digit() || *b == b',' || *b == b'.'),
        _ => false,
    }
}

/// Value of a numeric token. `2,000` reads as two thousand; decimals and
/// malformed grouping have no whole value.
fn digits_value(lower: &str) -> Option<u64> {
    if lower.contains('.') {
        return None;
    }
    let mut groups = lower.split(',');
    let head = groups.next()?;
    let mut digits = head.to_string();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        grouped = true;
        digits.push_str(group);
    }
    if grouped && !(1..=3).contains(&head.len()) {
        return None;
    }
    digits.parse().ok()
}

fn first_noun_phrase(tokens: &[Token]) -> Option<String> {
    let start = tokens.iter().position(|t| t.kind == Kind::Content)?;
    let mut words = Vec::new();
    for token in &tokens[start..] {
        if token.kind != Kind::Content {
            break;
        }
        words.push(token.text.as_str());
        if token.ends_clause {
            break;
        }
    }
    Some(words.join(" "))
}

/// Quantity of the first numeric token, or `None` when it is absent or does
/// not convert to a positive `u32`.
fn first_quantity(tokens: &[Token]) -> Option<Quantity> {
    let start = tokens
        .iter()
        .position(|t| matches!(t.kind, Kind::Digits | Kind::NumberWords(_)))?;

    let value = match &tokens[start].kind {
        Kind::Digits => digits_value(&tokens[start].lower),
        _ => words_value(&number_run(&tokens[start..])),
    }?;

    let value = u32::try_from(value).ok()?;
    Quantity::new(value).ok()
}

/// Collect the number words of a run, allowing an inner "and"
/// ("one hundred and five").
fn number_run(tokens: &[Token]) -> Vec<String> {
    let mut words = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i].kind {
            Kind::NumberWords(parts) => {
                words.extend(parts.iter().cloned());
                if tokens[i].ends_clause {
                    break;
                }
            }
            Kind::Function if tokens[i].lower == "and" && !words.is_empty() => {
                let next_is_number = tokens
                    .get(i + 1)
                    .is_some_and(|t| matches!(t.kind, Kind::NumberWords(_)));
                if !next_is_number {
                    break;
                }
            }
            _ => break,
        }
        i += 1;
    }
    words
}

fn words_value(words: &[String]) -> Option<u64> {
    let mut total: u64 = 0;
    let mut group: u64 = 0;
    for word in words {
        match lexicon::number_word(word)? {
            NumberWord::Small(n) => group = group.checked_add(n)?,
            NumberWord::Multiplier(m) => group = group.max(1).checked_mul(m)?,
            NumberWord::Scale(s) => {
                total = total.checked_add(group.max(1).checked_mul(s)?)?;
                group = 0;
            }
        }
    }
    total.checked_add(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn n(text: &str) -> NormalizedTranscript {
        normalize(text)
    }

    #[test]
    fn extracts_verb_item_and_word_quantity() {
        let out = n("add three eggs");
        assert_eq!(out.verb.as_deref(), Some("add"));
        assert_eq!(out.item.as_deref(), Some("eggs"));
        assert_eq!(out.quantity.get(), 3);
    }

    #[test]
    fn digits_are_quantities() {
        let out = n("add 12 eggs");
        assert_eq!(out.quantity.get(), 12);
        assert_eq!(out.item.as_deref(), Some("eggs"));
    }

    #[test]
    fn quantity_defaults_to_one() {
        assert_eq!(n("add milk").quantity.get(), 1);
        assert_eq!(n("").quantity.get(), 1);
    }

    #[test]
    fn zero_and_overflow_fall_back_to_one() {
        assert_eq!(n("add zero apples").quantity.get(), 1);
        assert_eq!(n("add 0 apples").quantity.get(), 1);
        assert_eq!(n("add 99999999999999 apples").quantity.get(), 1);
    }

    #[test]
    fn compound_number_words() {
        assert_eq!(n("add twenty five cans").quantity.get(), 25);
        assert_eq!(n("add twenty-five cans").quantity.get(), 25);
        assert_eq!(n("add one hundred and five beans").quantity.get(), 105);
        assert_eq!(n("add two dozen eggs").quantity.get(), 24);
        assert_eq!(n("add a dozen eggs").quantity.get(), 12);
        assert_eq!(n("add two thousand grains").quantity.get(), 2000);
    }

    #[test]
    fn and_after_number_does_not_join_a_second_item() {
        let out = n("add two and eggs");
        assert_eq!(out.quantity.get(), 2);
        assert_eq!(out.item.as_deref(), Some("eggs"));
    }

    #[test]
    fn only_first_number_counts() {
        assert_eq!(n("add 2 eggs and 5 apples").quantity.get(), 2);
    }

    #[test]
    fn verb_is_lowercased_and_item_keeps_case() {
        let out = n("Add Peanut Butter.");
        assert_eq!(out.verb.as_deref(), Some("add"));
        assert_eq!(out.item.as_deref(), Some("Peanut Butter"));
    }

    #[test]
    fn function_words_are_skipped() {
        let out = n("please add some eggs to the pantry");
        assert_eq!(out.item.as_deref(), Some("eggs"));
        let out = n("check if we have milk");
        assert_eq!(out.verb.as_deref(), Some("check"));
        assert_eq!(out.item.as_deref(), Some("milk"));
    }

    #[test]
    fn first_verb_wins() {
        let out = n("I need to add eggs");
        assert_eq!(out.verb.as_deref(), Some("need"));
        assert_eq!(out.item.as_deref(), Some("eggs"));
    }

    #[test]
    fn clause_punctuation_ends_the_item() {
        assert_eq!(n("add eggs, milk").item.as_deref(), Some("eggs"));
        assert_eq!(n("add eggs , milk").item.as_deref(), Some("eggs"));
        assert_eq!(n("add eggs and milk").item.as_deref(), Some("eggs"));
    }

    #[test]
    fn no_fields_in_small_talk() {
        let out = n("hello there");
        assert_eq!(out.verb, None);
        assert_eq!(out.item, None);
    }

    #[test]
    fn multi_word_items() {
        assert_eq!(
            n("remove brown rice please").item.as_deref(),
            Some("brown rice")
        );
    }

    #[test]
    fn item_is_taken_after_the_verb() {
        let out = n("I'd like to add two eggs");
        assert_eq!(out.verb.as_deref(), Some("add"));
        assert_eq!(out.item.as_deref(), Some("eggs"));
        assert_eq!(out.quantity.get(), 2);

        let out = n("milk please check");
        assert_eq!(out.item.as_deref(), Some("milk"));
    }

    #[test]
    fn contractions_and_adverbs_are_not_items() {
        assert_eq!(n("quickly add eggs").item.as_deref(), Some("eggs"));
        assert_eq!(n("don't add eggs").item.as_deref(), Some("eggs"));
        assert_eq!(n("add Sam's cookies").item.as_deref(), Some("cookies"));
        assert_eq!(n("add grape jelly").item.as_deref(), Some("grape jelly"));
    }

    #[test]
    fn separated_numbers_are_quantities_not_items() {
        let out = n("add 1.5 eggs");
        assert_eq!(out.item.as_deref(), Some("eggs"));
        assert_eq!(out.quantity.get(), 1);

        let out = n("add 2,000 grains");
        assert_eq!(out.item.as_deref(), Some("grains"));
        assert_eq!(out.quantity.get(), 2000);

        let out = n("add 20,00 grains");
        assert_eq!(out.item.as_deref(), Some("grains"));
        assert_eq!(out.quantity.get(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: normalization never panics and always yields a positive quantity.
        #[test]
        fn never_panics(text in "\\PC{0,60}") {
            let out = normalize(&text);
            prop_assert!(out.quantity.get() >= 1);
        }

        /// Property: a spoken positive digit count is the extracted quantity.
        #[test]
        fn digit_quantity_is_extracted(count in 1u32..100_000u32) {
            let out = normalize(&format!("add {count} lentils"));
            prop_assert_eq!(out.quantity.get(), count);
            prop_assert_eq!(out.item.as_deref(), Some("lentils"));
        }
    }
}
