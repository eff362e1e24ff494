//! Word tables used to tag transcript tokens.
//!
//! The tables are deliberately small. Anything not listed here is treated as
//! content (a candidate item name).

/// Verbs that map to a pantry command.
pub const COMMAND_VERBS: &[&str] = &["add", "remove", "check"];

/// Other verbs a user is likely to say. They still count as "the first verb",
/// which makes the utterance unrecognized instead of guessing.
pub const OTHER_VERBS: &[&str] = &[
    "adds", "added", "adding", "removes", "removed", "removing", "checks", "checked", "checking",
    "put", "puts", "take", "takes", "took", "buy", "buys", "bought", "get", "gets", "got", "need",
    "needs", "have", "has", "had", "want", "wants", "use", "used", "delete", "deleted", "drop",
    "insert", "is", "are", "was", "were", "be", "do", "does", "did", "can", "could", "will",
    "would", "should", "let", "lets", "make", "show", "tell", "find", "see", "look", "go", "throw",
    "eat", "ate", "finish", "finished", "keep", "store", "count", "list", "clear", "set",
];

/// Words that are never part of an item name.
pub const FUNCTION_WORDS: &[&str] = &[
    // articles and determiners
    "a", "an", "the", "this", "that", "these", "those", "some", "any", "more", "another", "all",
    "each", "every", "few", "many", "much", "several", "no", "none",
    // pronouns
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "it", "its", "they",
    "them", "their", "he", "she", "him", "her", "there", "here", "what", "which", "who",
    // prepositions and conjunctions
    "to", "from", "in", "into", "on", "onto", "of", "for", "with", "at", "by", "out", "off", "up",
    "and", "or", "but", "if", "whether", "then", "also", "too", "as",
    // politeness and fillers
    "please", "thanks", "thank", "hey", "hi", "hello", "ok", "okay", "um", "uh", "so", "now",
    "just", "again", "not", "yes", "yeah", "how", "whats", "what's", "i'm", "we're", "let's",
    // the container itself
    "pantry", "inventory", "stock",
];

/// Words ending in "-ly" that name things rather than describe actions.
pub const LY_NOUNS: &[&str] = &[
    "jelly", "belly", "bubbly", "curly", "family", "holly", "lily",
];

/// Number words for 0..=19.
pub const UNITS: &[&str] = &[
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

/// Number words for the tens, indexed by tens digit (index 0 and 1 unused).
pub const TENS: &[&str] = &[
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

pub fn is_command_verb(word: &str) -> bool {
    COMMAND_VERBS.contains(&word)
}

pub fn is_verb(word: &str) -> bool {
    is_command_verb(word) || OTHER_VERBS.contains(&word)
}

pub fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(&word)
}

/// "-ly" adverbs ("quickly", "really") never name an item.
pub fn is_adverb(word: &str) -> bool {
    word.len() > 4 && word.ends_with("ly") && !LY_NOUNS.contains(&word)
}

/// Contractions and possessives ("i'd", "don't", "'s") never name an item.
pub fn is_elided(word: &str) -> bool {
    word.contains(['\'', '\u{2019}'])
}

/// Numeric meaning of a single lower-cased number word.
pub fn number_word(word: &str) -> Option<NumberWord> {
    if let Some(n) = UNITS.iter().position(|w| *w == word) {
        return Some(NumberWord::Small(n as u64));
    }
    if let Some(n) = TENS.iter().position(|w| !w.is_empty() && *w == word) {
        return Some(NumberWord::Small(n as u64 * 10));
    }
    match word {
        "hundred" => Some(NumberWord::Multiplier(100)),
        "dozen" => Some(NumberWord::Multiplier(12)),
        "thousand" => Some(NumberWord::Scale(1_000)),
        _ => None,
    }
}

/// How a number word combines with its neighbours.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NumberWord {
    /// Added to the running group ("twenty" + "five").
    Small(u64),
    /// Multiplies the running group ("two" "hundred", "three" "dozen").
    Multiplier(u64),
    /// Closes the running group into the total ("five" "thousand").
    Scale(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_verbs_are_verbs() {
        for v in COMMAND_VERBS {
            assert!(is_verb(v));
        }
        assert!(!is_command_verb("added"));
        assert!(is_verb("added"));
    }

    #[test]
    fn number_words() {
        assert_eq!(number_word("seven"), Some(NumberWord::Small(7)));
        assert_eq!(number_word("forty"), Some(NumberWord::Small(40)));
        assert_eq!(number_word("dozen"), Some(NumberWord::Multiplier(12)));
        assert_eq!(number_word("eggs"), None);
        assert_eq!(number_word(""), None);
    }

    #[test]
    fn adverbs_and_contractions() {
        assert!(is_adverb("quickly"));
        assert!(is_adverb("really"));
        assert!(!is_adverb("jelly"));
        assert!(!is_adverb("only"));
        assert!(!is_adverb("eggs"));
        assert!(is_elided("don't"));
        assert!(is_elided("i\u{2019}d"));
        assert!(is_elided("'s"));
        assert!(!is_elided("eggs"));
    }

    #[test]
    fn tables_do_not_overlap_with_commands() {
        for v in COMMAND_VERBS {
            assert!(!is_function_word(v));
            assert!(number_word(v).is_none());
        }
    }
}
