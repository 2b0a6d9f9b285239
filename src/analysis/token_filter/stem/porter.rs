//! Porter stemming algorithm implementation.
//!
//! The Porter stemmer applies ordered suffix-rewrite rules in eight steps:
//!
//! 1. 1a plurals, 1b `-ed`/`-ing`, 1c terminal `y`
//! 2. `-ational` → `-ate`, `-tional` → `-tion`, etc.
//! 3. `-icate` → `-ic`, `-ative` → "", etc.
//! 4. Remove `-al`, `-ance`, `-ence`, etc.
//! 5. 5a final `-e`, 5b final `-ll`
//!
//! Within a rule table the first rule whose suffix matches decides: if its
//! condition fails the word is left as it is and later rules are not tried.
//!
//! Two rule sets are available. [`PorterMode::NltkExtensions`] (the default)
//! reproduces the stemmer the news models were fitted with, including its
//! irregular-forms table and short-word handling. [`PorterMode::Original`]
//! follows the 1980 paper.
//!
//! # Examples
//!
//! ```
//! use verinews::analysis::token_filter::stem::Stemmer;
//! use verinews::analysis::token_filter::stem::porter::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//!
//! assert_eq!(stemmer.stem("running"), "run");
//! assert_eq!(stemmer.stem("flies"), "fli");
//! assert_eq!(stemmer.stem("traditional"), "tradit");
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stem::Stemmer;

/// Rule set used by [`PorterStemmer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PorterMode {
    /// The algorithm as published by Porter (1980).
    Original,
    /// Porter plus the extensions of the NLTK implementation.
    #[default]
    NltkExtensions,
}

/// Condition a stem must satisfy for a suffix rule to fire.
#[derive(Debug, Clone, Copy)]
enum Condition {
    Always,
    /// Measure of the stem strictly greater than the value.
    MeasureAbove(usize),
    /// Measure above one and the stem ends in `s` or `t`.
    IonStem,
    /// Positive measure of the stem with the `l` of `logi` kept.
    LogiStem,
}

#[derive(Debug, Clone, Copy)]
struct SuffixRule {
    suffix: &'static str,
    replacement: &'static str,
    condition: Condition,
}

const fn rule(suffix: &'static str, replacement: &'static str, condition: Condition) -> SuffixRule {
    SuffixRule {
        suffix,
        replacement,
        condition,
    }
}

use Condition::{Always, IonStem, LogiStem, MeasureAbove};

const STEP1A_RULES: &[SuffixRule] = &[
    rule("sses", "ss", Always),
    rule("ies", "i", Always),
    rule("ss", "ss", Always),
    rule("s", "", Always),
];

const STEP2_ORIGINAL_RULES: &[SuffixRule] = &[
    rule("ational", "ate", MeasureAbove(0)),
    rule("tional", "tion", MeasureAbove(0)),
    rule("enci", "ence", MeasureAbove(0)),
    rule("anci", "ance", MeasureAbove(0)),
    rule("izer", "ize", MeasureAbove(0)),
    rule("abli", "able", MeasureAbove(0)),
    rule("alli", "al", MeasureAbove(0)),
    rule("entli", "ent", MeasureAbove(0)),
    rule("eli", "e", MeasureAbove(0)),
    rule("ousli", "ous", MeasureAbove(0)),
    rule("ization", "ize", MeasureAbove(0)),
    rule("ation", "ate", MeasureAbove(0)),
    rule("ator", "ate", MeasureAbove(0)),
    rule("alism", "al", MeasureAbove(0)),
    rule("iveness", "ive", MeasureAbove(0)),
    rule("fulness", "ful", MeasureAbove(0)),
    rule("ousness", "ous", MeasureAbove(0)),
    rule("aliti", "al", MeasureAbove(0)),
    rule("iviti", "ive", MeasureAbove(0)),
    rule("biliti", "ble", MeasureAbove(0)),
];

const STEP2_NLTK_RULES: &[SuffixRule] = &[
    rule("ational", "ate", MeasureAbove(0)),
    rule("tional", "tion", MeasureAbove(0)),
    rule("enci", "ence", MeasureAbove(0)),
    rule("anci", "ance", MeasureAbove(0)),
    rule("izer", "ize", MeasureAbove(0)),
    rule("bli", "ble", MeasureAbove(0)),
    rule("alli", "al", MeasureAbove(0)),
    rule("entli", "ent", MeasureAbove(0)),
    rule("eli", "e", MeasureAbove(0)),
    rule("ousli", "ous", MeasureAbove(0)),
    rule("ization", "ize", MeasureAbove(0)),
    rule("ation", "ate", MeasureAbove(0)),
    rule("ator", "ate", MeasureAbove(0)),
    rule("alism", "al", MeasureAbove(0)),
    rule("iveness", "ive", MeasureAbove(0)),
    rule("fulness", "ful", MeasureAbove(0)),
    rule("ousness", "ous", MeasureAbove(0)),
    rule("aliti", "al", MeasureAbove(0)),
    rule("iviti", "ive", MeasureAbove(0)),
    rule("biliti", "ble", MeasureAbove(0)),
    rule("fulli", "ful", MeasureAbove(0)),
    rule("logi", "log", LogiStem),
];

const STEP3_RULES: &[SuffixRule] = &[
    rule("icate", "ic", MeasureAbove(0)),
    rule("ative", "", MeasureAbove(0)),
    rule("alize", "al", MeasureAbove(0)),
    rule("iciti", "ic", MeasureAbove(0)),
    rule("ical", "ic", MeasureAbove(0)),
    rule("ful", "", MeasureAbove(0)),
    rule("ness", "", MeasureAbove(0)),
];

const STEP4_RULES: &[SuffixRule] = &[
    rule("al", "", MeasureAbove(1)),
    rule("ance", "", MeasureAbove(1)),
    rule("ence", "", MeasureAbove(1)),
    rule("er", "", MeasureAbove(1)),
    rule("ic", "", MeasureAbove(1)),
    rule("able", "", MeasureAbove(1)),
    rule("ible", "", MeasureAbove(1)),
    rule("ant", "", MeasureAbove(1)),
    rule("ement", "", MeasureAbove(1)),
    rule("ment", "", MeasureAbove(1)),
    rule("ent", "", MeasureAbove(1)),
    rule("ion", "", IonStem),
    rule("ou", "", MeasureAbove(1)),
    rule("ism", "", MeasureAbove(1)),
    rule("ate", "", MeasureAbove(1)),
    rule("iti", "", MeasureAbove(1)),
    rule("ous", "", MeasureAbove(1)),
    rule("ive", "", MeasureAbove(1)),
    rule("ize", "", MeasureAbove(1)),
];

/// Words whose stem is fixed rather than computed (NLTK extensions only).
fn irregular_form(word: &str) -> Option<&'static str> {
    match word {
        "sky" | "skies" => Some("sky"),
        "dying" => Some("die"),
        "lying" => Some("lie"),
        "tying" => Some("tie"),
        "news" => Some("news"),
        "innings" | "inning" => Some("inning"),
        "outings" | "outing" => Some("outing"),
        "cannings" | "canning" => Some("canning"),
        "howe" => Some("howe"),
        "proceed" => Some("proceed"),
        "exceed" => Some("exceed"),
        "succeed" => Some("succeed"),
        _ => None,
    }
}

fn is_consonant(chars: &[char], i: usize) -> bool {
    match chars[i] {
        'a' | 'e' | 'i' | 'o' | 'u' => false,
        'y' => i == 0 || !is_consonant(chars, i - 1),
        _ => true,
    }
}

fn char_len(word: &str) -> usize {
    word.chars().count()
}

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer {
    mode: PorterMode,
}

impl PorterStemmer {
    /// Create a new Porter stemmer with the NLTK extensions.
    pub fn new() -> Self {
        Self::with_mode(PorterMode::NltkExtensions)
    }

    /// Create a Porter stemmer using the given rule set.
    pub fn with_mode(mode: PorterMode) -> Self {
        PorterStemmer { mode }
    }

    /// Get the rule set of this stemmer.
    pub fn mode(&self) -> PorterMode {
        self.mode
    }

    fn nltk(&self) -> bool {
        self.mode == PorterMode::NltkExtensions
    }

    /// Calculate the measure of a word (number of vowel-consonant sequences).
    fn measure(&self, word: &str) -> usize {
        let chars: Vec<char> = word.chars().collect();
        (1..chars.len())
            .filter(|&i| !is_consonant(&chars, i - 1) && is_consonant(&chars, i))
            .count()
    }

    fn contains_vowel(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        (0..chars.len()).any(|i| !is_consonant(&chars, i))
    }

    fn ends_double_consonant(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        n >= 2 && chars[n - 1] == chars[n - 2] && is_consonant(&chars, n - 1)
    }

    /// Check if word ends with consonant-vowel-consonant, the last not w, x or y.
    fn ends_cvc(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();

        let cvc = n >= 3
            && is_consonant(&chars, n - 3)
            && !is_consonant(&chars, n - 2)
            && is_consonant(&chars, n - 1)
            && !matches!(chars[n - 1], 'w' | 'x' | 'y');

        cvc || (self.nltk() && n == 2 && !is_consonant(&chars, 0) && is_consonant(&chars, 1))
    }

    fn holds(&self, condition: Condition, stem: &str) -> bool {
        match condition {
            Always => true,
            MeasureAbove(min) => self.measure(stem) > min,
            IonStem => self.measure(stem) > 1 && (stem.ends_with('s') || stem.ends_with('t')),
            LogiStem => self.measure(&format!("{stem}l")) > 0,
        }
    }

    fn apply_rules(&self, word: &str, rules: &[SuffixRule]) -> String {
        for rule in rules {
            if let Some(stem) = word.strip_suffix(rule.suffix) {
                return if self.holds(rule.condition, stem) {
                    format!("{stem}{}", rule.replacement)
                } else {
                    word.to_string()
                };
            }
        }
        word.to_string()
    }

    fn step1a(&self, word: &str) -> String {
        if self.nltk() && char_len(word) == 4 {
            if let Some(stem) = word.strip_suffix("ies") {
                return format!("{stem}ie");
            }
        }
        self.apply_rules(word, STEP1A_RULES)
    }

    fn step1b(&self, word: &str) -> String {
        if self.nltk() {
            if let Some(stem) = word.strip_suffix("ied") {
                return if char_len(word) == 4 {
                    format!("{stem}ie")
                } else {
                    format!("{stem}i")
                };
            }
        }

        if let Some(stem) = word.strip_suffix("eed") {
            return if self.measure(stem) > 0 {
                format!("{stem}ee")
            } else {
                word.to_string()
            };
        }

        let Some(stem) = ["ed", "ing"]
            .iter()
            .filter_map(|suffix| word.strip_suffix(suffix))
            .find(|stem| self.contains_vowel(stem))
        else {
            return word.to_string();
        };

        if stem.ends_with("at") || stem.ends_with("bl") || stem.ends_with("iz") {
            return format!("{stem}e");
        }

        if self.ends_double_consonant(stem) {
            let mut stem = stem.to_string();
            if !matches!(stem.chars().last(), Some('l' | 's' | 'z')) {
                stem.pop();
            }
            return stem;
        }

        if self.measure(stem) == 1 && self.ends_cvc(stem) {
            format!("{stem}e")
        } else {
            stem.to_string()
        }
    }

    fn step1c(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix('y') {
            let applies = if self.nltk() {
                let chars: Vec<char> = stem.chars().collect();
                chars.len() > 1 && is_consonant(&chars, chars.len() - 1)
            } else {
                self.contains_vowel(stem)
            };

            if applies {
                return format!("{stem}i");
            }
        }
        word.to_string()
    }

    fn step2(&self, word: &str) -> String {
        if self.nltk() {
            // alli is rewritten first and the result goes through step 2 again
            if let Some(stem) = word.strip_suffix("alli") {
                if self.measure(stem) > 0 {
                    return self.step2(&format!("{stem}al"));
                }
            }
            self.apply_rules(word, STEP2_NLTK_RULES)
        } else {
            self.apply_rules(word, STEP2_ORIGINAL_RULES)
        }
    }

    fn step3(&self, word: &str) -> String {
        self.apply_rules(word, STEP3_RULES)
    }

    fn step4(&self, word: &str) -> String {
        self.apply_rules(word, STEP4_RULES)
    }

    fn step5a(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix('e') {
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                return stem.to_string();
            }
        }
        word.to_string()
    }

    fn step5b(&self, word: &str) -> String {
        if let Some(stem) = word.strip_suffix("ll") {
            let shortened = format!("{stem}l");
            if self.measure(&shortened) > 1 {
                return shortened;
            }
        }
        word.to_string()
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let word = word.to_lowercase();

        if self.nltk() {
            if let Some(stem) = irregular_form(&word) {
                return stem.to_string();
            }
            if char_len(&word) <= 2 {
                return word;
            }
        }

        let word = self.step1a(&word);
        let word = self.step1b(&word);
        let word = self.step1c(&word);
        let word = self.step2(&word);
        let word = self.step3(&word);
        let word = self.step4(&word);
        let word = self.step5a(&word);
        self.step5b(&word)
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}
