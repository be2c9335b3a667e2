//! Porter stemming.
//!
//! This is Porter's 1980 suffix-stripping algorithm with the extensions NLTK
//! ships as its default `PorterStemmer` mode, so canonical texts line up with
//! corpora stemmed by that toolchain:
//!
//! - a small pool of irregular forms (`dying` → `die`, `skies` → `sky`, ...)
//! - words of two characters or fewer are returned unchanged
//! - `ies`/`ied` on four-letter words keep the `ie` (`dies` → `die`)
//! - `alli` is folded before the rest of step 2, `fulli` and `logi` are added
//! - `y` → `i` only after a consonant, and never on a one-letter stem
//!
//! The algorithm works on `char`s, so non-ASCII letters are simply treated as
//! consonants; it never panics on arbitrary input.
//!
//! ```rust
//! use canonical::stem;
//!
//! assert_eq!(stem("caresses"), "caress");
//! assert_eq!(stem("running"), "run");
//! assert_eq!(stem("relational"), "relat");
//! ```

/// When a suffix rule is allowed to fire, evaluated against the stem left
/// after removing the suffix.
#[derive(Debug, Clone, Copy)]
enum Condition {
    Always,
    /// m(stem) > 0
    PositiveMeasure,
    /// m(stem) > 1
    MeasureAboveOne,
    /// m(stem) > 1 and the stem ends in `s` or `t`
    IonStem,
    /// the stem is longer than one letter and ends in a consonant
    ConsonantBeforeY,
    /// m(stem + "l") > 0, i.e. the `l` of `logi` stays with the stem
    LogiStem,
    /// m(stem + "l") > 1, for the `ll` → `l` rule
    DoubleLStem,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    suffix: &'static str,
    replacement: &'static str,
    condition: Condition,
}

const fn rule(suffix: &'static str, replacement: &'static str, condition: Condition) -> Rule {
    Rule {
        suffix,
        replacement,
        condition,
    }
}

const STEP1A: &[Rule] = &[
    rule("sses", "ss", Condition::Always),
    rule("ies", "i", Condition::Always),
    rule("ss", "ss", Condition::Always),
    rule("s", "", Condition::Always),
];

const STEP1C: &[Rule] = &[rule("y", "i", Condition::ConsonantBeforeY)];

const STEP2: &[Rule] = &[
    rule("ational", "ate", Condition::PositiveMeasure),
    rule("tional", "tion", Condition::PositiveMeasure),
    rule("enci", "ence", Condition::PositiveMeasure),
    rule("anci", "ance", Condition::PositiveMeasure),
    rule("izer", "ize", Condition::PositiveMeasure),
    rule("bli", "ble", Condition::PositiveMeasure),
    rule("alli", "al", Condition::PositiveMeasure),
    rule("entli", "ent", Condition::PositiveMeasure),
    rule("eli", "e", Condition::PositiveMeasure),
    rule("ousli", "ous", Condition::PositiveMeasure),
    rule("ization", "ize", Condition::PositiveMeasure),
    rule("ation", "ate", Condition::PositiveMeasure),
    rule("ator", "ate", Condition::PositiveMeasure),
    rule("alism", "al", Condition::PositiveMeasure),
    rule("iveness", "ive", Condition::PositiveMeasure),
    rule("fulness", "ful", Condition::PositiveMeasure),
    rule("ousness", "ous", Condition::PositiveMeasure),
    rule("aliti", "al", Condition::PositiveMeasure),
    rule("iviti", "ive", Condition::PositiveMeasure),
    rule("biliti", "ble", Condition::PositiveMeasure),
    rule("fulli", "ful", Condition::PositiveMeasure),
    rule("logi", "log", Condition::LogiStem),
];

const STEP3: &[Rule] = &[
    rule("icate", "ic", Condition::PositiveMeasure),
    rule("ative", "", Condition::PositiveMeasure),
    rule("alize", "al", Condition::PositiveMeasure),
    rule("iciti", "ic", Condition::PositiveMeasure),
    rule("ical", "ic", Condition::PositiveMeasure),
    rule("ful", "", Condition::PositiveMeasure),
    rule("ness", "", Condition::PositiveMeasure),
];

const STEP4: &[Rule] = &[
    rule("al", "", Condition::MeasureAboveOne),
    rule("ance", "", Condition::MeasureAboveOne),
    rule("ence", "", Condition::MeasureAboveOne),
    rule("er", "", Condition::MeasureAboveOne),
    rule("ic", "", Condition::MeasureAboveOne),
    rule("able", "", Condition::MeasureAboveOne),
    rule("ible", "", Condition::MeasureAboveOne),
    rule("ant", "", Condition::MeasureAboveOne),
    rule("ement", "", Condition::MeasureAboveOne),
    rule("ment", "", Condition::MeasureAboveOne),
    rule("ent", "", Condition::MeasureAboveOne),
    rule("ion", "", Condition::IonStem),
    rule("ou", "", Condition::MeasureAboveOne),
    rule("ism", "", Condition::MeasureAboveOne),
    rule("ate", "", Condition::MeasureAboveOne),
    rule("iti", "", Condition::MeasureAboveOne),
    rule("ous", "", Condition::MeasureAboveOne),
    rule("ive", "", Condition::MeasureAboveOne),
    rule("ize", "", Condition::MeasureAboveOne),
];

const STEP5B: &[Rule] = &[rule("ll", "l", Condition::DoubleLStem)];

/// Irregular forms that bypass the suffix rules entirely.
fn irregular_form(word: &str) -> Option<&'static str> {
    let root = match word {
        "sky" | "skies" => "sky",
        "dying" => "die",
        "lying" => "lie",
        "tying" => "tie",
        "news" => "news",
        "inning" | "innings" => "inning",
        "outing" | "outings" => "outing",
        "canning" | "cannings" => "canning",
        "howe" => "howe",
        "proceed" => "proceed",
        "exceed" => "exceed",
        "succeed" => "succeed",
        _ => return None,
    };
    Some(root)
}

/// Reduce a single word to its Porter stem.
///
/// The word is lowercased first. Tokens are expected to be single words with
/// no surrounding whitespace.
pub fn stem(word: &str) -> String {
    if let Some(root) = irregular_form(word) {
        return root.to_string();
    }

    let lower = word.to_lowercase();
    if word.chars().count() <= 2 {
        return lower;
    }
    let chars: Vec<char> = lower.chars().collect();

    let chars = step1a(chars);
    let chars = step1b(chars);
    let chars = apply_rules(chars, STEP1C);
    let chars = step2(chars);
    let chars = apply_rules(chars, STEP3);
    let chars = apply_rules(chars, STEP4);
    let chars = step5a(chars);
    let chars = apply_rules(chars, STEP5B);

    chars.into_iter().collect()
}

/// Consonant flags for each char, left to right. `y` is a consonant at the
/// start of a word and after a vowel, a vowel after a consonant.
fn consonants(word: &[char]) -> impl Iterator<Item = bool> + '_ {
    word.iter().scan(true, |after_vowel, &c| {
        let consonant = match c {
            'a' | 'e' | 'i' | 'o' | 'u' => false,
            'y' => *after_vowel,
            _ => true,
        };
        *after_vowel = !consonant;
        Some(consonant)
    })
}

fn ends_in_consonant(word: &[char]) -> bool {
    consonants(word).last().unwrap_or(false)
}

/// Porter's m: the number of vowel-run → consonant-run transitions.
fn measure(stem: &[char]) -> usize {
    let mut m = 0;
    let mut prev_vowel = false;
    for consonant in consonants(stem) {
        if consonant && prev_vowel {
            m += 1;
        }
        prev_vowel = !consonant;
    }
    m
}

fn measure_with_trailing_l(stem: &[char]) -> usize {
    let mut extended = Vec::with_capacity(stem.len() + 1);
    extended.extend_from_slice(stem);
    extended.push('l');
    measure(&extended)
}

fn contains_vowel(stem: &[char]) -> bool {
    consonants(stem).any(|consonant| !consonant)
}

fn ends_double_consonant(word: &[char]) -> bool {
    let n = word.len();
    n >= 2 && word[n - 1] == word[n - 2] && ends_in_consonant(word)
}

/// `*o`: consonant-vowel-consonant where the last consonant is not w, x or y.
/// Two-letter vowel-consonant words also count.
fn ends_cvc(word: &[char]) -> bool {
    let tail: Vec<bool> = consonants(word).skip(word.len().saturating_sub(3)).collect();
    match tail.as_slice() {
        [true, false, true] => !matches!(word.last(), Some('w' | 'x' | 'y')),
        [false, true] => true,
        _ => false,
    }
}

fn ends_with(word: &[char], suffix: &str) -> bool {
    let n = suffix.len();
    word.len() >= n && word[word.len() - n..].iter().copied().eq(suffix.chars())
}

fn replace_tail(mut word: Vec<char>, cut: usize, replacement: &str) -> Vec<char> {
    word.truncate(cut);
    word.extend(replacement.chars());
    word
}

fn holds(condition: Condition, stem: &[char]) -> bool {
    match condition {
        Condition::Always => true,
        Condition::PositiveMeasure => measure(stem) > 0,
        Condition::MeasureAboveOne => measure(stem) > 1,
        Condition::IonStem => measure(stem) > 1 && matches!(stem.last(), Some('s' | 't')),
        Condition::ConsonantBeforeY => stem.len() > 1 && ends_in_consonant(stem),
        Condition::LogiStem => measure_with_trailing_l(stem) > 0,
        Condition::DoubleLStem => measure_with_trailing_l(stem) > 1,
    }
}

/// Fire the first rule whose suffix matches. A matching suffix whose
/// condition fails stops the scan and leaves the word untouched.
fn apply_rules(word: Vec<char>, rules: &[Rule]) -> Vec<char> {
    for rule in rules {
        if ends_with(&word, rule.suffix) {
            let cut = word.len() - rule.suffix.len();
            if holds(rule.condition, &word[..cut]) {
                return replace_tail(word, cut, rule.replacement);
            }
            return word;
        }
    }
    word
}

fn step1a(word: Vec<char>) -> Vec<char> {
    if word.len() == 4 && ends_with(&word, "ies") {
        return replace_tail(word, 1, "ie");
    }
    apply_rules(word, STEP1A)
}

fn step1b(word: Vec<char>) -> Vec<char> {
    let n = word.len();
    if ends_with(&word, "ied") {
        let replacement = if n == 4 { "ie" } else { "i" };
        return replace_tail(word, n - 3, replacement);
    }

    if ends_with(&word, "eed") {
        if measure(&word[..n - 3]) > 0 {
            return replace_tail(word, n - 3, "ee");
        }
        return word;
    }

    let cut = if ends_with(&word, "ed") && contains_vowel(&word[..n - 2]) {
        n - 2
    } else if ends_with(&word, "ing") && contains_vowel(&word[..n - 3]) {
        n - 3
    } else {
        return word;
    };

    let mut stem = word;
    stem.truncate(cut);
    let n = stem.len();

    if ends_with(&stem, "at") {
        return replace_tail(stem, n, "e");
    }
    if ends_with(&stem, "bl") {
        return replace_tail(stem, n, "e");
    }
    if ends_with(&stem, "iz") {
        return replace_tail(stem, n, "e");
    }
    if ends_double_consonant(&stem) {
        if !matches!(stem[n - 1], 'l' | 's' | 'z') {
            stem.pop();
        }
        return stem;
    }
    if measure(&stem) == 1 && ends_cvc(&stem) {
        stem.push('e');
    }
    stem
}

fn step2(word: Vec<char>) -> Vec<char> {
    let n = word.len();
    if ends_with(&word, "alli") && measure(&word[..n - 4]) > 0 {
        return step2(replace_tail(word, n - 4, "al"));
    }
    apply_rules(word, STEP2)
}

fn step5a(mut word: Vec<char>) -> Vec<char> {
    if ends_with(&word, "e") {
        let stem = &word[..word.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            word.pop();
        }
    }
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn measure_matches_porter_examples() {
        for word in ["tr", "ee", "tree", "y", "by"] {
            assert_eq!(measure(&chars(word)), 0, "{word}");
        }
        for word in ["trouble", "oats", "trees", "ivy"] {
            assert_eq!(measure(&chars(word)), 1, "{word}");
        }
        for word in ["troubles", "private", "oaten", "orrery"] {
            assert_eq!(measure(&chars(word)), 2, "{word}");
        }
    }

    #[test]
    fn y_after_vowel_is_consonant() {
        let toy: Vec<bool> = consonants(&chars("toy")).collect();
        assert_eq!(toy, [true, false, true]);
        let syzygy: Vec<bool> = consonants(&chars("syzygy")).collect();
        assert_eq!(syzygy, [true, false, true, false, true, false]);
        let yyy: Vec<bool> = consonants(&chars("yyyy")).collect();
        assert_eq!(yyy, [true, false, true, false]);
    }

    #[test]
    fn long_y_runs_stem_in_linear_time() {
        let word = format!("{}ing", "y".repeat(40_000));
        let started = std::time::Instant::now();
        let stemmed = stem(&word);
        let elapsed = started.elapsed();

        assert_eq!(stemmed, format!("{}i", "y".repeat(39_999)));
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "stemming a 40k-char token took {elapsed:?}"
        );
        // Odd-length runs double the final consonant `y` and drop one.
        assert_eq!(stem(&format!("{}ing", "y".repeat(11))), format!("{}i", "y".repeat(9)));
    }

    #[test]
    fn cvc_excludes_w_x_y() {
        assert!(ends_cvc(&chars("hop")));
        assert!(!ends_cvc(&chars("snow")));
        assert!(!ends_cvc(&chars("box")));
        assert!(!ends_cvc(&chars("tray")));
        assert!(ends_cvc(&chars("at")));
    }

    #[test]
    fn nltk_reference_vocabulary() {
        let words = [
            ("caresses", "caress"),
            ("flies", "fli"),
            ("dies", "die"),
            ("mules", "mule"),
            ("denied", "deni"),
            ("died", "die"),
            ("agreed", "agre"),
            ("owned", "own"),
            ("humbled", "humbl"),
            ("sized", "size"),
            ("meeting", "meet"),
            ("stating", "state"),
            ("siezing", "siez"),
            ("itemization", "item"),
            ("sensational", "sensat"),
            ("traditional", "tradit"),
            ("reference", "refer"),
            ("colonizer", "colon"),
            ("plotted", "plot"),
        ];
        for (word, expected) in words {
            assert_eq!(stem(word), expected, "stem({word})");
        }
    }

    #[test]
    fn step1_examples() {
        let words = [
            ("ponies", "poni"),
            ("ties", "tie"),
            ("caress", "caress"),
            ("cats", "cat"),
            ("feed", "feed"),
            ("plastered", "plaster"),
            ("bled", "bled"),
            ("motoring", "motor"),
            ("sing", "sing"),
            ("conflated", "conflat"),
            ("troubled", "troubl"),
            ("hopping", "hop"),
            ("tanned", "tan"),
            ("falling", "fall"),
            ("hissing", "hiss"),
            ("fizzed", "fizz"),
            ("failing", "fail"),
            ("filing", "file"),
            ("happy", "happi"),
            ("runs", "run"),
            ("running", "run"),
        ];
        for (word, expected) in words {
            assert_eq!(stem(word), expected, "stem({word})");
        }
    }

    #[test]
    fn irregular_forms_bypass_rules() {
        assert_eq!(stem("dying"), "die");
        assert_eq!(stem("lying"), "lie");
        assert_eq!(stem("skies"), "sky");
        assert_eq!(stem("news"), "news");
        assert_eq!(stem("innings"), "inning");
        assert_eq!(stem("succeed"), "succeed");
    }

    #[test]
    fn short_words_unchanged() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("as"), "as");
        assert_eq!(stem("a"), "a");
        assert_eq!(stem(""), "");
    }

    #[test]
    fn uppercase_input_is_lowercased() {
        assert_eq!(stem("Runs"), "run");
    }

    #[test]
    fn non_ascii_input_does_not_panic() {
        assert_eq!(stem("café"), "café");
        assert_eq!(stem("naïve"), "naïv");
        assert_eq!(stem("日本語"), "日本語");
    }

    #[test]
    fn digits_and_underscores_pass_through() {
        assert_eq!(stem("2024"), "2024");
        assert_eq!(stem("snake_case"), "snake_cas");
    }
}
