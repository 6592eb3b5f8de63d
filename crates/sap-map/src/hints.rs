//! Design hints read from free-text endpoint descriptions.
//!
//! Explicit endpoint flags always take precedence; these only add signal
//! when the design document states something in prose.

use std::sync::LazyLock;

use regex::Regex;

/// "three arms", "4 treatment groups", "two-arm".
static ARM_COUNT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(\d+|two|three|four|five|six|seven|eight)[\s-]+(?:(?:treatment|dose|parallel|study)\s+)?(?:arms?|groups?)\b",
    )
    .expect("Invalid arm count regex")
});

/// Phrases implying more than two compared groups without a count.
static MULTI_ARM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:dose[\s-](?:ranging|finding)|multiple\s+dose(?:s|\s+levels)|multi-?arm)\b")
        .expect("Invalid multi-arm regex")
});

static NON_NORMAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:non-?normal(?:ly\s+distributed)?|not\s+normally\s+distributed|skewed|heavy-tailed|non-?parametric)\b",
    )
    .expect("Invalid non-normality regex")
});

static REPEATED_MEASURES_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:over\s+time|repeated(?:ly)?|longitudinal(?:ly)?|by\s+visit|at\s+each\s+visit|each\s+scheduled\s+visit)\b",
    )
    .expect("Invalid repeated measures regex")
});

static OVERDISPERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bover-?dispers(?:ed|ion)\b").expect("Invalid overdispersion regex")
});

/// Words that cancel a hint when they shortly precede it in the same clause.
const NEGATIONS: &[&str] = &["not", "no", "non", "without", "never"];

/// How many words before a hint are searched for a negation.
const NEGATION_WINDOW: usize = 3;

fn word_to_number(word: &str) -> Option<u32> {
    match word.to_lowercase().as_str() {
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        digits => digits.parse().ok(),
    }
}

/// True when the regex matches at least once outside a negated clause.
fn mentions(regex: &Regex, text: &str) -> bool {
    regex
        .find_iter(text)
        .any(|found| !is_negated(&text[..found.start()]))
}

/// "not a repeated measures endpoint", "no overdispersion", "non-skewed".
fn is_negated(preceding: &str) -> bool {
    let clause = preceding
        .rsplit(['.', ';', ',', ':'])
        .next()
        .unwrap_or_default();
    if clause.to_lowercase().ends_with("non-") {
        return true;
    }
    clause
        .split_whitespace()
        .rev()
        .take(NEGATION_WINDOW)
        .map(|word| word.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase())
        .any(|word| NEGATIONS.contains(&word.as_str()))
}

/// Largest arm count stated in the description, or 3 when a multi-arm
/// phrase is present without a number.
pub fn implied_arm_count(description: &str) -> Option<u32> {
    let stated = ARM_COUNT_REGEX
        .captures_iter(description)
        .filter_map(|caps| caps.get(1).and_then(|m| word_to_number(m.as_str())))
        .max();
    match stated {
        Some(count) => Some(count),
        None if mentions(&MULTI_ARM_REGEX, description) => Some(3),
        None => None,
    }
}

pub fn mentions_non_normality(description: &str) -> bool {
    mentions(&NON_NORMAL_REGEX, description)
}

pub fn mentions_repeated_measures(description: &str) -> bool {
    mentions(&REPEATED_MEASURES_REGEX, description)
}

pub fn mentions_overdispersion(description: &str) -> bool {
    mentions(&OVERDISPERSION_REGEX, description)
}
