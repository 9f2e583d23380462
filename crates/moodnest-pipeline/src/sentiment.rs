//! Lexicon-based sentiment scoring.
//!
//! Each sentiment word carries a polarity in [-1, 1] and a subjectivity in
//! [0, 1]. Modifiers adjust the word that follows them:
//!
//! - an intensifier directly before a word scales both values by its factor
//! - a negation within the two preceding words flips the polarity at half strength
//!
//! The text's score is the mean over every matched word.

use crate::types::Sentiment;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("better", 0.5, 0.5),
    ("best", 1.0, 0.3),
    ("fine", 0.4167, 0.5),
    ("okay", 0.5, 0.5),
    ("ok", 0.5, 0.5),
    ("calm", 0.3, 0.75),
    ("relaxed", 0.4, 0.7),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("wonderful", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("excited", 0.375, 0.75),
    ("hopeful", 0.5, 0.6),
    ("grateful", 0.6, 0.8),
    ("thankful", 0.5, 0.7),
    ("proud", 0.8, 1.0),
    ("peaceful", 0.5, 0.6),
    ("safe", 0.5, 0.5),
    ("nice", 0.6, 1.0),
    ("fun", 0.3, 0.2),
    ("beautiful", 0.85, 1.0),
    ("joy", 0.8, 0.9),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("positive", 0.227, 0.545),
    ("strong", 0.433, 0.733),
    ("motivated", 0.4, 0.6),
    ("rested", 0.3, 0.5),
    ("content", 0.4, 0.6),
    // negative
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("depressed", -0.7, 0.9),
    ("down", -0.156, 0.289),
    ("lonely", -0.5, 1.0),
    ("alone", -0.1, 0.4),
    ("bad", -0.7, 0.667),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("rough", -0.1, 0.4),
    ("hard", -0.292, 0.542),
    ("tough", -0.389, 0.833),
    ("tired", -0.4, 0.7),
    ("exhausted", -0.4, 0.7),
    ("stressed", -0.5, 0.8),
    ("stressful", -0.5, 0.8),
    ("anxious", -0.25, 0.75),
    ("worried", -0.4, 0.8),
    ("scared", -0.5, 0.9),
    ("afraid", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("upset", -0.5, 0.8),
    ("hopeless", -0.8, 0.9),
    ("worthless", -0.8, 0.9),
    ("miserable", -1.0, 1.0),
    ("overwhelmed", -0.5, 0.8),
    ("overwhelming", -0.4, 0.7),
    ("hurt", -0.3, 0.6),
    ("pain", -0.5, 0.7),
    ("painful", -0.7, 0.9),
    ("broken", -0.4, 0.6),
    ("empty", -0.1, 0.5),
    ("frustrated", -0.6, 0.9),
    ("annoyed", -0.4, 0.8),
    ("nervous", -0.3, 0.8),
    ("panic", -0.6, 0.9),
    ("crying", -0.4, 0.7),
    ("hate", -0.8, 0.9),
    ("sick", -0.714, 0.857),
    ("weak", -0.375, 0.625),
    ("boring", -1.0, 1.0),
    ("difficult", -0.5, 1.0),
    ("struggling", -0.4, 0.7),
    ("failed", -0.5, 0.3),
    ("wrong", -0.5, 0.9),
];

/// (word, factor)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.2),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("super", 1.3),
    ("totally", 1.3),
    ("completely", 1.4),
    ("quite", 1.1),
];

const NEGATIONS: &[&str] = &[
    "not", "never", "no", "don't", "can't", "cannot", "won't", "isn't", "aren't",
    "wasn't", "didn't", "doesn't", "hardly",
];

const NEGATION_FACTOR: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, Default)]
pub struct SentimentScorer;

impl SentimentScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score `text`; neutral when no lexicon word matches
    pub fn score(&self, text: &str) -> Sentiment {
        let tokens = tokenize(text);
        let mut matched = 0usize;
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;

        for (index, token) in tokens.iter().enumerate() {
            let Some((polarity, subjectivity)) = lookup(token) else {
                continue;
            };
            let (mut polarity, mut subjectivity) = (polarity, subjectivity);

            if let Some(factor) = index
                .checked_sub(1)
                .and_then(|prev| intensity(&tokens[prev]))
            {
                polarity = (polarity * factor).clamp(-1.0, 1.0);
                subjectivity = (subjectivity * factor).clamp(0.0, 1.0);
            }

            let window_start = index.saturating_sub(NEGATION_WINDOW);
            if tokens[window_start..index].iter().any(|t| is_negation(t)) {
                polarity *= NEGATION_FACTOR;
            }

            polarity_sum += polarity;
            subjectivity_sum += subjectivity;
            matched += 1;
        }

        if matched == 0 {
            return Sentiment::NEUTRAL;
        }

        let count = matched as f64;
        Sentiment::new(polarity_sum / count, subjectivity_sum / count)
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace('\u{2019}', "'")
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

fn lookup(word: &str) -> Option<(f64, f64)> {
    LEXICON
        .iter()
        .find(|(entry, _, _)| *entry == word)
        .map(|(_, polarity, subjectivity)| (*polarity, *subjectivity))
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(entry, _)| *entry == word)
        .map(|(_, factor)| *factor)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word)
}
