//! Keyword-based self-harm signal check.
//!
//! Plain case-insensitive substring matching. It over-triggers on unrelated
//! words that contain an indicator ("diet", "skill") and misses paraphrases.

/// Fixed self-harm indicator phrases, lowercase
pub const CRISIS_KEYWORDS: &[&str] = &["die", "kill", "suicide", "hurt myself", "end it"];

/// Fixed reply returned whenever a crisis indicator is detected on the local path
pub const CRISIS_MESSAGE: &str = "I'm very concerned about what you're saying. Please reach out for help immediately. \nYou are not alone. \n- Suicide & Crisis Lifeline: 988 (US)\n- International resources: findahelpline.com\nPlease talk to a professional or someone you trust right now.";

/// Crisis detector over the fixed vocabulary
#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisDetector;

impl CrisisDetector {
    pub fn new() -> Self {
        Self
    }

    /// True if `text` contains any indicator phrase, ignoring case
    pub fn detect(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        CRISIS_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_each_keyword() {
        let detector = CrisisDetector::new();
        for keyword in CRISIS_KEYWORDS {
            assert!(detector.detect(&format!("lately I {} a lot", keyword)), "{}", keyword);
        }
    }

    #[test]
    fn test_case_and_position_insensitive() {
        let detector = CrisisDetector::new();
        assert!(detector.detect("SUICIDE"));
        assert!(detector.detect("I just want to End It"));
        assert!(detector.detect("sometimes i want to HURT MYSELF."));
    }

    #[test]
    fn test_calm_text_passes() {
        let detector = CrisisDetector::new();
        assert!(!detector.detect("had a rough day"));
        assert!(!detector.detect(""));
    }

    #[test]
    fn test_substring_over_triggers() {
        // Known limitation of plain substring matching
        let detector = CrisisDetector::new();
        assert!(detector.detect("I started a new diet"));
        assert!(detector.detect("learning a new skill"));
    }

    #[test]
    fn test_crisis_message_mentions_hotline() {
        assert!(CRISIS_MESSAGE.contains("988"));
        assert!(CRISIS_MESSAGE.contains("findahelpline.com"));
        assert!(CRISIS_MESSAGE.ends_with("someone you trust right now."));
    }
}
