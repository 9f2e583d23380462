use std::fmt;
use std::sync::Arc;

use super::CompanionReply;
use crate::local::{choose, ReplyPicker};
use crate::remote::{RemoteReply, RemoteResponder};

const COPING_INSTRUCTION: &str = "You are a compassionate Mental Health Companion providing evidence-based coping strategies.
Generate personalized coping strategies based on the user's emotional state.
Your strategies should be:
- Evidence-based and practical
- Easy to implement immediately
- Supportive and non-judgmental
- Brief but actionable
Focus on techniques like breathing exercises, grounding, mindfulness, gentle movement, or self-compassion.";

const ANXIETY_STRATEGIES: &[&str] = &[
    "**Box Breathing**: Inhale for 4s, hold for 4s, exhale for 4s, hold for 4s. Repeat 4 times.",
    "**5-4-3-2-1 Grounding**: Acknowledge 5 things you see, 4 you can touch, 3 you hear, 2 you can smell, 1 you can taste.",
    "**Progressive Muscle Relaxation**: Tense and then relax each muscle group starting from your toes up to your head.",
];

const SADNESS_STRATEGIES: &[&str] = &[
    "**Gentle Movement**: Go for a short walk or do some light stretching.",
    "**Comfort**: Wrap yourself in a warm blanket and drink a warm beverage.",
    "**Expression**: Write down your feelings in a journal or draw them out.",
];

const STRESS_STRATEGIES: &[&str] = &[
    "**Time Blocking**: Focus on just one small task for 5 minutes.",
    "**Nature Break**: Step outside or look at a picture of nature.",
    "**Music**: Listen to your favorite calming playlist.",
];

const GENERAL_STRATEGIES: &[&str] = &[
    "**Mindfulness**: Take a moment to just 'be' without doing anything.",
    "**Hydration**: Drink a glass of water.",
    "**Gratitude**: Think of one small thing that made you smile today.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopingCategory {
    Anxiety,
    Sadness,
    Stress,
    General,
}

impl CopingCategory {
    /// First matching keyword group wins; anxiety is checked before sadness before stress
    pub fn from_mood(mood: &str) -> Self {
        let mood = mood.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| mood.contains(w));

        if mentions(&["anxious", "worry", "panic", "scared"]) {
            CopingCategory::Anxiety
        } else if mentions(&["sad", "depressed", "down", "cry"]) {
            CopingCategory::Sadness
        } else if mentions(&["stress", "overwhelmed", "busy", "tired"]) {
            CopingCategory::Stress
        } else {
            CopingCategory::General
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CopingCategory::Anxiety => "Anxiety",
            CopingCategory::Sadness => "Sadness",
            CopingCategory::Stress => "Stress",
            CopingCategory::General => "General",
        }
    }

    fn strategies(&self) -> &'static [&'static str] {
        match self {
            CopingCategory::Anxiety => ANXIETY_STRATEGIES,
            CopingCategory::Sadness => SADNESS_STRATEGIES,
            CopingCategory::Stress => STRESS_STRATEGIES,
            CopingCategory::General => GENERAL_STRATEGIES,
        }
    }
}

impl fmt::Display for CopingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggests one coping technique matched to a mood description
pub struct CopingCoach {
    remote: Arc<dyn RemoteResponder>,
    picker: Arc<dyn ReplyPicker>,
}

impl CopingCoach {
    pub fn new(remote: Arc<dyn RemoteResponder>, picker: Arc<dyn ReplyPicker>) -> Self {
        Self { remote, picker }
    }

    pub async fn strategy(&self, mood: &str) -> CompanionReply {
        let category = CopingCategory::from_mood(mood);
        let prompt = build_prompt(category, &mood.to_lowercase());

        match self.remote.complete(COPING_INSTRUCTION, &prompt).await {
            RemoteReply::Reply(text) => CompanionReply::remote(text),
            RemoteReply::Unavailable(reason) => {
                tracing::info!(reason = %reason, category = %category, "Coping coach using template strategy");
                let strategy = choose(self.picker.as_ref(), category.strategies());
                CompanionReply::local(format!("**Coping Strategy ({})**\n\n{}", category, strategy))
            }
        }
    }
}

fn build_prompt(category: CopingCategory, mood: &str) -> String {
    format!(
        "Create a personalized coping strategy for someone experiencing {lower}.
The user's mood description: \"{mood}\"

Provide ONE specific, actionable coping technique they can use right now.
Format your response as:
### 🌿 Coping Strategy: {title}

> *[A brief, calming quote or thought related to the strategy]*

**Strategy Name**

[Description of the strategy]

**Steps to Practice:**
* [Step 1]
* [Step 2]
* [Step 3]

*[Optional: Why this helps]*",
        lower = category.as_str().to_lowercase(),
        mood = mood,
        title = category,
    )
}
