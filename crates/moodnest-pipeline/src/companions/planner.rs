use moodnest_persist::ConversationTurn;
use std::fmt;
use std::sync::Arc;

use super::CompanionReply;
use crate::local::{choose, ReplyPicker};
use crate::remote::{RemoteReply, RemoteResponder};

const PLANNER_INSTRUCTION: &str = "You are a compassionate Mental Health Companion creating personalized daily plans.
Generate a brief, actionable plan (3-4 steps) based on the time of day and user's mood.
Your plans should be:
- Practical and easy to follow
- Supportive and encouraging
- Focused on mental well-being and self-care
- Formatted as a numbered list
Keep the tone warm and non-judgmental.";

const MORNING_ROUTINES: &[&str] = &[
    "1. Drink a glass of water.\n2. 5-minute stretching.\n3. Write down 3 things you are grateful for.",
    "1. Make your bed.\n2. 10-minute meditation.\n3. Healthy breakfast.",
    "1. Short walk outside.\n2. Review your goals for the day.\n3. Listen to uplifting music.",
];

const AFTERNOON_ROUTINES: &[&str] =
    &["1. Take a short break.\n2. Hydrate.\n3. Do a quick breathing exercise."];

const EVENING_ROUTINES: &[&str] = &[
    "1. Digital detox (no screens) for 1 hour before bed.\n2. Read a book.\n3. Reflect on what went well today.",
    "1. Warm bath or shower.\n2. Journaling your thoughts.\n3. Prepare clothes for tomorrow.",
    "1. Relaxation exercises.\n2. Listen to calming sounds.\n3. Sleep at a consistent time.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// 5-11 morning, 12-17 afternoon, everything else evening
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => TimeOfDay::Morning,
            12..=17 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }

    fn routines(&self) -> &'static [&'static str] {
        match self {
            TimeOfDay::Morning => MORNING_ROUTINES,
            TimeOfDay::Afternoon => AFTERNOON_ROUTINES,
            TimeOfDay::Evening => EVENING_ROUTINES,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds a short plan for the current part of the day
pub struct DailyPlanner {
    remote: Arc<dyn RemoteResponder>,
    picker: Arc<dyn ReplyPicker>,
}

impl DailyPlanner {
    pub fn new(remote: Arc<dyn RemoteResponder>, picker: Arc<dyn ReplyPicker>) -> Self {
        Self { remote, picker }
    }

    pub async fn plan(&self, mood: &str, recent_context: &[ConversationTurn], hour: u32) -> CompanionReply {
        let time_of_day = TimeOfDay::from_hour(hour);
        let prompt = build_prompt(time_of_day, mood, recent_context, hour);

        match self.remote.complete(PLANNER_INSTRUCTION, &prompt).await {
            RemoteReply::Reply(text) => CompanionReply::remote(text),
            RemoteReply::Unavailable(reason) => {
                tracing::info!(reason = %reason, time_of_day = %time_of_day, "Planner using template routine");
                let routine = choose(self.picker.as_ref(), time_of_day.routines());
                CompanionReply::local(fallback_plan(time_of_day, routine))
            }
        }
    }
}

fn fallback_plan(time_of_day: TimeOfDay, routine: &str) -> String {
    format!(
        "**{} Plan for You**\n\nBased on the time of day, here is a gentle plan:\n\n{}\n\n*Remember: Small steps make a big difference.*",
        time_of_day, routine
    )
}

fn build_prompt(time_of_day: TimeOfDay, mood: &str, recent_context: &[ConversationTurn], hour: u32) -> String {
    let context = recent_context
        .iter()
        .map(|turn| format!("{}: {}", turn.role.as_str(), turn.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Create a personalized {period} plan for someone who is feeling {mood}.
The current time is {hour}:00.

Recent Chat Context:
{context}

Provide 3-4 actionable steps that will help them feel better and take care of their mental health.
Format your response as a Markdown table:
**{title} Plan for You**

| Time | Activity | Details |
| :--- | :--- | :--- |
| [Time] | [Activity Name] | [Brief Description] |
...

*[Add an encouraging closing message]*",
        period = time_of_day.as_str().to_lowercase(),
        mood = mood,
        hour = hour,
        context = context,
        title = time_of_day,
    )
}
