use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

use crate::crisis::{CrisisDetector, CRISIS_MESSAGE};

/// Generic empathetic replies used when no model is reachable
pub const GENERIC_REPLIES: &[&str] = &[
    "I'm here for you. Tell me more about how you're feeling.",
    "It sounds like you're going through a lot. I'm listening.",
    "Take a deep breath. You are not alone in this.",
    "I understand. Sometimes things can feel overwhelming.",
    "I'm sorry I can't connect to my main brain right now, but I'm still here to listen.",
    "Sending you virtual hugs. How can I support you today?",
    "Remember to be kind to yourself. You're doing your best.",
    "That sounds tough. Do you want to talk about it?",
    "I'm listening. Please go on.",
    "Your feelings are valid. I'm here.",
];

/// Source of indices for picking from a fixed template pool
pub trait ReplyPicker: Send + Sync {
    /// Index in `0..len`; `len` is always non-zero
    fn pick(&self, len: usize) -> usize;
}

/// Pick an entry from a non-empty pool
pub fn choose<'a>(picker: &dyn ReplyPicker, pool: &[&'a str]) -> &'a str {
    pool[picker.pick(pool.len()) % pool.len()]
}

/// Uniform choice using the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngPicker;

impl ReplyPicker for ThreadRngPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Uniform choice from a seeded generator, reproducible across runs
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ReplyPicker for SeededPicker {
    fn pick(&self, len: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..len)
    }
}

/// Always the same index, wrapped to the pool length
#[derive(Debug, Clone, Copy)]
pub struct FixedPicker(pub usize);

impl ReplyPicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

/// Reply source with no network or storage dependency
///
/// Never fails. Crisis text always yields [`CRISIS_MESSAGE`].
#[derive(Clone)]
pub struct LocalResponder {
    detector: CrisisDetector,
    picker: Arc<dyn ReplyPicker>,
}

impl LocalResponder {
    pub fn new(picker: Arc<dyn ReplyPicker>) -> Self {
        Self {
            detector: CrisisDetector::new(),
            picker,
        }
    }

    pub fn respond(&self, text: &str) -> String {
        if self.detector.detect(text) {
            tracing::warn!("Crisis indicator detected, returning crisis message");
            return CRISIS_MESSAGE.to_string();
        }
        choose(self.picker.as_ref(), GENERIC_REPLIES).to_string()
    }

    pub fn detector(&self) -> &CrisisDetector {
        &self.detector
    }
}

impl Default for LocalResponder {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRngPicker))
    }
}
