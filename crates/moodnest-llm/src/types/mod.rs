pub mod content;
pub mod message;
pub mod safety;

pub use content::{Content, ContentPart};
pub use message::Message;
pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting};
