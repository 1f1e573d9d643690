//! Events derived from inbound user text

/// Phrase a user sends to politely end the conversation
const DECLINE_PHRASE: &str = "спасибо я обдумаю ваше предложение";

/// Accepted spellings of the menu command
const MENU_KEYWORDS: [&str; 2] = ["меню", "menu"];

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// User declined politely; acknowledged without touching the stage
    Decline,
    /// Explicit return to the main menu
    ShowMenu,
    /// Any other text, interpreted by the current stage
    Answer { text: String },
}

impl Event {
    /// Classify already-normalized text. Global commands take precedence
    /// over stage-specific answers.
    pub fn from_text(text: &str) -> Self {
        if text.contains(DECLINE_PHRASE) {
            Event::Decline
        } else if MENU_KEYWORDS.contains(&text) {
            Event::ShowMenu
        } else {
            Event::Answer {
                text: text.to_string(),
            }
        }
    }
}

/// Trim and lowercase a raw message body
pub fn normalize_text(body: &str) -> String {
    body.trim().to_lowercase()
}
