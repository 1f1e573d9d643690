//! Pure state transition function
//!
//! Given the current state and an event, decides the next state and the
//! effects to run. No I/O happens here; the runtime executes the effects.

use super::state::{ConsultFormat, Goal};
use super::{ConvContext, ConvState, Effect, Event};
use crate::crm::Lead;
use crate::replies::Reply;

/// Menu keyword that starts the questionnaire
const BOOKING_KEYWORD: &str = "записаться";
const FAQ_KEYWORDS: [&str; 2] = ["вопросы", "faq"];
const SERVICES_KEYWORD: &str = "услуги";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Stay in `state` and send `reply`
    fn stay(state: &ConvState, reply: Reply) -> Self {
        Self::new(state.clone()).with_effect(Effect::reply(reply))
    }
}

/// Pure transition function
///
/// Global commands (decline, menu) are handled before the stage is looked at.
pub fn transition(state: &ConvState, context: &ConvContext, event: Event) -> TransitionResult {
    match (state, event) {
        // Decline leaves the questionnaire where it was
        (_, Event::Decline) => TransitionResult::stay(state, Reply::DeclineAck),

        (_, Event::ShowMenu) => show_menu(),

        (ConvState::Menu, Event::Answer { text }) => menu_choice(&text),

        (ConvState::AwaitName, Event::Answer { text }) => {
            let name = title_case(&text);
            TransitionResult::new(ConvState::AwaitCity { name: name.clone() })
                .with_effect(Effect::reply(Reply::AskCity { name }))
        }

        (ConvState::AwaitCity { name }, Event::Answer { text }) => {
            TransitionResult::new(ConvState::AwaitFormat {
                name: name.clone(),
                city: title_case(&text),
            })
            .with_effect(Effect::reply(Reply::AskFormat))
        }

        (ConvState::AwaitFormat { name, city }, Event::Answer { text }) => {
            match ConsultFormat::from_choice(&text) {
                Some(format) => TransitionResult::new(ConvState::AwaitGoal {
                    name: name.clone(),
                    city: city.clone(),
                    format,
                })
                .with_effect(Effect::reply(Reply::AskGoal)),
                None => TransitionResult::stay(state, Reply::FormatInvalid),
            }
        }

        (ConvState::AwaitGoal { name, city, format }, Event::Answer { text }) => {
            match Goal::from_code(&text) {
                Some(goal) => complete_questionnaire(context, name, city, *format, goal),
                None => TransitionResult::stay(state, Reply::GoalInvalid),
            }
        }
    }
}

fn show_menu() -> TransitionResult {
    TransitionResult::new(ConvState::Menu).with_effect(Effect::reply(Reply::Menu))
}

fn menu_choice(text: &str) -> TransitionResult {
    if text == "1" || text.contains(BOOKING_KEYWORD) {
        // Entering the questionnaire always starts from empty answers
        TransitionResult::new(ConvState::AwaitName).with_effect(Effect::reply(Reply::AskName))
    } else if text == "2" || FAQ_KEYWORDS.iter().any(|k| text.contains(k)) {
        TransitionResult::new(ConvState::Menu).with_effect(Effect::reply(Reply::Faq))
    } else if text == "3" || text.contains(SERVICES_KEYWORD) {
        TransitionResult::new(ConvState::Menu).with_effect(Effect::reply(Reply::Services))
    } else {
        show_menu()
    }
}

/// Lead completion: submit, confirm, then back to an empty menu session.
/// The confirmation is sent whether or not the CRM accepts the lead.
fn complete_questionnaire(
    context: &ConvContext,
    name: &str,
    city: &str,
    format: ConsultFormat,
    goal: Goal,
) -> TransitionResult {
    let lead = Lead {
        name: name.to_string(),
        city: city.to_string(),
        format,
        goal: goal.code().to_string(),
        phone: context.phone.clone(),
    };

    TransitionResult::new(ConvState::Menu)
        .with_effect(Effect::submit_lead(lead))
        .with_effect(Effect::reply(Reply::Confirmation {
            name: name.to_string(),
            city: city.to_string(),
            format,
            goal,
        }))
}

/// Capitalize the first letter of every word and lowercase the rest.
/// Words are runs of cased letters; digits, punctuation and caseless
/// scripts all end a word. A letter whose uppercase form is several
/// characters ("ß") keeps only the first one uppercase.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if !cased {
            out.push(c);
        } else if in_word {
            out.extend(c.to_lowercase());
        } else {
            let mut upper = c.to_uppercase();
            if let Some(first) = upper.next() {
                out.push(first);
                out.extend(upper.flat_map(char::to_lowercase));
            }
        }
        in_word = cased;
    }
    out
}
