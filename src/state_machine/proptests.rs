//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::replies::Reply;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ConvContext {
    ConvContext::new("+491234")
}

fn lead_count(result: &TransitionResult) -> usize {
    result
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::SubmitLead { .. }))
        .count()
}

fn reply_count(result: &TransitionResult) -> usize {
    result
        .effects
        .iter()
        .filter(|e| matches!(e, Effect::SendReply { .. }))
        .count()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_word() -> impl Strategy<Value = String> {
    "[a-zа-я]{1,12}"
}

fn arb_format() -> impl Strategy<Value = ConsultFormat> {
    prop_oneof![Just(ConsultFormat::Online), Just(ConsultFormat::InPerson)]
}

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![
        Just(ConvState::Menu),
        Just(ConvState::AwaitName),
        arb_word().prop_map(|name| ConvState::AwaitCity { name }),
        (arb_word(), arb_word()).prop_map(|(name, city)| ConvState::AwaitFormat { name, city }),
        (arb_word(), arb_word(), arb_format())
            .prop_map(|(name, city, format)| ConvState::AwaitGoal { name, city, format }),
    ]
}

/// Normalized user text: digits, words, and the command keywords
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,2}",
        arb_word(),
        Just("меню".to_string()),
        Just("menu".to_string()),
        Just("записаться".to_string()),
        Just("faq".to_string()),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn every_transition_sends_exactly_one_reply(state in arb_state(), text in arb_text()) {
        let result = transition(&state, &test_context(), Event::from_text(&text));
        prop_assert_eq!(reply_count(&result), 1);
    }

    #[test]
    fn menu_keyword_always_returns_to_menu(state in arb_state()) {
        for keyword in ["меню", "menu"] {
            let result = transition(&state, &test_context(), Event::from_text(keyword));
            prop_assert_eq!(&result.new_state, &ConvState::Menu);
            prop_assert!(result.new_state.data().is_empty());
            prop_assert_eq!(
                &result.effects,
                &vec![Effect::SendReply { reply: Reply::Menu }]
            );
        }
    }

    #[test]
    fn decline_never_changes_state(state in arb_state(), prefix in "[a-z ]{0,10}") {
        let text = format!("{prefix}спасибо я обдумаю ваше предложение");
        let result = transition(&state, &test_context(), Event::from_text(&text));
        prop_assert_eq!(&result.new_state, &state);
        prop_assert_eq!(lead_count(&result), 0);
    }

    #[test]
    fn leads_only_come_from_valid_goal(state in arb_state(), text in arb_text()) {
        let result = transition(&state, &test_context(), Event::from_text(&text));
        let expected = matches!(state, ConvState::AwaitGoal { .. })
            && Goal::from_code(&text).is_some();
        prop_assert_eq!(lead_count(&result), usize::from(expected));
        if expected {
            prop_assert_eq!(&result.new_state, &ConvState::Menu);
        }
    }

    #[test]
    fn invalid_format_never_advances(
        name in arb_word(),
        city in arb_word(),
        text in "[0-9a-z]{1,3}",
    ) {
        prop_assume!(text != "1" && text != "2");
        let state = ConvState::AwaitFormat { name, city };
        let result = transition(&state, &test_context(), Event::from_text(&text));
        prop_assert_eq!(&result.new_state, &state);
    }

    #[test]
    fn awaiting_name_always_has_empty_data(state in arb_state(), text in arb_text()) {
        let result = transition(&state, &test_context(), Event::from_text(&text));
        if result.new_state.stage() == Stage::AwaitName {
            prop_assert!(result.new_state.data().is_empty());
        }
    }

    #[test]
    fn answers_survive_their_own_stage(state in arb_state(), text in arb_text()) {
        // Progressing through the questionnaire never loses earlier answers
        let before = state.data();
        let result = transition(&state, &test_context(), Event::from_text(&text));
        let after = result.new_state.data();
        let advanced_or_stayed = match (state.stage(), result.new_state.stage()) {
            (Stage::AwaitCity, Stage::AwaitFormat | Stage::AwaitCity)
            | (Stage::AwaitFormat, Stage::AwaitGoal | Stage::AwaitFormat) => true,
            _ => false,
        };
        if advanced_or_stayed {
            prop_assert_eq!(before.name, after.name);
        }
    }
}
