// UniLang End-to-End Test Scenarios
//
// These tests simulate a user typing into a host text field: every event
// goes through an engine session and every action is applied to an
// in-memory host surface.
//
// Run with: cargo test --test e2e_scenarios

mod e2e_tests {
    use std::sync::Arc;

    use unilang_core::{
        parse_event_stream, Action, Dictionary, Engine, EngineConfig, KeyEvent, SpecialKey,
        TextBuffer, TextSurface,
    };

    // =========================================================================
    // Test Helpers
    // =========================================================================

    const SHORTCUTS: &str = r#"{
        "shortcuts": {
            "_comment": { "\\x": "never" },
            "greek": { "\\alpha": "α", "\\beta": "β", "\\pi": "π" },
            "math": { "\\infty": "∞", "\\sum": "∑", "\\R2": "ℝ²" },
            "arrows": { "\\to": "→", "\\gets": "←" }
        }
    }"#;

    fn dictionary() -> Arc<Dictionary> {
        Arc::new(Dictionary::build(SHORTCUTS))
    }

    /// Type a stream into a fresh session, returning the actions and the
    /// resulting host text
    fn type_into(engine: &mut Engine, input: &str) -> (Vec<Action>, String) {
        let mut host = TextBuffer::new();
        let actions: Vec<Action> = parse_event_stream(input)
            .into_iter()
            .map(|event| engine.process_event(event))
            .collect();
        host.apply_all(&actions);
        (actions, host.into_string())
    }

    fn type_text(input: &str) -> String {
        let mut engine = Engine::new(dictionary());
        type_into(&mut engine, input).1
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    #[test]
    fn test_alpha_then_space() {
        let dictionary = Arc::new(Dictionary::from_entries([("\\alpha", "α")]));
        let mut engine = Engine::new(dictionary);
        let (actions, text) = type_into(&mut engine, "\\alpha ");

        assert_eq!(
            actions,
            vec![
                Action::CommitChar('\\'),
                Action::CommitChar('a'),
                Action::CommitChar('l'),
                Action::CommitChar('p'),
                Action::CommitChar('h'),
                Action::DeleteAndInsert {
                    count: 6,
                    text: "α".to_string()
                },
                Action::CommitChar(' '),
            ]
        );
        assert_eq!(text, "α ");
    }

    #[test]
    fn test_failed_load_is_full_passthrough() {
        let dictionary = Arc::new(Dictionary::build("{ broken"));
        assert!(!dictionary.is_loaded());
        assert_eq!(dictionary.count(), 0);

        let mut engine = Engine::new(dictionary);
        let (actions, text) = type_into(&mut engine, "\\xyz ");
        assert_eq!(actions.len(), 5);
        assert!(actions.iter().all(Action::is_commit));
        assert_eq!(text, "\\xyz ");
    }

    #[test]
    fn test_sentence_with_several_shortcuts() {
        assert_eq!(
            type_text("f: \\R2 \\to \\R2, \\sum_i x_i \\to \\infty"),
            "f: ℝ² → ℝ², ∑_i x_i → ∞"
        );
    }

    #[test]
    fn test_shortcut_replaced_mid_word() {
        // Replacement happens as soon as the key matches, the rest stays text
        assert_eq!(type_text("\\pizza"), "πzza");
        assert_eq!(type_text("\\betas"), "βs");
    }

    #[test]
    fn test_unknown_shortcut_stays_literal() {
        assert_eq!(type_text("\\gamma \\alp."), "\\gamma \\alp.");
    }

    #[test]
    fn test_comment_category_never_expands() {
        assert_eq!(type_text("\\x"), "\\x");
    }

    #[test]
    fn test_text_before_trigger_is_untouched() {
        assert_eq!(type_text("abc\\alpha"), "abcα");
        assert_eq!(type_text("a\\b\\beta"), "a\\bβ");
    }

    #[test]
    fn test_punctuation_ends_candidate() {
        // The candidate "\al" is dropped at '-', so "pha" is plain text
        assert_eq!(type_text("\\al-pha"), "\\al-pha");
    }

    #[test]
    fn test_backspace_mid_candidate_keeps_stale_buffer() {
        // Without rollback the matcher still holds "\alx" after the delete
        assert_eq!(type_text("\\alx<backspace>pha"), "\\alpha");
    }

    #[test]
    fn test_backspace_mid_candidate_with_rollback() {
        let config = EngineConfig {
            rollback_on_delete: true,
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(dictionary(), config);
        let (_, text) = type_into(&mut engine, "\\alx<backspace>pha");
        assert_eq!(text, "α");
    }

    #[test]
    fn test_enter_with_reset() {
        let config = EngineConfig {
            reset_on_enter: true,
            ..EngineConfig::default()
        };
        let mut engine = Engine::with_config(dictionary(), config);
        let (actions, text) = type_into(&mut engine, "\\al<enter>pha");
        assert!(!actions.iter().any(Action::is_replacement));
        assert_eq!(text, "\\al\npha");
    }

    #[test]
    fn test_session_restart_between_fields() {
        let mut engine = Engine::new(dictionary());
        let (_, first) = type_into(&mut engine, "\\alp");
        assert_eq!(first, "\\alp");

        // Focus moves to another text field
        engine.restart();
        let (_, second) = type_into(&mut engine, "ha");
        assert_eq!(second, "ha");
    }

    #[test]
    fn test_toggle_disabled_mid_typing() {
        let mut engine = Engine::new(dictionary());
        let mut host = TextBuffer::new();

        for ch in "\\alpha \\be".chars() {
            host.apply(&engine.process_char(ch));
        }
        engine.set_enabled(false);
        for ch in "ta \\pi".chars() {
            host.apply(&engine.process_char(ch));
        }
        assert_eq!(host.text(), "α \\beta \\pi");
    }

    #[test]
    fn test_special_keys_are_passthrough() {
        let mut engine = Engine::new(dictionary());
        for key in [SpecialKey::Backspace, SpecialKey::Enter, SpecialKey::Done] {
            assert_eq!(
                engine.process_event(KeyEvent::Special(key)),
                Action::Passthrough(key)
            );
        }
    }

    #[test]
    fn test_deletions_never_exceed_committed_text() {
        let inputs = [
            "\\alpha\\beta\\pi",
            "\\\\\\alpha",
            "x\\to\\gets_\\R2!",
            "\\al\\alpha",
            "\\_\\pi",
        ];

        for input in inputs {
            let mut engine = Engine::new(dictionary());
            let mut host = TextBuffer::new();
            for event in parse_event_stream(input) {
                let action = engine.process_event(event);
                assert!(
                    action.deleted_count() <= host.char_count(),
                    "{:?}: {} deletes more than {:?}",
                    input,
                    action,
                    host.text()
                );
                host.apply(&action);
            }
        }
    }
}
