//! Unit tests for the command dispatcher

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        dispatch::{resolve, Command, DispatchResult, Site},
        integrations::LookupError,
        launcher::App,
        telemetry::{TelemetrySnapshot, TelemetrySource},
        test_support::{
            FakeClipboard, FakeEncyclopedia, FakeLauncher, Harness, Launched, StaticTelemetry,
        },
    };

    fn snapshot() -> TelemetrySnapshot {
        StaticTelemetry::default().capture()
    }

    async fn run(harness: &Harness, utterance: &str) -> DispatchResult {
        harness.dispatcher().dispatch(utterance, &snapshot()).await
    }

    /// Test that earlier rules win over later ones
    #[test]
    fn test_rule_precedence() {
        assert_eq!(resolve("exit system info"), Some(Command::Terminate));
        assert_eq!(
            resolve("open youtube and check the time"),
            Some(Command::OpenWebsite(Site::YouTube))
        );
        assert_eq!(
            resolve("clipboard set hello"),
            Some(Command::ClipboardSet {
                text: "hello".to_string()
            })
        );
        assert_eq!(resolve("take photo"), Some(Command::Camera));
        assert_eq!(resolve("camera click"), Some(Command::LaunchApp(App::Camera)));
        assert_eq!(resolve("open whatsapp"), Some(Command::LaunchApp(App::WhatsApp)));
        assert_eq!(resolve("hello jarvis"), Some(Command::Greet));
        assert_eq!(resolve("jarvis are you there"), Some(Command::Acknowledge));
    }

    /// Test every terminate phrase, including ones inside longer sentences
    #[test]
    fn test_terminate_phrases() {
        for utterance in ["exit", "quit now", "bye", "ok bye bye", "tata jarvis"] {
            assert_eq!(resolve(utterance), Some(Command::Terminate), "{utterance}");
        }
    }

    /// Test that only blank input escapes the table
    #[test]
    fn test_resolve_blank_and_fallback() {
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve("frobnicate the widget"), Some(Command::Unknown));
    }

    /// Test the empty utterance is a no-op that keeps the session alive
    #[tokio::test]
    async fn test_empty_utterance_is_ignored() {
        let harness = Harness::default();

        let result = run(&harness, "").await;

        assert_eq!(result, DispatchResult::ignored());
        assert!(harness.spoken().is_empty());
        assert!(harness.launcher.launched().is_empty());
        assert_eq!(harness.clipboard.reads(), 0);
        assert!(harness.ai.prompts().is_empty());
    }

    /// Test terminate wins even when other keywords are present
    #[tokio::test]
    async fn test_terminate_stops_session() {
        let harness = Harness::default();

        let result = run(&harness, "exit system info").await;

        assert!(result.handled);
        assert!(!result.continue_session);
        assert_eq!(harness.spoken(), vec!["Goodbye!"]);
    }

    /// Test system info speaks the header then each reading
    #[tokio::test]
    async fn test_system_info_reads_snapshot() {
        let harness = Harness::default();

        let result = run(&harness, "system info").await;

        assert_eq!(result, DispatchResult::handled(true));
        assert_eq!(
            harness.spoken(),
            vec![
                "System Information:",
                "Battery: 87% Charging",
                "Disk Usage: 42.0% used (512.0GB total)",
                "CPU Usage: 12.5%",
            ]
        );
    }

    /// Test a missing battery only affects its own line
    #[tokio::test]
    async fn test_system_info_with_missing_battery() {
        let harness = Harness::default();
        let telemetry = StaticTelemetry::without_battery();

        harness
            .dispatcher()
            .dispatch("status", &telemetry.capture())
            .await;

        let spoken = harness.spoken();
        assert_eq!(spoken[1], "Battery status not available");
        assert_eq!(spoken[3], "CPU Usage: 12.5%");
    }

    /// Test the AI query is stripped of its prefix
    #[tokio::test]
    async fn test_ask_gemini_forwards_query() {
        let harness = Harness::default();

        run(&harness, "ask gemini what is rust").await;

        assert_eq!(harness.ai.prompts(), vec!["what is rust"]);
        assert_eq!(
            harness.spoken(),
            vec!["Rust is a systems programming language."]
        );
    }

    /// Test an empty AI query prompts instead of calling the model
    #[tokio::test]
    async fn test_ask_gemini_without_query() {
        let harness = Harness::default();

        run(&harness, "ask gemini   ").await;

        assert!(harness.ai.prompts().is_empty());
        assert_eq!(harness.spoken(), vec!["What would you like to ask Gemini?"]);
    }

    /// Test web search announces and opens the raw query URL
    #[tokio::test]
    async fn test_web_search_opens_browser() {
        let harness = Harness::default();

        run(&harness, "search for rust programming").await;

        assert_eq!(
            harness.spoken(),
            vec!["Searching for rust programming on Google."]
        );
        assert_eq!(
            harness.launcher.launched(),
            vec![Launched::Url(
                "https://www.google.com/search?q=rust programming".to_string()
            )]
        );
    }

    /// Test a bare search keyword asks for a query
    #[tokio::test]
    async fn test_web_search_without_query() {
        let harness = Harness::default();

        run(&harness, "search").await;

        assert_eq!(harness.spoken(), vec!["What would you like me to search for?"]);
        assert!(harness.launcher.launched().is_empty());
    }

    /// Test a successful encyclopedia lookup
    #[tokio::test]
    async fn test_wikipedia_summary() {
        let harness = Harness::default();

        run(&harness, "wikipedia alan turing").await;

        assert_eq!(
            harness.encyclopedia.requests(),
            vec![("alan turing".to_string(), 2)]
        );
        assert_eq!(
            harness.spoken(),
            vec!["According to Wikipedia: Alan Turing was an English mathematician."]
        );
    }

    /// Test each lookup failure maps to its own reply
    #[tokio::test]
    async fn test_wikipedia_failures() {
        let cases = [
            (
                LookupError::Ambiguous,
                "There are multiple results for this query. Please be more specific.",
            ),
            (
                LookupError::NotFound,
                "I couldn't find information about that topic.",
            ),
            (
                LookupError::Unavailable("connection refused".to_string()),
                "I couldn't reach Wikipedia right now.",
            ),
        ];

        for (error, expected) in cases {
            let harness = Harness {
                encyclopedia: Arc::new(FakeEncyclopedia::returning(Err(error))),
                ..Harness::default()
            };

            let result = run(&harness, "wiki turing").await;

            assert!(result.continue_session);
            assert_eq!(harness.spoken(), vec![expected]);
        }
    }

    /// Test a bare wikipedia keyword asks for a topic without a lookup
    #[tokio::test]
    async fn test_wikipedia_without_topic() {
        let harness = Harness::default();

        run(&harness, "wikipedia").await;

        assert!(harness.encyclopedia.requests().is_empty());
        assert_eq!(
            harness.spoken(),
            vec!["What would you like me to look up on Wikipedia?"]
        );
    }

    /// Test the configured sentence count reaches the encyclopedia
    #[tokio::test]
    async fn test_wikipedia_sentence_count() {
        let harness = Harness::default();

        harness
            .dispatcher()
            .with_summary_sentences(4)
            .dispatch("wiki rust", &snapshot())
            .await;

        assert_eq!(harness.encyclopedia.requests(), vec![("rust".to_string(), 4)]);
    }

    /// Test the fallback reply for unrecognised input
    #[tokio::test]
    async fn test_unknown_command() {
        let harness = Harness::default();

        let result = run(&harness, "frobnicate the widget").await;

        assert_eq!(result, DispatchResult::handled(true));
        assert_eq!(harness.spoken(), vec!["Sorry, I don't know how to do that yet."]);
    }

    /// Test time and date formatting from the injected clock
    #[tokio::test]
    async fn test_time_and_date() {
        let harness = Harness::default();

        run(&harness, "what time is it").await;
        run(&harness, "what date is it").await;

        assert_eq!(
            harness.spoken(),
            vec![
                "The current time is 02:15 PM",
                "Today's date is January 05, 2024",
            ]
        );
    }

    /// Test explicit clipboard set writes the text after "set"
    #[tokio::test]
    async fn test_clipboard_set() {
        let harness = Harness::default();

        run(&harness, "clipboard set reset the router").await;

        assert_eq!(harness.clipboard.writes(), vec!["reset the router"]);
        assert_eq!(harness.spoken(), vec!["Text copied to clipboard"]);
    }

    /// Test explicit clipboard set with nothing to write
    #[tokio::test]
    async fn test_clipboard_set_empty() {
        let harness = Harness::default();

        let result = run(&harness, "clipboard set").await;

        assert!(result.continue_session);
        assert!(harness.clipboard.writes().is_empty());
        assert_eq!(harness.spoken(), vec!["There is nothing to copy."]);
    }

    /// Test explicit clipboard get, working and broken
    #[tokio::test]
    async fn test_clipboard_get() {
        let harness = Harness {
            clipboard: Arc::new(FakeClipboard::holding("hello")),
            ..Harness::default()
        };
        run(&harness, "clipboard get").await;
        assert_eq!(harness.spoken(), vec!["Clipboard content: hello"]);

        let harness = Harness {
            clipboard: Arc::new(FakeClipboard::broken()),
            ..Harness::default()
        };
        run(&harness, "clipboard get").await;
        assert_eq!(harness.spoken(), vec!["Could not access clipboard"]);
    }

    /// Test implicit clipboard phrases
    #[tokio::test]
    async fn test_clipboard_implicit() {
        let harness = Harness {
            clipboard: Arc::new(FakeClipboard::holding("hello")),
            ..Harness::default()
        };

        run(&harness, "paste").await;
        run(&harness, "copy this text").await;
        run(&harness, "clipboard").await;

        assert_eq!(harness.clipboard.writes(), vec!["this text"]);
        assert_eq!(harness.clipboard.reads(), 1);
        assert_eq!(
            harness.spoken(),
            vec!["Clipboard content: hello", "Text copied to clipboard"]
        );
    }

    /// Test implicit clipboard failures include the error
    #[tokio::test]
    async fn test_clipboard_implicit_failure() {
        let harness = Harness {
            clipboard: Arc::new(FakeClipboard::broken()),
            ..Harness::default()
        };

        run(&harness, "copy").await;

        assert_eq!(
            harness.spoken(),
            vec!["Could not access clipboard. Error: clipboard unavailable: no display"]
        );
    }

    /// Test app launch happens before the message
    #[tokio::test]
    async fn test_launch_app() {
        let harness = Harness::default();

        run(&harness, "open calculator").await;
        run(&harness, "take photo").await;

        assert_eq!(
            harness.launcher.launched(),
            vec![Launched::App(App::Calculator), Launched::App(App::Camera)]
        );
        assert_eq!(
            harness.spoken(),
            vec!["Opening Calculator...", "Opening camera for you..."]
        );
    }

    /// Test a launcher failure is spoken and the session continues
    #[tokio::test]
    async fn test_launch_failure() {
        let harness = Harness {
            launcher: Arc::new(FakeLauncher::broken()),
            ..Harness::default()
        };

        let result = run(&harness, "open calculator").await;

        assert_eq!(result, DispatchResult::handled(true));
        assert_eq!(
            harness.spoken(),
            vec!["Could not open calculator. Error: failed to open calculator: no handler"]
        );
    }

    /// Test websites are announced then opened
    #[tokio::test]
    async fn test_open_website() {
        let harness = Harness::default();

        run(&harness, "open youtube").await;

        assert_eq!(harness.spoken(), vec!["Opening youtube..."]);
        assert_eq!(
            harness.launcher.launched(),
            vec![Launched::Url("https://www.youtube.com".to_string())]
        );
    }

    /// Test a browser failure after announcing a website
    #[tokio::test]
    async fn test_open_website_failure() {
        let harness = Harness {
            launcher: Arc::new(FakeLauncher::broken()),
            ..Harness::default()
        };

        run(&harness, "gmail").await;

        assert_eq!(
            harness.spoken(),
            vec![
                "Opening gmail...",
                "Could not open browser. Error: failed to open https://mail.google.com: no handler",
            ]
        );
    }

    /// Test greeting and name address replies
    #[tokio::test]
    async fn test_greeting_and_name() {
        let harness = Harness::default();

        run(&harness, "namaste").await;
        run(&harness, "jarvis are you there").await;

        assert_eq!(
            harness.spoken(),
            vec![
                "Hello! How can I help you today?",
                "Yes, I'm here. How can I assist you?",
            ]
        );
    }
}
