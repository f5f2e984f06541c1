//! Ordered command rule table
//!
//! Rules are tried top to bottom and the first whose trigger matches and
//! whose extractor yields a [`Command`] wins. Order is part of the contract:
//! broad substring rules (`time`, `date`, `hi`) sit below the specific ones,
//! and the final rule matches everything.

use std::fmt;

use tracing::debug;

use super::extract::{after_first, contains_any, strip_all};
use crate::launcher::App;

/// Predicate deciding whether a rule applies to an utterance
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// Any phrase occurs as a substring
    AnyOf(&'static [&'static str]),
    /// The utterance starts with the prefix
    StartsWith(&'static str),
    /// Custom check, used for table-driven and compound rules
    Predicate(fn(&str) -> bool),
}

impl Trigger {
    pub fn matches(&self, utterance: &str) -> bool {
        match self {
            Trigger::AnyOf(phrases) => contains_any(utterance, phrases),
            Trigger::StartsWith(prefix) => utterance.starts_with(prefix),
            Trigger::Predicate(check) => check(utterance),
        }
    }
}

/// One entry of the dispatch table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub extract: fn(&str) -> Option<Command>,
}

/// Websites the assistant can open, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    YouTube,
    Google,
    Facebook,
    Instagram,
    Twitter,
    WhatsApp,
    Gmail,
}

impl Site {
    pub const ALL: [Site; 7] = [
        Site::YouTube,
        Site::Google,
        Site::Facebook,
        Site::Instagram,
        Site::Twitter,
        Site::WhatsApp,
        Site::Gmail,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Site::YouTube => "youtube",
            Site::Google => "google",
            Site::Facebook => "facebook",
            Site::Instagram => "instagram",
            Site::Twitter => "twitter",
            Site::WhatsApp => "whatsapp",
            Site::Gmail => "gmail",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Site::YouTube => "https://www.youtube.com",
            Site::Google => "https://www.google.com",
            Site::Facebook => "https://www.facebook.com",
            Site::Instagram => "https://www.instagram.com",
            Site::Twitter => "https://www.twitter.com",
            Site::WhatsApp => "https://web.whatsapp.com",
            Site::Gmail => "https://mail.google.com",
        }
    }

    /// First site, in table order, named by the utterance
    pub fn find(utterance: &str) -> Option<Site> {
        Site::ALL.into_iter().find(|site| {
            utterance.contains(site.name()) || utterance.contains(&format!("open {}", site.name()))
        })
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl App {
    /// First app, in table order, named by the utterance
    pub fn find(utterance: &str) -> Option<App> {
        App::ALL.into_iter().find(|app| {
            utterance.contains(&format!("open {}", app.id())) || utterance.contains(app.id())
        })
    }
}

/// A resolved rule together with its extracted parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Terminate,
    SystemInfo,
    ClipboardGet,
    ClipboardSet { text: String },
    LaunchApp(App),
    Camera,
    ClipboardCopy { text: String },
    ClipboardShow,
    /// "clipboard" without copy or paste: handled silently
    ClipboardIdle,
    OpenWebsite(Site),
    TellTime,
    TellDate,
    Greet,
    AskAi { query: String },
    WebSearch { query: String },
    Encyclopedia { topic: String },
    Acknowledge,
    Unknown,
}

impl Command {
    pub fn ends_session(&self) -> bool {
        matches!(self, Command::Terminate)
    }
}

// "bye" already matches "bye bye"; both stay listed as accepted phrases.
pub const TERMINATE_PHRASES: &[&str] = &["exit", "quit", "bye", "bye bye", "tata"];
pub const SYSTEM_INFO_PHRASES: &[&str] = &["system info", "info", "status"];
pub const CAMERA_PHRASES: &[&str] = &["take photo", "click picture", "take picture", "camera click"];
pub const CLIPBOARD_PHRASES: &[&str] = &["copy", "paste", "clipboard"];
pub const TIME_PHRASES: &[&str] = &["what time is it", "time", "time batao", "samay kya hai"];
pub const DATE_PHRASES: &[&str] = &["what date is it", "date", "date kitna hai", "din kya hai"];
pub const GREETING_PHRASES: &[&str] = &["hello", "hai", "namaste", "hi"];
pub const AI_PREFIX: &str = "ask gemini";
pub const SEARCH_KEYWORDS: &[&str] = &["search for", "search"];
pub const WIKI_KEYWORDS: &[&str] = &["wikipedia", "wiki"];
pub const NAME_PHRASES: &[&str] = &["jarvis"];

fn terminate(_: &str) -> Option<Command> {
    Some(Command::Terminate)
}

fn system_info(_: &str) -> Option<Command> {
    Some(Command::SystemInfo)
}

fn is_explicit_clipboard(utterance: &str) -> bool {
    utterance.contains("clipboard") && contains_any(utterance, &["get", "set"])
}

fn explicit_clipboard(utterance: &str) -> Option<Command> {
    if utterance.contains("get") {
        Some(Command::ClipboardGet)
    } else {
        Some(Command::ClipboardSet {
            text: after_first(utterance, "set"),
        })
    }
}

fn mentions_app(utterance: &str) -> bool {
    App::find(utterance).is_some()
}

fn launch_app(utterance: &str) -> Option<Command> {
    App::find(utterance).map(Command::LaunchApp)
}

fn camera(_: &str) -> Option<Command> {
    Some(Command::Camera)
}

fn implicit_clipboard(utterance: &str) -> Option<Command> {
    if utterance.contains("copy") {
        if contains_any(utterance, &["text", "this"]) {
            Some(Command::ClipboardCopy {
                text: after_first(utterance, "copy"),
            })
        } else {
            Some(Command::ClipboardShow)
        }
    } else if utterance.contains("paste") {
        Some(Command::ClipboardShow)
    } else {
        Some(Command::ClipboardIdle)
    }
}

fn mentions_site(utterance: &str) -> bool {
    Site::find(utterance).is_some()
}

fn open_website(utterance: &str) -> Option<Command> {
    Site::find(utterance).map(Command::OpenWebsite)
}

fn tell_time(_: &str) -> Option<Command> {
    Some(Command::TellTime)
}

fn tell_date(_: &str) -> Option<Command> {
    Some(Command::TellDate)
}

fn greet(_: &str) -> Option<Command> {
    Some(Command::Greet)
}

fn ask_ai(utterance: &str) -> Option<Command> {
    Some(Command::AskAi {
        query: strip_all(utterance, &[AI_PREFIX]),
    })
}

fn web_search(utterance: &str) -> Option<Command> {
    Some(Command::WebSearch {
        query: strip_all(utterance, SEARCH_KEYWORDS),
    })
}

fn encyclopedia(utterance: &str) -> Option<Command> {
    Some(Command::Encyclopedia {
        topic: strip_all(utterance, WIKI_KEYWORDS),
    })
}

fn acknowledge(_: &str) -> Option<Command> {
    Some(Command::Acknowledge)
}

fn always(_: &str) -> bool {
    true
}

fn unknown(_: &str) -> Option<Command> {
    Some(Command::Unknown)
}

/// The dispatch table, highest priority first
pub static RULES: &[Rule] = &[
    Rule {
        name: "terminate",
        trigger: Trigger::AnyOf(TERMINATE_PHRASES),
        extract: terminate,
    },
    Rule {
        name: "system_info",
        trigger: Trigger::AnyOf(SYSTEM_INFO_PHRASES),
        extract: system_info,
    },
    Rule {
        name: "clipboard_explicit",
        trigger: Trigger::Predicate(is_explicit_clipboard),
        extract: explicit_clipboard,
    },
    Rule {
        name: "launch_app",
        trigger: Trigger::Predicate(mentions_app),
        extract: launch_app,
    },
    Rule {
        name: "camera",
        trigger: Trigger::AnyOf(CAMERA_PHRASES),
        extract: camera,
    },
    Rule {
        name: "clipboard_implicit",
        trigger: Trigger::AnyOf(CLIPBOARD_PHRASES),
        extract: implicit_clipboard,
    },
    Rule {
        name: "open_website",
        trigger: Trigger::Predicate(mentions_site),
        extract: open_website,
    },
    Rule {
        name: "time",
        trigger: Trigger::AnyOf(TIME_PHRASES),
        extract: tell_time,
    },
    Rule {
        name: "date",
        trigger: Trigger::AnyOf(DATE_PHRASES),
        extract: tell_date,
    },
    Rule {
        name: "greeting",
        trigger: Trigger::AnyOf(GREETING_PHRASES),
        extract: greet,
    },
    Rule {
        name: "ask_ai",
        trigger: Trigger::StartsWith(AI_PREFIX),
        extract: ask_ai,
    },
    Rule {
        name: "web_search",
        trigger: Trigger::AnyOf(SEARCH_KEYWORDS),
        extract: web_search,
    },
    Rule {
        name: "encyclopedia",
        trigger: Trigger::AnyOf(WIKI_KEYWORDS),
        extract: encyclopedia,
    },
    Rule {
        name: "name_address",
        trigger: Trigger::AnyOf(NAME_PHRASES),
        extract: acknowledge,
    },
    Rule {
        name: "fallback",
        trigger: Trigger::Predicate(always),
        extract: unknown,
    },
];

/// Resolve an utterance against [`RULES`]. `None` only for an empty
/// utterance; anything else resolves, at worst to [`Command::Unknown`].
pub fn resolve(utterance: &str) -> Option<Command> {
    if utterance.trim().is_empty() {
        return None;
    }

    RULES.iter().find_map(|rule| {
        if !rule.trigger.matches(utterance) {
            return None;
        }
        let command = (rule.extract)(utterance)?;
        debug!(rule = rule.name, ?command, "Rule matched");
        Some(command)
    })
}
