//! Fixed spoken replies

pub const ACTIVATED: &str = "Jarvis assistant activated. How can I assist you?";
pub const GOODBYE: &str = "Goodbye!";
pub const TURN_FAILED: &str = "Sorry, I encountered an error.";

pub const SYSTEM_INFO_HEADER: &str = "System Information:";

pub const TEXT_COPIED: &str = "Text copied to clipboard";
pub const NOTHING_TO_COPY: &str = "There is nothing to copy.";
pub const CLIPBOARD_READ_FAILED: &str = "Could not access clipboard";
pub const CLIPBOARD_WRITE_FAILED: &str = "Could not copy to clipboard";

pub const CAMERA_OPENING: &str = "Opening camera for you...";

pub const GREETING: &str = "Hello! How can I help you today?";

pub const ASK_GEMINI_PROMPT: &str = "What would you like to ask Gemini?";
pub const SEARCH_PROMPT: &str = "What would you like me to search for?";
pub const WIKIPEDIA_PROMPT: &str = "What would you like me to look up on Wikipedia?";

pub const WIKIPEDIA_AMBIGUOUS: &str =
    "There are multiple results for this query. Please be more specific.";
pub const WIKIPEDIA_NOT_FOUND: &str = "I couldn't find information about that topic.";
pub const WIKIPEDIA_UNAVAILABLE: &str = "I couldn't reach Wikipedia right now.";

pub const ACKNOWLEDGE: &str = "Yes, I'm here. How can I assist you?";
pub const UNKNOWN: &str = "Sorry, I don't know how to do that yet.";

pub fn clipboard_content(text: &str) -> String {
    format!("Clipboard content: {}", text)
}

pub fn clipboard_error(error: &impl std::fmt::Display) -> String {
    format!("Could not access clipboard. Error: {}", error)
}

pub fn could_not_open(what: &str, error: &impl std::fmt::Display) -> String {
    format!("Could not open {}. Error: {}", what, error)
}

pub fn opening_site(site: &str) -> String {
    format!("Opening {}...", site)
}

pub fn current_time(formatted: &str) -> String {
    format!("The current time is {}", formatted)
}

pub fn current_date(formatted: &str) -> String {
    format!("Today's date is {}", formatted)
}

pub fn searching_for(query: &str) -> String {
    format!("Searching for {} on Google.", query)
}

pub fn according_to_wikipedia(summary: &str) -> String {
    format!("According to Wikipedia: {}", summary)
}
