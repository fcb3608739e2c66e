//! Console front end
//!
//! Each stdin line is one user action: edit a field and activate its
//! dispatcher, inspect the outputs, or leave.

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the GET field to the text and trigger the GET dispatcher
    Get(String),
    /// Set the POST field to the text and trigger the POST dispatcher
    Post(String),
    Show,
    Help,
    Quit,
    /// Blank line
    Nothing,
}

pub const HELP: &str = "\
Commands:
  get <text>   send <text> as the GET query parameter (rendered as text)
  post <text>  send <text> as the POST body (rendered as markup)
  show         print both output elements
  help         print this help
  quit         exit (pending requests are abandoned)";

/// Parse a console line.
///
/// The field text is everything after the first space, kept verbatim;
/// only the trailing line terminator is removed.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.trim().is_empty() {
        return Ok(Command::Nothing);
    }

    let (word, text) = line.split_once(' ').unwrap_or((line, ""));
    // Trailing spaces do not count as an argument to `show`, `help` or `quit`
    let bare = text.trim().is_empty();

    match (word.to_ascii_lowercase().as_str(), bare) {
        ("get", _) => Ok(Command::Get(text.to_string())),
        ("post", _) => Ok(Command::Post(text.to_string())),
        ("show", true) => Ok(Command::Show),
        ("help" | "?", true) => Ok(Command::Help),
        ("quit" | "exit", true) => Ok(Command::Quit),
        (other, _) => Err(format!("Unknown command: '{other}' (try 'help')")),
    }
}
