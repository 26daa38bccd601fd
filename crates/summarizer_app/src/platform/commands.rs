use std::path::PathBuf;

/// A line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Open(PathBuf),
    Close,
    Submit,
    Copy,
    Save(PathBuf),
    Status,
    Help,
    Quit,
    Unknown(String),
}

pub(crate) const HELP: &str = "\
Commands:
  open <path>   choose a .pdf or .txt document
  close         forget the chosen document
  submit        send the chosen document for summarizing
  copy          copy the summary to the clipboard
  save <path>   write the summary to a file
  status        show the current state
  help          show this help
  quit          exit";

/// Parses one input line; blank lines yield `None`.
pub(crate) fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word.to_ascii_lowercase().as_str(), rest) {
        ("open" | "o", path) if !path.is_empty() => Command::Open(PathBuf::from(path)),
        ("close", "") => Command::Close,
        ("submit" | "s" | "summarize", "") => Command::Submit,
        ("copy" | "c", "") => Command::Copy,
        ("save", path) if !path.is_empty() => Command::Save(PathBuf::from(path)),
        ("status", "") => Command::Status,
        ("help" | "h" | "?", "") => Command::Help,
        ("quit" | "q" | "exit", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}
