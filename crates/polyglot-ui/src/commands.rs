use polyglot_types::UiEvent;

pub const HELP: &str = "\
Type text and press Enter to translate it.
  :source <CODE>   set the source language
  :add <CODE>      add a target language
  :remove <CODE>   remove a target language
  :langs           show selected and available languages
  :history         list recent queries
  :pick <N>        restore history entry N
  :say <CODE>      read the translation for CODE aloud
  :key <KEY>       save your DeepL API key
  :phrases         list common phrases
  :phrase <N>      translate common phrase N
  :help            show this help
  :quit            exit";

/// What one input line asks for
#[derive(Debug, Clone)]
pub enum Command {
    Send(UiEvent),
    Help,
    Invalid(String),
}

/// Lines starting with `:` are commands, anything else is text to translate.
/// Numbers shown to the user are 1-based.
pub fn parse(line: &str) -> Command {
    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Command::Send(UiEvent::Translate(line.to_string()));
    };

    let (name, arg) = match rest.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest.trim(), ""),
    };

    let code = || arg.to_ascii_uppercase();

    let event = match (name, arg.is_empty()) {
        ("help" | "h" | "?", _) => return Command::Help,
        ("quit" | "q" | "exit", _) => UiEvent::Quit,
        ("langs" | "languages", _) => UiEvent::ListLanguages,
        ("history", _) => UiEvent::ShowHistory,
        ("phrases", _) => UiEvent::ListPhrases,
        ("source", false) => UiEvent::SetSource(code()),
        ("add", false) => UiEvent::AddTarget(code()),
        ("remove" | "rm", false) => UiEvent::RemoveTarget(code()),
        ("say" | "speak", false) => UiEvent::Speak(code()),
        ("key", false) => UiEvent::SetApiKey(arg.to_string()),
        ("pick", false) => match index(arg) {
            Some(i) => UiEvent::SelectHistory(i),
            None => return Command::Invalid(format!("not a history number: {arg}")),
        },
        ("phrase", false) => match index(arg) {
            Some(i) => UiEvent::Phrase(i),
            None => return Command::Invalid(format!("not a phrase number: {arg}")),
        },
        (
            "source" | "add" | "remove" | "rm" | "say" | "speak" | "key" | "pick" | "phrase",
            true,
        ) => return Command::Invalid(format!(":{name} needs an argument")),
        _ => return Command::Invalid(format!("unknown command :{name}, try :help")),
    };

    Command::Send(event)
}

fn index(arg: &str) -> Option<usize> {
    arg.parse::<usize>().ok()?.checked_sub(1)
}
