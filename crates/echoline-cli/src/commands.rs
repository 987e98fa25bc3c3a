//! Console command catalog and argument parsing.
//!
//! Parsing is separate from execution: [`parse`] turns the text after the
//! command prefix into a [`Command`], and the console applies it.

use std::path::PathBuf;

use thiserror::Error;

pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Accepted but not listed in help.
    pub legacy_aliases: &'static [&'static str],
    pub min_args: usize,
    /// `None` means unbounded.
    pub max_args: Option<usize>,
    pub usage: &'static str,
    pub description: &'static str,
}

impl CommandSpec {
    fn matches(&self, token: &str) -> bool {
        self.names().any(|name| name == token)
    }

    fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name)
            .chain(self.aliases.iter().copied())
            .chain(self.legacy_aliases.iter().copied())
    }

    /// `/name (/alias, ...)` for help listings.
    pub fn display_names(&self, prefix: &str) -> String {
        let mut out = format!("{prefix}{}", self.name);
        if !self.aliases.is_empty() {
            let aliases: Vec<String> = self.aliases.iter().map(|a| format!("{prefix}{a}")).collect();
            out.push_str(&format!(" ({})", aliases.join(", ")));
        }
        out
    }
}

pub const CATALOG: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        aliases: &["h", "?"],
        legacy_aliases: &[],
        min_args: 0,
        max_args: Some(1),
        usage: "[command]",
        description: "List commands, or describe one",
    },
    CommandSpec {
        name: "quit",
        aliases: &["q", "exit"],
        legacy_aliases: &[],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Leave the console",
    },
    CommandSpec {
        name: "name",
        aliases: &["ren", "rename"],
        legacy_aliases: &[],
        min_args: 1,
        max_args: None,
        usage: "<username>",
        description: "Change the speaker name",
    },
    CommandSpec {
        name: "speed",
        aliases: &["ps"],
        legacy_aliases: &["printspeed", "print-speed"],
        min_args: 1,
        max_args: Some(1),
        usage: "<ms>",
        description: "Set the print interval in milliseconds",
    },
    CommandSpec {
        name: "typewrite",
        aliases: &["tt"],
        legacy_aliases: &["toggle-typewriting"],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Toggle the typewriting effect",
    },
    CommandSpec {
        name: "scheme",
        aliases: &["ts", "tts"],
        legacy_aliases: &["toggle-typewriting-scheme"],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Switch typewriting between pinyin and zhuyin",
    },
    CommandSpec {
        name: "autopause",
        aliases: &["ta"],
        legacy_aliases: &["toggle-autopause"],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Toggle automatic pauses at punctuation",
    },
    CommandSpec {
        name: "quotes",
        aliases: &["tq"],
        legacy_aliases: &["toggle-quotes"],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Toggle automatic quotes",
    },
    CommandSpec {
        name: "paren",
        aliases: &["tp"],
        legacy_aliases: &["parentheses"],
        min_args: 0,
        max_args: Some(1),
        usage: "[on|off|once]",
        description: "Toggle parentheses, or wrap only the next message",
    },
    CommandSpec {
        name: "brackets",
        aliases: &["ub", "tub"],
        legacy_aliases: &["toggle-username-brackets"],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Toggle 【】 around the username",
    },
    CommandSpec {
        name: "suffix",
        aliases: &["tsuf"],
        legacy_aliases: &[],
        min_args: 0,
        max_args: None,
        usage: "[on|off|<value>]",
        description: "Toggle the automatic suffix, or set its text",
    },
    CommandSpec {
        name: "skip",
        aliases: &["cancel"],
        legacy_aliases: &["next", "tn"],
        min_args: 0,
        max_args: Some(0),
        usage: "",
        description: "Tell clients to move on to the next message",
    },
    CommandSpec {
        name: "source",
        aliases: &["src", "load", "script"],
        legacy_aliases: &["s"],
        min_args: 1,
        max_args: Some(1),
        usage: "<file>",
        description: "Run every line of a file as console input",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Switch {
    On,
    Off,
    Once,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixArg {
    Toggle,
    On,
    Off,
    Value(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help(Option<String>),
    Quit,
    Rename(String),
    Speed(u32),
    ToggleTypewriting,
    ToggleScheme,
    ToggleAutopause,
    ToggleQuotes,
    Parentheses(Option<Switch>),
    ToggleBrackets,
    Suffix(SuffixArg),
    Skip,
    Source(PathBuf),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command `{token}`{}", suggestion_hint(.suggestions))]
    Unknown {
        token: String,
        suggestions: Vec<String>,
    },

    #[error("usage: {prefix}{name} {usage}")]
    Usage {
        prefix: String,
        name: &'static str,
        usage: &'static str,
    },

    #[error("invalid argument `{value}` for {name}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

fn suggestion_hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean {}?", suggestions.join(" or "))
    }
}

pub fn lookup(token: &str) -> Option<&'static CommandSpec> {
    let token = token.to_lowercase();
    CATALOG.iter().find(|spec| spec.matches(&token))
}

/// Commands with a name or alias close to `token`, best match first.
pub fn suggest(token: &str, prefix: &str) -> Vec<String> {
    const LIMIT: usize = 3;
    const CUTOFF: f64 = 0.8;
    let token = token.to_lowercase();
    if token.is_empty() {
        return vec![];
    }

    let mut scored: Vec<(f64, &CommandSpec)> = CATALOG
        .iter()
        .filter_map(|spec| {
            let best = spec
                .names()
                .map(|name| strsim::jaro(&token, name))
                .fold(0.0, f64::max);
            (best >= CUTOFF).then_some((best, spec))
        })
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    scored
        .into_iter()
        .take(LIMIT)
        .map(|(_, spec)| format!("{prefix}{}", spec.name))
        .collect()
}

/// If `line` starts with the prefix twice or more, the text it stands for:
/// one prefix is dropped and the rest is sent as a message.
pub fn literal_message(line: &str, prefix: &str) -> Option<String> {
    if prefix.is_empty() || !line.starts_with(&prefix.repeat(2)) {
        return None;
    }
    line.strip_prefix(prefix).map(str::to_string)
}

/// Parses the text after the command prefix.
pub fn parse(input: &str, prefix: &str) -> Result<Command, CommandError> {
    let mut words = input.split_whitespace();
    let token = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let Some(spec) = lookup(token) else {
        return Err(CommandError::Unknown {
            token: format!("{prefix}{token}"),
            suggestions: suggest(token, prefix),
        });
    };
    let usage = || CommandError::Usage {
        prefix: prefix.to_string(),
        name: spec.name,
        usage: spec.usage,
    };
    if args.len() < spec.min_args || spec.max_args.is_some_and(|max| args.len() > max) {
        return Err(usage());
    }

    let first = args.first().copied();
    let command = match spec.name {
        "help" => Command::Help(first.map(|cmd| cmd.trim_start_matches(prefix).to_string())),
        "quit" => Command::Quit,
        "name" => Command::Rename(args.join(" ")),
        "speed" => Command::Speed(parse_speed(first.unwrap_or_default())?),
        "typewrite" => Command::ToggleTypewriting,
        "scheme" => Command::ToggleScheme,
        "autopause" => Command::ToggleAutopause,
        "quotes" => Command::ToggleQuotes,
        "paren" => Command::Parentheses(match first.map(str::to_lowercase).as_deref() {
            None => None,
            Some("on") => Some(Switch::On),
            Some("off") => Some(Switch::Off),
            Some("once") => Some(Switch::Once),
            Some(_) => return Err(usage()),
        }),
        "brackets" => Command::ToggleBrackets,
        "suffix" => Command::Suffix(match args.join(" ") {
            value if value.is_empty() => SuffixArg::Toggle,
            value if value.eq_ignore_ascii_case("on") => SuffixArg::On,
            value if value.eq_ignore_ascii_case("off") => SuffixArg::Off,
            value => SuffixArg::Value(value),
        }),
        "skip" => Command::Skip,
        "source" => Command::Source(PathBuf::from(first.unwrap_or_default())),
        _ => return Err(usage()),
    };
    Ok(command)
}

fn parse_speed(value: &str) -> Result<u32, CommandError> {
    let invalid = |reason| CommandError::InvalidArgument {
        name: "speed",
        value: value.to_string(),
        reason,
    };
    let speed: u32 = value.parse().map_err(|_| invalid("not a whole number"))?;
    if speed == 0 {
        return Err(invalid("must be greater than zero"));
    }
    Ok(speed)
}
