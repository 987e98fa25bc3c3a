//! Operator console: turns input lines into messages or settings changes.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use echoline_compiler::{compile, timing, wire};
use echoline_config::{Settings, expand_path};

use crate::{
    commands::{self, CATALOG, Command, CommandSpec, SuffixArg, Switch},
    transport::{QueuedMessage, Transport},
};

/// Nested `source` calls deeper than this are refused.
const MAX_SOURCE_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<T: Transport, W: Write> {
    settings: Settings,
    settings_path: PathBuf,
    /// Wrap only the next message in parentheses.
    parentheses_once: bool,
    source_depth: usize,
    transport: T,
    out: W,
}

impl<T: Transport, W: Write> Console<T, W> {
    /// `out` receives operator-facing replies; payloads go to `transport`.
    pub fn new(settings: Settings, settings_path: PathBuf, transport: T, out: W) -> Self {
        Self {
            settings,
            settings_path,
            parentheses_once: false,
            source_depth: 0,
            transport,
            out,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let prefix = self.settings.command_prefix.clone();
        if let Some(text) = commands::literal_message(line, &prefix) {
            self.send_message(&text)?;
            return Ok(Flow::Continue);
        }
        let Some(input) = line.strip_prefix(prefix.as_str()).filter(|_| !prefix.is_empty()) else {
            self.send_message(line)?;
            return Ok(Flow::Continue);
        };

        match commands::parse(input, &prefix) {
            Ok(command) => self.run(command),
            Err(err) => {
                writeln!(self.out, "{err}")?;
                writeln!(self.out, "Type {prefix}help for the command list.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn send_message(&mut self, text: &str) -> Result<()> {
        let config = self
            .settings
            .snapshot(self.parentheses_once)
            .context("Settings cannot be used to compile messages")?;
        let message = compile(text, &self.settings.username, &config)?;
        let payload = wire::to_json(&message).context("Failed to encode payload")?;
        let delay_ms = timing::estimate_playback_ms(&message, config.print_speed_ms);

        self.transport.send(&QueuedMessage { payload, delay_ms })?;
        self.parentheses_once = false;
        writeln!(
            self.out,
            "Sent as {}: {}",
            message.username,
            message.plain_text()
        )?;
        Ok(())
    }

    fn run(&mut self, command: Command) -> Result<Flow> {
        let reply = match command {
            Command::Help(topic) => {
                self.help(topic.as_deref())?;
                return Ok(Flow::Continue);
            }
            Command::Quit => {
                writeln!(self.out, "Bye~")?;
                return Ok(Flow::Quit);
            }
            Command::Source(path) => return self.source(&path),
            Command::Skip => {
                let payload = wire::control_json(wire::ECHO_NEXT)
                    .context("Failed to encode control payload")?;
                self.transport.send(&QueuedMessage {
                    payload,
                    delay_ms: 0,
                })?;
                writeln!(self.out, "Queued {}", wire::ECHO_NEXT)?;
                return Ok(Flow::Continue);
            }
            Command::Parentheses(Some(Switch::Once)) => {
                self.parentheses_once = true;
                writeln!(self.out, "The next message will be wrapped in parentheses")?;
                return Ok(Flow::Continue);
            }
            Command::Rename(name) => {
                self.settings.username = name;
                format!("Username is now {}", self.settings.username)
            }
            Command::Speed(ms) => {
                self.settings.print_speed_ms = ms;
                format!("Print speed is now {ms} ms")
            }
            Command::ToggleTypewriting => {
                self.settings.typewriting_enabled = !self.settings.typewriting_enabled;
                format!("Typewriting: {}", on_off(self.settings.typewriting_enabled))
            }
            Command::ToggleScheme => {
                let scheme = self.settings.scheme().unwrap_or_default().toggled();
                self.settings.typewriting_scheme = scheme.to_string();
                format!("Typewriting scheme is now {scheme}")
            }
            Command::ToggleAutopause => {
                self.settings.autopause_enabled = !self.settings.autopause_enabled;
                format!("Autopause: {}", on_off(self.settings.autopause_enabled))
            }
            Command::ToggleQuotes => {
                self.settings.auto_quotes = !self.settings.auto_quotes;
                format!("Quotes: {}", on_off(self.settings.auto_quotes))
            }
            Command::Parentheses(switch) => {
                self.settings.auto_parentheses = match switch {
                    Some(Switch::On) => true,
                    Some(Switch::Off) => false,
                    _ => !self.settings.auto_parentheses,
                };
                format!("Parentheses: {}", on_off(self.settings.auto_parentheses))
            }
            Command::ToggleBrackets => {
                self.settings.username_brackets = !self.settings.username_brackets;
                format!("Username brackets: {}", on_off(self.settings.username_brackets))
            }
            Command::Suffix(arg) => match arg {
                SuffixArg::Value(value) => {
                    self.settings.auto_suffix_value = value;
                    format!("Suffix text is now {}", self.settings.auto_suffix_value)
                }
                toggle => {
                    self.settings.auto_suffix = match toggle {
                        SuffixArg::On => true,
                        SuffixArg::Off => false,
                        _ => !self.settings.auto_suffix,
                    };
                    format!("Suffix: {}", on_off(self.settings.auto_suffix))
                }
            },
        };

        self.settings
            .save_to_path(&self.settings_path)
            .context("Failed to persist settings")?;
        writeln!(self.out, "{reply}")?;
        Ok(Flow::Continue)
    }

    fn help(&mut self, topic: Option<&str>) -> Result<()> {
        let prefix = self.settings.command_prefix.clone();
        match topic {
            None => {
                for spec in CATALOG {
                    let status = self.status(spec);
                    writeln!(
                        self.out,
                        "{:<28} {:<18} {:<10} {}",
                        spec.display_names(&prefix),
                        spec.usage,
                        status,
                        spec.description
                    )?;
                }
            }
            Some(topic) => match commands::lookup(topic) {
                Some(spec) => {
                    let status = self.status(spec);
                    writeln!(self.out, "{}", spec.display_names(&prefix))?;
                    writeln!(self.out, "  usage: {prefix}{} {}", spec.name, spec.usage)?;
                    writeln!(self.out, "  {}", spec.description)?;
                    writeln!(self.out, "  current: {status}")?;
                }
                None => {
                    let suggestions = commands::suggest(topic, &prefix);
                    writeln!(self.out, "No command named {topic}")?;
                    if !suggestions.is_empty() {
                        writeln!(self.out, "Did you mean {}?", suggestions.join(" or "))?;
                    }
                }
            },
        }
        Ok(())
    }

    /// Current value of the setting a command controls.
    fn status(&self, spec: &CommandSpec) -> String {
        let s = &self.settings;
        match spec.name {
            "name" => s.username.clone(),
            "speed" => format!("{} ms", s.print_speed_ms),
            "typewrite" => on_off(s.typewriting_enabled).to_string(),
            "scheme" => s.typewriting_scheme.clone(),
            "autopause" => on_off(s.autopause_enabled).to_string(),
            "quotes" => on_off(s.auto_quotes).to_string(),
            "paren" if self.parentheses_once => format!("{} (once)", on_off(s.auto_parentheses)),
            "paren" => on_off(s.auto_parentheses).to_string(),
            "brackets" => on_off(s.username_brackets).to_string(),
            "suffix" if s.auto_suffix => format!("on ({})", s.auto_suffix_value),
            "suffix" => "off".to_string(),
            _ => "-".to_string(),
        }
    }

    /// Runs each non-empty, non-comment line of `path` as console input.
    fn source(&mut self, path: &Path) -> Result<Flow> {
        if self.source_depth >= MAX_SOURCE_DEPTH {
            writeln!(self.out, "Refusing to source {}: nested too deeply", path.display())?;
            return Ok(Flow::Continue);
        }
        let path = expand_path(path);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                writeln!(self.out, "Cannot read {}: {err}", path.display())?;
                return Ok(Flow::Continue);
            }
        };
        log::info!("Running lines from {}", path.display());

        self.source_depth += 1;
        let mut flow = Ok(Flow::Continue);
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            flow = self.handle_line(line);
            if !matches!(flow, Ok(Flow::Continue)) {
                break;
            }
        }
        self.source_depth -= 1;
        flow
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
