//! Console command parsing
//!
//! Commands may be written shell-style (`up 2`) or call-style (`up(2)`).

use crate::dump::Value;

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Frames,
    Up(usize),
    Down(usize),
    /// Source window with an optional radius
    Sources(Option<usize>),
    Locals,
    Globals,
    Set { name: String, value: Value },
    Help,
    Quit,
    /// Print the binding with this name
    Inspect(String),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Command::Empty);
        }

        let (name, args) = split_call(input);

        match name {
            "frames" => no_args(name, args, Command::Frames),
            "up" | "u" => Ok(Command::Up(count(name, args)?.unwrap_or(1))),
            "down" | "d" => Ok(Command::Down(count(name, args)?.unwrap_or(1))),
            "sources" | "source" | "list" | "l" => Ok(Command::Sources(count(name, args)?)),
            "locals" => no_args(name, args, Command::Locals),
            "globals" => no_args(name, args, Command::Globals),
            "help" | "h" | "?" => no_args(name, args, Command::Help),
            "quit" | "exit" | "q" => no_args(name, args, Command::Quit),
            "set" => parse_set(args),
            _ if is_identifier(name) && args.is_empty() => Ok(Command::Inspect(name.to_string())),
            _ => Err(format!(
                "Unknown command: '{}'. Type 'help' for available commands.",
                input
            )),
        }
    }
}

/// Split `name(args)` or `name args` into its parts
fn split_call(input: &str) -> (&str, &str) {
    if let Some(open) = input.find('(') {
        if let Some(inner) = input[open + 1..].strip_suffix(')') {
            return (input[..open].trim(), inner.trim());
        }
    }
    match input.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (input, ""),
    }
}

fn no_args(name: &str, args: &str, command: Command) -> Result<Command, String> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(format!("{} takes no arguments", name))
    }
}

fn count(name: &str, args: &str) -> Result<Option<usize>, String> {
    if args.is_empty() {
        return Ok(None);
    }
    let args = args
        .strip_prefix("count=")
        .or_else(|| args.strip_prefix("radius="))
        .unwrap_or(args)
        .trim();
    args.parse::<usize>()
        .map(Some)
        .map_err(|_| format!("{} expects a non-negative number, got '{}'", name, args))
}

fn parse_set(args: &str) -> Result<Command, String> {
    let (name, raw) = match args.split_once(char::is_whitespace) {
        Some((name, raw)) => (name, raw.trim()),
        None => return Err("usage: set NAME VALUE".to_string()),
    };
    if !is_identifier(name) {
        return Err(format!("'{}' is not a valid name", name));
    }
    // JSON literals keep their type, anything else is taken as text
    let value = match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(json) => Value::from_json(&json),
        Err(_) => Value::from_json(&serde_json::Value::String(raw.to_string())),
    };
    Ok(Command::Set {
        name: name.to_string(),
        value,
    })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_commands() {
        assert_eq!(Command::parse("up"), Ok(Command::Up(1)));
        assert_eq!(Command::parse("up 3"), Ok(Command::Up(3)));
        assert_eq!(Command::parse("up(2)"), Ok(Command::Up(2)));
        assert_eq!(Command::parse("down()"), Ok(Command::Down(1)));
        assert_eq!(Command::parse("down(count=4)"), Ok(Command::Down(4)));
        assert!(Command::parse("up -1").is_err());
    }

    #[test]
    fn test_sources_radius() {
        assert_eq!(Command::parse("sources"), Ok(Command::Sources(None)));
        assert_eq!(Command::parse("sources(5)"), Ok(Command::Sources(Some(5))));
        assert_eq!(Command::parse("l 3"), Ok(Command::Sources(Some(3))));
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
        assert_eq!(Command::parse("frames()"), Ok(Command::Frames));
        assert_eq!(Command::parse("exit"), Ok(Command::Quit));
        assert!(Command::parse("frames 2").is_err());
    }

    #[test]
    fn test_inspect_and_set() {
        assert_eq!(
            Command::parse("_frame"),
            Ok(Command::Inspect("_frame".to_string()))
        );
        assert_eq!(
            Command::parse("set retries 3"),
            Ok(Command::Set {
                name: "retries".to_string(),
                value: Value::new("3", "int"),
            })
        );
        assert_eq!(
            Command::parse("set greeting hello there"),
            Ok(Command::Set {
                name: "greeting".to_string(),
                value: Value::new("\"hello there\"", "str"),
            })
        );
        assert!(Command::parse("set 9lives 1").is_err());
        assert!(Command::parse("x + 1").is_err());
    }
}
