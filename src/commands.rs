//! Command line parsing
//!
//! Parses `bookfinder [command] [args...]` into a `Command`.

/// Parsed command from the process arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the search window (no arguments)
    Window,
    /// One-shot search printed to stdout: search <words...>
    Search { query: String },
    /// Show help: help
    Help,
    /// Anything we don't recognise
    Unknown { name: String },
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Self {
        let Some(first) = args.first() else {
            return Command::Window;
        };

        match first.as_ref().to_lowercase().as_str() {
            "search" | "s" => Command::Search {
                query: args[1..]
                    .iter()
                    .map(|s| s.as_ref())
                    .collect::<Vec<_>>()
                    .join(" "),
            },
            "help" | "--help" | "-h" => Command::Help,
            "open" | "window" => Command::Window,
            other => Command::Unknown {
                name: other.to_string(),
            },
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"Bookfinder - search the Open Library catalog

Usage: bookfinder [command]

Commands:
  (none), open          Open the search window
  search <words...>     Search once and print the results
  help                  Show this help message

Environment:
  BOOKFINDER_SEARCH_URL    Search endpoint (default https://openlibrary.org/search.json)
  BOOKFINDER_COVERS_URL    Cover image service (default https://covers.openlibrary.org/b)
  BOOKFINDER_SITE_ORIGIN   Detail link origin (default https://openlibrary.org)
  BOOKFINDER_TIMEOUT_SECS  Per-request timeout (default 15)
  RUST_LOG                 Log filter, e.g. bookfinder=debug"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_no_args() {
        let args: [&str; 0] = [];
        assert_eq!(Command::parse(&args), Command::Window);
    }

    #[test]
    fn test_parse_search_joins_words() {
        match Command::parse(&["search", "dune", "messiah"]) {
            Command::Search { query } => assert_eq!(query, "dune messiah"),
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_without_words() {
        // Left for the controller to reject
        assert_eq!(
            Command::parse(&["search"]),
            Command::Search { query: String::new() }
        );
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(Command::parse(&["--help"]), Command::Help);
        assert_eq!(Command::parse(&["HELP"]), Command::Help);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse(&["frobnicate"]),
            Command::Unknown { name: "frobnicate".into() }
        );
    }
}
