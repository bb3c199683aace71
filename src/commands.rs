//! Command table and dispatcher
//!
//! Dispatch is a pure function from the session's configuration, history, and
//! a submitted command line to output lines plus effect requests. Nothing
//! here touches the display surface, so the whole table is unit-testable.

use chrono::Local;

use crate::config::Config;
use crate::effect::Effect;
use crate::history::CommandHistory;

/// Commands offered by tab completion. Dispatch also accepts `ls`, `pwd`,
/// `exit`, and `quit`, which stay out of completion on purpose.
pub const COMPLETIONS: [&str; 10] = [
    "help", "about", "projects", "social", "clear", "whoami", "date", "history", "banner", "theme",
];

/// Presentation class of an output line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Error,
    Info,
    Ascii,
    /// Echo of the submitted command behind a synthesized prompt
    Prompt,
    /// Indented list entry (projects, social links)
    Item,
}

/// One styled line of terminal output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub style: LineStyle,
}

impl OutputLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Plain,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Info,
        }
    }

    pub fn ascii(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Ascii,
        }
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Prompt,
        }
    }

    pub fn item(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Item,
        }
    }

    fn blank() -> Self {
        Self::plain("")
    }
}

/// Result of dispatching one command line
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandOutput {
    pub lines: Vec<OutputLine>,
    pub effects: Vec<Effect>,
}

impl CommandOutput {
    fn lines(lines: Vec<OutputLine>) -> Self {
        Self {
            lines,
            effects: Vec::new(),
        }
    }
}

/// Result of a completion request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Unique prefix match: replace the input with this command
    Replace(&'static str),
    /// Several matches: list them, leave the input alone
    Candidates(Vec<&'static str>),
    /// No match: no visible effect
    NoMatch,
}

/// Prefix-complete `input` against the completion table (case-insensitive)
pub fn complete(input: &str) -> Completion {
    let prefix = input.to_lowercase();
    let matches: Vec<&'static str> = COMPLETIONS
        .iter()
        .copied()
        .filter(|cmd| cmd.starts_with(&prefix))
        .collect();

    match matches.as_slice() {
        [] => Completion::NoMatch,
        [only] => Completion::Replace(only),
        _ => Completion::Candidates(matches),
    }
}

/// Dispatch a submitted command line
///
/// The first whitespace-delimited token selects the command,
/// case-insensitively. Unknown tokens report the original-case input.
pub fn dispatch(config: &Config, history: &CommandHistory, command: &str) -> CommandOutput {
    let lowered = command.to_lowercase();
    let cmd = lowered.split_whitespace().next().unwrap_or("");

    match cmd {
        "help" => show_help(),
        "about" => show_about(config),
        "projects" => show_projects(config),
        "social" => show_social(config),
        "clear" => CommandOutput {
            lines: Vec::new(),
            effects: vec![Effect::ClearScreen],
        },
        "whoami" => CommandOutput::lines(vec![OutputLine::plain(config.username())]),
        "date" => CommandOutput::lines(vec![OutputLine::plain(
            Local::now().format("%a %b %e %Y %H:%M:%S %z").to_string(),
        )]),
        "history" => show_history(history),
        "banner" => show_banner(config),
        "theme" => show_theme(config),
        "ls" => CommandOutput::lines(vec![OutputLine::plain("Projects  Social  About  Config")]),
        "pwd" => CommandOutput::lines(vec![OutputLine::plain(format!(
            "/home/{}",
            config.username()
        ))]),
        "exit" | "quit" => CommandOutput {
            lines: vec![OutputLine::error("Session terminated.")],
            effects: vec![Effect::Terminate],
        },
        _ => CommandOutput::lines(vec![OutputLine::error(format!(
            "Command not found: {}. Type \"help\" for available commands.",
            command
        ))]),
    }
}

fn show_help() -> CommandOutput {
    let text = [
        "Available Commands:",
        "  help      - Show this help message",
        "  about     - About information",
        "  projects  - Show projects",
        "  social    - Show social links",
        "  banner    - Show ASCII banner",
        "  clear     - Clear terminal",
        "  whoami    - Show current user",
        "  date      - Show current date",
        "  history   - Show command history",
        "  theme     - Show color theme",
        "  ls        - List contents",
        "  pwd       - Print working directory",
        "  exit      - Close terminal",
        "",
        "Navigation:",
        "  [↑][↓]    - Browse command history",
        "  [Tab]     - Auto-complete commands",
        "  [Esc]     - Clear input line",
    ];
    CommandOutput::lines(text.iter().map(|line| OutputLine::plain(*line)).collect())
}

fn show_about(config: &Config) -> CommandOutput {
    let mut lines = vec![OutputLine::plain(
        config
            .about_greeting
            .as_deref()
            .unwrap_or("No about information available."),
    )];
    if let Some(link) = &config.repo_link {
        lines.push(OutputLine::blank());
        lines.push(OutputLine::plain(format!("Repository: {}", link)));
    }
    CommandOutput::lines(lines)
}

fn show_projects(config: &Config) -> CommandOutput {
    if config.projects.is_empty() {
        return CommandOutput::lines(vec![OutputLine::plain("No projects available.")]);
    }

    let mut lines = vec![OutputLine::blank(), OutputLine::plain("Projects:")];
    for (index, project) in config.projects.iter().enumerate() {
        lines.push(OutputLine::item(format!("  {}. {}", index + 1, project.name())));
        lines.push(OutputLine::item(format!("     {}", project.description())));
        lines.push(OutputLine::item(format!("     Link: {}", project.link())));
    }
    CommandOutput::lines(lines)
}

fn show_social(config: &Config) -> CommandOutput {
    if config.social.is_empty() {
        return CommandOutput::lines(vec![OutputLine::plain("No social links available.")]);
    }

    let mut lines = vec![OutputLine::blank(), OutputLine::plain("Social Links:")];
    for (platform, handle) in &config.social {
        if handle.is_empty() {
            continue;
        }
        let url = social_url(platform, handle);
        lines.push(OutputLine::item(format!("  {}: {} ({})", platform, handle, url)));
    }
    CommandOutput::lines(lines)
}

/// Derive a profile URL from a platform name and handle
pub fn social_url(platform: &str, handle: &str) -> String {
    match platform {
        "github" => format!("https://github.com/{}", handle),
        "linkedin" => format!("https://linkedin.com/in/{}", handle),
        "twitter" => format!("https://twitter.com/{}", handle),
        "email" => format!("mailto:{}", handle),
        _ => handle.to_string(),
    }
}

fn show_history(history: &CommandHistory) -> CommandOutput {
    if history.is_empty() {
        return CommandOutput::lines(vec![OutputLine::plain("No command history.")]);
    }

    let mut lines = vec![OutputLine::blank(), OutputLine::plain("Command History:")];
    for (index, cmd) in history.iter().enumerate() {
        lines.push(OutputLine::plain(format!("  {}. {}", index + 1, cmd)));
    }
    CommandOutput::lines(lines)
}

fn show_banner(config: &Config) -> CommandOutput {
    CommandOutput::lines(config.ascii.iter().map(|line| OutputLine::ascii(line.as_str())).collect())
}

fn show_theme(config: &Config) -> CommandOutput {
    if config.colors.is_empty() {
        return CommandOutput::lines(vec![OutputLine::plain("Theme information not available.")]);
    }

    let mut lines = vec![OutputLine::blank(), OutputLine::plain("Current Theme Colors:")];
    for (name, value) in &config.colors {
        lines.push(OutputLine::plain(format!("  {}: {}", name, value)));
    }
    CommandOutput::lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Project;

    fn config() -> Config {
        Config::fallback()
    }

    fn texts(output: &CommandOutput) -> Vec<&str> {
        output.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_dispatch_is_case_insensitive_on_token() {
        let history = CommandHistory::new();
        let lower = dispatch(&config(), &history, "help");
        let upper = dispatch(&config(), &history, "HELP");
        let mixed = dispatch(&config(), &history, "Help");
        assert_eq!(lower, upper);
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_unknown_command_echoes_original_case() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "XyZ");
        assert_eq!(
            texts(&output),
            vec!["Command not found: XyZ. Type \"help\" for available commands."]
        );
        assert_eq!(output.lines[0].style, LineStyle::Error);
    }

    #[test]
    fn test_whoami_uses_configured_username() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "whoami");
        assert_eq!(texts(&output), vec!["operator"]);
    }

    #[test]
    fn test_whoami_fallback_when_unset() {
        let history = CommandHistory::new();
        let output = dispatch(&Config::default(), &history, "whoami");
        assert_eq!(texts(&output), vec!["operator"]);
    }

    #[test]
    fn test_pwd() {
        let history = CommandHistory::new();
        let mut cfg = config();
        cfg.username = Some("ghost".to_string());
        let output = dispatch(&cfg, &history, "pwd");
        assert_eq!(texts(&output), vec!["/home/ghost"]);
    }

    #[test]
    fn test_ls_fixed_listing() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "ls");
        assert_eq!(texts(&output), vec!["Projects  Social  About  Config"]);
    }

    #[test]
    fn test_projects_empty() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "projects");
        assert_eq!(texts(&output), vec!["No projects available."]);
    }

    #[test]
    fn test_projects_numbered_listing() {
        let history = CommandHistory::new();
        let mut cfg = config();
        cfg.projects = vec![
            Project("one".into(), "first".into(), "https://a".into()),
            Project("two".into(), "second".into(), "https://b".into()),
        ];
        let output = dispatch(&cfg, &history, "projects");
        assert_eq!(
            texts(&output),
            vec![
                "",
                "Projects:",
                "  1. one",
                "     first",
                "     Link: https://a",
                "  2. two",
                "     second",
                "     Link: https://b",
            ]
        );
    }

    #[test]
    fn test_social_url_templates() {
        assert_eq!(social_url("github", "octo"), "https://github.com/octo");
        assert_eq!(social_url("linkedin", "octo"), "https://linkedin.com/in/octo");
        assert_eq!(social_url("twitter", "octo"), "https://twitter.com/octo");
        assert_eq!(social_url("email", "a@b"), "mailto:a@b");
        assert_eq!(social_url("mastodon", "@octo@host"), "@octo@host");
    }

    #[test]
    fn test_social_listing_skips_empty_handles() {
        let history = CommandHistory::new();
        let mut cfg = config();
        cfg.social.insert("github".into(), "octo".into());
        cfg.social.insert("twitter".into(), "".into());
        let output = dispatch(&cfg, &history, "social");
        assert_eq!(
            texts(&output),
            vec!["", "Social Links:", "  github: octo (https://github.com/octo)"]
        );
    }

    #[test]
    fn test_social_empty() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "social");
        assert_eq!(texts(&output), vec!["No social links available."]);
    }

    #[test]
    fn test_clear_requests_effect_only() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "clear");
        assert!(output.lines.is_empty());
        assert_eq!(output.effects, vec![Effect::ClearScreen]);
    }

    #[test]
    fn test_exit_and_quit_request_termination() {
        let history = CommandHistory::new();
        for cmd in ["exit", "quit"] {
            let output = dispatch(&config(), &history, cmd);
            assert_eq!(texts(&output), vec!["Session terminated."]);
            assert_eq!(output.lines[0].style, LineStyle::Error);
            assert_eq!(output.effects, vec![Effect::Terminate]);
        }
    }

    #[test]
    fn test_history_listing_most_recent_first() {
        let mut history = CommandHistory::new();
        history.push("help");
        history.push("whoami");
        let output = dispatch(&config(), &history, "history");
        assert_eq!(
            texts(&output),
            vec!["", "Command History:", "  1. whoami", "  2. help"]
        );
    }

    #[test]
    fn test_history_empty() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "history");
        assert_eq!(texts(&output), vec!["No command history."]);
    }

    #[test]
    fn test_banner_prints_ascii_block() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "banner");
        assert_eq!(texts(&output), vec!["C2WHISPERER TERMINAL"]);
        assert_eq!(output.lines[0].style, LineStyle::Ascii);
    }

    #[test]
    fn test_banner_noop_when_unconfigured() {
        let history = CommandHistory::new();
        let output = dispatch(&Config::default(), &history, "banner");
        assert!(output.lines.is_empty());
    }

    #[test]
    fn test_theme_lists_color_pairs() {
        let history = CommandHistory::new();
        let mut cfg = config();
        cfg.colors.insert("error".into(), "#ff5555".into());
        let output = dispatch(&cfg, &history, "theme");
        assert_eq!(
            texts(&output),
            vec!["", "Current Theme Colors:", "  error: #ff5555"]
        );
    }

    #[test]
    fn test_theme_unavailable() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "theme");
        assert_eq!(texts(&output), vec!["Theme information not available."]);
    }

    #[test]
    fn test_about_with_repo_link() {
        let history = CommandHistory::new();
        let mut cfg = config();
        cfg.repo_link = Some("https://example.com/repo".into());
        let output = dispatch(&cfg, &history, "about");
        assert_eq!(
            texts(&output),
            vec![
                "Welcome to C2Whisperer Terminal",
                "",
                "Repository: https://example.com/repo"
            ]
        );
    }

    #[test]
    fn test_about_fallback() {
        let history = CommandHistory::new();
        let output = dispatch(&Config::default(), &history, "about");
        assert_eq!(texts(&output), vec!["No about information available."]);
    }

    #[test]
    fn test_date_prints_current_year() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "date");
        let year = Local::now().format("%Y").to_string();
        assert!(output.lines[0].text.contains(&year));
    }

    #[test]
    fn test_help_lists_all_commands_and_keys() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "help");
        let text = texts(&output).join("\n");
        for cmd in COMPLETIONS {
            assert!(text.contains(cmd), "help is missing {}", cmd);
        }
        for key in ["[↑][↓]", "[Tab]", "[Esc]"] {
            assert!(text.contains(key), "help is missing {}", key);
        }
    }

    #[test]
    fn test_arguments_after_first_token_are_ignored() {
        let history = CommandHistory::new();
        let output = dispatch(&config(), &history, "whoami --verbose");
        assert_eq!(texts(&output), vec!["operator"]);
    }

    #[test]
    fn test_complete_unique_prefix() {
        assert_eq!(complete("he"), Completion::Replace("help"));
        assert_eq!(complete("WH"), Completion::Replace("whoami"));
    }

    #[test]
    fn test_complete_ambiguous_prefix() {
        // "h" matches help and history
        assert_eq!(
            complete("h"),
            Completion::Candidates(vec!["help", "history"])
        );
    }

    #[test]
    fn test_complete_empty_input_lists_everything() {
        assert_eq!(complete(""), Completion::Candidates(COMPLETIONS.to_vec()));
    }

    #[test]
    fn test_complete_no_match() {
        assert_eq!(complete("xyz"), Completion::NoMatch);
        // ls dispatches but does not complete
        assert_eq!(complete("ls"), Completion::NoMatch);
    }
}
