use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infix_eval::{evaluate, to_postfix, CalcResult, Decimal};
use log::{debug, info};

/// Printed when the REPL starts
const BANNER: &str = "When done, enter 'exit' to quit the calculator.";
const DEFAULT_PROMPT: &str = "Enter an infix expression: ";
/// Compared ignoring ASCII case
const EXIT_COMMAND: &str = "exit";

#[derive(Debug, Parser)]
#[command(
    name = "infix",
    version,
    about = "Evaluate infix arithmetic expressions with exact decimal arithmetic",
    long_about = "infix evaluates arithmetic expressions such as '5 * (2 + 2)'.\n\n\
        Expressions are converted to postfix notation with the shunting-yard\n\
        algorithm and reduced on a stack using exact decimal arithmetic.\n\
        Supported operators are + - * / and parentheses.\n\n\
        EXAMPLES:\n\
        \n  infix                          Start the interactive calculator\n\
        \n  infix eval expressions.txt     Evaluate one expression per line\n\
        \n  echo '2 + 2' | infix eval      Evaluate expressions from stdin\n\
        \n  infix postfix '10 / 5 * 2'     Show the postfix form",
    after_help = "Environment: INFIX_PROMPT, INFIX_HISTORY_FILE, INFIX_NO_BANNER, RUST_LOG"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the interactive calculator (default)
    #[command(
        about = "Start the interactive calculator",
        long_about = "Reads one infix expression per line and prints its value.\n\n\
            Enter 'exit' (any case) or press Ctrl-D to quit."
    )]
    Repl,

    /// Evaluate one expression per line from a file or stdin
    Eval {
        /// File with one expression per line (reads from stdin if not provided)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Print the postfix form of an infix expression
    Postfix {
        /// The infix expression, quoted
        #[arg(value_name = "EXPRESSION", allow_hyphen_values = true)]
        expression: String,
    },
}

/// REPL settings gathered from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
struct ReplConfig {
    prompt: String,
    history_file: Option<PathBuf>,
    banner: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_file: None,
            banner: true,
        }
    }
}

impl ReplConfig {
    /// INFIX_PROMPT, INFIX_HISTORY_FILE, INFIX_NO_BANNER
    fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(prompt) = lookup("INFIX_PROMPT").filter(|p| !p.is_empty()) {
            config.prompt = prompt;
        }
        if let Some(path) = lookup("INFIX_HISTORY_FILE").filter(|p| !p.trim().is_empty()) {
            config.history_file = Some(PathBuf::from(path));
        }
        if let Some(flag) = lookup("INFIX_NO_BANNER") {
            config.banner = flag.is_empty() || flag == "0";
        }
        config
    }
}

/// Formats an evaluation result the way the calculator prints it
fn render(result: CalcResult<Decimal>) -> String {
    match result {
        Ok(value) => format!("=> {value}"),
        Err(err) => format!("=> Invalid expression: {err}"),
    }
}

#[derive(Debug, Default)]
struct ReplSession {
    evaluated: usize,
    failed: usize,
}

impl ReplSession {
    /// Returns the lines to print and whether the session should end
    fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        if line.eq_ignore_ascii_case(EXIT_COMMAND) {
            return (Vec::new(), true);
        }

        let result = evaluate(line);
        self.evaluated += 1;
        if result.is_err() {
            self.failed += 1;
        }
        (vec![render(result), String::new()], false)
    }
}

fn run_repl(config: &ReplConfig) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::Editor;
    let mut rl = match Editor::<(), rustyline::history::DefaultHistory>::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    if let Some(path) = &config.history_file {
        if let Err(e) = rl.load_history(path) {
            debug!("no history loaded from '{}': {e}", path.display());
        }
    }

    if config.banner {
        println!("{BANNER}");
    }

    let mut session = ReplSession::default();
    let rc = loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    break 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                break 2;
            }
        }
    };

    if let Some(path) = &config.history_file {
        if let Err(e) = rl.save_history(path) {
            eprintln!("warning: failed to save history to '{}': {e}", path.display());
        }
    }
    info!(
        "session ended: {} expression(s), {} invalid",
        session.evaluated, session.failed
    );
    rc
}

/// Evaluates every non-blank line, returning the output and the failure count
fn eval_lines(source: &str) -> (Vec<String>, usize) {
    let mut out = Vec::new();
    let mut failed = 0;
    for line in source.lines().filter(|l| !l.trim().is_empty()) {
        let result = evaluate(line);
        if result.is_err() {
            failed += 1;
        }
        out.push(render(result));
    }
    (out, failed)
}

fn read_source_from_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn run_eval(input: &Option<PathBuf>) -> i32 {
    let source = match read_source_from_input(input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let (out, failed) = eval_lines(&source);
    for l in &out {
        println!("{l}");
    }
    info!("evaluated {} expression(s), {failed} invalid", out.len());
    if failed > 0 {
        1
    } else {
        0
    }
}

fn run_postfix(expression: &str) -> i32 {
    match to_postfix(expression) {
        Ok(postfix) => {
            println!("{postfix}");
            0
        }
        Err(e) => {
            eprintln!("Invalid expression: {e}");
            1
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .try_init();
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.unwrap_or(Command::Repl) {
        Command::Repl => run_repl(&ReplConfig::from_env()),
        Command::Eval { input } => run_eval(&input),
        Command::Postfix { expression } => run_postfix(&expression),
    }
}

fn main() {
    std::process::exit(run_cli());
}


#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn eval_lines_skips_blank_lines() {
        let (out, failed) = eval_lines("2 + 2\n\n   \n2.0 + 2\r\n(5 + 5\n");
        assert_eq!(
            out,
            vec![
                "=> 4".to_string(),
                "=> 4.0".to_string(),
                "=> Invalid expression: Missing ) parenthesis.".to_string(),
            ]
        );
        assert_eq!(failed, 1);
    }

    #[test]
    fn eval_reads_expressions_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exprs.txt");
        fs::write(&path, "10 / 5 * 2\n8 / (0 - 2)\n").unwrap();

        let source = read_source_from_input(&Some(path.clone())).unwrap();
        let (out, failed) = eval_lines(&source);
        assert_eq!(out, vec!["=> 1".to_string(), "=> -4".to_string()]);
        assert_eq!(failed, 0);
        assert_eq!(run_eval(&Some(path)), 0);
    }

    #[test]
    fn eval_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = read_source_from_input(&Some(missing.clone())).unwrap_err();
        assert!(err.contains("failed to read"));
        assert_eq!(run_eval(&Some(missing)), 2);
    }

    #[test]
    fn eval_exit_code_reflects_failures() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "2 + 2\n2 3a +\n").unwrap();
        assert_eq!(run_eval(&Some(path)), 1);
    }

    #[test]
    fn postfix_exit_codes() {
        assert_eq!(run_postfix("10 * (5 + 5)"), 0);
        assert_eq!(run_postfix("5 + 5)"), 1);
    }

    #[test]
    fn config_defaults_without_environment() {
        let config = ReplConfig::from_vars(|_| None);
        assert_eq!(config, ReplConfig::default());
        assert_eq!(config.prompt, DEFAULT_PROMPT);
        assert!(config.banner);
    }

    #[test]
    fn config_reads_overrides() {
        let config = ReplConfig::from_vars(|key| match key {
            "INFIX_PROMPT" => Some("calc> ".to_string()),
            "INFIX_HISTORY_FILE" => Some("/tmp/infix_history".to_string()),
            "INFIX_NO_BANNER" => Some("1".to_string()),
            _ => None,
        });
        assert_eq!(config.prompt, "calc> ");
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/infix_history")));
        assert!(!config.banner);
    }

    #[test]
    fn config_ignores_empty_values() {
        let config = ReplConfig::from_vars(|key| match key {
            "INFIX_PROMPT" | "INFIX_HISTORY_FILE" | "INFIX_NO_BANNER" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config, ReplConfig::default());
    }

    #[test]
    fn cli_version_is_set() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        let version = cmd.get_version().expect("version should be set");
        assert!(!version.is_empty(), "version should not be empty");
    }

    #[test]
    fn cli_help_contains_expected_content() {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        cmd.write_long_help(&mut buf).unwrap();
        let help = String::from_utf8(buf).unwrap();

        assert!(help.contains("shunting-yard"), "help should describe the algorithm");
        assert!(help.contains("EXAMPLES"), "help should include examples section");
        assert!(help.contains("repl"), "help should list repl subcommand");
        assert!(help.contains("eval"), "help should list eval subcommand");
        assert!(help.contains("postfix"), "help should list postfix subcommand");
    }

    #[test]
    fn cli_defaults_to_repl() {
        let cli = Cli::try_parse_from(["infix"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::try_parse_from(["infix", "-vvv"]).unwrap();
        assert_eq!(cli.verbose, 3, "verbose count should be 3 for -vvv");
    }

    #[test]
    fn cli_parses_eval_with_file() {
        let cli = Cli::try_parse_from(["infix", "eval", "exprs.txt"]).unwrap();
        match cli.command {
            Some(Command::Eval { input }) => {
                assert_eq!(input, Some(PathBuf::from("exprs.txt")));
            }
            _ => panic!("expected Eval command"),
        }
    }

    #[test]
    fn cli_postfix_accepts_leading_operator() {
        let cli = Cli::try_parse_from(["infix", "postfix", "- 5"]).unwrap();
        match cli.command {
            Some(Command::Postfix { expression }) => assert_eq!(expression, "- 5"),
            _ => panic!("expected Postfix command"),
        }
    }
}
