//! Command-line options for the `safeguard` binary.
//!
//! Usage:
//!   safeguard [OPTIONS] [TEXT...]       Rewrite TEXT (or stdin when omitted)
//!
//! Options:
//!   --plain             Print the result without highlighting
//!   --json              Print {"safeMessage", "changesMade"} as JSON
//!   --copy              Copy the plain result to the clipboard
//!   --ai                Use the generative rewrite instead of the local rules
//!   --keywords <file>   Extra restricted terms, one per line

use std::path::PathBuf;

pub const USAGE: &str = "\
Usage:
  safeguard [--plain] [--json] [--copy] [--ai] [--keywords <file>] [TEXT...]
  echo \"TEXT\" | safeguard [OPTIONS]";

/// How the result is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Highlighted,
    Plain,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Options {
    pub format: OutputFormat,
    pub copy: bool,
    pub ai: bool,
    pub keywords: Option<PathBuf>,
    /// Message text from the arguments; `None` means read stdin.
    pub text: Option<String>,
    pub help: bool,
}

impl Options {
    /// Parse arguments, excluding the program name.
    ///
    /// Everything after `--` is message text, even if it looks like a flag.
    pub fn parse<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut opts = Options::default();
        let mut words: Vec<String> = Vec::new();
        let mut args = args.into_iter().map(Into::into);
        let mut literal = false;

        while let Some(arg) = args.next() {
            if literal {
                words.push(arg);
                continue;
            }
            match arg.as_str() {
                "--" => literal = true,
                "-h" | "--help" => opts.help = true,
                "--plain" => opts.format = OutputFormat::Plain,
                "--json" => opts.format = OutputFormat::Json,
                "--copy" => opts.copy = true,
                "--ai" => opts.ai = true,
                "--keywords" => {
                    let path = args
                        .next()
                        .ok_or_else(|| "--keywords requires a file path".to_string())?;
                    opts.keywords = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => {
                    return Err(format!("Unknown option: {}", flag));
                }
                _ => words.push(arg),
            }
        }

        if !words.is_empty() {
            opts.text = Some(words.join(" "));
        }
        Ok(opts)
    }
}
