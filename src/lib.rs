//! Safeguard Editor — rewrites marketplace messages so restricted terms are
//! obfuscated, and highlights every edit.
//!
//! This is the app shell that wires together:
//! - The safeguard layer (safety/): catalog, transformer, markup
//! - The optional generative rewrite (llm/)
//! - Settings (config.rs), clipboard (clipboard.rs), CLI options (cli.rs)

pub mod cli;
pub mod clipboard;
pub mod config;
pub mod llm;
pub mod safety;

use std::io::Read;

use cli::{Options, OutputFormat};
use config::Settings;
use safety::markup;
use safety::transform::{apply_safeguard, SafeguardResult};

/// Entry point — called by the `safeguard` binary.
pub fn run() {
    env_logger::init();

    let opts = match Options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };
    if opts.help {
        println!("{}", cli::USAGE);
        return;
    }

    if let Err(e) = execute(opts) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn execute(opts: Options) -> Result<(), Box<dyn std::error::Error>> {
    let mut settings = Settings::from_env()?;
    if let Some(path) = opts.keywords.clone() {
        settings.keywords_path = Some(path);
    }

    let input = match opts.text.clone() {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf.trim_end_matches(&['\r', '\n'][..]).to_string()
        }
    };

    if input.trim().is_empty() {
        log::warn!("[SAFEGUARD] Empty input, nothing to rewrite");
        return Err("Please enter some text first".into());
    }

    let start = std::time::Instant::now();
    let result = if opts.ai {
        let rewritten = rewrite_with_model(&input, &settings)?;
        SafeguardResult {
            safe_message: rewritten,
            changes_made: Vec::new(),
        }
    } else {
        let catalog = settings.catalog()?;
        apply_safeguard(&input, &catalog)
    };
    log::info!(
        "[SAFEGUARD] Conversion applied in {}ms ({} change(s))",
        start.elapsed().as_millis(),
        result.changes_made.len()
    );

    match opts.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Plain => println!("{}", markup::strip_markers(&result.safe_message)),
        OutputFormat::Highlighted => println!("{}", markup::render_ansi(&result.safe_message)),
    }

    if opts.format != OutputFormat::Json && result.has_changes() {
        eprintln!("Changes made:");
        for change in &result.changes_made {
            eprintln!("  - {}", change);
        }
    }

    if opts.copy {
        // A missing clipboard (headless session) is not fatal; the text is
        // already on stdout.
        match clipboard::copy_plain(&result.safe_message) {
            Ok(_) => eprintln!("Copied to clipboard!"),
            Err(e) => log::warn!("[CLIPBOARD] {}", e),
        }
    }

    Ok(())
}

/// Run the generative rewrite on a single-threaded runtime.
fn rewrite_with_model(text: &str, settings: &Settings) -> std::io::Result<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(llm::ai_rewrite(text, &settings.rewrite)))
}
