// UniLang CLI
// Feeds typed text through a shortcut engine session and prints the result

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;

use unilang_core::settings::parse_trigger;
use unilang_core::{parse_event_stream, Dictionary, Engine, Settings, TextBuffer, TextSurface};

/// LaTeX-style Unicode shortcuts for typed text
#[derive(Parser, Debug)]
#[command(name = "unilang")]
#[command(author = "unilang contributors")]
#[command(version)]
#[command(about = "Expand \\alpha-style shortcuts into Unicode", long_about = None)]
struct Args {
    /// Text to type (read from stdin when omitted). Special keys are written
    /// as <backspace>, <enter> and <done>.
    text: Option<String>,

    /// Shortcuts document (JSON) to use instead of the bundled one
    #[arg(short, long, value_name = "FILE")]
    dictionary: Option<PathBuf>,

    /// TOML settings file (default: ~/.config/unilang/settings.toml)
    #[arg(short, long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Override the trigger character
    #[arg(short, long, value_name = "CHAR")]
    trigger: Option<String>,

    /// Print every action instead of the resulting text
    #[arg(short, long)]
    actions: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Validate the shortcuts document and exit
    #[arg(long)]
    check: bool,

    /// List all shortcuts and exit
    #[arg(long)]
    list: bool,
}

/// Main application state
struct Application {
    args: Args,
    settings: Settings,
}

impl Application {
    fn new(args: Args) -> Result<Self> {
        let mut settings = match &args.settings {
            Some(path) => Settings::from_file(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::load_default().context("loading default settings")?,
        };

        if let Some(trigger) = &args.trigger {
            settings.set_trigger_key(parse_trigger(trigger)?);
        }

        Ok(Self { args, settings })
    }

    /// Dictionary path from the command line, then from settings
    fn dictionary_path(&self) -> Option<PathBuf> {
        self.args
            .dictionary
            .clone()
            .or_else(|| self.settings.dictionary_path().map(PathBuf::from))
    }

    fn load_dictionary(&self) -> Dictionary {
        match self.dictionary_path() {
            Some(path) => Dictionary::from_path(path),
            None => Dictionary::bundled(),
        }
    }

    /// Validate the shortcuts document
    fn check(&self) -> Result<()> {
        let dictionary = match self.dictionary_path() {
            Some(path) => Dictionary::try_from_path(&path)
                .with_context(|| format!("loading shortcuts from {}", path.display()))?,
            None => Dictionary::bundled(),
        };
        if !dictionary.is_loaded() {
            bail!("shortcuts dictionary failed to load");
        }

        let trigger = self.settings.trigger_key();
        let unreachable = dictionary.unreachable_patterns(trigger);
        for pattern in &unreachable {
            log::warn!("Shortcut {:?} can never be typed with trigger {:?}", pattern, trigger);
        }
        let shadowed = dictionary.shadowed_patterns();
        for (pattern, by) in &shadowed {
            log::warn!("Shortcut {:?} is always replaced early by {:?}", pattern, by);
        }

        println!(
            "{} shortcuts, {} unreachable, {} shadowed",
            dictionary.count(),
            unreachable.len(),
            shadowed.len()
        );
        Ok(())
    }

    fn list(&self) {
        let dictionary = self.load_dictionary();
        for (pattern, replacement) in dictionary.iter() {
            println!("{}\t{}", pattern, replacement);
        }
    }

    /// Type `input` into a fresh session and return the host text
    fn type_text(&self, input: &str) -> String {
        let dictionary = Arc::new(self.load_dictionary());
        let mut engine = Engine::with_config(dictionary, self.settings.engine_config());
        let mut buffer = TextBuffer::new();

        for event in parse_event_stream(input) {
            let action = engine.process_event(event);
            if self.args.actions {
                println!("{:<10} {}", event.to_string(), action);
            }
            buffer.apply(&action);
        }

        buffer.into_string()
    }

    fn run(&self) -> Result<()> {
        if self.args.check {
            return self.check();
        }
        if self.args.list {
            self.list();
            return Ok(());
        }

        let input = match &self.args.text {
            Some(text) => text.clone(),
            None => {
                let mut input = String::new();
                io::stdin()
                    .read_to_string(&mut input)
                    .context("reading stdin")?;
                input
            }
        };

        let output = self.type_text(&input);
        if !self.args.actions {
            print!("{}", output);
            if self.args.text.is_some() {
                println!();
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let app = Application::new(args)?;
    app.run()
}
