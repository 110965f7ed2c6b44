use clap::{Parser, Subcommand};

use tex_cli::commands::{classify_ops, config_ops, replay_ops};

#[derive(Parser)]
#[command(name = "textool", about = "Math/markdown auto-formatting diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the environment of every line in a document
    Classify {
        /// Path to the markdown document
        file: String,
        /// Report only the environment at LINE:COL (zero-based)
        #[arg(long)]
        at: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Replay keystrokes against a document and print the result
    Replay {
        /// Path to the markdown document (a ‸ marks the cursor)
        file: String,
        /// Keys to press; `<Name>` sends a named key, `<lt>` a literal `<`
        keys: String,
        /// Starting cursor as LINE:COL when the document has no ‸ marker
        #[arg(long)]
        cursor: Option<String>,
        /// Path to a settings TOML file (defaults to the embedded settings)
        #[arg(long)]
        settings: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve the numerator a fast fraction would capture
    Fraction {
        /// Line of math text
        line: String,
        /// Column of the slash (defaults to the last `/` in the line)
        #[arg(long)]
        slash: Option<usize>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the default settings TOML to stdout
    SettingsExport,

    /// Validate a settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Command::Classify { file, at, json } => classify_ops::classify(&file, at.as_deref(), json),
        Command::Replay {
            file,
            keys,
            cursor,
            settings,
            json,
        } => replay_ops::replay(&file, &keys, cursor.as_deref(), settings.as_deref(), json),
        Command::Fraction { line, slash, json } => classify_ops::fraction(&line, slash, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
