use std::path::PathBuf;

use clap::{Parser, Subcommand};
use raqam_core::{
    convert_digits, extract_spans, NumeralConvention, NumeralScript, PhraseParser,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(
    name = "raqam",
    about = "Convert between integers, Arabic number words and numeral scripts"
)]
struct Cli {
    /// Path to a numeral convention file (JSON); the standard convention is used otherwise
    #[arg(long, global = true, env = "RAQAM_CONVENTION")]
    convention: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render an integer as Arabic words
    Words {
        #[arg(allow_hyphen_values = true)]
        value: i64,
    },
    /// Parse an Arabic number phrase into an integer
    Number {
        #[arg(required = true)]
        phrase: Vec<String>,
        /// Print how each word was classified
        #[arg(long)]
        tokens: bool,
    },
    /// Rewrite digits into another numeral script
    Digits {
        /// Target script: western, arabic or eastern
        #[arg(long, default_value = "western")]
        to: NumeralScript,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// List the digit runs found in text
    Extract {
        #[arg(required = true)]
        text: Vec<String>,
        /// Print byte offsets and scripts as JSON
        #[arg(long)]
        spans: bool,
    },
    /// Show the active convention
    Convention {
        /// Print the full tables as JSON
        #[arg(long)]
        dump: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json);

    let convention = match &cli.convention {
        Some(path) => {
            info!("loading convention from {}", path.display());
            NumeralConvention::from_path(path)?
        }
        None => NumeralConvention::standard(),
    };
    debug!("using convention {}", convention.name);

    match cli.command {
        Commands::Words { value } => {
            println!("{}", convention.render(value)?);
        }
        Commands::Number { phrase, tokens } => {
            let phrase = phrase.join(" ");
            let parser = PhraseParser::try_new(&convention)?;
            if tokens {
                for word in parser.classify(&phrase) {
                    match word.token {
                        Some(token) => println!("{}\t{}\t{:?}", word.position, word.text, token),
                        None => println!("{}\t{}\t-", word.position, word.text),
                    }
                }
            }
            println!("{}", parser.parse(&phrase)?);
        }
        Commands::Digits { to, text } => {
            println!("{}", convert_digits(&text.join(" "), to));
        }
        Commands::Extract { text, spans } => {
            let found = extract_spans(&text.join(" "));
            if spans {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                for span in found {
                    println!("{}", span.value);
                }
            }
        }
        Commands::Convention { dump } => {
            if dump {
                println!("{}", serde_json::to_string_pretty(&convention)?);
            } else {
                let parser = PhraseParser::try_new(&convention)?;
                println!(
                    "{}: {} scales, {} words, max {}",
                    convention.name,
                    convention.scales.entries.len(),
                    parser.vocabulary().len(),
                    convention.max_value()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,raqam_core=info"));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
