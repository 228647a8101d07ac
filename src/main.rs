use clap::{Parser, Subcommand};
use domain_king::{config, output, session, shell};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "domain-king")]
#[command(about = "Section router for the Domain King portfolio")]
#[command(long_about = "\
Section router for the Domain King portfolio

The page is a horizontal slider of full-viewport sections (Gallery and About
by default). Tabs, arrow keys, mouse drags and touch swipes move between
them; each user-driven change pushes a history entry, and back/forward
return to the matching section without pushing.

Configuration lives in router.toml inside the --config directory:

  site/
  ├── router.toml          # Sections, thresholds, durations, backend
  ├── content.json         # Gallery images + About markdown (for `shell`)
  └── sessions/
      └── swipe.json       # Scripted input (for `simulate`)

Run 'domain-king gen-config' to print a documented router.toml.")]
#[command(version = env!("DOMAIN_KING_VERSION"))]
struct Cli {
    /// Directory containing router.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print a stock router.toml with all options documented
    GenConfig,
    /// Validate router.toml and summarize the sections
    Check,
    /// Render the page shell for a request path
    Shell {
        /// JSON file with gallery images and About content
        content: PathBuf,
        /// Request path used to pick the initial section
        #[arg(long, default_value = "/")]
        path: String,
        /// Write HTML here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay a scripted input session and print the intent trace
    Simulate {
        /// JSON session script
        script: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Check => {
            println!("==> Checking {}", cli.config.join(config::CONFIG_FILE).display());
            let router_config = config::load_config(&cli.config)?;
            output::print_check_output(&router_config);
            println!("==> Config is valid");
        }
        Command::Shell {
            content,
            path,
            output: out_path,
        } => {
            let router_config = config::load_config(&cli.config)?;
            let shell_content = shell::load_content(&content)?;
            let markup = shell::render_shell(&router_config, &shell_content, &path)?;
            match out_path {
                Some(out_path) => {
                    std::fs::write(&out_path, markup.into_string())?;
                    println!("Generated {}", out_path.display());
                }
                None => println!("{}", markup.into_string()),
            }
        }
        Command::Simulate { script, json } => {
            let router_config = config::load_config(&cli.config)?;
            let session = session::load_session(&script)?;
            let report = session::run_session(&router_config, &session)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_session_report(&report, &router_config);
            }
        }
    }

    Ok(())
}
