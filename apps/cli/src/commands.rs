//! CLI command definitions, routing, and tracing setup.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use mdattrs_markdown::{Renderer, extract_attrs_from_title};
use mdattrs_shared::{
    AppConfig, MarkdownConfig, config_file_path, init_config, load_config, load_config_from,
};
use tracing::{debug, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// mdattrs: set HTML attributes on Markdown images and links via their titles.
#[derive(Parser)]
#[command(
    name = "mdattrs",
    version,
    about = "Set HTML attributes on Markdown images and links via their titles.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Config file to use instead of ~/.mdattrs/mdattrs.toml.
    #[arg(long, global = true, env = "MDATTRS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Split a title into its attribute list and residual title.
    Extract {
        /// Title text. Omit to extract from an absent title.
        title: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render a Markdown file to HTML.
    Render {
        /// Markdown file (defaults to stdin).
        path: Option<PathBuf>,

        /// Write HTML here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Leave image titles untouched.
        #[arg(long)]
        no_images: bool,

        /// Leave link titles untouched.
        #[arg(long)]
        no_links: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
    /// Print the config file path.
    Path,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
///
/// Logs go to stderr so rendered HTML on stdout stays clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "mdattrs=info",
        1 => "mdattrs=debug",
        _ => "mdattrs=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config;
    match cli.command {
        Command::Extract { title, json } => cmd_extract(title.as_deref(), json),
        Command::Render {
            path,
            out,
            no_images,
            no_links,
        } => {
            let config = resolve_config(config_path.as_deref())?;
            let markdown = apply_overrides(config.markdown, no_images, no_links);
            cmd_render(path.as_deref(), out.as_deref(), &markdown)
        }
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(config_path.as_deref()),
            ConfigAction::Path => cmd_config_path(config_path.as_deref()),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

/// CLI flags override config file values.
fn apply_overrides(mut config: MarkdownConfig, no_images: bool, no_links: bool) -> MarkdownConfig {
    if no_images {
        config.images = false;
    }
    if no_links {
        config.links = false;
    }
    config
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_extract(title: Option<&str>, json: bool) -> Result<()> {
    let extraction = extract_attrs_from_title(title);
    debug!(found = extraction.has_attrs(), "extracted title attributes");

    if json {
        println!("{}", serde_json::to_string_pretty(&extraction)?);
    } else {
        println!("{extraction}");
    }
    Ok(())
}

fn cmd_render(path: Option<&Path>, out: Option<&Path>, config: &MarkdownConfig) -> Result<()> {
    let markdown = match path {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("failed to read stdin")?;
            buf
        }
    };

    let renderer = Renderer::from_config(config);
    debug!(hooks = ?renderer.hook_names(), "renderer ready");
    let html = renderer.render(&markdown);

    match out {
        Some(out) => {
            std::fs::write(out, &html)
                .wrap_err_with(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), bytes = html.len(), "wrote HTML");
        }
        None => {
            std::io::stdout()
                .write_all(html.as_bytes())
                .map_err(|e| eyre!("failed to write stdout: {e}"))?;
        }
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

fn cmd_config_path(path: Option<&Path>) -> Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config_file_path()?,
    };
    println!("{}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_without_title_parses() {
        let cli = Cli::try_parse_from(["mdattrs", "extract"]).expect("parse");
        assert!(matches!(
            cli.command,
            Command::Extract {
                title: None,
                json: false
            }
        ));
    }

    #[test]
    fn extract_with_title_and_json() {
        let cli = Cli::try_parse_from(["mdattrs", "extract", "Fluffy <class=img>", "--json"])
            .expect("parse");
        match cli.command {
            Command::Extract { title, json } => {
                assert_eq!(title.as_deref(), Some("Fluffy <class=img>"));
                assert!(json);
            }
            _ => panic!("expected extract"),
        }
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::try_parse_from([
            "mdattrs", "-vv", "render", "doc.md", "--out", "doc.html", "--no-links",
        ])
        .expect("parse");
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Render {
                path,
                out,
                no_images,
                no_links,
            } => {
                assert_eq!(path, Some(PathBuf::from("doc.md")));
                assert_eq!(out, Some(PathBuf::from("doc.html")));
                assert!(!no_images);
                assert!(no_links);
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn flags_override_config() {
        let config = apply_overrides(MarkdownConfig::default(), true, false);
        assert!(!config.images);
        assert!(config.links);

        let untouched = apply_overrides(MarkdownConfig::default(), false, false);
        assert_eq!(untouched, MarkdownConfig::default());
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let dir = std::env::temp_dir().join(format!("mdattrs-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("mdattrs.toml");
        std::fs::write(&path, "[markdown]\nimages = false\n").expect("write");

        let config = resolve_config(Some(&path)).expect("load");
        assert!(!config.markdown.images);
        assert!(config.markdown.links);

        std::fs::remove_dir_all(&dir).ok();
    }
}
