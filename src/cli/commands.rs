//! CLI commands implementation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;

use folio::config::{Overrides, Settings};
use folio::loader::ContentLoader;
use folio::models::SiteContent;
use folio::page::Page;
use folio::render::RenderOptions;
use folio::site::{self, Sources, TracingSink};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Render portfolio content into static HTML templates")]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to folio.toml in the working directory)
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

/// Content source flags shared by every command. Each falls back to its
/// `FOLIO_*` environment variable, then to the config file.
#[derive(clap::Args, Debug, Default)]
struct SourceArgs {
    /// Content document (URL, path relative to the base URL, or local file)
    #[arg(long, env = "FOLIO_CONTENT")]
    content: Option<String>,
    /// Works document
    #[arg(long, env = "FOLIO_WORKS")]
    works: Option<String>,
    /// Base URL for relative document and poster paths
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long = "timeout", env = "FOLIO_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
    /// User agent for HTTP requests
    #[arg(long, env = "FOLIO_USER_AGENT")]
    user_agent: Option<String>,
}

impl From<SourceArgs> for Overrides {
    fn from(args: SourceArgs) -> Self {
        Self {
            base_url: args.base_url,
            content: args.content,
            works: args.works,
            timeout_secs: args.timeout_secs,
            user_agent: args.user_agent,
        }
    }
}

fn load_settings(config: Option<&Path>, sources: SourceArgs) -> anyhow::Result<Settings> {
    Ok(Settings::load(config)?.with_overrides(sources.into())?)
}

#[derive(Subcommand)]
enum Commands {
    /// Load the site documents and render them into a template
    Render {
        /// HTML template to render into
        #[arg(short, long)]
        template: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Load the site documents and print a summary
    Check {
        #[command(flatten)]
        sources: SourceArgs,
    },
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render {
            template,
            out,
            sources,
        } => {
            let settings = load_settings(config, sources)?;
            cmd_render(&settings, &template, out.as_deref()).await
        }
        Commands::Check { sources } => cmd_check(&load_settings(config, sources)?).await,
    }
}

/// Render a template. Nothing is written when loading fails.
async fn cmd_render(settings: &Settings, template: &Path, out: Option<&Path>) -> anyhow::Result<()> {
    let html = tokio::fs::read_to_string(template)
        .await
        .with_context(|| format!("Failed to read template {}", template.display()))?;

    let loader = ContentLoader::from_settings(settings)?;
    let mut page = Page::parse(&html);
    let options = RenderOptions::with_base_url(settings.base_url.clone());

    let site = site::init(
        &mut page,
        &loader,
        &Sources::from(settings),
        &options,
        &TracingSink,
    )
    .await
    .context("Site content could not be loaded")?;

    let rendered = page.to_html();
    match out {
        Some(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Rendered {} → {} ({} sections, {} works)",
                style("✓").green(),
                template.display(),
                path.display(),
                site.content.home.sections.len(),
                site.works.videos.len()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let loader = ContentLoader::from_settings(settings)?;
    let sources = Sources::from(settings);

    let site = match loader.load_site(&sources.content, &sources.works).await {
        Ok(site) => site,
        Err(e) => {
            println!("{} {}", style("✗").red(), e);
            return Err(e.into());
        }
    };

    println!("{} {}", style("✓").green(), sources.content);
    println!("{} {}", style("✓").green(), sources.works);
    print_summary(&site);
    Ok(())
}

fn print_summary(site: &SiteContent) {
    let home = &site.content.home;

    println!("\n{}", style("Home").bold());
    println!("  {:<14} {}", "Title:", display_or_dash(&home.hero.title));
    println!("  {:<14} {}", "Intro video:", intro_kind(site));
    println!("  {:<14} {}", "Sections:", home.sections.len());
    let images: usize = home.sections.iter().map(|s| s.images.len()).sum();
    println!("  {:<14} {}", "Images:", images);

    let empty = home.sections.iter().filter(|s| s.images.is_empty()).count();
    if empty > 0 {
        println!(
            "  {} {} section(s) without images",
            style("!").yellow(),
            empty
        );
    }

    println!("\n{}", style("Works").bold());
    println!("  {:<14} {}", "Title:", display_or_dash(&site.works.hero.title));
    println!("  {:<14} {}", "Videos:", site.works.videos.len());
    let missing_embed = site
        .works
        .videos
        .iter()
        .filter(|v| v.embed_url.is_empty())
        .count();
    if missing_embed > 0 {
        println!(
            "  {} {} work(s) without an embed URL",
            style("!").yellow(),
            missing_embed
        );
    }

    println!("\n{}", style("Contacts").bold());
    println!("  {:<14} {}", "Links:", site.content.contacts.links.len());
}

fn intro_kind(site: &SiteContent) -> &'static str {
    let intro = &site.content.home.intro;
    if !intro.video_embed_url.is_empty() {
        "embed"
    } else if !intro.video_mp4_url.is_empty() {
        "mp4"
    } else {
        "none"
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
