use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use sitelens_core::{Analysis, Analyzer, AnalyzerConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for analysis results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: text, json", s)),
        }
    }
}

/// Analyze the structure and link reachability of a rendered web page
#[derive(Parser, Debug)]
#[command(name = "sitelens")]
#[command(author = "Sitelens Contributors")]
#[command(version = "1.0.0")]
#[command(about = "Analyze web page structure and link reachability", long_about = None)]
struct Args {
    /// URL to analyze (http:// or https://)
    #[arg(value_name = "URL")]
    url: String,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    format: OutputFormat,

    /// Render timeout in seconds
    #[arg(long, default_value = "60", value_name = "SECS")]
    timeout: u64,

    /// Per-link probe timeout in seconds
    #[arg(long, default_value = "3", value_name = "SECS")]
    probe_timeout: u64,

    /// Maximum concurrent link probes
    #[arg(long, default_value = "10", value_name = "NUM")]
    concurrency: usize,

    /// Custom User-Agent for probe requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Cache directory for rendered content
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Print a styled banner for verbose mode
fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Sitelens".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Analyze web page structure and link reachability".dimmed());
    eprintln!();
}

fn build_config(args: &Args) -> AnalyzerConfig {
    let mut builder = AnalyzerConfig::builder()
        .fetch_timeout(args.timeout)
        .probe_timeout(args.probe_timeout)
        .probe_concurrency(args.concurrency);

    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    if let Some(dir) = &args.cache_dir {
        builder = builder.cache_dir(dir);
    }

    builder.build()
}

fn print_text(analysis: &Analysis) {
    let check = |yes: bool| if yes { "yes".green().to_string() } else { "no".dimmed().to_string() };

    println!("{:<22} {}", "HTML version:".bold(), analysis.html_version);
    println!("{:<22} {}", "Page title:".bold(), analysis.page_title);
    println!("{:<22} {}", "Headings:".bold(), analysis.headings_count);
    println!("{:<22} {}", "Internal links:".bold(), analysis.internal_links_count);
    println!("{:<22} {}", "External links:".bold(), analysis.external_links_count);
    println!("{:<22} {}", "Login form:".bold(), check(analysis.contains_login_form));

    if analysis.inaccessible_links.is_empty() {
        println!("{:<22} {}", "Inaccessible links:".bold(), "none".green());
    } else {
        println!(
            "{:<22} {}",
            "Inaccessible links:".bold(),
            analysis.inaccessible_links_count.to_string().red()
        );
        for link in &analysis.inaccessible_links {
            println!("  {} {}", "✗".red(), link);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
    }

    let analyzer = Analyzer::with_config(build_config(&args)).context("Failed to initialize analyzer")?;

    let analysis = analyzer
        .analyze(&args.url)
        .await
        .with_context(|| format!("Failed to analyze {}", args.url))?;

    match args.format {
        OutputFormat::Json => {
            let json = analysis.to_json().context("Failed to serialize analysis")?;
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => print_text(&analysis),
    }

    Ok(())
}
