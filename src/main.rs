use anyhow::{Context, Result};
use clap::Parser;
use famcheck::{Config, FamilyGraph, FamilyGraphResolver, MediaWikiSource, Member};
use std::path::PathBuf;

/// Cross-check the spouse/parents/children claims of a wiki article against
/// the articles of the relatives it names.
#[derive(Parser, Debug)]
#[command(name = "famcheck", version)]
struct Args {
    /// Article URL (https://<lang>.wikipedia.org/wiki/<Title>) or bare title
    article: String,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Config file; defaults to $FAMCHECK_CONFIG, then ./famcheck.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path.clone())?,
        None => Config::load()?,
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("RUST_LOG", &config.famcheck.log_level),
    )
    .init();

    let source = MediaWikiSource::from_config(&config.api)?;
    let resolver = FamilyGraphResolver::new(source, &config.resolver);

    let graph = resolver
        .check_family(&args.article)
        .await
        .with_context(|| format!("Couldn't resolve the family of '{}'", args.article))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&graph.groups)?);
    } else {
        print_table(&graph);
    }

    Ok(())
}

fn print_table(graph: &FamilyGraph) {
    println!("\n╔══════════════════════════════════════════════════════════════════════════════╗");
    println!("║ Family check: {:<63}║", graph.root.display_name());
    println!("╚══════════════════════════════════════════════════════════════════════════════╝");

    for group in &graph.groups {
        println!("─────────────────────────────────────────────────────────────────────────────");
        println!("{}", group.group_name);

        if group.members.is_empty() {
            println!("  (none listed)");
            continue;
        }

        for member in &group.members {
            match member {
                Member::Checked(check) => println!("  {:<50} {}", check.name, check.status),
                Member::Resolved(relative) => {
                    println!("  {:<50} (not validated)", relative.name.display_name())
                }
            }
        }
    }
    println!("─────────────────────────────────────────────────────────────────────────────");
}
