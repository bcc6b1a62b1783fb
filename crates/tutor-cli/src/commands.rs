//! CLI command implementations.

use crate::config::{TutorConfig, TUTOR_DIR};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::debug;
use tutor_core::{AliasSource, RelationSet, PENALTY_COST};
use tutor_graph::{plan_learning_path, LearningGraph, LearningPath, PlanOptions, RelationStore};
use tutor_server::{ServerConfig, TutorServer};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize Tutorpath in a directory.
pub fn init(path: &Path) -> Result<()> {
    let tutor_dir = path.join(TUTOR_DIR);

    if tutor_dir.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    TutorConfig::default().save(path)?;

    println!("{} Initialized Tutorpath in {}", "✓".green(), path.display());
    println!(
        "  Run {} to load relation data",
        "tutor import <file>".cyan()
    );

    Ok(())
}

/// Load relation data from a JSON file into the store.
pub fn import(file: &Path, path: &Path) -> Result<()> {
    let config = TutorConfig::load(path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(format!("Reading {}...", file.display()));

    let start = Instant::now();
    let relations = RelationSet::load_json(file)?;

    spinner.set_message("Writing store...");
    let store = RelationStore::open(config.store_path(path))?;
    store.save_relations(&relations)?;

    spinner.finish_and_clear();

    println!(
        "{} Imported {} teaches and {} requires relations ({} pages, {} users) in {}ms",
        "✓".green(),
        relations.teaches.len().to_string().cyan(),
        relations.requires.len().to_string().cyan(),
        relations.page_ids().len(),
        relations.user_count(),
        start.elapsed().as_millis()
    );

    Ok(())
}

fn load_relations(config: &TutorConfig, path: &Path) -> Result<RelationSet> {
    let store = RelationStore::open(config.store_path(path))?;
    match store.load_relations()? {
        Some(relations) => Ok(relations),
        None => Err(format!(
            "No relation data found. Run `tutor import <file>` in {}",
            path.display()
        )
        .into()),
    }
}

/// Output format for `tutor path`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathFormat {
    Text,
    Json,
    Dot,
}

/// Resolve and print a learning path.
pub fn path(
    pages: &[String],
    user: Option<&str>,
    only_wanted: bool,
    format: PathFormat,
    path: &Path,
) -> Result<()> {
    let config = TutorConfig::load(path)?;
    let relations = load_relations(&config, path)?;
    let user = user.unwrap_or(config.default_user.as_str());

    let page_ids = relations.resolve_aliases(pages)?;
    debug!("Resolved {:?} to {:?}", pages, page_ids);
    let options = PlanOptions {
        only_wanted,
        max_rounds: config.max_rounds,
    };

    let start = Instant::now();
    let graph = plan_learning_path(&relations, user, &page_ids, &options)?;
    let elapsed = start.elapsed();

    match format {
        PathFormat::Json => {
            let output = LearningPath::from(&graph);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        PathFormat::Dot => print!("{}", graph.to_dot()),
        PathFormat::Text => print_path(&graph, user),
    }

    if format == PathFormat::Text {
        let stats = graph.stats();
        println!();
        println!(
            "{} {} requirements, {} tutors, {} edges",
            "Graph:".dimmed(),
            stats.requirement_count,
            stats.tutor_count,
            stats.edge_count
        );
        println!("Query time: {}ms", elapsed.as_millis());
    }

    Ok(())
}

fn print_path(graph: &LearningGraph, user: &str) {
    println!("{} {}", "Learning path for".cyan().bold(), user.cyan().bold());
    println!();

    if graph.page_ids().is_empty() {
        println!("Nothing to learn: every requested page is already known.");
        return;
    }

    for id in graph.page_ids() {
        let Some(req) = graph.requirement(id) else {
            continue;
        };
        match &req.best_tutor_id {
            Some(tutor) if req.cost < PENALTY_COST => {
                println!("  • {} via {} (cost {})", id.bold(), tutor.cyan(), req.cost)
            }
            Some(tutor) => println!(
                "  • {} via {} {}",
                id.bold(),
                tutor.cyan(),
                "(incomplete: some prerequisites are not taught)".yellow()
            ),
            None => println!("  • {} {}", id.bold(), "(no page teaches this)".red()),
        }
    }

    let order = graph.study_order();
    if !order.is_empty() {
        println!();
        println!("{}", "Study order:".green());
        for (i, page) in order.iter().enumerate() {
            println!("  {:>3}. {}", i + 1, page);
        }
    }

    let untaught: Vec<&str> = graph
        .requirements()
        .filter(|r| r.best_tutor_id.is_none())
        .map(|r| r.page_id.as_str())
        .collect();
    if !untaught.is_empty() {
        println!();
        println!(
            "{} {} requirements have no tutor: {}",
            "⚠".yellow(),
            untaught.len(),
            untaught.join(", ").dimmed()
        );
    }
}

/// Show store status.
pub fn status(path: &Path) -> Result<()> {
    let tutor_dir = path.join(TUTOR_DIR);

    if !tutor_dir.exists() {
        println!("{} Tutorpath not initialized in this directory", "✗".red());
        println!("  Run {} to initialize", "tutor init".cyan());
        return Ok(());
    }

    let config = TutorConfig::load(path)?;
    let store = RelationStore::open(config.store_path(path))?;

    println!("{}", "Tutorpath Status".cyan().bold());
    println!();

    match store.load_relations()? {
        Some(relations) => {
            println!("  {} {}", "Pages:".dimmed(), relations.page_ids().len());
            println!("  {} {}", "Teaches:".dimmed(), relations.teaches.len());
            println!("  {} {}", "Requires:".dimmed(), relations.requires.len());
            println!("  {} {}", "Aliases:".dimmed(), relations.aliases.len());
            println!("  {} {}", "Users:".dimmed(), relations.user_count());
        }
        None => println!("  {} no relation data imported", "Store:".dimmed()),
    }
    println!("  {} {}", "Default user:".dimmed(), config.default_user);

    Ok(())
}

/// Start the Tutorpath server.
pub async fn serve(port: Option<u16>, headless: bool, path: &Path) -> Result<()> {
    let config = TutorConfig::load(path)?;
    let bind_addr = if headless { "0.0.0.0" } else { "127.0.0.1" };
    let port = port.unwrap_or(config.port);

    if headless {
        println!("{}", "Starting Tutorpath server in headless mode...".cyan());
    } else {
        println!("{}", "Starting Tutorpath server...".cyan());
    }

    let relations = load_relations(&config, path)?;
    println!(
        "{} Loaded {} pages ({} relations)",
        "✓".green(),
        relations.page_ids().len(),
        relations.teaches.len() + relations.requires.len()
    );

    let server_config = ServerConfig {
        addr: format!("{}:{}", bind_addr, port).parse()?,
        max_rounds: config.max_rounds,
    };
    let server = TutorServer::new(relations, server_config);

    println!("{} Listening on ws://{}:{}", "✓".green(), bind_addr, port);
    if headless {
        println!("  Headless mode: accepting connections from any host");
    }
    println!("  Press {} to stop", "Ctrl+C".cyan());

    server.run().await.map_err(|e| e.to_string())?;

    Ok(())
}
