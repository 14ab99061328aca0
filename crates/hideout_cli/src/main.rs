use anyhow::Result;
use clap::{Parser, Subcommand};
use hideout_control::{diff_catalogs, CatalogChange};
use hideout_core::{
    compute_item_totals, compute_overall_progress, compute_station_progress, is_level_complete,
    requirement_states, resolve_trader_id, ItemId, ProgressStore, Requirement, StationGraph,
};
use hideout_world::{load_catalog, load_progress, save_progress, unresolved_module_references};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "hideout_cli", about = "Hideout Progress Tracker CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Overall and per-station completion summary.
    Status {
        #[arg(long, default_value = "./content/stations.json")]
        catalog: String,
        #[arg(long, default_value = "./progress.json")]
        progress: String,
    },
    /// Required vs. found totals for every tracked item.
    Items {
        #[arg(long, default_value = "./content/stations.json")]
        catalog: String,
        #[arg(long, default_value = "./progress.json")]
        progress: String,
    },
    /// Completion state of one station level, requirement by requirement.
    Check {
        #[arg(long, default_value = "./content/stations.json")]
        catalog: String,
        #[arg(long, default_value = "./progress.json")]
        progress: String,
        #[arg(long)]
        station: String,
        #[arg(long)]
        level: u32,
    },
    /// Record progress and save the store.
    Set {
        #[arg(long, default_value = "./content/stations.json")]
        catalog: String,
        #[arg(long, default_value = "./progress.json")]
        progress: String,
        #[command(subcommand)]
        target: SetTarget,
    },
    /// Diff the local catalog against a remote snapshot.
    Reconcile {
        #[arg(long, default_value = "./content/stations.json")]
        catalog: String,
        #[arg(long)]
        remote: String,
    },
}

#[derive(Subcommand)]
enum SetTarget {
    /// Found quantity for one item slot of a station level.
    Item {
        station: String,
        level: u32,
        item_id: String,
        quantity: u64,
    },
    /// Trader loyalty level (by display name or raw identity).
    Trader { name: String, level: i64 },
    /// Skill level (global entry).
    Skill { name: String, level: i64 },
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A progress file that does not exist yet is just an empty store; a fresh
/// profile starts with its first `set`.
fn load_progress_or_default(path: &str) -> Result<ProgressStore> {
    if std::path::Path::new(path).exists() {
        load_progress(path)
    } else {
        Ok(ProgressStore::new())
    }
}

fn warn_unresolved(graph: &StationGraph) {
    for unresolved in unresolved_module_references(graph) {
        tracing::warn!(
            "{} level {} depends on '{}' level {}, which is not in the catalog; \
             that requirement can never be satisfied",
            unresolved.station,
            unresolved.level,
            unresolved.target,
            unresolved.target_level,
        );
    }
}

fn describe_requirement(requirement: &Requirement) -> String {
    match requirement {
        Requirement::Item { item_id, quantity } => format!("item {item_id} x{quantity}"),
        Requirement::Module { module, level } => format!("{module} level {level}"),
        Requirement::Trader { trader_id, level } => format!("{trader_id} loyalty {level}"),
        Requirement::Skill { skill, level } => format!("{skill} skill {level}"),
    }
}

fn describe_change(change: &CatalogChange) -> String {
    match change {
        CatalogChange::StationAdded { station } => format!("station added upstream: {station}"),
        CatalogChange::StationRemoved { station } => format!("station removed upstream: {station}"),
        CatalogChange::LevelAdded { station, level } => {
            format!("level added upstream: {station} level {level}")
        }
        CatalogChange::LevelRemoved { station, level } => {
            format!("level removed upstream: {station} level {level}")
        }
        CatalogChange::ItemQuantityChanged {
            station,
            level,
            item_id,
            local,
            remote,
        } => format!("{station} level {level}: {item_id} quantity {local} -> {remote}"),
        CatalogChange::RequirementsChanged { station, level } => {
            format!("{station} level {level}: requirement list changed upstream")
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn run_status(catalog_path: &str, progress_path: &str) -> Result<()> {
    let graph = load_catalog(catalog_path)?;
    warn_unresolved(&graph);
    let store = load_progress_or_default(progress_path)?;

    let overall = compute_overall_progress(&graph, &store);
    println!(
        "Hideout progress: {}/{} levels complete ({}%)",
        overall.completed_levels, overall.total_levels, overall.percentage,
    );
    println!("{}", "-".repeat(44));

    for station in compute_station_progress(&graph, &store) {
        let marker = if station.total_levels > 0 && station.completed_levels == station.total_levels
        {
            "*"
        } else {
            " "
        };
        println!(
            "{marker} {name:<28} {completed}/{total}",
            name = station.name,
            completed = station.completed_levels,
            total = station.total_levels,
        );
    }
    Ok(())
}

fn run_items(catalog_path: &str, progress_path: &str) -> Result<()> {
    let graph = load_catalog(catalog_path)?;
    let store = load_progress_or_default(progress_path)?;

    let totals = compute_item_totals(&graph, &store);
    let mut rows: Vec<(&ItemId, _)> = totals.iter().collect();
    rows.sort_by(|(a, _), (b, _)| a.0.cmp(&b.0));

    for (item_id, total) in rows {
        let marker = if total.over_collected() {
            "  (over-collected)"
        } else {
            ""
        };
        println!(
            "{item:<32} {found:>6}/{required}{marker}",
            item = item_id.to_string(),
            found = total.found,
            required = total.required,
        );
    }
    Ok(())
}

fn run_check(catalog_path: &str, progress_path: &str, station: &str, level: u32) -> Result<()> {
    let graph = load_catalog(catalog_path)?;
    let store = load_progress_or_default(progress_path)?;

    let Some(states) = requirement_states(&graph, &store, station, level) else {
        println!("{station} level {level}: not in the catalog");
        return Ok(());
    };

    let complete = is_level_complete(&graph, &store, station, level);
    let verdict = if complete { "COMPLETE" } else { "incomplete" };
    println!("{station} level {level}: {verdict}");
    for (requirement, satisfied) in states {
        let marker = if satisfied { "[x]" } else { "[ ]" };
        println!("  {marker} {}", describe_requirement(requirement));
    }
    Ok(())
}

fn run_set(
    catalog_path: &str,
    progress_path: &str,
    target: &SetTarget,
) -> Result<()> {
    let graph = load_catalog(catalog_path)?;
    let mut store = load_progress_or_default(progress_path)?;

    match target {
        SetTarget::Item {
            station,
            level,
            item_id,
            quantity,
        } => {
            // Keys are written under the catalog spelling of the name so
            // later lookups through any alias read the same slot.
            let canonical = graph
                .station_by_name(station)
                .map_or(station.as_str(), |s| s.name.as_str());
            if graph.station_by_name(station).is_none() {
                tracing::warn!("station '{station}' is not in the catalog; recording anyway");
            }
            let item = ItemId(item_id.clone());
            store.set_item_found(canonical, *level, &item, *quantity);
            println!("{canonical} level {level}: {item_id} = {quantity}");
        }
        SetTarget::Trader { name, level } => {
            let trader_id = resolve_trader_id(name);
            store.set_trader_level(trader_id, *level);
            println!("trader {name} loyalty = {level}");
        }
        SetTarget::Skill { name, level } => {
            store.set_skill_level(name, *level);
            println!("skill {name} = {level}");
        }
    }

    save_progress(progress_path, &store)?;

    let overall = compute_overall_progress(&graph, &store);
    println!(
        "Hideout progress now {}/{} levels ({}%)",
        overall.completed_levels, overall.total_levels, overall.percentage,
    );
    Ok(())
}

fn run_reconcile(catalog_path: &str, remote_path: &str) -> Result<()> {
    let local = load_catalog(catalog_path)?;
    let remote = load_catalog(remote_path)?;

    let changes = diff_catalogs(&local, &remote);
    if changes.is_empty() {
        println!("Catalog matches the remote snapshot.");
        return Ok(());
    }

    println!("{} upstream change(s):", changes.len());
    for change in &changes {
        println!("  {}", describe_change(change));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Status { catalog, progress } => run_status(&catalog, &progress)?,
        Commands::Items { catalog, progress } => run_items(&catalog, &progress)?,
        Commands::Check {
            catalog,
            progress,
            station,
            level,
        } => run_check(&catalog, &progress, &station, level)?,
        Commands::Set {
            catalog,
            progress,
            target,
        } => run_set(&catalog, &progress, &target)?,
        Commands::Reconcile { catalog, remote } => run_reconcile(&catalog, &remote)?,
    }
    Ok(())
}
