//! Planwright CLI entrypoint.
//!
//! This is the main entrypoint for the planwright command-line tool.

use std::path::Path;
use std::process::ExitCode;

use planwright::cli::{
    Cli, Commands, EnvCommands, OrderCommands, OutputFormatter, ResourceCommands,
    RollbackCommands, SqlCommands,
};
use planwright::error::Result;
use planwright::plan::{EnvVar, Environment, RollbackField, SqlScript};
use planwright::session::PlanSession;
use planwright::store::PlanStore;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Run async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_user_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

/// Initializes the logging system.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    let formatter = OutputFormatter::new(cli.output);
    let store = PlanStore::new(&cli.plan);

    match cli.command {
        Commands::Init { force } => cmd_init(&store, force).await,
        Commands::Show => cmd_show(&store, &formatter).await,
        Commands::Set {
            project_name,
            environment,
            estimated_time,
            date,
            manager,
            resource_count,
        } => {
            cmd_set(
                &store,
                project_name,
                environment,
                estimated_time,
                date,
                manager,
                resource_count,
            )
            .await
        }
        Commands::Resource { command } => cmd_resource(&store, command, &formatter).await,
        Commands::Order { command } => cmd_order(&store, command, &formatter).await,
        Commands::Env { command } => cmd_env(&store, command).await,
        Commands::Sql { command } => cmd_sql(&store, command).await,
        Commands::Rollback { command } => cmd_rollback(&store, command).await,
        Commands::Validate { warnings } => cmd_validate(&store, warnings, &formatter).await,
        Commands::Render { out } => cmd_render(&store, out.as_deref(), &formatter).await,
        Commands::Export { path } => cmd_export(&store, &path).await,
        Commands::Import { path } => cmd_import(&store, &path).await,
    }
}

/// Create a fresh plan file.
async fn cmd_init(store: &PlanStore, force: bool) -> Result<()> {
    info!("Initializing plan file: {}", store.path().display());

    if !force && store.exists() {
        eprintln!("Plan file already exists: {}", store.path().display());
        eprintln!("Use --force to overwrite.");
        return Ok(());
    }

    let mut session = PlanSession::new();
    session.sync_resources();
    session.sync_order();
    store.save(session.plan()).await?;

    eprintln!("Created: {}", store.path().display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Describe the deployment: 'planwright set --project-name my-app --manager \"J. Doe\"'");
    eprintln!("  2. Shape the resources: 'planwright resource list' and 'planwright resource set'");
    eprintln!("  3. Arrange the order: 'planwright order show' and 'planwright order move'");
    eprintln!("  4. Attach details: 'planwright env add', 'planwright sql add', 'planwright rollback set'");
    eprintln!("  5. Check and render: 'planwright validate', then 'planwright render'");

    Ok(())
}

/// Show the current plan.
async fn cmd_show(store: &PlanStore, formatter: &OutputFormatter) -> Result<()> {
    let session = load_session(store).await?;
    debug!("Plan fingerprint: {}", session.fingerprint());
    eprintln!("{}", formatter.format_plan(session.plan()));
    Ok(())
}

/// Update plan metadata.
async fn cmd_set(
    store: &PlanStore,
    project_name: Option<String>,
    environment: Option<Environment>,
    estimated_time: Option<u32>,
    date: Option<NaiveDate>,
    manager: Option<String>,
    resource_count: Option<u32>,
) -> Result<()> {
    if project_name.is_none()
        && environment.is_none()
        && estimated_time.is_none()
        && date.is_none()
        && manager.is_none()
        && resource_count.is_none()
    {
        eprintln!("Nothing to set. See 'planwright set --help' for the available fields.");
        return Ok(());
    }

    let mut session = load_session(store).await?;

    if let Some(name) = project_name {
        session.set_project_name(name);
    }
    if let Some(value) = environment {
        session.set_environment(value);
    }
    if let Some(minutes) = estimated_time {
        session.set_estimated_minutes(minutes);
    }
    if let Some(value) = date {
        session.set_deployment_date(Some(value));
    }
    if let Some(value) = manager {
        session.set_manager(value);
    }
    let mut rebuilt = false;
    if let Some(count) = resource_count {
        session.set_resource_count(count)?;
        rebuilt = sync_collections(&mut session);
    }

    store.save(session.plan()).await?;
    eprintln!("Plan updated.");

    if rebuilt {
        eprintln!(
            "Resource list rebuilt: {} resources in default order.",
            session.plan().resources.len()
        );
    }

    Ok(())
}

/// Resource management commands.
async fn cmd_resource(
    store: &PlanStore,
    command: ResourceCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut session = load_session(store).await?;
    let mut dirty = sync_collections(&mut session);

    let message = match command {
        ResourceCommands::List => {
            if dirty {
                store.save(session.plan()).await?;
            }
            eprintln!("{}", formatter.format_resources(session.plan()));
            return Ok(());
        }
        ResourceCommands::Set { id, name, kind } => {
            if name.is_none() && kind.is_none() {
                eprintln!("Nothing to change. Provide --name or --type.");
                return Ok(());
            }
            if let Some(name) = name {
                session.rename_resource(id, name)?;
            }
            if let Some(kind) = kind {
                session.retype_resource(id, kind)?;
            }
            dirty = true;
            format!("Resource {id} updated.")
        }
    };

    if dirty {
        store.save(session.plan()).await?;
    }
    eprintln!("{message}");
    Ok(())
}

/// Deployment order commands.
async fn cmd_order(
    store: &PlanStore,
    command: OrderCommands,
    formatter: &OutputFormatter,
) -> Result<()> {
    let mut session = load_session(store).await?;
    let dirty = sync_collections(&mut session);

    match command {
        OrderCommands::Show => {
            if dirty {
                store.save(session.plan()).await?;
            }
            eprintln!("{}", formatter.format_order(session.plan()));
        }
        OrderCommands::Move { from, to } => {
            session.reorder(from, to)?;
            store.save(session.plan()).await?;
            eprintln!("Moved order entry {from} to position {to}.");
        }
    }

    Ok(())
}

/// Environment variable commands.
async fn cmd_env(store: &PlanStore, command: EnvCommands) -> Result<()> {
    let mut session = load_session(store).await?;
    sync_collections(&mut session);
    session.ensure_details();

    let message = match command {
        EnvCommands::Add { id, key, value } => {
            session.add_env_var(id, EnvVar::new(key, value))?;
            format!("Added environment variable to resource {id}.")
        }
        EnvCommands::Remove { id, index } => {
            session.remove_env_var(id, index)?;
            format!("Removed environment variable {index} from resource {id}.")
        }
        EnvCommands::Set { id, index, field, value } => {
            session.set_env_var(id, index, field.into(), value)?;
            format!("Updated environment variable {index} on resource {id}.")
        }
    };

    store.save(session.plan()).await?;
    eprintln!("{message}");
    Ok(())
}

/// SQL script commands.
async fn cmd_sql(store: &PlanStore, command: SqlCommands) -> Result<()> {
    let mut session = load_session(store).await?;
    sync_collections(&mut session);
    session.ensure_details();

    let message = match command {
        SqlCommands::Add { id, query, description } => {
            session.add_sql_script(id, SqlScript::new(query, description))?;
            format!("Added SQL script to resource {id}.")
        }
        SqlCommands::Remove { id, index } => {
            session.remove_sql_script(id, index)?;
            format!("Removed SQL script {index} from resource {id}.")
        }
        SqlCommands::Set { id, index, field, value } => {
            session.set_sql_script(id, index, field.into(), value)?;
            format!("Updated SQL script {index} on resource {id}.")
        }
    };

    store.save(session.plan()).await?;
    eprintln!("{message}");
    Ok(())
}

/// Rollback plan commands.
async fn cmd_rollback(store: &PlanStore, command: RollbackCommands) -> Result<()> {
    let RollbackCommands::Set { id, point, procedure } = command;

    if point.is_none() && procedure.is_none() {
        eprintln!("Nothing to set. Provide --point or --procedure.");
        return Ok(());
    }

    let mut session = load_session(store).await?;
    sync_collections(&mut session);
    session.ensure_details();

    if let Some(value) = point {
        session.set_rollback(id, RollbackField::Point, value)?;
    }
    if let Some(value) = procedure {
        session.set_rollback(id, RollbackField::Procedure, value)?;
    }

    store.save(session.plan()).await?;
    eprintln!("Rollback plan updated on resource {id}.");
    Ok(())
}

/// Validate the plan for submission.
async fn cmd_validate(
    store: &PlanStore,
    show_warnings: bool,
    formatter: &OutputFormatter,
) -> Result<()> {
    let session = load_session(store).await?;
    let findings = session.check();

    eprintln!("{}", formatter.format_validation(&findings, show_warnings));

    session.validate()?;
    Ok(())
}

/// Render the plan as a deployment document.
async fn cmd_render(
    store: &PlanStore,
    out: Option<&Path>,
    formatter: &OutputFormatter,
) -> Result<()> {
    let session = load_session(store).await?;
    let tree = session.render();
    let output = formatter.format_document(&tree);

    match out {
        Some(path) => {
            tokio::fs::write(path, &output).await?;
            eprintln!("Wrote document to {}", path.display());
        }
        None => eprintln!("{output}"),
    }

    Ok(())
}

/// Export the plan to a portable JSON document.
async fn cmd_export(store: &PlanStore, path: &Path) -> Result<()> {
    let session = load_session(store).await?;
    let bytes = session.export()?;

    tokio::fs::write(path, &bytes).await?;
    eprintln!("Exported plan to {}", path.display());
    Ok(())
}

/// Import a plan from a portable JSON document.
async fn cmd_import(store: &PlanStore, path: &Path) -> Result<()> {
    let bytes = tokio::fs::read(path).await?;

    let mut session = PlanSession::new();
    session.import(&bytes)?;
    store.save(session.plan()).await?;

    eprintln!(
        "Imported plan {:?} ({} resources) into {}",
        session.plan().project_name,
        session.plan().resources.len(),
        store.path().display()
    );
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Loads the plan file into an editing session.
async fn load_session(store: &PlanStore) -> Result<PlanSession> {
    debug!("Loading plan from: {}", store.path().display());
    let plan = store.load_required().await?;
    Ok(PlanSession::from_plan(plan))
}

/// Runs the resource and order synchronization steps.
fn sync_collections(session: &mut PlanSession) -> bool {
    let resources_rebuilt = session.sync_resources();
    let order_reset = session.sync_order();
    resources_rebuilt || order_reset
}
