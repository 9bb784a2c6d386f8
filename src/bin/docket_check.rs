use std::collections::{BTreeMap, HashSet};
use std::io::BufRead;

use docket::config::{self, DocketConfig};
use docket::state::Tracker;
use docket::store::{self, Gateway, keyring};

/// Key management: `--set-api-key` reads the key from stdin, `--forget-api-key` removes it.
#[derive(Debug, PartialEq, Eq)]
enum KeyAction {
    Store(String),
    Forget(String),
}

/// Both key flags address the keyring entry of the configured project.
fn key_action(args: &[String], project_id: &str) -> Result<Option<KeyAction>, String> {
    let set_key = args.iter().any(|a| a == "--set-api-key");
    let forget_key = args.iter().any(|a| a == "--forget-api-key");
    if !set_key && !forget_key {
        return Ok(None);
    }

    let project_id = project_id.trim();
    if project_id.is_empty() {
        return Err(format!("no Firestore project id configured (set it or {})", config::ENV_PROJECT));
    }
    Ok(Some(if set_key {
        KeyAction::Store(project_id.to_string())
    } else {
        KeyAction::Forget(project_id.to_string())
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DocketConfig::load(&DocketConfig::handler()?).effective();
    docket::logging::init_stderr(config.debug_logging)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match key_action(&args, &config.firestore.project_id)? {
        Some(KeyAction::Store(project_id)) => {
            let mut key = String::new();
            std::io::stdin().lock().read_line(&mut key)?;
            keyring::store_api_key(&project_id, key.trim()).await?;
            println!("Stored API key for {}", project_id);
            return Ok(());
        }
        Some(KeyAction::Forget(project_id)) => {
            keyring::delete_api_key(&project_id).await?;
            println!("Removed API key for {}", project_id);
            return Ok(());
        }
        None => {}
    }

    println!("=== Docket backend check ===\n");
    println!("Backend: {:?}", config.backend);
    if !config.firestore.project_id.is_empty() {
        println!("Project: {} ({})", config.firestore.project_id, config.firestore.database);
    }
    if let Some(ref host) = config.firestore.emulator_host {
        println!("Emulator: {}", host);
    }

    let store = store::open(&config).await?;
    let mut tracker = Tracker::new(Gateway::new(store));
    tracker.load().await?;

    println!(
        "\nClients: {}  Projects: {}  Tasks: {}",
        tracker.clients().len(),
        tracker.projects().len(),
        tracker.tasks().len()
    );

    // Tasks per day, oldest first
    let mut per_day: BTreeMap<chrono::NaiveDate, usize> = BTreeMap::new();
    for task in tracker.tasks() {
        *per_day.entry(task.completion_date).or_default() += 1;
    }
    if !per_day.is_empty() {
        println!("\n--- Tasks per day ---");
        for (day, count) in &per_day {
            println!("  {}  {}", docket::core::date::display(*day), count);
        }
    }

    let client_ids: HashSet<&str> = tracker.clients().iter().map(|c| c.id.as_str()).collect();
    let project_ids: HashSet<&str> = tracker.projects().iter().map(|p| p.id.as_str()).collect();

    let orphan_projects: Vec<_> = tracker
        .projects()
        .iter()
        .filter(|p| !client_ids.contains(p.client_id.as_str()))
        .collect();
    let orphan_tasks: Vec<_> = tracker
        .tasks()
        .iter()
        .filter(|t| !project_ids.contains(t.project_id.as_str()))
        .collect();

    if !orphan_projects.is_empty() {
        println!("\n  PROJECTS WITHOUT CLIENT ({}):", orphan_projects.len());
        for p in &orphan_projects {
            println!("    {} ({}) -> client {}", p.name, p.id, p.client_id);
        }
    }

    if !orphan_tasks.is_empty() {
        println!("\n  TASKS WITHOUT PROJECT ({}):", orphan_tasks.len());
        for t in &orphan_tasks {
            println!("    {} ({}) -> project {}", t.name, t.id, t.project_id);
        }
    }

    if orphan_projects.is_empty() && orphan_tasks.is_empty() {
        println!("\n  All references resolve!");
    }

    println!("\n=== Done ===");
    Ok(())
}
