use migration::Migrator;
use std::{env, fs, path::Path, process::ExitCode};

mod runner;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let db_path = env::var("DATABASE_PATH").unwrap_or_else(|_| "data/smashers.db".into());
    let url = format!("sqlite://{}?mode=rwc", db_path);
    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(|s| s.as_str()) {
        Some("clean") => remove_db_file(&db_path),
        Some("fresh") => match remove_db_file(&db_path).and_then(|_| create_db_dir(&db_path)) {
            Ok(()) => run(&url).await,
            Err(e) => Err(e),
        },
        _ => match create_db_dir(&db_path) {
            Ok(()) => run(&url).await,
            Err(e) => Err(e),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Migration failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(url: &str) -> Result<(), String> {
    runner::run_all_migrations(url)
        .await
        .map_err(|e| e.to_string())
}

fn remove_db_file(path: &str) -> Result<(), String> {
    let db_path = Path::new(path);
    if db_path.exists() {
        fs::remove_file(db_path).map_err(|e| format!("failed to delete {}: {e}", db_path.display()))?;
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
    Ok(())
}

fn create_db_dir(path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    Ok(())
}
