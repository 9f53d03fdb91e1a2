use crate::seed::{Seeder, run_seeder};
use crate::seeds::{
    event::EventSeeder, faculty::FacultySeeder, proposal::ProposalSeeder, user::UserSeeder,
};
use colored::*;
use migration::{Migrator, MigratorTrait};
use std::process::ExitCode;

mod seed;
mod seeds;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let db = match db::connect().await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {e}", "Failed to connect to database:".red());
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = Migrator::up(&db, None).await {
        eprintln!("{} {e}", "Failed to run migrations:".red());
        return ExitCode::FAILURE;
    }

    for (seeder, name) in [
        (Box::new(UserSeeder) as Box<dyn Seeder + Send + Sync>, "User"),
        (Box::new(FacultySeeder), "Faculty"),
        (Box::new(EventSeeder), "Event"),
        (Box::new(ProposalSeeder), "PendingProposal"),
    ] {
        if let Err(e) = run_seeder(&*seeder, name, &db).await {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
