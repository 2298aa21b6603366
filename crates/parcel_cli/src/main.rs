//! Tracker demo entry point.
//!
//! # Responsibility
//! - Open the parcel database and run one end-to-end tracking session.
//! - Keep output deterministic apart from parcel numbers and timestamps.
//!
//! Usage: `parcel_cli [DB_PATH]` (defaults to `tracker.db`). Set
//! `PARCEL_LOG_DIR` to an absolute path to enable file logging.

use log::error;
use parcel_core::db::open_db;
use parcel_core::{
    default_log_level, init_logging, ClientId, Parcel, ParcelService, RepoResult,
    SqliteParcelRepository,
};
use std::process::ExitCode;

const DEFAULT_DB_PATH: &str = "tracker.db";
const DEMO_CLIENT: ClientId = 1;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("PARCEL_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open `{db_path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = match SqliteParcelRepository::try_new(&conn) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("database `{db_path}` is not usable: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&ParcelService::new(repo)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(service: &ParcelService<SqliteParcelRepository<'_>>) -> RepoResult<()> {
    let parcel = service.register(DEMO_CLIENT, "Pskov, Sadovaya 5")?;
    print_registered(&parcel);

    service.change_address(parcel.number, "Saratov, Verkhnyaya 3")?;
    println!("parcel {} address changed", parcel.number);

    if let Some(status) = service.next_status(parcel.number)? {
        println!("parcel {} status: {status}", parcel.number);
    }
    print_client_parcels(service)?;

    let spare = service.register(DEMO_CLIENT, "Krasnodar, Pobedy 6")?;
    print_registered(&spare);
    service.delete(spare.number)?;
    println!("parcel {} deleted", spare.number);

    print_client_parcels(service)
}

fn print_registered(parcel: &Parcel) {
    println!(
        "parcel {} registered for client {} at {}, address: {}",
        parcel.number, parcel.client, parcel.created_at, parcel.address
    );
}

fn print_client_parcels(service: &ParcelService<SqliteParcelRepository<'_>>) -> RepoResult<()> {
    println!("client {DEMO_CLIENT} parcels:");
    for parcel in service.client_parcels(DEMO_CLIENT)? {
        println!(
            "  {}: {} from {} ({})",
            parcel.number, parcel.address, parcel.created_at, parcel.status
        );
    }
    Ok(())
}
