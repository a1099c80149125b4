use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::{Connection, params};
use time::{Duration, OffsetDateTime};

use controle_diarias::{MilitarNome, initialize_db};

/// A utility for creating a test database for the controle_diarias server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

const SAMPLE_DIARIAS: [(&str, f64); 8] = [
    ("sgt souza", 1_250.0),
    ("cb lima", 480.5),
    ("ten pereira", 2_300.0),
    ("sgt souza", 730.25),
    ("sd oliveira", 150.0),
    ("cb lima", 612.0),
    ("cap andrade", 3_100.0),
    ("sd oliveira", 95.9),
];

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating {} diárias...", SAMPLE_DIARIAS.len());

    let now = OffsetDateTime::now_utc();

    for (days_ago, (name, valor)) in SAMPLE_DIARIAS.iter().rev().enumerate() {
        let created_at = now - Duration::days(days_ago as i64) - Duration::hours(3);

        conn.execute(
            "INSERT INTO diaria (militar_nome, valor, created_at) VALUES (?1, ?2, ?3)",
            params![MilitarNome::new(name).as_ref(), valor, created_at],
        )?;
    }

    println!("Success!");

    Ok(())
}
