// Opens ./todo.db and ensures the marker table exists.
//
// Failures are reported to the operator but the process still exits 0.

use todo_vault_gateway::database::{default_db_path, run_smoke_check};
use todo_vault_gateway::init_tracing;

fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let path = match default_db_path() {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Failed to open DB: {}", e);
            return;
        }
    };
    println!("Testing SQLite at: {}", path.display());

    match run_smoke_check(&path) {
        Ok(_) => println!("Success! DB opened and written to."),
        Err(e) => eprintln!("Failed to open DB: {}", e),
    }
}
