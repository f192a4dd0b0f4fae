//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `bookshelf_core` linkage,
//!   including the bundled SQLite build and the migration path.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!(
        "bookshelf_core version={}",
        bookshelf_core::core_version()
    );

    let conn = match bookshelf_core::db::open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("bookshelf_core db_probe=failed error={err}");
            std::process::exit(1);
        }
    };

    let applied: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap_or(0);
    println!(
        "bookshelf_core schema_version={applied} latest={}",
        bookshelf_core::db::migrations::latest_version()
    );
    println!("bookshelf_core db_probe=ok");
}
