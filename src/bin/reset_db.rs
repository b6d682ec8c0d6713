use anyhow::{Context, Result};
use std::path::Path;

use foodshare::application::{DataTable, table_counts};
use foodshare::infra::app_config;
use foodshare::infra::db::Database;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = app_config::load_config()?;
    let db_path = app_config::resolve_database_path(None, &config);
    run(&db_path)
}

pub fn run(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("Database does not exist at: {}", db_path.display());
        println!("No reset needed.");
        return Ok(());
    }

    println!("Connecting to database at: {}", db_path.display());
    let db = Database::open_at(db_path).context("Failed to open database")?;

    println!("Current record counts:");
    for (table, count) in table_counts(&db)? {
        println!("  {}: {}", table, count);
    }

    // Children first so foreign keys never block a delete.
    for table in [
        DataTable::Claims,
        DataTable::FoodListings,
        DataTable::Receivers,
        DataTable::Providers,
    ] {
        db.execute_mutation(&format!("DELETE FROM {}", table.table_name()), [])?;
        println!("Cleared {} table", table);
    }

    let remaining: i64 = table_counts(&db)?.iter().map(|(_, count)| count).sum();
    if remaining == 0 {
        println!("\nDatabase successfully reset! All records have been deleted.");
    } else {
        eprintln!("\nWarning: {} records still exist in the database.", remaining);
    }

    db.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_reset_db_run() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("food.db");

        {
            let db = Database::open_at(&path).unwrap();
            db.execute_mutation(
                "INSERT INTO Providers (Provider_ID, Name, Type, City) VALUES (1, 'Acme', 'Restaurant', 'Springfield')",
                [],
            )
            .unwrap();
            db.execute_mutation(
                "INSERT INTO Food_Listings VALUES (1, 'Bread', 3, '2025-03-18', 1, 'Restaurant', 'Springfield', 'Vegan', 'Lunch')",
                [],
            )
            .unwrap();
        }

        run(&path).unwrap();

        let db = Database::open_at(&path).unwrap();
        assert!(table_counts(&db).unwrap().iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_missing_database_is_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.db");
        run(&path).unwrap();
        assert!(!path.exists());
    }
}
