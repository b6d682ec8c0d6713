use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use std::path::Path;

use foodshare::application::EvaluationClock;
use foodshare::domain::{
    Claim, ClaimStatus, FoodListing, FoodType, MealType, Provider, Receiver,
};
use foodshare::infra::app_config;
use foodshare::infra::db::Database;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = app_config::load_config()?;
    let db_path = app_config::resolve_database_path(None, &config);
    run(&db_path, seed_date(EvaluationClock::System(config.timezone)))
}

/// The calendar day "today" means to the analysis queries under the same clock.
fn seed_date(clock: EvaluationClock) -> NaiveDate {
    clock.now().date()
}

/// Populate a small, internally consistent dataset with dates relative to `today`.
pub fn run(db_path: &Path, today: NaiveDate) -> Result<()> {
    println!("Connecting to database at: {}", db_path.display());
    let db = Database::open_at(db_path).context("Failed to open database")?;

    let providers = [
        (1, "Gusto Trattoria", "Restaurant", "Springfield"),
        (2, "FreshMart", "Supermarket", "Springfield"),
        (3, "Corner Bakery", "Grocery Store", "Shelbyville"),
        (4, "Campus Dining", "Catering Service", "Capital City"),
    ];
    for (id, name, provider_type, city) in providers {
        db.provider_repo().save(&Provider {
            id,
            name: name.to_string(),
            provider_type: provider_type.to_string(),
            address: None,
            city: city.to_string(),
            contact: Some(format!("+1-555-01{id:02}")),
        })?;
    }
    println!("Inserted {} providers", providers.len());

    let receivers = [
        (1, "Hope Shelter", "Shelter", "Springfield"),
        (2, "Northside Food Bank", "NGO", "Shelbyville"),
        (3, "Ana Pereira", "Individual", "Capital City"),
    ];
    for (id, name, receiver_type, city) in receivers {
        db.receiver_repo().save(&Receiver {
            id,
            name: name.to_string(),
            receiver_type: receiver_type.to_string(),
            city: city.to_string(),
            contact: None,
        })?;
    }
    println!("Inserted {} receivers", receivers.len());

    let listings = [
        (1, "Bread", 25, 1, 1, FoodType::Vegetarian, MealType::Breakfast),
        (2, "Chicken Curry", 12, 2, 1, FoodType::NonVegetarian, MealType::Dinner),
        (3, "Fruit Salad", 30, -1, 2, FoodType::Vegan, MealType::Snacks),
        (4, "Croissants", 40, 0, 3, FoodType::Vegetarian, MealType::Breakfast),
        (5, "Lentil Soup", 18, 5, 4, FoodType::Vegan, MealType::Lunch),
        (6, "Fish Tacos", 8, -4, 4, FoodType::NonVegetarian, MealType::Lunch),
    ];
    for (id, name, quantity, expiry_offset, provider_id, food_type, meal_type) in listings {
        let (_, _, provider_type, city) = providers[(provider_id - 1) as usize];
        db.listing_repo().save(&FoodListing {
            id,
            name: name.to_string(),
            quantity,
            expiry_date: today + Duration::days(expiry_offset),
            provider_id,
            provider_type: provider_type.to_string(),
            location: city.to_string(),
            food_type,
            meal_type,
        })?;
    }
    println!("Inserted {} food listings", listings.len());

    let midday = today.and_hms_opt(12, 0, 0).context("invalid seed time")?;
    let claims = [
        (1, 1, 1, ClaimStatus::Completed, -1),
        (2, 1, 2, ClaimStatus::Pending, 0),
        (3, 2, 1, ClaimStatus::Completed, -3),
        (4, 4, 3, ClaimStatus::Cancelled, -10),
        (5, 5, 2, ClaimStatus::Completed, -2),
        (6, 1, 3, ClaimStatus::Completed, -20),
    ];
    for (id, food_id, receiver_id, status, day_offset) in claims {
        db.claim_repo().save(&Claim {
            id,
            food_id,
            receiver_id,
            status,
            timestamp: midday + Duration::days(day_offset),
        })?;
    }
    println!("Inserted {} claims", claims.len());

    db.close()?;
    println!("Database seeded at {}", db_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use foodshare::application::AnalysisQuery;

    #[test]
    fn test_seed_db_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food.db");
        let today = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();

        run(&path, today).unwrap();

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.listing_repo().list_all().unwrap().len(), 6);
        assert_eq!(db.claim_repo().list_all().unwrap().len(), 6);

        let now = EvaluationClock::at_date(today).now();
        let expired = AnalysisQuery::ExpiredListings.run(&db, now).unwrap();
        let names: Vec<_> = expired
            .rows()
            .iter()
            .filter_map(|r| r.get_text("Food_Name"))
            .collect();
        assert_eq!(names, vec!["Fish Tacos", "Fruit Salad"]);
    }

    #[test]
    fn test_seed_date_follows_the_evaluation_clock() {
        let late = NaiveDate::from_ymd_opt(2025, 3, 17)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        assert_eq!(
            seed_date(EvaluationClock::Fixed(late)),
            NaiveDate::from_ymd_opt(2025, 3, 17).unwrap()
        );
    }

    #[test]
    fn test_seeding_twice_fails_on_duplicate_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food.db");
        let today = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();

        run(&path, today).unwrap();
        assert!(run(&path, today).is_err());
    }
}
