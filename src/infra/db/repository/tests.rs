use crate::domain::{
    Claim, ClaimStatus, FoodListing, FoodType, MealType, NewFoodListing, Provider, Receiver,
};
use crate::infra::db::Database;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn acme() -> Provider {
    Provider {
        id: 1,
        name: "Acme".into(),
        provider_type: "Restaurant".into(),
        address: Some("1 Main St".into()),
        city: "Springfield".into(),
        contact: None,
    }
}

fn bread() -> NewFoodListing {
    NewFoodListing {
        name: "Bread".into(),
        quantity: 10,
        expiry_date: date(2025, 3, 18),
        provider_id: 1,
        provider_type: "Restaurant".into(),
        location: "Springfield".into(),
        food_type: FoodType::Vegetarian,
        meal_type: MealType::Breakfast,
    }
}

#[test]
fn test_provider_repository() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.provider_repo();

    repo.save(&acme())?;
    assert_eq!(repo.find_by_id(1)?, Some(acme()));
    assert_eq!(repo.find_by_id(2)?, None);
    assert_eq!(repo.list_all()?.len(), 1);

    // Duplicate identity is a constraint violation.
    let err = repo.save(&acme()).unwrap_err();
    assert!(err.is_constraint_violation());

    Ok(())
}

#[test]
fn test_receiver_repository() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    let repo = db.receiver_repo();

    let receiver = Receiver {
        id: 5,
        name: "Hope Shelter".into(),
        receiver_type: "Shelter".into(),
        city: "Springfield".into(),
        contact: Some("555-0100".into()),
    };
    repo.save(&receiver)?;

    assert_eq!(repo.find_by_id(5)?, Some(receiver));
    assert_eq!(repo.list_all()?.len(), 1);

    Ok(())
}

#[test]
fn test_add_then_read_returns_inserted_values() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    let repo = db.listing_repo();

    let new_listing = bread();
    let id = repo.add(&new_listing)?;

    let stored = repo.find_by_id(id)?.expect("listing stored");
    assert_eq!(stored, new_listing.into_listing(id));

    Ok(())
}

#[test]
fn test_update_changes_only_quantity_and_name() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    let repo = db.listing_repo();

    let id = repo.add(&bread())?;
    let before = repo.find_by_id(id)?.expect("listing stored");

    let affected = repo.update_quantity_and_name(id, 3, "Sourdough")?;
    assert_eq!(affected, 1);

    let after = repo.find_by_id(id)?.expect("listing still stored");
    assert_eq!(after.name, "Sourdough");
    assert_eq!(after.quantity, 3);
    assert_eq!(
        FoodListing {
            name: before.name.clone(),
            quantity: before.quantity,
            ..after
        },
        before
    );

    Ok(())
}

#[test]
fn test_update_missing_listing_touches_nothing() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    assert_eq!(db.listing_repo().update_quantity_and_name(99, 1, "Ghost")?, 0);
    Ok(())
}

#[test]
fn test_delete_is_idempotent() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    let repo = db.listing_repo();

    let keep = repo.add(&bread())?;
    let drop = repo.add(&NewFoodListing {
        name: "Soup".into(),
        ..bread()
    })?;

    assert_eq!(repo.delete(drop)?, 1);
    assert_eq!(repo.list_all()?.len(), 1);

    assert_eq!(repo.delete(drop)?, 0);
    assert_eq!(repo.delete(12345)?, 0);
    assert_eq!(repo.list_all()?.len(), 1);
    assert!(repo.find_by_id(keep)?.is_some());

    Ok(())
}

#[test]
fn test_listing_requires_existing_provider() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;

    let err = db.listing_repo().add(&bread()).unwrap_err();
    assert!(err.is_constraint_violation());
    assert!(db.listing_repo().list_all()?.is_empty());

    Ok(())
}

#[test]
fn test_deleting_listing_cascades_to_claims() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    db.receiver_repo().save(&Receiver {
        id: 1,
        name: "Hope Shelter".into(),
        receiver_type: "Shelter".into(),
        city: "Springfield".into(),
        contact: None,
    })?;
    let food_id = db.listing_repo().add(&bread())?;

    let claim = Claim {
        id: 1,
        food_id,
        receiver_id: 1,
        status: ClaimStatus::Completed,
        timestamp: date(2025, 3, 17).and_hms_opt(9, 30, 0).expect("valid time"),
    };
    db.claim_repo().save(&claim)?;
    assert_eq!(db.claim_repo().find_by_id(1)?, Some(claim.clone()));
    assert_eq!(db.claim_repo().list_for_food(food_id)?, vec![claim]);

    db.listing_repo().delete(food_id)?;
    assert!(db.claim_repo().list_all()?.is_empty());

    Ok(())
}

#[test]
fn test_claim_requires_existing_receiver() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    let food_id = db.listing_repo().add(&bread())?;

    let err = db
        .claim_repo()
        .save(&Claim {
            id: 1,
            food_id,
            receiver_id: 42,
            status: ClaimStatus::Pending,
            timestamp: date(2025, 3, 17).and_hms_opt(0, 0, 0).expect("valid time"),
        })
        .unwrap_err();
    assert!(err.is_constraint_violation());

    Ok(())
}

#[test]
fn test_choices_and_locations() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    let repo = db.listing_repo();

    repo.add(&bread())?;
    repo.add(&NewFoodListing {
        name: "Rice".into(),
        location: "Capital City".into(),
        ..bread()
    })?;
    repo.add(&NewFoodListing {
        name: "Beans".into(),
        ..bread()
    })?;

    let choices = repo.list_choices()?;
    let names: Vec<&str> = choices.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(names, vec!["Bread", "Rice", "Beans"]);

    assert_eq!(
        repo.distinct_locations()?,
        vec!["Capital City".to_string(), "Springfield".to_string()]
    );

    Ok(())
}

#[test]
fn test_unknown_enum_text_is_reported() -> anyhow::Result<()> {
    let db = Database::open_in_memory()?;
    db.provider_repo().save(&acme())?;
    db.execute_mutation(
        "INSERT INTO Food_Listings (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type) VALUES (1, 'Stew', 2, '2025-03-18', 1, 'Restaurant', 'Springfield', 'Carnivore', 'Dinner')",
        [],
    )?;

    assert!(db.listing_repo().find_by_id(1).is_err());

    Ok(())
}
