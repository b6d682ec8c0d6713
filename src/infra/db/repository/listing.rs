use super::{Database, RepoResult, parse_column};
use crate::domain::{FoodId, FoodListing, NewFoodListing};

const LISTING_COLUMNS: &str = "Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type";

/// Repository for the `Food_Listings` table, the only table with a CRUD flow.
pub struct FoodListingRepository<'a> {
    db: &'a Database,
}

impl<'a> FoodListingRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Insert the eight collected fields and return the assigned `Food_ID`.
    pub fn add(&self, listing: &NewFoodListing) -> RepoResult<FoodId> {
        self.db.execute_mutation(
            r#"
            INSERT INTO Food_Listings
                (Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            (
                &listing.name,
                listing.quantity,
                listing.expiry_date,
                listing.provider_id,
                &listing.provider_type,
                &listing.location,
                listing.food_type.to_string(),
                listing.meal_type.to_string(),
            ),
        )?;
        Ok(self.db.connection().last_insert_rowid())
    }

    /// Insert a listing with a caller-chosen `Food_ID`.
    pub fn save(&self, listing: &FoodListing) -> RepoResult<()> {
        self.db.execute_mutation(
            r#"
            INSERT INTO Food_Listings
                (Food_ID, Food_Name, Quantity, Expiry_Date, Provider_ID, Provider_Type, Location, Food_Type, Meal_Type)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            (
                listing.id,
                &listing.name,
                listing.quantity,
                listing.expiry_date,
                listing.provider_id,
                &listing.provider_type,
                &listing.location,
                listing.food_type.to_string(),
                listing.meal_type.to_string(),
            ),
        )?;
        Ok(())
    }

    /// Overwrite quantity and name only. Returns the number of rows touched.
    pub fn update_quantity_and_name(
        &self,
        id: FoodId,
        quantity: u32,
        name: &str,
    ) -> RepoResult<usize> {
        self.db.execute_mutation(
            "UPDATE Food_Listings SET Quantity = ?1, Food_Name = ?2 WHERE Food_ID = ?3",
            (quantity, name, id),
        )
    }

    /// Remove a listing. A missing id affects zero rows and is not an error.
    pub fn delete(&self, id: FoodId) -> RepoResult<usize> {
        self.db
            .execute_mutation("DELETE FROM Food_Listings WHERE Food_ID = ?1", [id])
    }

    pub fn find_by_id(&self, id: FoodId) -> RepoResult<Option<FoodListing>> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM Food_Listings WHERE Food_ID = ?1");
        let mut stmt = self.db.connection().prepare(&sql)?;
        let mut rows = stmt.query_map([id], map_listing)?;

        match rows.next() {
            Some(row) => row.map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> RepoResult<Vec<FoodListing>> {
        let sql = format!("SELECT {LISTING_COLUMNS} FROM Food_Listings ORDER BY Food_ID");
        let mut stmt = self.db.connection().prepare(&sql)?;
        let rows = stmt.query_map([], map_listing)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// `(Food_ID, Food_Name)` pairs for picking a listing to update or delete.
    pub fn list_choices(&self) -> RepoResult<Vec<(FoodId, String)>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT Food_ID, Food_Name FROM Food_Listings ORDER BY Food_ID")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, FoodId>(0)?, row.get::<_, String>(1)?))
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Distinct listing locations, sorted, for the location filter.
    pub fn distinct_locations(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .db
            .connection()
            .prepare("SELECT DISTINCT Location FROM Food_Listings ORDER BY Location")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_listing(row: &rusqlite::Row<'_>) -> rusqlite::Result<FoodListing> {
    Ok(FoodListing {
        id: row.get(0)?,
        name: row.get(1)?,
        quantity: row.get(2)?,
        expiry_date: row.get(3)?,
        provider_id: row.get(4)?,
        provider_type: row.get(5)?,
        location: row.get(6)?,
        food_type: parse_column(row, 7)?,
        meal_type: parse_column(row, 8)?,
    })
}
