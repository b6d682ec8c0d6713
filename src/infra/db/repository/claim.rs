use super::{Database, RepoResult, parse_column};
use crate::domain::{Claim, ClaimId, FoodId};

/// Repository for claim operations.
pub struct ClaimRepository<'a> {
    db: &'a Database,
}

impl<'a> ClaimRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn save(&self, claim: &Claim) -> RepoResult<()> {
        self.db.execute_mutation(
            "INSERT INTO Claims (Claim_ID, Food_ID, Receiver_ID, Status, Timestamp) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                claim.id,
                claim.food_id,
                claim.receiver_id,
                claim.status.to_string(),
                claim.timestamp,
            ),
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: ClaimId) -> RepoResult<Option<Claim>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Claim_ID, Food_ID, Receiver_ID, Status, Timestamp FROM Claims WHERE Claim_ID = ?1",
        )?;
        let mut rows = stmt.query_map([id], map_claim)?;

        match rows.next() {
            Some(row) => row.map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> RepoResult<Vec<Claim>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Claim_ID, Food_ID, Receiver_ID, Status, Timestamp FROM Claims ORDER BY Claim_ID",
        )?;
        let rows = stmt.query_map([], map_claim)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn list_for_food(&self, food_id: FoodId) -> RepoResult<Vec<Claim>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Claim_ID, Food_ID, Receiver_ID, Status, Timestamp FROM Claims WHERE Food_ID = ?1 ORDER BY Timestamp",
        )?;
        let rows = stmt.query_map([food_id], map_claim)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_claim(row: &rusqlite::Row<'_>) -> rusqlite::Result<Claim> {
    Ok(Claim {
        id: row.get(0)?,
        food_id: row.get(1)?,
        receiver_id: row.get(2)?,
        status: parse_column(row, 3)?,
        timestamp: row.get(4)?,
    })
}
