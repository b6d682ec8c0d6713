use super::{Database, RepoResult};
use crate::domain::{Receiver, ReceiverId};

/// Repository for receiver operations.
pub struct ReceiverRepository<'a> {
    db: &'a Database,
}

impl<'a> ReceiverRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn save(&self, receiver: &Receiver) -> RepoResult<()> {
        self.db.execute_mutation(
            "INSERT INTO Receivers (Receiver_ID, Name, Type, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                receiver.id,
                &receiver.name,
                &receiver.receiver_type,
                &receiver.city,
                &receiver.contact,
            ),
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: ReceiverId) -> RepoResult<Option<Receiver>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Receiver_ID, Name, Type, City, Contact FROM Receivers WHERE Receiver_ID = ?1",
        )?;
        let mut rows = stmt.query_map([id], map_receiver)?;

        match rows.next() {
            Some(row) => row.map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> RepoResult<Vec<Receiver>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Receiver_ID, Name, Type, City, Contact FROM Receivers ORDER BY Receiver_ID",
        )?;
        let rows = stmt.query_map([], map_receiver)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_receiver(row: &rusqlite::Row<'_>) -> rusqlite::Result<Receiver> {
    Ok(Receiver {
        id: row.get(0)?,
        name: row.get(1)?,
        receiver_type: row.get(2)?,
        city: row.get(3)?,
        contact: row.get(4)?,
    })
}
