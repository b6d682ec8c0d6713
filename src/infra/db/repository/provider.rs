use super::{Database, RepoResult};
use crate::domain::{Provider, ProviderId};

/// Repository for provider operations.
pub struct ProviderRepository<'a> {
    db: &'a Database,
}

impl<'a> ProviderRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn save(&self, provider: &Provider) -> RepoResult<()> {
        self.db.execute_mutation(
            "INSERT INTO Providers (Provider_ID, Name, Type, Address, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                provider.id,
                &provider.name,
                &provider.provider_type,
                &provider.address,
                &provider.city,
                &provider.contact,
            ),
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, id: ProviderId) -> RepoResult<Option<Provider>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Provider_ID, Name, Type, Address, City, Contact FROM Providers WHERE Provider_ID = ?1",
        )?;
        let mut rows = stmt.query_map([id], map_provider)?;

        match rows.next() {
            Some(row) => row.map(Some).map_err(Into::into),
            None => Ok(None),
        }
    }

    pub fn list_all(&self) -> RepoResult<Vec<Provider>> {
        let mut stmt = self.db.connection().prepare(
            "SELECT Provider_ID, Name, Type, Address, City, Contact FROM Providers ORDER BY Provider_ID",
        )?;
        let rows = stmt.query_map([], map_provider)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn map_provider(row: &rusqlite::Row<'_>) -> rusqlite::Result<Provider> {
    Ok(Provider {
        id: row.get(0)?,
        name: row.get(1)?,
        provider_type: row.get(2)?,
        address: row.get(3)?,
        city: row.get(4)?,
        contact: row.get(5)?,
    })
}
