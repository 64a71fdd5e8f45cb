/*
 * Responsibility
 * - people のインメモリ保存 (append-only)
 * - id の採番 (0 始まり、単調増加、再利用なし)
 * - 読み取りは snapshot (clone) を返し、内部の Vec は外に出さない
 */
use std::sync::Arc;

use parking_lot::RwLock;

use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    pub id: u64,
    pub name: String,
    pub age: i64,
    pub credential_hash: String,
}

/// Person before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewPerson {
    pub name: String,
    pub age: i64,
    pub credential_hash: String,
}

#[derive(Debug, Default)]
struct Inner {
    rows: Vec<PersonRow>,
    // Always strictly greater than every assigned id.
    next_id: u64,
}

/// Shared handle to the people store. Cloning is cheap (Arc).
#[derive(Clone, Debug, Default)]
pub struct PersonRepo {
    inner: Arc<RwLock<Inner>>,
}

impl PersonRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the next id and append. id assignment and push happen under the
    /// same write lock, so concurrent saves stay unique and ordered.
    pub fn save(&self, person: NewPerson) -> u64 {
        let mut inner = self.inner.write();
        let id = inner.next_id;
        inner.rows.push(PersonRow {
            id,
            name: person.name,
            age: person.age,
            credential_hash: person.credential_hash,
        });
        inner.next_id += 1;

        tracing::debug!(person_id = id, "person saved");
        id
    }

    /// Point lookup by linear scan.
    pub fn find(&self, id: u64) -> RepoResult<PersonRow> {
        self.inner
            .read()
            .rows
            .iter()
            .find(|row| row.id == id)
            .cloned()
            .ok_or(RepoError::NotFound { id })
    }

    pub fn find_all(&self) -> Vec<PersonRow> {
        self.inner.read().rows.clone()
    }

    pub fn count(&self) -> usize {
        self.inner.read().rows.len()
    }
}
