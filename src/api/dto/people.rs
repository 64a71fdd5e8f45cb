/*
 * Responsibility
 * - People の request/response DTO
 * - credential_hash は response 型に存在しない (client に出ない)
 */
use serde::{Deserialize, Serialize};

use crate::repos::PersonRow;

#[derive(Debug, Deserialize)]
pub struct CreatePersonRequest {
    pub name: String,
    pub age: i64,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct PersonResponse {
    pub id: u64,
    pub name: String,
    pub age: i64,
}

impl From<PersonRow> for PersonResponse {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePersonResponse {
    #[serde(rename = "Token")]
    pub token: String,
}
