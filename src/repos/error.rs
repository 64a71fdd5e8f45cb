/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoError {
    #[error("person {id} not found")]
    NotFound { id: u64 },
}

pub type RepoResult<T> = Result<T, RepoError>;
