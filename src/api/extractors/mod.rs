/*
 * Responsibility
 * - handler が受け取る型への変換 (path id, cancel signal)
 */
mod cancel;
mod person_id;

pub use person_id::PersonId;
