/*
 * Responsibility
 * - `/` と `/{id}` の handler
 * - 擬似処理 (固定時間) と cancel signal を race させ、先に終わった側だけを反映する
 * - cancel 時は store を変更せず 500 (理由付き) を返す
 */
use axum::{Json, body::Bytes, extract::State, http::StatusCode};

use crate::{
    api::{
        dto::people::{CreatePersonRequest, CreatePersonResponse, PersonResponse},
        extractors::PersonId,
    },
    error::AppError,
    repos::NewPerson,
    services::cancel::{self, CancelSignal},
    state::AppState,
};

async fn simulate_work(
    state: &AppState,
    signal: &CancelSignal,
    op: &'static str,
) -> Result<(), AppError> {
    cancel::race(signal, state.simulated_work)
        .await
        .map_err(|reason| {
            tracing::warn!(op, reason = %reason, "request cancelled before work finished");
            AppError::from(reason)
        })
}

pub async fn list_people(
    State(state): State<AppState>,
    signal: CancelSignal,
) -> Result<Json<Vec<PersonResponse>>, AppError> {
    simulate_work(&state, &signal, "list_people").await?;

    let res = state
        .people
        .find_all()
        .into_iter()
        .map(PersonResponse::from)
        .collect();

    Ok(Json(res))
}

pub async fn get_person(
    State(state): State<AppState>,
    PersonId(id): PersonId,
    signal: CancelSignal,
) -> Result<Json<PersonResponse>, AppError> {
    simulate_work(&state, &signal, "get_person").await?;

    let row = state.people.find(id)?;
    Ok(Json(row.into()))
}

pub async fn create_person(
    State(state): State<AppState>,
    signal: CancelSignal,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatePersonResponse>), AppError> {
    simulate_work(&state, &signal, "create_person").await?;

    let req: CreatePersonRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request("INVALID_BODY", e.to_string()))?;

    // Only the digest is kept; the plaintext is dropped here.
    let credential_hash = state.hasher.hash(req.password).await?;

    let id = state.people.save(NewPerson {
        name: req.name.clone(),
        age: req.age,
        credential_hash,
    });

    let token = state.tokens.issue_person_token(id, &req.name)?;
    tracing::info!(person_id = id, "person created");

    Ok((StatusCode::CREATED, Json(CreatePersonResponse { token })))
}
