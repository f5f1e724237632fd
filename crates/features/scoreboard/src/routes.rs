use crate::Scoreboard;
use crate::error::ScoreboardError;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use dhub_derive::{api_handler, api_model};
use dhub_kernel::domain::constants::{MATCH, SCOREBOARD_TAG};
use dhub_kernel::domain::scoring::{Match, Team};
use dhub_kernel::security::resource::ResourceGuard;
use dhub_kernel::server::state::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

#[api_model]
/// New match request
pub struct CreateMatchRequest {
    /// First team name (blank falls back to "Team1")
    #[serde(default)]
    team1_name: String,
    /// Second team name (blank falls back to "Team2")
    #[serde(default)]
    team2_name: String,
}

#[api_model]
/// Score update request (one played hand)
pub struct UpdateScoreRequest {
    /// Points for the first team
    #[serde(default)]
    team1_points: i64,
    /// Points for the second team
    #[serde(default)]
    team2_points: i64,
}

#[api_model]
/// Match state
pub struct MatchResponse {
    /// Match ID
    id: String,
    /// First team name
    team1_name: String,
    /// Second team name
    team2_name: String,
    /// First team score
    team1_score: i64,
    /// Second team score
    team2_score: i64,
    /// Whether a team already won
    game_over: bool,
    /// Winning team (1 or 2), if any
    winner: Option<u8>,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        let winner = m.winner().map(|team| match team {
            Team::One => 1,
            Team::Two => 2,
        });
        Self {
            game_over: m.game_over(),
            winner,
            id: m.id,
            team1_name: m.team1_name,
            team2_name: m.team2_name,
            team1_score: m.team1_score,
            team2_score: m.team2_score,
        }
    }
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(create_match)).routes(routes!(get_match, update_score))
}

fn slice(state: &ApiState) -> Result<&Scoreboard, ScoreboardError> {
    state.try_get_slice::<Scoreboard>().map_err(|e| ScoreboardError::Internal {
        message: e.to_string().into(),
        context: Some("Scoreboard slice not registered".into()),
    })
}

fn verified_key(id: &str) -> Result<String, ScoreboardError> {
    let full = ResourceGuard::verify(id, MATCH)
        .map_err(|_| ScoreboardError::NotFound { id: id.to_owned(), context: None })?;
    Ok(ResourceGuard::key(&full).to_owned())
}

#[api_handler(
    post,
    path = "/api/match",
    request_body = CreateMatchRequest,
    responses((status = CREATED, description = "Match created", body = MatchResponse)),
    tag = SCOREBOARD_TAG,
)]
async fn create_match(
    State(state): State<ApiState>,
    Json(request): Json<CreateMatchRequest>,
) -> Result<impl IntoResponse, ScoreboardError> {
    let created =
        slice(&state)?.matches.create(&request.team1_name, &request.team2_name).await?;

    let location = format!("/api/match/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(MatchResponse::from(created)),
    ))
}

#[api_handler(
    get,
    path = "/api/match/{id}",
    params(("id" = String, Path, description = "Match ID")),
    responses(
        (status = OK, description = "Match state", body = MatchResponse),
        (status = NOT_FOUND, description = "Unknown match"),
    ),
    tag = SCOREBOARD_TAG,
)]
async fn get_match(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<MatchResponse>, ScoreboardError> {
    let key = verified_key(&id)?;
    let found = slice(&state)?
        .matches
        .get(&key)
        .await?
        .ok_or(ScoreboardError::NotFound { id, context: None })?;

    Ok(Json(MatchResponse::from(found)))
}

#[api_handler(
    patch,
    path = "/api/match/{id}",
    request_body = UpdateScoreRequest,
    params(("id" = String, Path, description = "Match ID")),
    responses(
        (status = OK, description = "Updated match state", body = MatchResponse),
        (status = BAD_REQUEST, description = "Negative points"),
        (status = NOT_FOUND, description = "Unknown match"),
        (status = CONFLICT, description = "Match already over"),
    ),
    tag = SCOREBOARD_TAG,
)]
async fn update_score(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateScoreRequest>,
) -> Result<Json<MatchResponse>, ScoreboardError> {
    let key = verified_key(&id)?;
    let updated = slice(&state)?
        .matches
        .add_points(&key, request.team1_points, request.team2_points)
        .await?;

    Ok(Json(MatchResponse::from(updated)))
}
