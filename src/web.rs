use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use crate::config::{SchedulerConfig, Strategy};
use crate::display::format_player_name;
use crate::parser::{name_lookup, Player};
use crate::error::ScheduleError;
use crate::schedule::{generate_schedule, Pair, PlayerId};
use crate::stats::{session_stats, GameRecord};

/// Largest player list one request may schedule; catalog size grows with the fourth power
pub const MAX_PLAYERS_PER_REQUEST: usize = 48;
/// Largest number of games one request may schedule
pub const MAX_GAMES_PER_REQUEST: usize = 500;

/// Read-only state shared by every worker
pub struct AppState {
    pub roster: Vec<Player>,
    pub names: HashMap<PlayerId, String>,
    pub config: SchedulerConfig,
}

impl AppState {
    pub fn new(roster: Vec<Player>, config: SchedulerConfig) -> Self {
        let names = name_lookup(&roster);
        AppState { roster, names, config }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Defaults to the whole roster
    player_ids: Option<Vec<PlayerId>>,
    num_games: i64,
    strategy: Option<Strategy>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    team_a: Pair,
    team_b: Pair,
    team_a_names: [String; 2],
    team_b_names: [String; 2],
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    games: Vec<ScheduledGame>,
}

#[derive(Deserialize)]
pub struct StatsRequest {
    games: Vec<GameRecord>,
}

fn bad_request(message: String) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
}

fn team_names(pair: &Pair, names: &HashMap<PlayerId, String>) -> [String; 2] {
    [
        format_player_name(pair.first(), names),
        format_player_name(pair.second(), names),
    ]
}

fn check_request_limits(players: usize, num_games: usize) -> Result<(), ScheduleError> {
    if players > MAX_PLAYERS_PER_REQUEST {
        return Err(ScheduleError::InvalidRequest(format!(
            "at most {} players per request, got {}",
            MAX_PLAYERS_PER_REQUEST, players
        )));
    }
    if num_games > MAX_GAMES_PER_REQUEST {
        return Err(ScheduleError::InvalidRequest(format!(
            "at most {} games per request, got {}",
            MAX_GAMES_PER_REQUEST, num_games
        )));
    }
    Ok(())
}

// Roster endpoint
async fn get_players(state: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(&state.roster))
}

// Schedule generation endpoint
async fn create_schedule(
    req: web::Json<ScheduleRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let num_games = match usize::try_from(req.num_games) {
        Ok(n) => n,
        Err(_) => return Ok(bad_request("invalid request: number of games must be positive".to_string())),
    };

    let player_ids = req
        .player_ids
        .clone()
        .unwrap_or_else(|| state.roster.iter().map(|p| p.id).collect());

    let mut config = state.config;
    if let Some(strategy) = req.strategy {
        config.strategy = strategy;
    }

    let players = player_ids.len();
    if let Err(e) = check_request_limits(players, num_games) {
        warn!(error = %e, players, num_games, "schedule request over limits");
        return Ok(bad_request(e.to_string()));
    }

    // Catalog construction is CPU bound, keep it off the async workers
    let result = web::block(move || generate_schedule(&player_ids, num_games, &config)).await?;

    match result {
        Ok(schedule) => {
            let games = schedule
                .games
                .iter()
                .map(|game| ScheduledGame {
                    team_a: game.team_a,
                    team_b: game.team_b,
                    team_a_names: team_names(&game.team_a, &state.names),
                    team_b_names: team_names(&game.team_b, &state.names),
                })
                .collect();
            Ok(HttpResponse::Ok().json(ScheduleResponse { games }))
        }
        Err(e) => {
            warn!(error = %e, players, num_games, "schedule request rejected");
            Ok(bad_request(e.to_string()))
        }
    }
}

// Session stats endpoint
async fn get_session_stats(req: web::Json<StatsRequest>) -> Result<HttpResponse> {
    match session_stats(&req.games) {
        Ok(stats) => Ok(HttpResponse::Ok().json(stats)),
        Err(e) => {
            warn!(error = %e, "stats request rejected");
            Ok(bad_request(e.to_string()))
        }
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/players", web::get().to(get_players))
        .route("/api/schedule", web::post().to(create_schedule))
        .route("/api/stats", web::post().to(get_session_stats));
}

pub async fn start_server(port: u16, state: AppState) -> std::io::Result<()> {
    let app_state = web::Data::new(state);
    info!(port, players = app_state.roster.len(), "starting web server");

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    fn state() -> web::Data<AppState> {
        let roster = vec![
            Player { id: 1, name: "Alice".to_string() },
            Player { id: 2, name: "Bob".to_string() },
            Player { id: 3, name: "Chen".to_string() },
            Player { id: 4, name: "Dana".to_string() },
            Player { id: 5, name: "Eve".to_string() },
        ];
        web::Data::new(AppState::new(roster, SchedulerConfig::default()))
    }

    #[actix_web::test]
    async fn test_schedule_for_given_players() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .set_json(json!({"playerIds": [1, 2, 3, 4], "numGames": 3}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let games = body["games"].as_array().unwrap();
        assert_eq!(games.len(), 3);
        assert_eq!(games[0]["teamA"], json!([1, 2]));
        assert_eq!(games[0]["teamB"], json!([3, 4]));
        assert_eq!(games[0]["teamANames"], json!(["Alice", "Bob"]));
    }

    #[actix_web::test]
    async fn test_schedule_defaults_to_roster() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .set_json(json!({"numGames": 2}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let games = body["games"].as_array().unwrap();
        assert_eq!(games.len(), 2);
        // Player 5 sits out the first game and must play the second
        assert!(games[1]["teamA"].as_array().unwrap().contains(&json!(5))
            || games[1]["teamB"].as_array().unwrap().contains(&json!(5)));
    }

    #[actix_web::test]
    async fn test_schedule_rejects_bad_counts() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        for payload in [
            json!({"playerIds": [1, 2, 3], "numGames": 1}),
            json!({"playerIds": [1, 2, 3, 4], "numGames": 0}),
            json!({"playerIds": [1, 2, 3, 4], "numGames": -2}),
        ] {
            let req = test::TestRequest::post().uri("/api/schedule").set_json(payload).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_schedule_rejects_too_many_players() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let player_ids: Vec<PlayerId> = (1..=MAX_PLAYERS_PER_REQUEST as PlayerId + 1).collect();
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .set_json(json!({"playerIds": player_ids, "numGames": 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("players per request"));
    }

    #[actix_web::test]
    async fn test_schedule_rejects_too_many_games() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .set_json(json!({"playerIds": [1, 2, 3, 4], "numGames": MAX_GAMES_PER_REQUEST + 1}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("games per request"));
    }

    #[actix_web::test]
    async fn test_schedule_accepts_requests_at_the_limits() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let player_ids: Vec<PlayerId> = (1..=MAX_PLAYERS_PER_REQUEST as PlayerId).collect();
        let req = test::TestRequest::post()
            .uri("/api/schedule")
            .set_json(json!({"playerIds": player_ids, "numGames": 2}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["games"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_players_endpoint() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/api/players").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 5);
        assert_eq!(body[0], json!({"id": 1, "name": "Alice"}));
    }

    #[actix_web::test]
    async fn test_stats_endpoint() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/stats")
            .set_json(json!({"games": [
                {"teamA": [1, 2], "teamB": [3, 4], "scoreA": 21, "scoreB": 12, "amountBet": 4.0}
            ]}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["gamesCounted"], json!(1));
        assert_eq!(body["playerEarnings"]["1"], json!(4.0));
        assert_eq!(body["playerLosses"]["3"], json!(1));
    }

    #[actix_web::test]
    async fn test_stats_rejects_ties() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/api/stats")
            .set_json(json!({"games": [
                {"teamA": [1, 2], "teamB": [3, 4], "scoreA": 21, "scoreB": 21}
            ]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
