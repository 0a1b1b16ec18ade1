//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), ADMIN_TOKEN
//! (organizer login token, generated and logged when unset), ROSTER_CSV
//! (roster file imported at startup).

use actix_files::Files;
use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    get, post, put,
    web::{self, Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use padel_tournament_web::store::{load_roster_file, read_roster};
use padel_tournament_web::{
    compute_standings, generate_fixtures, validate_score, EngineError, FixtureId, FormatConfig,
    MemoryStore, Player, PlayerId, RosterFilter, SetScore, Side, Standing, StandingsScope, Store,
    StoreError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Organizer login token, checked by /api/session/login.
struct AdminToken(String);

/// Session key holding the organizer flag.
const ORGANIZER_KEY: &str = "organizer";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    token: String,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    level: Option<f64>,
}

#[derive(Deserialize)]
struct ApproveBody {
    approved: bool,
}

#[derive(Deserialize)]
struct PlayersQuery {
    #[serde(default)]
    approved: Option<bool>,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(flatten)]
    config: FormatConfig,
}

#[derive(Deserialize)]
struct GenerateFixturesBody {
    /// The organizer's roster selection, in the order it was made.
    player_ids: Vec<PlayerId>,
    /// First slot time; omitted = now.
    #[serde(default)]
    starts_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ResultBody {
    sets: Vec<SetScore>,
    winner: Side,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and fixture id
/// (e.g. /api/tournaments/{id}/fixtures/{fixture_id}/result)
#[derive(Deserialize)]
struct TournamentFixturePath {
    id: TournamentId,
    fixture_id: FixtureId,
}

/// Path segment: player id (e.g. /api/players/{id}/approve)
#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

/// Standing row joined with the player's name for display.
#[derive(serde::Serialize)]
struct StandingRow {
    name: String,
    #[serde(flatten)]
    standing: Standing,
}

fn store_error(e: &StoreError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        StoreError::UnknownPlayer(_)
        | StoreError::UnknownTournament(_)
        | StoreError::UnknownFixture(_) => HttpResponse::NotFound().json(body),
        StoreError::DuplicateMatchup | StoreError::AlreadyResolved(_) => {
            HttpResponse::Conflict().json(body)
        }
        StoreError::Unavailable => HttpResponse::InternalServerError().json(body),
    }
}

fn is_organizer(session: &Session) -> bool {
    session
        .get::<bool>(ORGANIZER_KEY)
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Some(response) = denied. Organizer endpoints call this first.
fn require_organizer(session: &Session) -> Option<HttpResponse> {
    if is_organizer(session) {
        None
    } else {
        Some(
            HttpResponse::Unauthorized()
                .json(serde_json::json!({ "error": "Organizer session required" })),
        )
    }
}

fn named_rows(state: &MemoryStore, rows: Vec<Standing>) -> Result<Vec<StandingRow>, StoreError> {
    let names: HashMap<PlayerId, String> = state
        .list_players()?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();
    Ok(rows
        .into_iter()
        .map(|standing| StandingRow {
            name: names
                .get(&standing.player_id)
                .cloned()
                .unwrap_or_else(|| standing.player_id.to_string()),
            standing,
        })
        .collect())
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Start an organizer session when the token matches.
#[post("/api/session/login")]
async fn api_login(
    token: Data<AdminToken>,
    session: Session,
    body: Json<LoginBody>,
) -> HttpResponse {
    if body.token != token.0 {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Wrong organizer token" }));
    }
    match session.insert(ORGANIZER_KEY, true) {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({ "organizer": true })),
        Err(_) => HttpResponse::InternalServerError()
            .json(serde_json::json!({ "error": "Session error" })),
    }
}

#[post("/api/session/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "organizer": false }))
}

/// Whether the current session holds the organizer role.
#[get("/api/session")]
async fn api_session(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "organizer": is_organizer(&session) }))
}

/// List players, optionally filtered by approval (?approved=true).
#[get("/api/players")]
async fn api_list_players(state: Data<MemoryStore>, query: Query<PlayersQuery>) -> HttpResponse {
    let players = match state.list_players() {
        Ok(players) => players,
        Err(e) => return store_error(&e),
    };
    let players: Vec<Player> = match query.approved {
        Some(approved) => players.into_iter().filter(|p| p.approved == approved).collect(),
        None => players,
    };
    HttpResponse::Ok().json(players)
}

/// Register a new club player (organizer only; players added here are
/// approved immediately).
#[post("/api/players")]
async fn api_add_player(
    state: Data<MemoryStore>,
    session: Session,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    if let Some(denied) = require_organizer(&session) {
        return denied;
    }
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Player name must not be empty" }));
    }
    match state.add_player(name, body.level) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => store_error(&e),
    }
}

/// Approve (or revoke approval of) a club member. Only approved players can
/// be selected for fixtures.
#[put("/api/players/{id}/approve")]
async fn api_approve_player(
    state: Data<MemoryStore>,
    session: Session,
    path: Path<PlayerPath>,
    body: Option<Json<ApproveBody>>,
) -> HttpResponse {
    if let Some(denied) = require_organizer(&session) {
        return denied;
    }
    let approved = body.as_ref().map(|b| b.approved).unwrap_or(true);
    match state.set_approved(path.id, approved) {
        Ok(player) => HttpResponse::Ok().json(player),
        Err(e) => store_error(&e),
    }
}

/// Import players from a roster CSV request body (name,level,approved).
#[post("/api/players/import")]
async fn api_import_players(
    state: Data<MemoryStore>,
    session: Session,
    body: Bytes,
) -> HttpResponse {
    if let Some(denied) = require_organizer(&session) {
        return denied;
    }
    let players = match read_roster(&body[..]) {
        Ok(players) => players,
        Err(e) => {
            return HttpResponse::BadRequest()
                .json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    match state.import_players(players) {
        Ok(added) => {
            log::info!("Imported {} player(s) via roster upload", added);
            HttpResponse::Ok().json(serde_json::json!({ "imported": added }))
        }
        Err(e) => store_error(&e),
    }
}

/// Create a tournament with a format config
/// (e.g. {"name": "Liga de otoño", "format": "groups", "group_count": 2}).
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: Data<MemoryStore>,
    session: Session,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    if let Some(denied) = require_organizer(&session) {
        return denied;
    }
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Tournament name must not be empty" }));
    }
    match state.create_tournament(name, body.config) {
        Ok(tournament) => HttpResponse::Ok().json(tournament),
        Err(e) => store_error(&e),
    }
}

/// All tournaments, newest first.
#[get("/api/tournaments")]
async fn api_list_tournaments(state: Data<MemoryStore>) -> HttpResponse {
    match state.list_tournaments() {
        Ok(tournaments) => HttpResponse::Ok().json(tournaments),
        Err(e) => store_error(&e),
    }
}

/// Get a tournament by id, fixtures ordered by stage then slot time.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: Data<MemoryStore>, path: Path<TournamentPath>) -> HttpResponse {
    let mut tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(&e),
    };
    tournament.fixtures.sort_by(|a, b| {
        a.stage
            .sort_key()
            .cmp(&b.stage.sort_key())
            .then_with(|| a.scheduled_at.cmp(&b.scheduled_at))
    });
    HttpResponse::Ok().json(tournament)
}

/// Pair the selected players and generate this tournament's fixtures.
/// Matchups that already have a fixture are skipped, never duplicated.
#[post("/api/tournaments/{id}/fixtures/generate")]
async fn api_generate_fixtures(
    state: Data<MemoryStore>,
    session: Session,
    path: Path<TournamentPath>,
    body: Json<GenerateFixturesBody>,
) -> HttpResponse {
    if let Some(denied) = require_organizer(&session) {
        return denied;
    }
    let tournament = match state.get_tournament(path.id) {
        Ok(t) => t,
        Err(e) => return store_error(&e),
    };
    let approved =
        match state.fetch_approved_roster(&RosterFilter::selection(body.player_ids.clone())) {
            Ok(roster) => roster,
            Err(e) => return store_error(&e),
        };
    let by_id: HashMap<PlayerId, Player> = approved.into_iter().map(|p| (p.id, p)).collect();
    // Rebuild the roster in request order so the engine sees the selection
    // exactly as sent, duplicates included.
    let mut roster = Vec::with_capacity(body.player_ids.len());
    for id in &body.player_ids {
        match by_id.get(id) {
            Some(player) => roster.push(player.clone()),
            None => {
                return HttpResponse::BadRequest().json(serde_json::json!({
                    "error": format!("Player {id} is not an approved club member")
                }))
            }
        }
    }
    let existing = match state.fetch_existing_matchup_keys(path.id) {
        Ok(keys) => keys,
        Err(e) => return store_error(&e),
    };
    let starts_at = body.starts_at.unwrap_or_else(Utc::now);
    let mut rng = rand::thread_rng();
    match generate_fixtures(&roster, &tournament.config, starts_at, &existing, &mut rng) {
        Ok(batch) => {
            if let Err(e) = state.insert_fixtures(path.id, batch.fixtures.clone()) {
                return store_error(&e);
            }
            log::info!(
                "Generated {} fixture(s) for tournament {} ({} matchup(s) skipped as existing)",
                batch.fixtures.len(),
                path.id,
                batch.skipped
            );
            HttpResponse::Ok().json(serde_json::json!({
                "created": batch.fixtures,
                "skipped": batch.skipped,
            }))
        }
        Err(EngineError::NoNewFixtures { skipped }) => HttpResponse::Ok().json(serde_json::json!({
            "created": [],
            "skipped": skipped,
            "message": "Every computed matchup already has a fixture",
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Record a result on a pending fixture. A second submission is rejected;
/// corrections go through the organizer override.
#[put("/api/tournaments/{id}/fixtures/{fixture_id}/result")]
async fn api_record_result(
    state: Data<MemoryStore>,
    path: Path<TournamentFixturePath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let resolved = match validate_score(&body.sets, body.winner) {
        Ok(resolved) => resolved,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    match state.record_result(path.id, path.fixture_id, resolved.score, resolved.winner) {
        Ok(fixture) => HttpResponse::Ok().json(fixture),
        Err(e) => store_error(&e),
    }
}

/// Replace a fixture's result, resolved or not (organizer only).
#[put("/api/tournaments/{id}/fixtures/{fixture_id}/override")]
async fn api_override_result(
    state: Data<MemoryStore>,
    session: Session,
    path: Path<TournamentFixturePath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    if let Some(denied) = require_organizer(&session) {
        return denied;
    }
    let resolved = match validate_score(&body.sets, body.winner) {
        Ok(resolved) => resolved,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    log::warn!(
        "Overriding result of fixture {} in tournament {}",
        path.fixture_id,
        path.id
    );
    match state.override_result(path.id, path.fixture_id, resolved.score, resolved.winner) {
        Ok(fixture) => HttpResponse::Ok().json(fixture),
        Err(e) => store_error(&e),
    }
}

/// Standings over one tournament's resolved fixtures.
#[get("/api/tournaments/{id}/standings")]
async fn api_tournament_standings(
    state: Data<MemoryStore>,
    path: Path<TournamentPath>,
) -> HttpResponse {
    let fixtures = match state.fetch_resolved_fixtures(StandingsScope::Tournament(path.id)) {
        Ok(fixtures) => fixtures,
        Err(e) => return store_error(&e),
    };
    match named_rows(&state, compute_standings(&fixtures)) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => store_error(&e),
    }
}

/// Club-wide standings over every tournament.
#[get("/api/standings")]
async fn api_club_standings(state: Data<MemoryStore>) -> HttpResponse {
    let fixtures = match state.fetch_resolved_fixtures(StandingsScope::Club) {
        Ok(fixtures) => fixtures,
        Err(e) => return store_error(&e),
    };
    match named_rows(&state, compute_standings(&fixtures)) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => store_error(&e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let admin_token = std::env::var("ADMIN_TOKEN").unwrap_or_else(|_| {
        let token = Uuid::new_v4().to_string();
        log::info!("ADMIN_TOKEN not set, organizer token for this run: {}", token);
        token
    });

    let state = Data::new(MemoryStore::new());
    if let Ok(path) = std::env::var("ROSTER_CSV") {
        match load_roster_file(&path) {
            Ok(players) => match state.import_players(players) {
                Ok(added) => log::info!("Imported {} player(s) from {}", added, path),
                Err(e) => log::error!("Could not store roster from {}: {}", path, e),
            },
            Err(e) => log::error!("Could not read roster CSV {}: {}", path, e),
        }
    }

    let token_data = Data::new(AdminToken(admin_token));
    let session_key = Key::generate();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(token_data.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), session_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_login)
            .service(api_logout)
            .service(api_session)
            .service(api_list_players)
            .service(api_add_player)
            .service(api_approve_player)
            .service(api_import_players)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_generate_fixtures)
            .service(api_record_result)
            .service(api_override_result)
            .service(api_tournament_standings)
            .service(api_club_standings)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
