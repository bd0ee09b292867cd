//! Single binary web server: REST API over the league engine with an in-memory store.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, BRACKET_SIZE, ID_SEED.

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use hoops_league::{
    read_teams_csv, CompetitionId, CompetitionType, Config, EngineError, IdGenerator,
    LeagueService, MatchId, MemoryStore, Score, SeededIdGenerator, TeamRef, UuidGenerator,
};
use serde::Deserialize;
use tokio::sync::RwLock;

type Service = LeagueService<MemoryStore, Box<dyn IdGenerator + Send + Sync>>;

/// Shared state: one service owning every competition.
type AppState = Data<RwLock<Service>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateCompetitionBody {
    name: String,
    #[serde(rename = "type", default)]
    competition_type: CompetitionType,
    /// Seed order: index 0 is the top seed.
    teams: Vec<TeamRef>,
}

#[derive(Deserialize)]
struct CsvImportQuery {
    name: String,
    #[serde(rename = "type", default)]
    competition_type: CompetitionType,
}

#[derive(Deserialize)]
struct ReportResultBody {
    home_score: u32,
    away_score: u32,
}

/// Path segment: competition id (e.g. /api/competitions/{id})
#[derive(Deserialize)]
struct CompetitionPath {
    id: CompetitionId,
}

/// Path segment: match id (e.g. /api/matches/{id}/result)
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn error_response(e: EngineError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        EngineError::CompetitionNotFound(_)
        | EngineError::RoundNotFound(_)
        | EngineError::MatchNotFound(_)
        | EngineError::SeriesNotFound(_) => HttpResponse::NotFound().json(body),
        EngineError::Store(_) => HttpResponse::InternalServerError().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "hoops-league",
    })
}

/// Create a competition from a JSON team list and return its full overview.
#[post("/api/competitions")]
async fn api_create_competition(state: AppState, body: Json<CreateCompetitionBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut service = state.write().await;
    let created = service
        .create_competition(body.name.trim(), body.competition_type, &body.teams)
        .and_then(|c| service.competition_overview(c.id));
    match created {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => error_response(e),
    }
}

/// Create a competition from a CSV body (`id,name,crest_url`), name and type in the query.
#[post("/api/competitions/csv")]
async fn api_create_competition_csv(
    state: AppState,
    query: Query<CsvImportQuery>,
    body: String,
) -> HttpResponse {
    let teams = match read_teams_csv(body.as_bytes()) {
        Ok(teams) => teams,
        Err(e) => return error_response(e),
    };
    let mut service = state.write().await;
    let created = service
        .create_competition(query.name.trim(), query.competition_type, &teams)
        .and_then(|c| service.competition_overview(c.id));
    match created {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => error_response(e),
    }
}

/// Competition with all rounds, matches and series.
#[get("/api/competitions/{id}")]
async fn api_get_competition(state: AppState, path: Path<CompetitionPath>) -> HttpResponse {
    let service = state.read().await;
    match service.competition_overview(path.id) {
        Ok(overview) => HttpResponse::Ok().json(overview),
        Err(e) => error_response(e),
    }
}

/// Report a final score; advancement runs before the response.
#[put("/api/matches/{id}/result")]
async fn api_report_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ReportResultBody>,
) -> HttpResponse {
    let mut service = state.write().await;
    match service.report_result(path.id, Score::new(body.home_score, body.away_score)) {
        Ok(m) => HttpResponse::Ok().json(m),
        Err(e) => error_response(e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };

    let ids: Box<dyn IdGenerator + Send + Sync> = match config.id_seed {
        Some(seed) => {
            log::info!("Using seeded ids (seed {})", seed);
            Box::new(SeededIdGenerator::new(seed))
        }
        None => Box::new(UuidGenerator),
    };
    let service = LeagueService::new(MemoryStore::new(), ids).with_bracket(config.bracket);
    let state = Data::new(RwLock::new(service));

    log::info!("Starting server at http://{}:{}", config.host, config.port);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(1 << 20))
            .service(api_health)
            .service(api_create_competition)
            .service(api_create_competition_csv)
            .service(api_get_competition)
            .service(api_report_result)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
