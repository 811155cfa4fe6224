//! PaintRaid JSON service: roster, matches, stats and arena map over REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT, and
//! PAINTRAID_DATA_DIR for where collections are stored.

use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path, Query, ServiceConfig},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use paint_raid::logic::roster::find_player;
use paint_raid::{
    add_match, add_player, add_team, create_match, display, filter_matches, leaderboard,
    record_match, remove_match, remove_player, remove_team, replace_match, replace_player,
    team_performance, top_performers, AppState, ArenaMap, Config, EventId, EventType, FileStore,
    GridPosition, Marker, MarkerKind, Match, MatchEvent, MatchId, MatchStatus, ModelError,
    Persistence, Player, PlayerId, PlayerRole, PlayerStats, Tab, Team, TeamColor, TeamId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// Store key for the arena map.
const ARENA_KEY: &str = "arena_map";

/// A collection as it stood right after one change.
enum Snapshot {
    Teams(Vec<Team>),
    Matches(Vec<Match>),
    Arena(ArenaMap),
}

impl Snapshot {
    fn key(&self) -> &'static str {
        match self {
            Snapshot::Teams(_) => paint_raid::TEAMS_KEY,
            Snapshot::Matches(_) => paint_raid::MATCHES_KEY,
            Snapshot::Arena(_) => ARENA_KEY,
        }
    }
}

/// A snapshot waiting to be written, stamped with the change that produced it.
struct Pending {
    generation: u64,
    snapshot: Snapshot,
}

/// Writes snapshots one at a time. A snapshot older than the last one written
/// for its key is skipped, so the newest change always wins on disk.
struct Saver {
    persistence: Persistence<FileStore>,
    written: Mutex<HashMap<&'static str, u64>>,
}

impl Saver {
    fn write(&self, pending: Pending) {
        let mut written = match self.written.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let key = pending.snapshot.key();
        if written.get(key).is_some_and(|&g| g >= pending.generation) {
            log::debug!("Skipping stale {} snapshot #{}", key, pending.generation);
            return;
        }
        let saved = match &pending.snapshot {
            Snapshot::Teams(teams) => self.persistence.save_teams(teams),
            Snapshot::Matches(matches) => self.persistence.save_matches(matches),
            Snapshot::Arena(arena) => self.persistence.save_value(ARENA_KEY, arena),
        };
        if saved {
            written.insert(key, pending.generation);
        }
    }
}

/// Everything the app shows. Each change swaps in a new collection.
struct Workspace {
    teams: Vec<Team>,
    matches: Vec<Match>,
    arena: ArenaMap,
    app: AppState,
    generation: u64,
}

impl Workspace {
    fn stamp(&mut self, snapshot: Snapshot) -> Pending {
        self.generation += 1;
        Pending {
            generation: self.generation,
            snapshot,
        }
    }

    fn set_teams(&mut self, teams: Vec<Team>) -> Pending {
        self.teams = teams;
        self.stamp(Snapshot::Teams(self.teams.clone()))
    }

    fn set_matches(&mut self, matches: Vec<Match>) -> Pending {
        self.matches = matches;
        self.stamp(Snapshot::Matches(self.matches.clone()))
    }

    fn set_arena(&mut self, arena: ArenaMap) -> Pending {
        self.arena = arena;
        self.stamp(Snapshot::Arena(self.arena.clone()))
    }
}

struct Service {
    saver: Arc<Saver>,
    workspace: RwLock<Workspace>,
}

impl Service {
    fn load(persistence: Persistence<FileStore>) -> Self {
        let teams = persistence.load_teams();
        let matches = persistence.load_matches();
        let arena = persistence.load_value_or_else(ARENA_KEY, ArenaMap::new);
        log::info!(
            "Loaded {} team(s), {} match(es), {} arena marker(s)",
            teams.len(),
            matches.len(),
            arena.len()
        );
        Self {
            saver: Arc::new(Saver {
                persistence,
                written: Mutex::new(HashMap::new()),
            }),
            workspace: RwLock::new(Workspace {
                teams,
                matches,
                arena,
                app: AppState::default(),
                generation: 0,
            }),
        }
    }

    /// Write snapshots on the blocking pool. Called after the workspace lock is
    /// released; completes before the handler responds.
    async fn flush(&self, pending: Vec<Pending>) {
        if pending.is_empty() {
            return;
        }
        let saver = Arc::clone(&self.saver);
        let task = web::block(move || pending.into_iter().for_each(|p| saver.write(p)));
        if let Err(e) = task.await {
            log::error!("Save task did not run: {}", e);
        }
    }
}

type AppData = Data<Service>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Player plus the ratios derived from their counters.
#[derive(Serialize)]
struct PlayerView<'a> {
    #[serde(flatten)]
    player: &'a Player,
    role_label: &'static str,
    role_icon: &'static str,
    kd_ratio: f64,
    win_rate: f64,
}

impl<'a> PlayerView<'a> {
    fn new(player: &'a Player) -> Self {
        Self {
            player,
            role_label: display::role_label(player.role),
            role_icon: display::role_icon(player.role),
            kd_ratio: player.stats.kd_ratio(),
            win_rate: player.stats.win_rate(),
        }
    }
}

/// One event as shown on the match card.
#[derive(Serialize)]
struct TimelineEntry<'a> {
    event_id: EventId,
    label: &'static str,
    player: Option<&'a str>,
    target: Option<&'a str>,
}

/// Match plus its badge and timeline.
#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(flatten)]
    game: &'a Match,
    status_label: &'static str,
    status_color: TeamColor,
    is_final: bool,
    duration_label: String,
    timeline: Vec<TimelineEntry<'a>>,
}

impl<'a> MatchView<'a> {
    fn new(game: &'a Match) -> Self {
        let nickname =
            move |id: PlayerId| find_player(game.teams(), id).map(|(_, p)| p.nickname.as_str());
        let timeline = game
            .events
            .iter()
            .map(|e| TimelineEntry {
                event_id: e.id(),
                label: display::event_label(e.event_type),
                player: nickname(e.player_id),
                target: e.target_player_id.and_then(nickname),
            })
            .collect();
        Self {
            game,
            status_label: display::status_label(game.status),
            status_color: display::status_color(game.status),
            is_final: game.status.is_final(),
            duration_label: display::format_duration(game.duration_secs),
            timeline,
        }
    }
}

/// Occupied arena cell with the icon for its marker.
#[derive(Serialize)]
struct CellView<'a> {
    row: usize,
    column: usize,
    #[serde(flatten)]
    marker: &'a Marker,
    icon: &'static str,
}

fn arena_view(arena: &ArenaMap) -> Vec<CellView<'_>> {
    arena
        .markers()
        .map(|(pos, marker)| CellView {
            row: pos.row,
            column: pos.column,
            marker,
            icon: display::marker_icon(marker.kind),
        })
        .collect()
}

#[derive(Serialize)]
struct StateView {
    selected_tab: Tab,
    title: &'static str,
    icon: &'static str,
}

impl From<AppState> for StateView {
    fn from(app: AppState) -> Self {
        Self {
            selected_tab: app.selected_tab,
            title: display::tab_title(app.selected_tab),
            icon: display::tab_icon(app.selected_tab),
        }
    }
}

#[derive(Deserialize)]
struct CreateTeamBody {
    name: String,
    #[serde(default)]
    color_hex: Option<String>,
    #[serde(default)]
    icon_name: Option<String>,
}

#[derive(Deserialize)]
struct PlayerBody {
    #[serde(default)]
    name: String,
    #[serde(default)]
    nickname: String,
    #[serde(default)]
    role: PlayerRole,
    #[serde(default)]
    avatar: Option<String>,
}

#[derive(Deserialize)]
struct UpdatePlayerBody {
    name: Option<String>,
    nickname: Option<String>,
    role: Option<PlayerRole>,
    avatar: Option<String>,
    stats: Option<PlayerStats>,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    team_ids: Vec<TeamId>,
    date: DateTime<Utc>,
    location: String,
    #[serde(default)]
    status: MatchStatus,
}

#[derive(Deserialize)]
struct ScoreEntry {
    team_id: TeamId,
    score: u32,
}

#[derive(Deserialize)]
struct UpdateMatchBody {
    status: Option<MatchStatus>,
    #[serde(default)]
    scores: Vec<ScoreEntry>,
    winner: Option<TeamId>,
    #[serde(default)]
    clear_winner: bool,
    duration_secs: Option<u64>,
    location: Option<String>,
    date: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct AddEventBody {
    event_type: EventType,
    player_id: PlayerId,
    target_player_id: Option<PlayerId>,
    timestamp: Option<DateTime<Utc>>,
    x: Option<f64>,
    y: Option<f64>,
}

#[derive(Deserialize)]
struct MatchFilterQuery {
    status: Option<MatchStatus>,
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    team_id: Option<TeamId>,
}

#[derive(Deserialize)]
struct ToggleCellBody {
    row: usize,
    column: usize,
    /// Defaults to the first team.
    team_id: Option<TeamId>,
    #[serde(default)]
    kind: MarkerKind,
}

#[derive(Deserialize)]
struct SelectTabBody {
    tab: Tab,
}

/// Path segment: team id (e.g. /api/teams/{id})
#[derive(Deserialize)]
struct TeamPath {
    id: TeamId,
}

/// Path segments: team id and player id (e.g. /api/teams/{id}/players/{player_id})
#[derive(Deserialize)]
struct TeamPlayerPath {
    id: TeamId,
    player_id: PlayerId,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

fn model_error(e: ModelError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        ModelError::TeamNotFound(_)
        | ModelError::PlayerNotFound(_)
        | ModelError::MatchNotFound(_) => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "paint-raid",
    })
}

#[get("/api/teams")]
async fn api_list_teams(state: AppData) -> HttpResponse {
    match state.workspace.read() {
        Ok(ws) => HttpResponse::Ok().json(&ws.teams),
        Err(_) => lock_error(),
    }
}

/// Create a team. Missing or unparseable colours use the default.
#[post("/api/teams")]
async fn api_create_team(state: AppData, body: Json<CreateTeamBody>) -> HttpResponse {
    let color = body
        .color_hex
        .as_deref()
        .map(TeamColor::from_hex_or_default)
        .unwrap_or_default();
    let team = Team::new(body.name.as_str(), color, body.icon_name.clone().unwrap_or_default());
    let pending = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let next = add_team(&ws.teams, team.clone());
        vec![ws.set_teams(next)]
    };
    state.flush(pending).await;
    HttpResponse::Ok().json(team)
}

/// Delete a team and any arena markers it owned. Past matches keep their copy.
#[delete("/api/teams/{id}")]
async fn api_delete_team(state: AppData, path: Path<TeamPath>) -> HttpResponse {
    let (pending, response) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let next = match remove_team(&ws.teams, path.id) {
            Ok(next) => next,
            Err(e) => return model_error(e),
        };
        let arena = ws.arena.retain_teams(&next);
        let mut pending = vec![ws.set_teams(next)];
        if arena != ws.arena {
            pending.push(ws.set_arena(arena));
        }
        (pending, HttpResponse::Ok().json(&ws.teams))
    };
    state.flush(pending).await;
    response
}

#[post("/api/teams/{id}/players")]
async fn api_add_player(
    state: AppData,
    path: Path<TeamPath>,
    body: Json<PlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let mut player = Player::new(body.name, body.nickname, body.role);
    if let Some(avatar) = body.avatar {
        player = player.with_avatar(avatar);
    }
    let (pending, response) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let next = match add_player(&ws.teams, path.id, player) {
            Ok(next) => next,
            Err(e) => return model_error(e),
        };
        let pending = vec![ws.set_teams(next)];
        (pending, HttpResponse::Ok().json(&ws.teams))
    };
    state.flush(pending).await;
    response
}

/// Edit a player in place; omitted fields keep their value.
#[put("/api/teams/{id}/players/{player_id}")]
async fn api_update_player(
    state: AppData,
    path: Path<TeamPlayerPath>,
    body: Json<UpdatePlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let (pending, response) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let current = match ws.teams.iter().find(|t| t.id() == path.id) {
            Some(team) => match team.player(path.player_id) {
                Some(p) => p.clone(),
                None => return model_error(ModelError::PlayerNotFound(path.player_id)),
            },
            None => return model_error(ModelError::TeamNotFound(path.id)),
        };
        let edited = Player::with_id(
            current.id(),
            body.name.unwrap_or_else(|| current.name.clone()),
            body.nickname.unwrap_or_else(|| current.nickname.clone()),
            body.role.unwrap_or(current.role),
        )
        .with_avatar(body.avatar.unwrap_or_else(|| current.avatar.clone()))
        .with_stats(body.stats.unwrap_or(current.stats));
        let next = match replace_player(&ws.teams, path.id, edited) {
            Ok(next) => next,
            Err(e) => return model_error(e),
        };
        let pending = vec![ws.set_teams(next)];
        (pending, HttpResponse::Ok().json(&ws.teams))
    };
    state.flush(pending).await;
    response
}

#[delete("/api/teams/{id}/players/{player_id}")]
async fn api_remove_player(state: AppData, path: Path<TeamPlayerPath>) -> HttpResponse {
    let (pending, response) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let next = match remove_player(&ws.teams, path.id, path.player_id) {
            Ok(next) => next,
            Err(e) => return model_error(e),
        };
        let pending = vec![ws.set_teams(next)];
        (pending, HttpResponse::Ok().json(&ws.teams))
    };
    state.flush(pending).await;
    response
}

/// Matches, newest first, optionally filtered by status.
#[get("/api/matches")]
async fn api_list_matches(state: AppData, query: Query<MatchFilterQuery>) -> HttpResponse {
    match state.workspace.read() {
        Ok(ws) => {
            let matches = filter_matches(&ws.matches, query.status);
            let views: Vec<MatchView> = matches.iter().map(MatchView::new).collect();
            HttpResponse::Ok().json(views)
        }
        Err(_) => lock_error(),
    }
}

/// Schedule a match; each participating team records it in its history.
#[post("/api/matches")]
async fn api_create_match(state: AppData, body: Json<CreateMatchBody>) -> HttpResponse {
    let (pending, m) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let m = match create_match(
            &ws.teams,
            &body.team_ids,
            body.date,
            &body.location,
            body.status,
        ) {
            Ok(m) => m,
            Err(e) => return model_error(e),
        };
        let teams = record_match(&ws.teams, &m);
        let matches = add_match(&ws.matches, m.clone());
        (vec![ws.set_teams(teams), ws.set_matches(matches)], m)
    };
    state.flush(pending).await;
    HttpResponse::Ok().json(MatchView::new(&m))
}

#[put("/api/matches/{id}")]
async fn api_update_match(
    state: AppData,
    path: Path<MatchPath>,
    body: Json<UpdateMatchBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let (pending, m) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let mut m = match ws.matches.iter().find(|m| m.id() == path.id) {
            Some(m) => m.clone(),
            None => return model_error(ModelError::MatchNotFound(path.id)),
        };
        if let Some(status) = body.status {
            if !m.status.can_transition_to(status) && m.status != status {
                log::warn!(
                    "Match {}: unusual status change {:?} -> {:?}",
                    m.id(),
                    m.status,
                    status
                );
            }
            m = m.with_status(status);
        }
        for entry in body.scores {
            m = match m.with_score(entry.team_id, entry.score) {
                Ok(m) => m,
                Err(e) => return model_error(e),
            };
        }
        if body.clear_winner {
            m = m.without_winner();
        }
        if let Some(winner) = body.winner {
            m = match m.with_winner(winner) {
                Ok(m) => m,
                Err(e) => return model_error(e),
            };
        }
        if let Some(secs) = body.duration_secs {
            m = m.with_duration(secs);
        }
        if let Some(location) = body.location {
            if location.trim().is_empty() {
                return model_error(ModelError::EmptyLocation);
            }
            m.location = location.trim().to_string();
        }
        if let Some(date) = body.date {
            m.date = date;
        }
        let next = match replace_match(&ws.matches, m.clone()) {
            Ok(next) => next,
            Err(e) => return model_error(e),
        };
        (vec![ws.set_matches(next)], m)
    };
    state.flush(pending).await;
    HttpResponse::Ok().json(MatchView::new(&m))
}

/// Append an event. The acting player (and target, if any) must be on a roster.
/// A position given with only one coordinate is dropped, as is a target on an
/// event type that does not name one.
#[post("/api/matches/{id}/events")]
async fn api_add_event(
    state: AppData,
    path: Path<MatchPath>,
    body: Json<AddEventBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let (pending, m) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let m = match ws.matches.iter().find(|m| m.id() == path.id) {
            Some(m) => m.clone(),
            None => return model_error(ModelError::MatchNotFound(path.id)),
        };
        let known = |id: PlayerId| {
            find_player(m.teams(), id).is_some() || find_player(&ws.teams, id).is_some()
        };
        if !known(body.player_id) {
            return model_error(ModelError::PlayerNotFound(body.player_id));
        }
        let mut event = MatchEvent::new(
            body.timestamp.unwrap_or_else(Utc::now),
            body.event_type,
            body.player_id,
        )
        .with_position_parts(body.x, body.y);
        match body.target_player_id {
            Some(target) if body.event_type.takes_target() => {
                if !known(target) {
                    return model_error(ModelError::PlayerNotFound(target));
                }
                event = event.with_target(target);
            }
            Some(target) => log::warn!(
                "Match {}: ignoring target {} on a {:?} event",
                m.id(),
                target,
                body.event_type
            ),
            None => {}
        }
        let m = m.with_event(event);
        let next = match replace_match(&ws.matches, m.clone()) {
            Ok(next) => next,
            Err(e) => return model_error(e),
        };
        (vec![ws.set_matches(next)], m)
    };
    state.flush(pending).await;
    HttpResponse::Ok().json(MatchView::new(&m))
}

#[delete("/api/matches/{id}")]
async fn api_delete_match(state: AppData, path: Path<MatchPath>) -> HttpResponse {
    let pending = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        match remove_match(&ws.matches, path.id) {
            Ok(next) => vec![ws.set_matches(next)],
            Err(e) => return model_error(e),
        }
    };
    state.flush(pending).await;
    HttpResponse::NoContent().finish()
}

#[get("/api/stats/leaderboard")]
async fn api_leaderboard(state: AppData, query: Query<LeaderboardQuery>) -> HttpResponse {
    let ws = match state.workspace.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let board = leaderboard(&ws.teams, query.team_id);
    let views: Vec<PlayerView> = board.iter().map(PlayerView::new).collect();
    HttpResponse::Ok().json(views)
}

#[get("/api/stats/teams")]
async fn api_team_stats(state: AppData) -> HttpResponse {
    match state.workspace.read() {
        Ok(ws) => {
            let perf: Vec<_> = ws
                .teams
                .iter()
                .map(|t| team_performance(t, &ws.matches))
                .collect();
            HttpResponse::Ok().json(perf)
        }
        Err(_) => lock_error(),
    }
}

#[get("/api/stats/top")]
async fn api_top_performers(state: AppData) -> HttpResponse {
    match state.workspace.read() {
        Ok(ws) => HttpResponse::Ok().json(top_performers(&ws.teams)),
        Err(_) => lock_error(),
    }
}

#[get("/api/arena")]
async fn api_get_arena(state: AppData) -> HttpResponse {
    match state.workspace.read() {
        Ok(ws) => HttpResponse::Ok().json(arena_view(&ws.arena)),
        Err(_) => lock_error(),
    }
}

/// Place or clear a marker; placing uses the given team, or the first team.
#[post("/api/arena/toggle")]
async fn api_toggle_cell(state: AppData, body: Json<ToggleCellBody>) -> HttpResponse {
    let position = match GridPosition::new(body.row, body.column) {
        Ok(p) => p,
        Err(e) => return model_error(e),
    };
    let (pending, response) = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let team = match body.team_id {
            Some(id) => ws.teams.iter().find(|t| t.id() == id),
            None => ws.teams.first(),
        };
        let team = match team {
            Some(t) => t.clone(),
            None => {
                let body = serde_json::json!({ "error": "No team to place" });
                return HttpResponse::BadRequest().json(body);
            }
        };
        let arena = ws.arena.toggle(position, &team, body.kind);
        let pending = vec![ws.set_arena(arena)];
        (pending, HttpResponse::Ok().json(arena_view(&ws.arena)))
    };
    state.flush(pending).await;
    response
}

#[post("/api/arena/reset")]
async fn api_reset_arena(state: AppData) -> HttpResponse {
    let pending = {
        let mut ws = match state.workspace.write() {
            Ok(guard) => guard,
            Err(_) => return lock_error(),
        };
        let arena = ws.arena.reset();
        vec![ws.set_arena(arena)]
    };
    state.flush(pending).await;
    HttpResponse::Ok().json(Vec::<CellView>::new())
}

#[get("/api/state")]
async fn api_get_state(state: AppData) -> HttpResponse {
    match state.workspace.read() {
        Ok(ws) => HttpResponse::Ok().json(StateView::from(ws.app)),
        Err(_) => lock_error(),
    }
}

#[put("/api/state/tab")]
async fn api_select_tab(state: AppData, body: Json<SelectTabBody>) -> HttpResponse {
    let mut ws = match state.workspace.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    ws.app = ws.app.select(body.tab);
    log::debug!("Selected tab {}", display::tab_title(body.tab));
    HttpResponse::Ok().json(StateView::from(ws.app))
}

fn routes(cfg: &mut ServiceConfig) {
    cfg.service(api_health)
        .service(api_list_teams)
        .service(api_create_team)
        .service(api_delete_team)
        .service(api_add_player)
        .service(api_update_player)
        .service(api_remove_player)
        .service(api_list_matches)
        .service(api_create_match)
        .service(api_update_match)
        .service(api_add_event)
        .service(api_delete_match)
        .service(api_leaderboard)
        .service(api_team_stats)
        .service(api_top_performers)
        .service(api_get_arena)
        .service(api_toggle_cell)
        .service(api_reset_arena)
        .service(api_get_state)
        .service(api_select_tab);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env().map_err(std::io::Error::other)?;
    let store = FileStore::open(&config.data_dir).map_err(std::io::Error::other)?;
    let state = Data::new(Service::load(Persistence::new(store)));

    let bind = (config.host.as_str(), config.port);
    log::info!(
        "Starting server at http://{}:{} (data in {})",
        bind.0,
        bind.1,
        config.data_dir.display()
    );

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind(bind)?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use paint_raid::sample;
    use serde_json::{json, Value};
    use std::path::Path as FsPath;

    fn service_in(dir: &FsPath) -> AppData {
        let store = FileStore::open(dir).unwrap();
        Data::new(Service::load(Persistence::new(store)))
    }

    fn reopen(dir: &FsPath) -> Persistence<FileStore> {
        Persistence::new(FileStore::open(dir).unwrap())
    }

    #[actix_web::test]
    async fn unknown_team_is_a_json_404() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(service_in(dir.path())).configure(routes),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/teams/{}", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Team not found");
    }

    #[actix_web::test]
    async fn one_team_match_is_a_json_400() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(service_in(dir.path())).configure(routes),
        )
        .await;
        let teams = sample::generate_teams();

        let req = test::TestRequest::post()
            .uri("/api/matches")
            .set_json(json!({
                "team_ids": [teams[0].id(), teams[0].id()],
                "date": "2025-06-01T10:00:00Z",
                "location": "Woodland Arena"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("at least 2"));
    }

    #[actix_web::test]
    async fn added_player_is_on_disk_before_the_response() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(service_in(dir.path())).configure(routes),
        )
        .await;
        let strikers = sample::generate_teams()[1].id();

        let req = test::TestRequest::post()
            .uri(&format!("/api/teams/{}/players", strikers))
            .set_json(json!({ "name": "Riley Park", "nickname": "Ace", "role": "sniper" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let stored = reopen(dir.path()).load_teams();
        let roster: Vec<_> = stored[1].players.iter().map(|p| p.nickname.as_str()).collect();
        assert_eq!(roster, ["Doc", "Commander", "Ace"]);
    }

    #[actix_web::test]
    async fn deleting_a_team_clears_its_markers() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(service_in(dir.path())).configure(routes),
        )
        .await;
        let teams = sample::generate_teams();

        let req = test::TestRequest::post()
            .uri("/api/arena/toggle")
            .set_json(json!({ "row": 2, "column": 3, "team_id": teams[1].id(), "kind": "flag" }))
            .to_request();
        let cells: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cells[0]["icon"], "flag.fill");
        assert_eq!(cells[0]["team_color"], "#C77DFF");
        let stored = reopen(dir.path()).load_value_or_else(ARENA_KEY, ArenaMap::new);
        assert_eq!(stored.len(), 1);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/teams/{}", teams[1].id()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/arena").to_request();
        let cells: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cells, json!([]));
        let stored = reopen(dir.path()).load_value_or_else(ARENA_KEY, ArenaMap::new);
        assert!(stored.is_empty());
        assert_eq!(reopen(dir.path()).load_teams().len(), 1);
    }

    #[actix_web::test]
    async fn match_cards_carry_badge_and_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(service_in(dir.path())).configure(routes),
        )
        .await;
        let teams = sample::generate_teams();
        let quickshot = teams[0].players[0].id();
        let commander = teams[1].players[1].id();

        let req = test::TestRequest::get()
            .uri("/api/matches?status=completed")
            .to_request();
        let cards: Value = test::call_and_read_body_json(&app, req).await;
        let card = &cards[0];
        assert_eq!(card["status_label"], "Completed");
        assert_eq!(card["status_color"], "#007AFF");
        assert_eq!(card["is_final"], true);
        assert_eq!(card["duration_label"], "1h");
        let id = card["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/matches/{}/events", id))
            .set_json(json!({ "event_type": "elimination", "player_id": uuid::Uuid::new_v4() }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri(&format!("/api/matches/{}/events", id))
            .set_json(json!({
                "event_type": "elimination",
                "player_id": quickshot,
                "target_player_id": commander,
                "x": 3.0
            }))
            .to_request();
        let card: Value = test::call_and_read_body_json(&app, req).await;
        let entry = card["timeline"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(entry["label"], "Elimination");
        assert_eq!(entry["player"], "Quickshot");
        assert_eq!(entry["target"], "Commander");

        let req = test::TestRequest::post()
            .uri(&format!("/api/matches/{}/events", id))
            .set_json(json!({
                "event_type": "flag_pickup",
                "player_id": quickshot,
                "target_player_id": commander
            }))
            .to_request();
        let card: Value = test::call_and_read_body_json(&app, req).await;
        let entry = card["timeline"].as_array().unwrap().last().unwrap().clone();
        assert_eq!(entry["label"], "Flag Pickup");
        assert_eq!(entry["target"], Value::Null);

        let stored = reopen(dir.path()).load_matches();
        let saved = stored.iter().find(|m| m.id().to_string() == id).unwrap();
        assert_eq!(saved.events.len(), 2);
        assert_eq!(saved.events[0].position, None);
    }

    #[actix_web::test]
    async fn player_views_and_tab_state() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new().app_data(service_in(dir.path())).configure(routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/stats/leaderboard").to_request();
        let board: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(board[0]["nickname"], "Tank");
        assert_eq!(board[0]["role_label"], "Assault");
        assert_eq!(board[0]["role_icon"], "bolt.fill");

        let req = test::TestRequest::put()
            .uri("/api/state/tab")
            .set_json(json!({ "tab": "map" }))
            .to_request();
        let state: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(state, json!({ "selected_tab": "map", "title": "Map", "icon": "map.fill" }));
    }
}
