use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::pipeline::{Observation, PipelineOutput, TierWinRate, ROSTER};

/// Trend curve sample points: one per slider step.
const TREND_MIN: i32 = 0;
const TREND_MAX: i32 = 40;

/// Immutable per-run state shared by every request. The pipeline output is
/// fitted once in `main`; handlers only read it.
#[derive(Clone)]
pub struct AppState {
    pub output: Arc<PipelineOutput>,
}

/// Build the Axum router for the dashboard.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/scatter", get(scatter_handler))
        .route("/api/tiers", get(tiers_handler))
        .route("/api/predict", get(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the dashboard HTML page.
async fn index_handler() -> impl IntoResponse {
    Html(DASHBOARD_HTML)
}

#[derive(Serialize)]
struct Summary {
    roster: Vec<&'static str>,
    rows: usize,
    seed: u64,
    generated_at: DateTime<Utc>,
}

/// GET /api/summary
async fn summary_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(Summary {
        roster: ROSTER.to_vec(),
        rows: state.output.dataset.len(),
        seed: state.output.seed,
        generated_at: state.output.generated_at,
    })
}

#[derive(Deserialize)]
struct ScatterQuery {
    player: String,
}

#[derive(Serialize)]
struct TrendPoint {
    points: f64,
    win_probability: f64,
}

#[derive(Serialize)]
struct ScatterResponse {
    player: String,
    observations: Vec<Observation>,
    trend: Vec<TrendPoint>,
}

/// GET /api/scatter?player=NAME
///
/// Observations filtered to one roster player, plus the fitted curve
/// sampled at every slider step. The filter affects the display subset
/// only; the trend always comes from the model fitted on the full table.
async fn scatter_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ScatterQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !ROSTER.contains(&q.player.as_str()) {
        return Err((
            StatusCode::NOT_FOUND,
            format!("unknown player: {}", q.player),
        ));
    }
    let observations: Vec<Observation> = state
        .output
        .dataset
        .iter()
        .filter(|o| o.player == q.player)
        .cloned()
        .collect();
    let trend = (TREND_MIN..=TREND_MAX)
        .map(|p| TrendPoint {
            points: p as f64,
            win_probability: state.output.model.predict(p as f64),
        })
        .collect();
    Ok(Json(ScatterResponse {
        player: q.player,
        observations,
        trend,
    }))
}

/// GET /api/tiers
async fn tiers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<TierWinRate>> {
    Json(state.output.tiers.clone())
}

#[derive(Deserialize)]
struct PredictQuery {
    points: f64,
}

#[derive(Serialize)]
struct PredictResponse {
    points: f64,
    /// Win probability as a percentage, rounded to two decimals.
    win_probability_pct: f64,
}

/// GET /api/predict?points=P
///
/// Out-of-range point totals are passed through the model unvalidated; a
/// fitted sigmoid answers for any real input.
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PredictQuery>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if !q.points.is_finite() {
        return Err((StatusCode::BAD_REQUEST, "points must be finite".into()));
    }
    let pct = state.output.model.predict(q.points) * 100.0;
    Ok(Json(PredictResponse {
        points: q.points,
        win_probability_pct: (pct * 100.0).round() / 100.0,
    }))
}

/// Embedded single-file dashboard (HTML + CSS + JS)
const DASHBOARD_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Halftime Momentum</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #6c63ff;
    --green: #00c896;
    --red: #ff4f6a;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { display: flex; align-items: center; gap: 1rem; padding: 1rem 2rem; border-bottom: 1px solid var(--border); }
  header h1 { font-size: 1.4rem; font-weight: 700; }
  main { padding: 1.5rem 2rem; display: grid; grid-template-columns: 280px 1fr; gap: 1.5rem; }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; overflow: hidden; }
  .panel-header { padding: .9rem 1.2rem; border-bottom: 1px solid var(--border); font-weight: 600; }
  .panel-body { padding: 1.2rem; }
  .sidebar label { display: block; color: var(--muted); font-size: .8rem; text-transform: uppercase; letter-spacing: .06em; margin: 1rem 0 .4rem; }
  .sidebar label:first-child { margin-top: 0; }
  select, input[type=range] { width: 100%; }
  select { background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; padding: .45rem .6rem; font-size: .9rem; }
  .metric { margin-top: 1.4rem; padding: 1rem; border: 1px solid var(--border); border-radius: 8px; text-align: center; }
  .metric .label { color: var(--muted); font-size: .75rem; text-transform: uppercase; letter-spacing: .06em; }
  .metric .value { font-size: 2rem; font-weight: 700; color: var(--green); }
  .slider-value { color: var(--accent); font-weight: 700; }
  .charts { display: grid; gap: 1.5rem; }
  .chart-body { padding: 1rem; }
  canvas { width: 100% !important; }
  table { width: 100%; border-collapse: collapse; }
  th { padding: .7rem 1rem; text-align: left; font-size: .75rem; text-transform: uppercase; color: var(--muted); border-bottom: 1px solid var(--border); }
  td { padding: .65rem 1rem; font-size: .88rem; border-bottom: 1px solid #1e2130; }
  tr:last-child td { border-bottom: none; }
  .empty { color: var(--muted); }
  footer { padding: .8rem 2rem; color: var(--muted); font-size: .8rem; border-top: 1px solid var(--border); }
</style>
</head>
<body>
<header>
  <h1>&#127936; Halftime Momentum: 1st-Half Scoring vs. Win Probability</h1>
  <span style="margin-left:auto;color:var(--muted);font-size:.8rem;" id="generated-at"></span>
</header>

<main>
  <!-- Sidebar: interactive scouting tool -->
  <div class="panel sidebar">
    <div class="panel-header">Interactive Scouting Tool</div>
    <div class="panel-body">
      <label for="player-select">Star Player</label>
      <select id="player-select"></select>
      <label for="points-slider">Points in 1st Half: <span class="slider-value" id="points-value">15</span></label>
      <input type="range" id="points-slider" min="0" max="40" value="15" step="1">
      <div class="metric">
        <div class="label">Predicted Win Probability</div>
        <div class="value" id="prob-value">&ndash;</div>
      </div>
    </div>
  </div>

  <div class="charts">
    <!-- Scatter + fitted trend -->
    <div class="panel">
      <div class="panel-header" id="scatter-title">The Tipping Point</div>
      <div class="chart-body"><canvas id="scatter-chart" height="260"></canvas></div>
    </div>

    <!-- Tier win rates -->
    <div class="panel">
      <div class="panel-header">Tiered Win Rates</div>
      <div class="chart-body"><canvas id="tier-chart" height="180"></canvas></div>
      <table>
        <thead><tr><th>Point Tier</th><th>Win Rate</th><th>Samples</th></tr></thead>
        <tbody id="tier-tbody"></tbody>
      </table>
    </div>
  </div>
</main>

<footer id="footer"></footer>

<script>
const pct = v => v.toFixed(1) + '%';

async function loadSummary() {
  const r = await fetch('/api/summary');
  if (!r.ok) return;
  const s = await r.json();
  const sel = document.getElementById('player-select');
  sel.innerHTML = s.roster.map(p => `<option value="${p}">${p}</option>`).join('');
  document.getElementById('generated-at').textContent =
    'Dataset generated ' + new Date(s.generated_at).toLocaleTimeString();
  document.getElementById('footer').textContent =
    `${s.rows} synthetic observations · seed ${s.seed}`;
}

async function loadPrediction() {
  const points = document.getElementById('points-slider').value;
  document.getElementById('points-value').textContent = points;
  const r = await fetch('/api/predict?points=' + points);
  if (!r.ok) return;
  const p = await r.json();
  document.getElementById('prob-value').textContent = pct(p.win_probability_pct);
}

async function loadScatter() {
  const player = document.getElementById('player-select').value;
  if (!player) return;
  const r = await fetch('/api/scatter?player=' + encodeURIComponent(player));
  if (!r.ok) return;
  const data = await r.json();
  document.getElementById('scatter-title').textContent = `The Tipping Point for ${player}`;
  drawScatter(data);
}

async function loadTiers() {
  const r = await fetch('/api/tiers');
  if (!r.ok) return;
  const tiers = await r.json();
  document.getElementById('tier-tbody').innerHTML = tiers.map(t => `<tr>
    <td>${t.label}</td>
    <td>${t.win_rate_pct != null ? pct(t.win_rate_pct) : '<span class="empty">no data</span>'}</td>
    <td>${t.samples}</td>
  </tr>`).join('');
  drawTiers(tiers);
}

function setupCanvas(id, height) {
  const canvas = document.getElementById(id);
  const W = canvas.parentElement.clientWidth - 32;
  canvas.width = W;
  canvas.height = height;
  return [canvas.getContext('2d'), W, height];
}

function drawScatter(data) {
  const [ctx, W, H] = setupCanvas('scatter-chart', 260);
  const pad = 30;
  const toX = p => pad + (p / 40) * (W - 2 * pad);
  const toY = v => H - pad - v * (H - 2 * pad);

  ctx.clearRect(0, 0, W, H);

  // Axis grid at 0 / 0.5 / 1.0 win probability
  ctx.strokeStyle = '#2a2d3a';
  ctx.fillStyle = '#8888aa';
  ctx.font = '11px sans-serif';
  for (const v of [0, 0.5, 1]) {
    const y = toY(v);
    ctx.beginPath(); ctx.moveTo(pad, y); ctx.lineTo(W - pad, y); ctx.stroke();
    ctx.fillText(v.toFixed(1), 4, y + 4);
  }
  for (const p of [0, 10, 20, 30, 40]) {
    ctx.fillText(String(p), toX(p) - 6, H - 8);
  }

  // Fitted trend curve
  ctx.strokeStyle = '#6c63ff';
  ctx.lineWidth = 2;
  ctx.beginPath();
  data.trend.forEach((t, i) => {
    const x = toX(t.points), y = toY(t.win_probability);
    i === 0 ? ctx.moveTo(x, y) : ctx.lineTo(x, y);
  });
  ctx.stroke();

  // Observations: wins green, losses red, drawn at their outcome line
  for (const o of data.observations) {
    ctx.fillStyle = o.outcome === 1 ? '#00c896' : '#ff4f6a';
    ctx.beginPath();
    ctx.arc(toX(o.first_half_points), toY(o.outcome), 4, 0, Math.PI * 2);
    ctx.fill();
  }
}

function drawTiers(tiers) {
  const [ctx, W, H] = setupCanvas('tier-chart', 180);
  const pad = 30;
  const barW = (W - 2 * pad) / tiers.length * 0.6;
  ctx.clearRect(0, 0, W, H);
  ctx.font = '11px sans-serif';
  tiers.forEach((t, i) => {
    const cx = pad + (i + 0.5) * (W - 2 * pad) / tiers.length;
    if (t.win_rate_pct != null) {
      const h = (t.win_rate_pct / 100) * (H - 2 * pad);
      ctx.fillStyle = '#6c63ff';
      ctx.fillRect(cx - barW / 2, H - pad - h, barW, h);
      ctx.fillStyle = '#e0e0e0';
      ctx.fillText(pct(t.win_rate_pct), cx - 14, H - pad - h - 6);
    } else {
      ctx.fillStyle = '#8888aa';
      ctx.fillText('no data', cx - 18, H - pad - 6);
    }
    ctx.fillStyle = '#8888aa';
    ctx.fillText(t.label, cx - 20, H - 8);
  });
}

async function init() {
  await loadSummary();
  await Promise.all([loadPrediction(), loadScatter(), loadTiers()]);
}

document.getElementById('points-slider').addEventListener('input', loadPrediction);
document.getElementById('player-select').addEventListener('change', loadScatter);
init();
</script>
</body>
</html>"#;
