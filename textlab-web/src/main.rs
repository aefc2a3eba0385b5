//! Servidor web Axum com WebSocket para análise, matching e visualização em tempo real

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use textlab_core::{
    corpus::demo_texts,
    explain,
    inspect::{
        list_dependencies, list_entities, list_noun_chunks, list_sentences, token_table,
        DependencyRow, EntityRow, NounChunkRow, TokenTableRow,
    },
    load,
    matcher::rules_from_value,
    render, Document, Error, Matcher, OverlapPolicy, Pipeline, PipelineEvent, RenderOptions,
    RenderTarget, DEFAULT_MODEL,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

/// Configuração do servidor, lida das variáveis de ambiente
#[derive(Debug, Clone, PartialEq, Eq)]
struct WebConfig {
    /// `TEXTLAB_ADDR`
    addr: String,
    /// `TEXTLAB_MODEL`
    model: String,
}

impl WebConfig {
    fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            addr: non_empty("TEXTLAB_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            model: non_empty("TEXTLAB_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

/// Estado compartilhado da aplicação
struct AppState {
    pipeline: Arc<dyn Pipeline>,
}

impl AppState {
    fn new(model: &str) -> textlab_core::Result<Self> {
        Ok(Self {
            pipeline: Arc::from(load(model)?),
        })
    }
}

/// Erro da fachada convertido em resposta HTTP `{"error": ...}`
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::ModelNotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_)
        | Error::InvalidStyle(_)
        | Error::DuplicateRuleName(_)
        | Error::Json(_) => StatusCode::BAD_REQUEST,
        Error::UpstreamProcessing(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            warn!("falha ao atender requisição: {}", self.0);
        }
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Deserialize)]
struct AnalyzeRequest {
    text: String,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    model: String,
    tokens: Vec<TokenTableRow>,
    sentences: Vec<String>,
    noun_chunks: Vec<NounChunkRow>,
    entities: Vec<EntityRow>,
    dependencies: Vec<DependencyRow>,
    processing_ms: u64,
    total_tokens: usize,
}

#[derive(Deserialize)]
struct MatchRequest {
    text: String,
    /// Lista `[{"name", "patterns"}]` ou objeto `{"NOME": [[...]]}`
    rules: serde_json::Value,
    #[serde(default)]
    policy: OverlapPolicy,
}

#[derive(Serialize)]
struct MatchRow {
    rule: String,
    start: usize,
    end: usize,
    start_char: usize,
    end_char: usize,
    text: String,
}

#[derive(Serialize)]
struct MatchResponse {
    matches: Vec<MatchRow>,
    processing_ms: u64,
}

#[derive(Deserialize)]
struct RenderRequest {
    text: String,
    style: String,
    #[serde(default)]
    options: RenderOptions,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = WebConfig::from_env();
    let state = Arc::new(AppState::new(&config.model)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!("🚀 Servidor textlab iniciado em http://{} (modelo {})", config.addr, config.model);
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/analyze", post(analyze_handler))
        .route("/match", post(match_handler))
        .route("/render", post(render_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/explain/:label", get(explain_handler))
        .route("/ws", get(ws_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// Roda o pipeline fora do runtime assíncrono; texto em branco é rejeitado
async fn process_blocking(state: &AppState, text: String) -> ApiResult<(Document, u64)> {
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("texto vazio".to_string()).into());
    }
    let pipeline = Arc::clone(&state.pipeline);
    let started = Instant::now();
    let doc = tokio::task::spawn_blocking(move || pipeline.process(&text))
        .await
        .map_err(|e| Error::UpstreamProcessing(e.to_string()))??;
    Ok((doc, started.elapsed().as_millis() as u64))
}

/// Análise completa via HTTP POST (sem streaming)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let (doc, processing_ms) = process_blocking(&state, req.text).await?;

    Ok(Json(AnalyzeResponse {
        model: state.pipeline.meta().name.clone(),
        tokens: token_table(&doc),
        sentences: list_sentences(&doc)
            .iter()
            .map(|s| s.text(&doc).to_string())
            .collect(),
        // Sem parser não há noun chunks
        noun_chunks: list_noun_chunks(&doc).unwrap_or_default(),
        entities: list_entities(&doc),
        dependencies: list_dependencies(&doc),
        processing_ms,
        total_tokens: doc.len(),
    }))
}

/// Registra as regras recebidas num matcher novo e o executa sobre o texto
async fn match_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MatchRequest>,
) -> ApiResult<Json<MatchResponse>> {
    let mut matcher = Matcher::with_policy(req.policy);
    for (name, patterns) in rules_from_value(&req.rules)? {
        matcher.define_rule(&name, patterns)?;
    }

    let (doc, processing_ms) = process_blocking(&state, req.text).await?;
    let matches = matcher
        .run(&doc)
        .into_iter()
        .map(|m| {
            let span = m.span();
            MatchRow {
                rule: matcher.resolve_rule_label(m.rule).unwrap_or_default().to_string(),
                start: m.start,
                end: m.end,
                start_char: span.start_char(&doc),
                end_char: span.end_char(&doc),
                text: m.text(&doc).to_string(),
            }
        })
        .collect();

    Ok(Json(MatchResponse {
        matches,
        processing_ms,
    }))
}

/// SVG (`dep`) ou HTML (`ent`) pronto para ser inserido na página
async fn render_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RenderRequest>,
) -> ApiResult<Html<String>> {
    let (doc, _) = process_blocking(&state, req.text).await?;
    let markup = render(RenderTarget::Doc(&doc), &req.style, &req.options)?;
    Ok(Html(markup))
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    Json(demo_texts())
}

/// Descrição legível de um rótulo (POS, tag, dependência ou entidade)
async fn explain_handler(Path(label): Path<String>) -> Response {
    match explain(&label) {
        Some(description) => Json(serde_json::json!({
            "label": label,
            "description": description,
        }))
        .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": format!("rótulo desconhecido: '{label}'") })),
        )
            .into_response(),
    }
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Lógica do WebSocket: recebe texto, executa o pipeline e envia os eventos de cada estágio
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // JSON {text} ou texto puro
                let text = match serde_json::from_str::<WsRequest>(&text) {
                    Ok(req) => req.text,
                    Err(_) => text.to_string(),
                };
                let text = text.trim().to_string();
                if text.is_empty() {
                    continue;
                }

                info!("Analisando via WebSocket: {} chars", text.len());

                let (tx, rx) = std::sync::mpsc::channel::<PipelineEvent>();
                let pipeline = Arc::clone(&state.pipeline);
                let handle = tokio::task::spawn_blocking(move || {
                    pipeline.process_streaming(&text, tx);
                });

                if let Err(err) = handle.await {
                    warn!("pipeline interrompido: {err}");
                    continue;
                }

                // O pipeline já terminou: a fila contém todos os eventos
                let events: Vec<PipelineEvent> = rx.try_iter().collect();

                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return;
                        }
                        // Pequena pausa para animação visual (passo a passo)
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(AppState::new(DEFAULT_MODEL).unwrap()))
    }

    async fn call(req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let resp = app().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[test]
    fn test_config_defaults_and_overrides() {
        let config = WebConfig::from_lookup(|_| None);
        assert_eq!(config.addr, "0.0.0.0:3000");
        assert_eq!(config.model, "en_core_lite");

        let config = WebConfig::from_lookup(|key| match key {
            "TEXTLAB_ADDR" => Some("127.0.0.1:8080".to_string()),
            "TEXTLAB_MODEL" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.addr, "127.0.0.1:8080");
        assert_eq!(config.model, "en_core_lite");
    }

    #[test]
    fn test_unknown_model_maps_to_not_found() {
        let err = AppState::new("xx_missing").err().unwrap();
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&Error::InvalidStyle("svg".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&Error::UpstreamProcessing("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_analyze_returns_entities() {
        let (status, body) = call(post("/analyze", serde_json::json!({"text": "Tom met Sam."}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_tokens"], 4);
        let labels: Vec<&str> = body["entities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["label"].as_str().unwrap())
            .collect();
        assert_eq!(labels, ["PERSON", "PERSON"]);
        assert_eq!(body["entities"][1]["start_char"], 8);
    }

    #[tokio::test]
    async fn test_analyze_rejects_blank_text() {
        let (status, body) = call(post("/analyze", serde_json::json!({"text": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_match_endpoint() {
        let rules = serde_json::json!([
            {"name": "ADJ_NOUN", "patterns": [[{"POS": "ADJ", "OP": "?"}, {"POS": "ADJ"}, {"POS": "NOUN"}]]}
        ]);
        let (status, body) = call(post(
            "/match",
            serde_json::json!({"text": "a red big dog barked", "rules": rules}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        let matches = body["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["rule"], "ADJ_NOUN");
        assert_eq!(matches[0]["text"], "red big dog");
        assert_eq!(matches[0]["start_char"], 2);
    }

    #[tokio::test]
    async fn test_match_duplicate_rule_is_bad_request() {
        let rule = serde_json::json!({"name": "X", "patterns": [[{"LOWER": "dog"}]]});
        let (status, _) = call(post(
            "/match",
            serde_json::json!({"text": "dog", "rules": [rule.clone(), rule]}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_render_styles() {
        let resp = app()
            .oneshot(post("/render", serde_json::json!({"text": "Tom met Sam.", "style": "dep"})))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).starts_with("<svg"));

        let (status, _) = call(post(
            "/render",
            serde_json::json!({"text": "Tom met Sam.", "style": "svg"}),
        ))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_demo_texts_and_explain() {
        let (status, body) = call(get("/demo-texts")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), demo_texts().len());
        assert!(body[0]["title"].is_string());

        let (status, body) = call(get("/explain/NOUN")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["description"], "noun");

        let (status, _) = call(get("/explain/NOT_A_LABEL")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
