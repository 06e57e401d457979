use crate::bridge::model::{AddComparisonRequest, BridgeStatus, ErrorBody, FamilySchema};
use log::{info, warn};
use serde::Serialize;
use serde_json::json;
use std::{
    collections::HashMap,
    convert::Infallible,
    future::Future,
    net::SocketAddr,
    sync::{Arc, PoisonError, RwLock},
};
use ulacore::comparison::{ComparisonEntry, ComparisonStore};
use ulacore::prelude::{PatternParameters, PatternResult, SampleResolution};
use ulacore::render::{PatternRenderer, RenderedScene};
use ulacore::telemetry::MetricsRecorder;
use warp::{http::StatusCode, Filter, Rejection, Reply};

pub fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 9000))
}

/// HTTP front for per-session comparison stores.
///
/// Each session id owns its own [`ComparisonStore`]; sessions never see each
/// other's overlays.
#[derive(Clone)]
pub struct SessionBridge {
    sessions: Arc<RwLock<HashMap<String, ComparisonStore>>>,
    renderer: Arc<PatternRenderer>,
    metrics: Arc<MetricsRecorder>,
}

impl SessionBridge {
    pub fn new(resolution: SampleResolution) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            renderer: Arc::new(PatternRenderer::new(resolution)),
            metrics: Arc::new(MetricsRecorder::new()),
        }
    }

    /// Renders `live` over the comparisons stored for `session`.
    pub fn render(&self, session: &str, live: &PatternParameters) -> PatternResult<RenderedScene> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let result = match sessions.get(session) {
            Some(store) => self.renderer.render_session(live, store),
            None => self.renderer.render(live, Vec::<&ComparisonEntry>::new()),
        };
        match &result {
            Ok(_) => self.metrics.record_rendered(),
            Err(err) => {
                warn!("session {} render rejected: {}", session, err);
                self.metrics.record_rejected();
            }
        }
        result
    }

    pub fn add_comparison(
        &self,
        session: &str,
        request: AddComparisonRequest,
    ) -> PatternResult<ComparisonEntry> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let store = sessions.entry(session.to_string()).or_default();
        let result = store.add(request.parameters, request.name).cloned();
        if store.is_empty() {
            sessions.remove(session);
        }
        match result {
            Ok(entry) => {
                self.metrics.record_comparison();
                info!(
                    "session {} saved '{}' in {}",
                    session, entry.display_name, entry.color
                );
                Ok(entry)
            }
            Err(err) => {
                warn!("session {} comparison rejected: {}", session, err);
                self.metrics.record_rejected();
                Err(err)
            }
        }
    }

    pub fn comparisons(&self, session: &str) -> Vec<ComparisonEntry> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session)
            .map(|store| store.entries().to_vec())
            .unwrap_or_default()
    }

    /// Drops the session's store; its next add starts a fresh one.
    pub fn clear(&self, session: &str) {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(mut store) = sessions.remove(session) {
            store.clear();
        }
    }

    pub fn metrics(&self) -> BridgeStatus {
        BridgeStatus {
            counters: self.metrics.snapshot(),
            active_sessions: self
                .sessions
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .len(),
        }
    }

    pub fn routes(&self) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
        let families = warp::path!("families")
            .and(warp::get())
            .map(|| warp::reply::json(&FamilySchema::all()));

        let render = warp::path!("sessions" / String / "render")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_bridge(self.clone()))
            .map(
                |session: String, live: PatternParameters, bridge: SessionBridge| {
                    reply_result(bridge.render(&session, &live))
                },
            );

        let list = warp::path!("sessions" / String / "comparisons")
            .and(warp::get())
            .and(with_bridge(self.clone()))
            .map(|session: String, bridge: SessionBridge| {
                warp::reply::json(&bridge.comparisons(&session))
            });

        let add = warp::path!("sessions" / String / "comparisons")
            .and(warp::post())
            .and(warp::body::json())
            .and(with_bridge(self.clone()))
            .map(
                |session: String, request: AddComparisonRequest, bridge: SessionBridge| {
                    reply_result(bridge.add_comparison(&session, request))
                },
            );

        let clear = warp::path!("sessions" / String / "comparisons")
            .and(warp::delete())
            .and(with_bridge(self.clone()))
            .map(|session: String, bridge: SessionBridge| {
                bridge.clear(&session);
                warp::reply::json(&json!({ "status": "cleared" }))
            });

        let metrics = warp::path!("metrics")
            .and(warp::get())
            .and(with_bridge(self.clone()))
            .map(|bridge: SessionBridge| warp::reply::json(&bridge.metrics()));

        families.or(render).or(list).or(add).or(clear).or(metrics)
    }

    /// Binds `addr` and serves until `shutdown` resolves.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let (bound, server) =
            warp::serve(self.routes()).try_bind_with_graceful_shutdown(addr, shutdown)?;
        info!("session bridge listening on http://{}", bound);
        server.await;
        Ok(())
    }
}

fn with_bridge(
    bridge: SessionBridge,
) -> impl Filter<Extract = (SessionBridge,), Error = Infallible> + Clone {
    warp::any().map(move || bridge.clone())
}

fn reply_result<T: Serialize>(result: PatternResult<T>) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), StatusCode::OK),
        Err(err) => warp::reply::with_status(
            warp::reply::json(&ErrorBody {
                error: err.to_string(),
            }),
            StatusCode::BAD_REQUEST,
        ),
    }
}
