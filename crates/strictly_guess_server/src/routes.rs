//! HTTP surface: one handler per [`Route`], all sharing a [`Dispatcher`].

use crate::{DispatchError, Dispatcher, GameRequest, GameResponse, Route};
use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{Query, Request, State};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::any;
use strum::IntoEnumIterator;
use tokio::net::TcpListener;
use tracing::{info, instrument, warn};

/// Query string as ordered key/value pairs.
type QueryPairs = Vec<(String, String)>;

/// Builds the router for every [`Route`].
///
/// Routes accept any method so that a wrong one is reported by the
/// dispatcher as a 400 rather than by axum as a 405.
#[instrument(skip(dispatcher))]
pub fn router(dispatcher: Dispatcher) -> Router {
    let mut router: Router<Dispatcher> = Router::new();
    for route in Route::iter() {
        router = router.route(
            &route.to_string(),
            any(
                move |State(dispatcher): State<Dispatcher>,
                      method: Method,
                      query: Result<Query<QueryPairs>, QueryRejection>,
                      body: Result<Bytes, BytesRejection>| async move {
                    handle(route, &dispatcher, method, query, body)
                },
            ),
        );
    }
    router
        .layer(middleware::from_fn(log_request))
        .with_state(dispatcher)
}

/// Serves `dispatcher` on an already bound listener until Ctrl+C.
#[instrument(skip_all)]
pub async fn serve(listener: TcpListener, dispatcher: Dispatcher) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Server ready at http://{}/", addr);
    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

fn handle(
    route: Route,
    dispatcher: &Dispatcher,
    method: Method,
    query: Result<Query<QueryPairs>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<GameResponse, DispatchError> {
    let id = match query {
        Ok(Query(pairs)) => first_id(pairs),
        Err(rejection) => {
            warn!(error = %rejection, "Unparseable query string");
            None
        }
    };
    let body = body
        .ok()
        .and_then(|bytes| String::from_utf8(bytes.to_vec()).ok());
    dispatcher.dispatch(&GameRequest::new(route, method, id, body))
}

/// The first `id` value; later repeats are ignored.
fn first_id(pairs: QueryPairs) -> Option<String> {
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == "id").then_some(value))
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    info!(%method, %uri, "Incoming HTTP request");
    let response = next.run(request).await;
    info!(status = %response.status(), %uri, "Response sent");
    response
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> QueryPairs {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn first_id_wins() {
        assert_eq!(
            first_id(pairs(&[("x", "1"), ("id", "a"), ("id", "b")])),
            Some("a".to_string())
        );
        assert_eq!(first_id(pairs(&[("x", "1")])), None);
        assert_eq!(first_id(pairs(&[("id", "")])), Some(String::new()));
    }
}
