#![forbid(unsafe_code)]

use anyhow::Result;
use log::{error, info};
use poem::listener::{Listener, TcpListener};
use poem::Route;
use poem_openapi::{payload::PlainText, OpenApi, OpenApiService};

use crate::utils::config::{init_log, resolve_config, Config};
use crate::utils::errors::Errors;

// Modules
mod utils;

// ***************************************************************************
//                                Constants
// ***************************************************************************
const SERVER_NAME : &str = "GreetingServer"; // for poem logging

// ---------------------------------------------------------------------------
// main:
// ---------------------------------------------------------------------------
#[tokio::main]
async fn main() -> Result<()> {
    // --------------- Initialize Server --------------
    // Announce ourselves.
    println!("Starting greeting_server!");

    // Configure our log.
    init_log();

    // Resolve the runtime configuration and record it.
    let config = resolve_config();
    info!("{}", Errors::InputParms(format!("{:#?}", config)));

    // --------------- Main Loop Set Up ---------------
    // Create the routes.
    let addr = format!("{}:{}", config.http_addr, config.http_port);
    let app = build_app(&config);

    // Bind up front so a bind failure is diagnosed before the server
    // loop starts.  Bind failures are fatal and never retried; restarting
    // the process is the supervisor's job.
    let acceptor = match TcpListener::bind(addr.clone()).into_acceptor().await {
        Ok(a) => a,
        Err(e) => {
            let err = Errors::BindError(addr, e.to_string());
            error!("{}", err);
            return Err(err.into());
        },
    };
    info!("Listening on {}", addr);

    // ------------------ Main Loop -------------------
    poem::Server::new_with_acceptor(acceptor)
        .name(SERVER_NAME)
        .run(app)
        .await?;
    Ok(())
}

// ***************************************************************************
//                             Private Functions
// ***************************************************************************
// ---------------------------------------------------------------------------
// build_app:
// ---------------------------------------------------------------------------
/** Create the route tree: the single greeting endpoint nested at the root.
 * The greeting travels in the endpoint value itself, so the handler never
 * consults process-wide state.  Requests matching no route fall through to
 * poem's default responses.
 */
fn build_app(config: &Config) -> Route {
    let api_service = OpenApiService::new(
        GreetingApi { greeting: config.greeting.clone() },
        "Greeting Server",
        option_env!("CARGO_PKG_VERSION").unwrap_or("unknown"),
    )
    .server(format!("http://{}:{}", config.http_addr, config.http_port));
    Route::new().nest("/", api_service)
}

// ***************************************************************************
//                             Greeting Endpoint
// ***************************************************************************
// Greeting structure.
struct GreetingApi {
    greeting: String,
}

// ---------------------------------------------------------------------------
// greeting endpoint:
// ---------------------------------------------------------------------------
#[OpenApi]
impl GreetingApi {
    #[oai(path = "/", method = "get")]
    async fn index(&self) -> PlainText<String> {
        PlainText(self.greeting.clone())
    }
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use poem::http::StatusCode;
    use poem::test::TestClient;

    use super::build_app;
    use crate::utils::config::Config;

    #[tokio::test]
    async fn get_root_returns_greeting() {
        let config = Config::new();
        let cli = TestClient::new(build_app(&config));

        let resp = cli.get("/").send().await;
        resp.assert_status_is_ok();
        resp.assert_content_type("text/plain; charset=utf-8");
        resp.assert_text(config.greeting).await;
    }

    #[tokio::test]
    async fn get_root_is_idempotent() {
        let config = Config::new();
        let cli = TestClient::new(build_app(&config));

        for _ in 0..3 {
            let resp = cli.get("/").send().await;
            resp.assert_status_is_ok();
            resp.assert_text(config.greeting.clone()).await;
        }
    }

    #[tokio::test]
    async fn unknown_path_is_not_routed() {
        let config = Config::new();
        let cli = TestClient::new(build_app(&config));

        let resp = cli.get("/foo").send().await;
        resp.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_get_method_is_refused() {
        let config = Config::new();
        let cli = TestClient::new(build_app(&config));

        let resp = cli.post("/").send().await;
        resp.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn greeting_flows_through_unchanged() {
        let config = Config {
            greeting: "Hello 2".to_string(),
            ..Config::new()
        };
        let cli = TestClient::new(build_app(&config));

        let resp = cli.get("/").send().await;
        resp.assert_status_is_ok();
        resp.assert_text("Hello 2").await;
    }
}
