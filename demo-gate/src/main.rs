use auth_init_gate::{InitGate, LoginHandlers, LoginStatusHandlers, SdkConfig};
use dotenvy::dotenv;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod sdk;

use crate::sdk::SimulatedSdk;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,auth_init_gate=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = SdkConfig::from_env();
    if config.app_id.is_empty() {
        config.app_id = "demo-app".to_string();
    }

    let gate = InitGate::new(SimulatedSdk {
        load_delay: Duration::from_millis(300),
    });

    // Requests made while the SDK is still loading
    let (status_tx, status_rx) = oneshot::channel();
    gate.dispatch_login_status(
        LoginStatusHandlers::new()
            .with_logged_in(|_| tracing::info!("Already logged in"))
            .with_logged_out(move |response| {
                tracing::info!("Not logged in (status {:?})", response.status);
                let _ = status_tx.send(());
            }),
        false,
    );

    let (login_tx, login_rx) = oneshot::channel();
    let handlers = LoginHandlers::new()
        .with_toggle_loader(|loading| tracing::info!("Loader {}", if loading { "on" } else { "off" }))
        .with_on_accept(move |response| {
            if let Some(auth) = response.auth_response {
                tracing::info!("Logged in as {}", auth.user_id);
            }
            let _ = login_tx.send(true);
        });
    gate.login(handlers, false);

    // A double click while loading is ignored
    gate.login(LoginHandlers::new(), false);

    tracing::info!("{} callback(s) waiting for the SDK", gate.pending_len());

    gate.bootstrap(&config).await?;

    status_rx.await?;
    let accepted = login_rx.await?;
    tracing::info!("Demo finished, login accepted: {}", accepted);

    Ok(())
}
