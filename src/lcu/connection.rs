//! Event bus connection with rediscovery on disconnect

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async_tls_with_config, Connector, MaybeTlsStream, WebSocketStream};

use super::base_data;
use super::client::{LcuClient, LcuHandle};
use super::credentials::{self, LcuCredentials};
use super::events::{parse_frame, subscribe_frame};
use super::handlers::handle_event;
use crate::error::{Error, Result};
use crate::model::SharedSnapshot;
use crate::presence::UpdateScheduler;

const RECONNECT_DELAY: Duration = Duration::from_secs(5);
/// The client answers before it has finished loading
const SETTLE_DELAY: Duration = Duration::from_secs(2);

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

fn basic_auth(token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("riot:{}", token)))
}

async fn open_socket(credentials: &LcuCredentials) -> Result<Socket> {
    let mut request = credentials.websocket_url().into_client_request()?;
    let auth = HeaderValue::from_str(&basic_auth(&credentials.token))
        .map_err(|e| Error::Ignorable(format!("Invalid auth header: {}", e)))?;
    request.headers_mut().insert("Authorization", auth);

    let tls = native_tls::TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .build()
        .map_err(|e| Error::fatal(format!("Failed to build TLS connector: {}", e)))?;

    let (socket, _response) =
        connect_async_tls_with_config(request, None, false, Some(Connector::NativeTls(tls)))
            .await?;
    Ok(socket)
}

async fn run_session(
    handle: &LcuHandle,
    snapshot: &SharedSnapshot,
    scheduler: &UpdateScheduler,
) -> Result<()> {
    // Discovery walks the process table
    let credentials = tokio::task::spawn_blocking(credentials::discover)
        .await
        .map_err(|e| Error::Transient(format!("Credential discovery failed: {}", e)))??;
    let client = LcuClient::new(credentials.clone())?;
    let mut socket = open_socket(&credentials).await?;
    tracing::info!("Connected to the League client API on port {}", credentials.port);

    handle.set(client.clone()).await;
    socket.send(Message::Text(subscribe_frame())).await?;

    tokio::time::sleep(SETTLE_DELAY).await;
    base_data::gather(&client, snapshot).await;
    scheduler.request_update();

    while let Some(next) = socket.next().await {
        let text = match next {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => return Err(e.into()),
        };

        if let Some(event) = parse_frame(&text) {
            handle_event(&event, &client, snapshot, scheduler).await;
        }
    }
    Ok(())
}

/// Keeps the event bus subscribed for the lifetime of the process
pub async fn run_event_loop(
    handle: LcuHandle,
    snapshot: SharedSnapshot,
    scheduler: UpdateScheduler,
) {
    loop {
        match run_session(&handle, &snapshot, &scheduler).await {
            Ok(()) => tracing::warn!("Disconnected from the League client API, reconnecting"),
            Err(e) if e.is_fatal() => {
                tracing::error!("Client event stream stopped: {}", e);
                handle.clear().await;
                return;
            }
            Err(e) => tracing::debug!("Client API not available: {}", e),
        }
        handle.clear().await;
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_header_is_basic_riot_token() {
        // base64("riot:abc")
        assert_eq!(basic_auth("abc"), "Basic cmlvdDphYmM=");
    }
}
