// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::info;

use crate::protocol::MESSAGE_PATH;

use super::MessageBroker;

#[derive(Debug, Default, Deserialize)]
struct MessageForm {
    #[serde(default)]
    id: String,
    #[serde(default)]
    message: String,
}

async fn receive_message(
    State(broker): State<Arc<MessageBroker>>,
    Form(form): Form<MessageForm>,
) -> Json<Value> {
    broker.add_message(&form.id, &form.message);
    Json(json!({}))
}

/// `POST /image_chooser_classic_message` with form fields `id` and `message`; replies `{}`.
pub fn router(broker: Arc<MessageBroker>) -> Router {
    Router::new().route(MESSAGE_PATH, post(receive_message)).with_state(broker)
}

/// Serves the broker endpoint on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    broker: Arc<MessageBroker>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, path = MESSAGE_PATH, "chooser broker listening");
    }
    axum::serve(listener, router(broker)).with_graceful_shutdown(shutdown).await
}
