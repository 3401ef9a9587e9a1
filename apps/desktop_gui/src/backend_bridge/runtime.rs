//! Runtime bridge between the UI command queue and the catalog service.

use std::{sync::Arc, thread};

use client_core::{CatalogClient, CatalogFetcher};
use crossbeam_channel::{Receiver, Sender};
use tokio::task::JoinHandle;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::media::decode_card_image;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let client = match CatalogClient::new(&server_url) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("invalid catalog service address: {err}");
                    return;
                }
            };
            let image_http = reqwest::Client::new();
            let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

            // Only the newest catalog fetch may stay in flight; superseded
            // fetches are aborted rather than awaited.
            let mut fetch_task: Option<JoinHandle<()>> = None;
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::FetchCatalog { request_seq, query } => {
                        if let Some(task) = fetch_task.take() {
                            task.abort();
                        }
                        let client = client.clone();
                        let ui_tx = ui_tx.clone();
                        fetch_task = Some(tokio::spawn(async move {
                            match client.fetch_products(&query).await {
                                Ok(products) => {
                                    tracing::debug!(
                                        request_seq,
                                        products = products.len(),
                                        "catalog fetch completed"
                                    );
                                    let _ = ui_tx.try_send(UiEvent::CatalogLoaded {
                                        request_seq,
                                        products,
                                    });
                                }
                                Err(err) => {
                                    tracing::warn!(request_seq, "catalog fetch failed: {err}");
                                    let _ = ui_tx.try_send(UiEvent::CatalogFetchFailed {
                                        request_seq,
                                        reason: err.to_string(),
                                    });
                                }
                            }
                        }));
                    }
                    BackendCommand::FetchCardImage { url } => {
                        let http = image_http.clone();
                        let ui_tx = ui_tx.clone();
                        tokio::spawn(async move {
                            match fetch_image_bytes(&http, &url).await {
                                Ok(bytes) => match decode_card_image(&bytes) {
                                    Ok(image) => {
                                        let _ =
                                            ui_tx.try_send(UiEvent::CardImageLoaded { url, image });
                                    }
                                    Err(reason) => {
                                        tracing::warn!("card image decode failed for {url}: {reason}");
                                        let _ =
                                            ui_tx.try_send(UiEvent::CardImageFailed { url, reason });
                                    }
                                },
                                Err(err) => {
                                    let reason = format!("failed to download card image: {err}");
                                    tracing::warn!("{reason}");
                                    let _ = ui_tx.try_send(UiEvent::CardImageFailed { url, reason });
                                }
                            }
                        });
                    }
                }
            }
        });
    });
}

async fn fetch_image_bytes(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let bytes = http
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .bytes()
        .await?;
    Ok(bytes.to_vec())
}
