use crate::catalog::loader::CatalogLoader;
use crate::controller::Effect;
use crate::event::AppEvent;
use crate::gateway::AssistantGateway;
use std::sync::mpsc;
use tokio::runtime::Handle;
use tracing::debug;

/// Runs controller effects on the tokio runtime and posts the results back
/// to the UI thread.
#[derive(Clone)]
pub struct Services {
    catalog: CatalogLoader,
    gateway: AssistantGateway,
    tx: mpsc::Sender<AppEvent>,
    runtime_handle: Handle,
}

impl Services {
    pub fn new(
        catalog: CatalogLoader,
        gateway: AssistantGateway,
        tx: mpsc::Sender<AppEvent>,
        runtime_handle: Handle,
    ) -> Self {
        Self {
            catalog,
            gateway,
            tx,
            runtime_handle,
        }
    }

    /// Spawns the work for `effect`. `notify` runs after the result has been
    /// queued, so the host can wake its event loop.
    pub fn execute<F>(&self, effect: Effect, notify: F)
    where
        F: Fn() + Send + 'static,
    {
        match effect {
            Effect::LoadCatalog {
                generation,
                category,
            } => {
                let loader = self.catalog.clone();
                let tx = self.tx.clone();
                self.runtime_handle.spawn(async move {
                    let result = loader.load_all().await;
                    if tx
                        .send(AppEvent::CatalogLoaded {
                            generation,
                            category,
                            result,
                        })
                        .is_err()
                    {
                        debug!("ui event channel closed, dropping catalog result");
                    }
                    notify();
                });
            }
            Effect::SendTranscript {
                request_id,
                messages,
            } => {
                let gateway = self.gateway.clone();
                let tx = self.tx.clone();
                self.runtime_handle.spawn(async move {
                    let text = gateway.send(&messages).await;
                    if tx
                        .send(AppEvent::AssistantReplied { request_id, text })
                        .is_err()
                    {
                        debug!(%request_id, "ui event channel closed, dropping reply");
                    }
                    notify();
                });
            }
        }
    }
}
