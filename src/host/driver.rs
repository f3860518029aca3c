// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::{ChooserConfig, LayoutConfig};
use crate::error::ChooserError;
use crate::layout::{ContainerSize, LayoutGeometry};
use crate::model::{ChooserSpec, NodeId, Presentation, SessionId};
use crate::protocol::{HostEvent, StartNotifier, Transport, WireMessage};
use crate::session::{
    CloseReason, Key, KeyAction, SelectionSession, SessionRegistry, SessionState, Submission,
};

use super::{AlertPlayer, NodeLocator, SettingsStore, SurfaceRenderer};

/// Collaborator for hosts without a graph or a display: no nodes, nothing drawn,
/// no sound.
#[derive(Debug, Clone, Copy, Default)]
pub struct Detached;

impl NodeLocator for Detached {
    fn find_chooser_node(&self, _candidates: &[&str]) -> Option<NodeId> {
        None
    }
}

impl SurfaceRenderer for Detached {
    fn render(&self, _session: &SelectionSession) {}

    fn teardown(&self, _session: &SelectionSession) {}
}

impl AlertPlayer for Detached {
    fn play(&self) {}
}

#[derive(Debug)]
struct HostState {
    registry: SessionRegistry,
    notifier: StartNotifier,
}

/// Drives chooser sessions for one application window.
///
/// The registry lock is never held across a transport send, so a cancel can land while a
/// progress send is still in flight; the send's completion then finds the session gone.
#[derive(Clone)]
pub struct ChooserHost<T> {
    state: Arc<Mutex<HostState>>,
    transport: Arc<T>,
    layout: LayoutConfig,
    locator: Arc<dyn NodeLocator>,
    surface: Arc<dyn SurfaceRenderer>,
    settings: Arc<dyn SettingsStore>,
    alert: Arc<dyn AlertPlayer>,
}

impl<T: Transport> ChooserHost<T> {
    pub fn new(transport: T, config: &ChooserConfig) -> Self {
        let state = HostState {
            registry: SessionRegistry::new(config.layout.clone()),
            notifier: StartNotifier::new(),
        };
        Self {
            state: Arc::new(Mutex::new(state)),
            transport: Arc::new(transport),
            layout: config.layout.clone(),
            locator: Arc::new(Detached),
            surface: Arc::new(Detached),
            settings: Arc::new(config.settings),
            alert: Arc::new(Detached),
        }
    }

    pub fn with_node_locator(mut self, locator: impl NodeLocator + 'static) -> Self {
        self.locator = Arc::new(locator);
        self
    }

    pub fn with_surface(mut self, surface: impl SurfaceRenderer + 'static) -> Self {
        self.surface = Arc::new(surface);
        self
    }

    pub fn with_settings(mut self, settings: impl SettingsStore + 'static) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    pub fn with_alert(mut self, alert: impl AlertPlayer + 'static) -> Self {
        self.alert = Arc::new(alert);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn handle(&self, event: HostEvent) {
        match event {
            HostEvent::OpenChooser(spec) => {
                if let Err(err) = self.open(spec).await {
                    warn!(error = %err, "chooser open dropped");
                }
            }
            HostEvent::PipelineStart => self.pipeline_start().await,
            HostEvent::PipelineError => self.close_all(CloseReason::PipelineError).await,
            HostEvent::PipelineSuccess => self.close_all(CloseReason::PipelineSuccess).await,
            HostEvent::PipelineInterrupted => {
                self.close_all(CloseReason::PipelineInterrupted).await
            }
            HostEvent::AppUnload => self.app_unload().await,
        }
    }

    /// Opens a chooser and focuses it. Overlays replace the open overlay; widgets replace
    /// the session of their node.
    pub async fn open(&self, spec: ChooserSpec) -> Result<SessionId, ChooserError> {
        if self.settings.alert_sound_enabled() {
            self.alert.play();
        }

        let node = match spec.presentation() {
            Presentation::Overlay => None,
            Presentation::Widget => {
                let candidates = spec.node_candidates();
                let node = self.locator.find_chooser_node(&candidates).ok_or_else(|| {
                    ChooserError::RoutingFailure {
                        unique_id: spec.unique_id().to_owned(),
                        candidates: candidates.iter().map(|id| (*id).to_owned()).collect(),
                    }
                })?;
                Some(node)
            }
        };

        let mut state = self.state.lock().await;
        let opened = match node {
            Some(node) => state.registry.open_widget(node, spec),
            None => state.registry.open_overlay(spec),
        };
        if let Some(replaced) = &opened.replaced {
            self.surface.teardown(replaced);
        }
        if let Some(session) = state.registry.get(opened.session) {
            info!(
                session = %opened.session,
                unique_id = session.spec().unique_id(),
                images = session.spec().image_count(),
                "chooser opened"
            );
            self.surface.render(session);
        }
        Ok(opened.session)
    }

    /// Primary activation of tile `index`.
    pub async fn activate(&self, session: SessionId, index: usize) {
        let submission = {
            let mut state = self.state.lock().await;
            let submission = state.registry.toggle_positive(session, index);
            self.render(&state.registry, session);
            submission
        };
        if let Some(submission) = submission {
            self.deliver(submission).await;
        }
    }

    /// Secondary activation of tile `index`; double-mode choosers only.
    pub async fn activate_secondary(&self, session: SessionId, index: usize) {
        let mut state = self.state.lock().await;
        state.registry.toggle_negative(session, index);
        self.render(&state.registry, session);
    }

    /// Sends the current selection. Repeated calls while a send is in flight do nothing.
    pub async fn progress(&self, session: SessionId) -> Result<(), ChooserError> {
        let submission = {
            let mut state = self.state.lock().await;
            let submission = state.registry.progress(session)?;
            self.render(&state.registry, session);
            submission
        };
        if let Some(submission) = submission {
            self.deliver(submission).await;
        }
        Ok(())
    }

    /// Abandons a session and notifies the backend. Returns `false` when the session was
    /// no longer live.
    pub async fn cancel(&self, session: SessionId) -> bool {
        let notice = {
            let mut state = self.state.lock().await;
            let Some(cancellation) = state.registry.cancel(session) else {
                return false;
            };
            self.surface.teardown(&cancellation.session);
            cancellation.notice
        };
        self.send_notice(&notice).await;
        true
    }

    /// Routes a key press to the focused session.
    pub async fn key(&self, key: Key) {
        let action = {
            let state = self.state.lock().await;
            state.registry.route_key(key, self.settings.as_ref())
        };
        match action {
            KeyAction::Ignored => {}
            KeyAction::Toggle { session, index } => self.activate(session, index).await,
            KeyAction::Progress(session) => {
                if let Err(err) = self.progress(session).await {
                    debug!(error = %err, "hotkey progress rejected");
                }
            }
            KeyAction::Cancel(session) => {
                self.cancel(session).await;
            }
        }
    }

    pub async fn focus(&self, session: SessionId) -> bool {
        self.state.lock().await.registry.focus(session)
    }

    /// Re-solves the grid for a new content area.
    pub async fn resize(
        &self,
        session: SessionId,
        area: ContainerSize,
        user_resized: bool,
    ) -> Option<LayoutGeometry> {
        let mut state = self.state.lock().await;
        let geometry = state.registry.get_mut(session)?.layout(area, user_resized, &self.layout);
        self.render(&state.registry, session);
        Some(geometry)
    }

    /// Feeds the natural size of a displayed image. Returns the new geometry when the
    /// measured aspect ratio moved the grid.
    pub async fn image_measured(
        &self,
        session: SessionId,
        index: usize,
        width: u32,
        height: u32,
    ) -> Option<LayoutGeometry> {
        let mut state = self.state.lock().await;
        let live = state.registry.get_mut(session)?;
        if !live.observe_image(width, height) {
            return None;
        }
        debug!(%session, index, width, height, ratio = live.aspect_ratio(), "aspect ratio changed");
        let geometry = live.relayout(&self.layout)?;
        self.render(&state.registry, session);
        Some(geometry)
    }

    /// Records that this application queued the next pipeline run itself.
    pub async fn note_requeue(&self) {
        self.state.lock().await.notifier.note_requeue();
    }

    pub async fn remove_node(&self, node: &NodeId) {
        let mut state = self.state.lock().await;
        if let Some(closed) = state.registry.remove_node(node) {
            self.surface.teardown(&closed);
        }
    }

    pub async fn focused(&self) -> Option<SessionId> {
        self.state.lock().await.registry.focused_id()
    }

    /// State of a live session; `None` once it closed.
    pub async fn session_state(&self, session: SessionId) -> Option<SessionState> {
        self.state.lock().await.registry.get(session).map(SelectionSession::state)
    }

    pub async fn live_sessions(&self) -> usize {
        self.state.lock().await.registry.len()
    }

    async fn pipeline_start(&self) {
        let notice = {
            let mut state = self.state.lock().await;
            let notice = state.notifier.on_pipeline_start();
            self.teardown_all(&mut state.registry, CloseReason::PipelineStart);
            notice
        };
        if let Some(notice) = notice {
            self.send_notice(&notice).await;
        }
    }

    async fn close_all(&self, reason: CloseReason) {
        let mut state = self.state.lock().await;
        self.teardown_all(&mut state.registry, reason);
    }

    async fn app_unload(&self) {
        let notice = {
            let mut state = self.state.lock().await;
            let cancellation =
                state.registry.focused_id().and_then(|focused| state.registry.cancel(focused));
            if let Some(cancellation) = &cancellation {
                self.surface.teardown(&cancellation.session);
            }
            self.teardown_all(&mut state.registry, CloseReason::AppUnload);
            cancellation.map(|cancellation| cancellation.notice)
        };
        if let Some(notice) = notice {
            self.send_notice(&notice).await;
        }
    }

    async fn deliver(&self, submission: Submission) {
        let session = submission.session();
        if let Err(err) = self.transport.send(submission.message()).await {
            let err = ChooserError::from(err);
            warn!(%session, error = %err, "selection send failed; closing chooser anyway");
        }

        let mut state = self.state.lock().await;
        match state.registry.finish_send(session, submission.ticket()) {
            Some(closed) => self.surface.teardown(&closed),
            None => debug!(%session, "send completed after session closed"),
        }
    }

    async fn send_notice(&self, notice: &WireMessage) {
        if let Err(err) = self.transport.send(notice).await {
            let err = ChooserError::from(err);
            warn!(message = %notice, error = %err, "notice send failed");
        }
    }

    fn render(&self, registry: &SessionRegistry, session: SessionId) {
        if let Some(live) = registry.get(session) {
            self.surface.render(live);
        }
    }

    fn teardown_all(&self, registry: &mut SessionRegistry, reason: CloseReason) {
        for closed in registry.close_all(reason) {
            self.surface.teardown(&closed);
        }
    }
}
