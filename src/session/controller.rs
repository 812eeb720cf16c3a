//! The session controller
//!
//! Single owner of session state. All mutations go through `&mut self`, so
//! the UI loop serializes them: user intents (start, send, toggles, button
//! actions) and inbound orchestrator events (chat, widget, status) never
//! interleave.

use super::actions::{ActionDispatcher, ActionRequest, DispatchOutcome, PendingAction};
use super::confirmation::OrderConfirmation;
use super::page::Page;
use super::state::SessionState;
use super::voice::VoiceCoordinator;
use crate::config::SessionConfig;
use crate::events::{ChatEvent, ChatMessage, EventKind, EventLog, WidgetPayload};
use crate::orchestrator::{InboundEvent, OrchestratorClient};
use crate::widgets::{extract_latest_widget, resolve_all, RenderHandle, WidgetDescriptor};
use crate::{Result, VoiceboardError};
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct SessionController {
    session_id: Uuid,
    /// Gates the voice/text toggle; fixed for the session
    debug_mode: bool,
    state: SessionState,
    log: EventLog,
    /// Descriptors of the latest widget event
    widgets: Vec<WidgetDescriptor>,
    confirmation: Option<OrderConfirmation>,
    voice: VoiceCoordinator,
    actions: ActionDispatcher,
    last_error: Option<VoiceboardError>,
    orchestrator: Box<dyn OrchestratorClient>,
}

impl SessionController {
    pub fn new(config: &SessionConfig, orchestrator: Box<dyn OrchestratorClient>) -> Self {
        let session_id = Uuid::new_v4();
        debug!(
            "New session {} (debug_mode={}, gate_speech={})",
            session_id, config.ui.debug_mode, config.ui.gate_speech_on_recording
        );
        Self {
            session_id,
            debug_mode: config.ui.debug_mode,
            state: SessionState::new(),
            log: EventLog::new(),
            widgets: Vec::new(),
            confirmation: None,
            voice: VoiceCoordinator::new(
                config.ui.gate_speech_on_recording,
                config.ui.thinking_timeout(),
            ),
            actions: ActionDispatcher::new(),
            last_error: None,
            orchestrator,
        }
    }

    // === Queries ===

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_page(&self) -> Page {
        self.state.current_page
    }

    pub fn events(&self) -> &[ChatEvent] {
        self.log.events()
    }

    /// Descriptors of the latest widget event, in rendering order
    pub fn current_widgets(&self) -> &[WidgetDescriptor] {
        &self.widgets
    }

    /// Renderable widgets with their original index; unknown tags are skipped
    pub fn render_handles(&self) -> Vec<(usize, RenderHandle)> {
        resolve_all(&self.widgets)
    }

    pub fn confirmation(&self) -> Option<&OrderConfirmation> {
        self.confirmation.as_ref()
    }

    /// Failure of the last page transition, if it was refused
    pub fn last_error(&self) -> Option<&VoiceboardError> {
        self.last_error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    pub fn can_toggle_voice_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn is_action_in_flight(&self, key: &str) -> bool {
        self.actions.is_in_flight(key)
    }

    pub fn pending_actions(&self) -> Vec<PendingAction> {
        self.actions.pending().cloned().collect()
    }

    // === User intents ===

    /// `welcome -> home`, asking the orchestrator to begin the session
    pub fn start(&mut self) -> Result<()> {
        if !self.state.current_page.can_transition_to(Page::Home) {
            return Err(VoiceboardError::InvalidTransition(format!(
                "{} -> {}",
                self.state.current_page,
                Page::Home
            )));
        }
        self.orchestrator.start_session()?;
        self.state.current_page = Page::Home;
        info!("Session {} started", self.session_id);
        Ok(())
    }

    /// Forward a trimmed text message; empty input is ignored
    pub fn send_message(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        self.orchestrator.send_message(text)
    }

    /// Flip the capture intent. Does not touch `is_user_speaking`.
    ///
    /// The new value holds until the capture layer acknowledges it; earlier
    /// acknowledgments that disagree are dropped.
    pub fn toggle_recording(&mut self) -> bool {
        let on = !self.state.is_recording;
        self.voice.request_recording(&mut self.state, on);
        debug!("Recording intent: {}", self.state.is_recording);
        self.state.is_recording
    }

    pub fn toggle_voice_mode(&mut self) -> Result<bool> {
        if !self.debug_mode {
            return Err(VoiceboardError::ModeToggleDisabled);
        }
        self.state.is_voice_mode = !self.state.is_voice_mode;
        debug!("Voice mode: {}", self.state.is_voice_mode);
        Ok(self.state.is_voice_mode)
    }

    /// Dispatch a button action under its own key
    pub fn dispatch(&mut self, request: ActionRequest) -> DispatchOutcome {
        let key = request.key();
        self.dispatch_keyed(&key, &request)
    }

    /// Dispatch a button action under an explicit key
    pub fn dispatch_keyed(&mut self, key: &str, request: &ActionRequest) -> DispatchOutcome {
        self.actions.dispatch(key, request, self.orchestrator.as_ref())
    }

    // === Inbound events ===

    pub fn handle_event(&mut self, event: InboundEvent) {
        self.handle_event_at(event, Instant::now());
    }

    pub fn handle_event_at(&mut self, event: InboundEvent, now: Instant) {
        match event {
            InboundEvent::Chat(message) => self.on_chat(message),
            InboundEvent::Status(signal) => self.voice.apply(&mut self.state, signal, now),
        }
    }

    /// Expire a stuck thinking indicator
    pub fn tick(&mut self, now: Instant) -> bool {
        self.voice.tick(&mut self.state, now)
    }

    fn on_chat(&mut self, message: ChatMessage) {
        let kind = message.kind();
        let id = self.log.append(message).id;
        debug!("Event {} ({})", id, kind);

        match kind {
            EventKind::Agent => self.voice.end_turn(&mut self.state),
            EventKind::Widget => self.on_widget(),
            EventKind::User | EventKind::System => {}
        }
    }

    fn on_widget(&mut self) {
        self.actions.clear_all();
        self.widgets = extract_latest_widget(self.log.events());

        let is_confirmation = self
            .latest_widget_payload()
            .is_some_and(|payload| payload.is_order_confirmation());
        if is_confirmation {
            self.confirm_order();
        }
    }

    fn latest_widget_payload(&self) -> Option<&WidgetPayload> {
        self.log
            .latest_of(EventKind::Widget)
            .and_then(|event| event.message.as_widget())
    }

    /// `home -> order-confirmation` if the latest payload parses
    fn confirm_order(&mut self) {
        if !self.state.current_page.can_transition_to(Page::OrderConfirmation) {
            debug!(
                "Ignoring order confirmation on page {}",
                self.state.current_page
            );
            return;
        }

        let Some(payload) = self.latest_widget_payload() else {
            return;
        };

        match OrderConfirmation::parse(&payload.details) {
            Ok(confirmation) => {
                info!("Order {} confirmed", confirmation.order_id);
                self.confirmation = Some(confirmation);
                self.state.current_page = Page::OrderConfirmation;
                self.last_error = None;
            }
            Err(e) => {
                warn!("Refusing order confirmation: {}", e);
                self.last_error = Some(e);
            }
        }
    }
}
