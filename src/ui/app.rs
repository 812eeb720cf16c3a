//! Main application struct and eframe integration
//!
//! Each frame drains orchestrator events into the session controller, renders
//! the current page and applies whatever the user asked for.

use crate::config::SessionConfig;
use crate::orchestrator::{loopback, ChannelOrchestrator, InboundEvent};
use crate::persistence::{FileIntroStore, IntroStore, MemoryIntroStore};
use crate::session::{ActionRequest, DispatchOutcome, Page, SessionController};
use crate::skin::Skin;
use crate::ui::components::{
    AgentIndicator, ChatWindow, ConfirmationPage, ControlBar, IntroPopup, ListeningIndicator,
    WelcomeScreen, WidgetPanel,
};
use crate::ui::theme::Theme;
use crate::ui::UiIntent;
use crate::widgets::Widget;
use crate::Result;
use crossbeam_channel::Receiver;
use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const CHANNEL_BUFFER: usize = 256;
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

/// Main Voiceboard application
pub struct VoiceboardApp {
    config: SessionConfig,
    skin: Skin,
    theme: Theme,
    session: SessionController,
    /// Inbound orchestrator events for the current session
    events: Receiver<InboundEvent>,
    intro: Box<dyn IntroStore>,
    show_intro: bool,
    /// Chat mode text input
    input: String,
    /// Transient message for failures outside page transitions
    notice: Option<String>,
}

/// Open a fresh session against the loopback orchestrator
fn connect(config: &SessionConfig) -> Result<(SessionController, Receiver<InboundEvent>)> {
    let (client, peer) = ChannelOrchestrator::new(CHANNEL_BUFFER);
    let events = client.event_receiver();
    loopback::spawn(peer)?;
    debug!("Connected to {}", config.orchestrator.ws_url());
    Ok((SessionController::new(config, Box::new(client)), events))
}

fn export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

impl VoiceboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: SessionConfig) -> Result<Self> {
        let skin = config.skin()?;
        let theme = Theme::light();
        theme.apply(&cc.egui_ctx);

        let intro: Box<dyn IntroStore> = match FileIntroStore::in_config_dir() {
            Some(store) => Box::new(store),
            None => {
                warn!("No config directory, intro will show every launch");
                Box::new(MemoryIntroStore::new())
            }
        };
        let show_intro = !intro.has_seen_intro();

        let (session, events) = connect(&config)?;
        info!("Voiceboard ready with skin {}", skin.name);

        Ok(Self {
            config,
            skin,
            theme,
            session,
            events,
            intro,
            show_intro,
            input: String::new(),
            notice: None,
        })
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.session.handle_event(event);
        }
        self.session.tick(Instant::now());
    }

    fn apply(&mut self, intent: UiIntent) {
        debug!("UI intent: {:?}", intent);
        match intent {
            UiIntent::Start => {
                if let Err(e) = self.session.start() {
                    warn!("Failed to start session: {}", e);
                    self.notice = Some(e.user_message());
                }
            }
            UiIntent::SendMessage => {
                let text = std::mem::take(&mut self.input);
                if let Err(e) = self.session.send_message(&text) {
                    warn!("Failed to send message: {}", e);
                    self.input = text;
                    self.notice = Some(e.user_message());
                }
            }
            UiIntent::ToggleRecording => {
                self.session.toggle_recording();
            }
            UiIntent::ToggleVoiceMode => {
                if let Err(e) = self.session.toggle_voice_mode() {
                    self.notice = Some(e.user_message());
                }
            }
            UiIntent::Action(request) => match self.session.dispatch(request) {
                DispatchOutcome::Sent | DispatchOutcome::AlreadyInFlight => {}
                DispatchOutcome::Failed(e) => self.notice = Some(e.user_message()),
            },
            UiIntent::EndSession => self.reset_session(),
            UiIntent::ExportSpreadsheet(index) => self.export_spreadsheet(index),
            UiIntent::DismissIntro => {
                self.show_intro = false;
                if let Err(e) = self.intro.mark_intro_seen() {
                    warn!("Failed to save intro flag: {}", e);
                }
            }
            UiIntent::DismissError => {
                self.session.clear_error();
                self.notice = None;
            }
        }
    }

    /// Drop the session and its orchestrator, back to the welcome page
    fn reset_session(&mut self) {
        match connect(&self.config) {
            Ok((session, events)) => {
                info!("Ended session {}", self.session.session_id());
                self.session = session;
                self.events = events;
                self.input.clear();
                self.notice = None;
            }
            Err(e) => {
                warn!("Failed to reset session: {}", e);
                self.notice = Some(e.user_message());
            }
        }
    }

    fn export_spreadsheet(&mut self, index: usize) {
        let handles = self.session.render_handles();
        let Some(Widget::Spreadsheet(sheet)) = handles
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, handle)| &handle.widget)
        else {
            return;
        };

        self.notice = Some(match sheet.export_csv(&export_dir()) {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                warn!("Spreadsheet export failed: {}", e);
                e.user_message()
            }
        });
    }

    fn show_banner(&mut self, ctx: &egui::Context) -> Option<UiIntent> {
        let message = self
            .session
            .last_error()
            .map(|e| e.user_message())
            .or_else(|| self.notice.clone())?;
        let is_error = self.session.last_error().is_some();
        let mut intent = None;

        TopBottomPanel::top("banner")
            .frame(
                egui::Frame::none()
                    .fill(if is_error {
                        self.theme.error.gamma_multiply(0.15)
                    } else {
                        self.theme.bg_tertiary
                    })
                    .inner_margin(self.theme.spacing_sm),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let color = if is_error {
                        self.theme.error
                    } else {
                        self.theme.text_secondary
                    };
                    ui.label(RichText::new(message).color(color));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("✕").clicked() {
                            intent = Some(UiIntent::DismissError);
                        }
                    });
                });
            });

        intent
    }

    fn show_header(&self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(self.theme.bg_secondary).inner_margin(12.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&self.skin.agent_name)
                            .size(20.0)
                            .strong()
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new(&self.skin.title)
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    if self.session.can_toggle_voice_mode() {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(format!(
                                    "{} · {}",
                                    self.session.session_id(),
                                    self.config.orchestrator.ws_url()
                                ))
                                .size(11.0)
                                .family(egui::FontFamily::Monospace)
                                .color(self.theme.text_muted),
                            );
                        });
                    }
                });
            });
    }

    fn show_home(&mut self, ctx: &egui::Context) -> Vec<UiIntent> {
        let mut intents = Vec::new();
        let state = self.session.state();

        self.show_header(ctx);

        TopBottomPanel::bottom("controls")
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                ListeningIndicator::new(state, &self.theme).show(ui);
                let mut controls =
                    ControlBar::new(state, self.session.can_toggle_voice_mode(), &self.theme);
                if self.skin.supports_orders {
                    let in_flight = self
                        .session
                        .is_action_in_flight(&ActionRequest::SubmitOrder.key());
                    controls = controls.with_submit_order(in_flight);
                }
                intents.extend(controls.show(ui));
            });

        SidePanel::right("chat")
            .resizable(true)
            .default_width(360.0)
            .min_width(280.0)
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                intents.extend(
                    ChatWindow::new(
                        self.session.events(),
                        &mut self.input,
                        !state.is_voice_mode,
                        &self.theme,
                    )
                    .show(ui),
                );
            });

        let handles = self.session.render_handles();
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.bg_primary).inner_margin(self.theme.spacing))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    AgentIndicator::new(state, &self.skin, &self.theme).show(ui);
                });
                ui.add_space(self.theme.spacing);
                intents.extend(WidgetPanel::new(&handles, &self.theme).show(ui));
            });

        if self.show_intro {
            intents.extend(IntroPopup::new(&self.skin, &self.theme).show(ctx));
        }

        intents
    }
}

impl eframe::App for VoiceboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        let mut intents: Vec<UiIntent> = self.show_banner(ctx).into_iter().collect();

        match self.session.current_page() {
            Page::Welcome => {
                CentralPanel::default()
                    .frame(egui::Frame::none().fill(self.theme.bg_primary))
                    .show(ctx, |ui| {
                        intents.extend(WelcomeScreen::new(&self.skin, &self.theme).show(ui));
                    });
            }
            Page::Home => intents.extend(self.show_home(ctx)),
            Page::OrderConfirmation => {
                CentralPanel::default()
                    .frame(egui::Frame::none().fill(self.theme.bg_primary))
                    .show(ctx, |ui| {
                        intents.extend(
                            ConfirmationPage::new(self.session.confirmation(), &self.theme)
                                .show(ui),
                        );
                    });
            }
        }

        for intent in intents {
            self.apply(intent);
        }

        // Orchestrator events arrive without input
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
