use eframe::egui;
use std::time::{Duration, Instant};

use template_workspace::config::WorkspaceConfig;
use template_workspace::http_client::ApiClient;
use template_workspace::notifications::{Severity, ToastQueue};
use template_workspace::runtime::{WorkspaceRuntime, WorkspaceSnapshot};
use template_workspace::session::{CredentialStore, SessionGuard};
use template_workspace::workspace::{Draft, WorkspaceAction};

/// Desktop shell around the workspace runtime
pub struct TemplateApp {
    runtime: WorkspaceRuntime,
    snapshot: WorkspaceSnapshot,
    toasts: ToastQueue,

    // Editor buffers owned by the UI; pushed to the controller on change.
    // Replaced only when the controller's draft revision moves.
    draft: Draft,
    seen_revision: u64,
    input_text: String,

    // Login form
    username: String,
    password: String,
}

impl TemplateApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &WorkspaceConfig) -> anyhow::Result<Self> {
        log::info!("Starting template workspace against {}", config.api_base_url);

        let store = CredentialStore::new(config.session_file.clone());
        let session = SessionGuard::restore(store)?;
        let api = ApiClient::from_config(config);

        let ctx = cc.egui_ctx.clone();
        let runtime =
            WorkspaceRuntime::spawn(api, session, config.download_dir.clone(), move || {
                ctx.request_repaint()
            })?;

        Ok(Self {
            runtime,
            snapshot: WorkspaceSnapshot::default(),
            toasts: ToastQueue::new(config.toast_duration()),
            draft: Draft::default(),
            seen_revision: 0,
            input_text: String::new(),
            username: String::new(),
            password: String::new(),
        })
    }

    fn sync_from_runtime(&mut self, ctx: &egui::Context) {
        self.snapshot = self.runtime.snapshot();

        if self.snapshot.draft_revision != self.seen_revision {
            self.draft = self.snapshot.draft.clone();
            self.seen_revision = self.snapshot.draft_revision;
        }

        let outbox = self.runtime.take_outbox();
        let now = Instant::now();
        for (message, severity) in outbox.notifications {
            self.toasts.push(message, severity, now);
        }
        for text in outbox.clipboard {
            ctx.copy_text(text);
        }
        if outbox.login_requested {
            self.password.clear();
        }
    }


    fn login_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading("Sign in");
                ui.add_space(16.0);

                ui.add(egui::TextEdit::singleline(&mut self.username).hint_text("Username"));
                let password = ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .hint_text("Password"),
                );

                let submitted =
                    password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                let clicked = ui
                    .add_enabled(!self.snapshot.busy, egui::Button::new("Sign in"))
                    .clicked();

                if submitted || clicked {
                    self.runtime.dispatch(WorkspaceAction::Login {
                        username: self.username.clone(),
                        password: self.password.clone(),
                    });
                }
            });
        });
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("templates")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("Templates");
                    if ui.button("➕ New").clicked() {
                        self.runtime.dispatch(WorkspaceAction::New);
                    }
                });
                ui.separator();

                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.snapshot.templates.is_empty() {
                        ui.weak("No templates yet");
                    }
                    for template in &self.snapshot.templates {
                        let active = self.snapshot.selection.as_deref() == Some(&template.id);
                        if ui.selectable_label(active, &template.name).clicked() && !active {
                            self.runtime.dispatch(WorkspaceAction::Select {
                                id: template.id.clone(),
                            });
                        }
                    }
                });
            });
    }

    fn editor(&mut self, ui: &mut egui::Ui) {
        ui.heading(if self.snapshot.selection.is_some() {
            "Edit template"
        } else {
            "New template"
        });

        let mut changed = false;
        ui.horizontal(|ui| {
            ui.label("Name");
            changed |= ui
                .add(egui::TextEdit::singleline(&mut self.draft.name).desired_width(f32::INFINITY))
                .changed();
        });
        changed |= ui
            .add(
                egui::TextEdit::multiline(&mut self.draft.content)
                    .code_editor()
                    .desired_rows(12)
                    .desired_width(f32::INFINITY)
                    .hint_text("<h1>Hello {{NAME}}</h1>"),
            )
            .changed();

        if changed {
            self.runtime.dispatch(WorkspaceAction::EditDraft {
                draft: self.draft.clone(),
                revision: self.seen_revision,
            });
        }

        ui.horizontal(|ui| {
            if ui.button("💾 Save").clicked() {
                self.runtime.dispatch(WorkspaceAction::Save);
            }
            let can_delete =
                self.snapshot.selection.is_some() && self.snapshot.confirmation.is_none();
            if ui
                .add_enabled(can_delete, egui::Button::new("🗑 Delete"))
                .clicked()
            {
                self.runtime.dispatch(WorkspaceAction::Delete);
            }
        });
    }

    fn generator(&mut self, ui: &mut egui::Ui) {
        ui.heading("Generate");
        ui.add(
            egui::TextEdit::multiline(&mut self.input_text)
                .desired_rows(6)
                .desired_width(f32::INFINITY)
                .hint_text("**NAME:** value"),
        );
        if ui.button("⚙ Generate").clicked() {
            self.runtime.dispatch(WorkspaceAction::Generate {
                input_text: self.input_text.clone(),
            });
        }

        let Some(result) = &self.snapshot.result else {
            return;
        };

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(result.summary());
            if ui.button("📋 Copy").clicked() {
                self.runtime.dispatch(WorkspaceAction::CopyResult);
            }
            if ui.button("⬇ Download").clicked() {
                self.runtime.dispatch(WorkspaceAction::DownloadResult);
            }
        });
        egui::ScrollArea::vertical()
            .id_salt("result")
            .max_height(240.0)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut result.generated_html.as_str())
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
    }

    fn confirmation_dialog(&mut self, ctx: &egui::Context) {
        let Some(message) = self.snapshot.confirmation.clone() else {
            return;
        };

        egui::Window::new("Confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        self.runtime.dispatch(WorkspaceAction::Cancel);
                    }
                    if ui
                        .button(egui::RichText::new("Delete").color(egui::Color32::LIGHT_RED))
                        .clicked()
                    {
                        self.runtime.dispatch(WorkspaceAction::Confirm);
                    }
                });
            });
    }

    fn toast_overlay(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        self.toasts.prune(now);
        if self.toasts.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for toast in self.toasts.toasts() {
                    let color = match toast.severity {
                        Severity::Info => egui::Color32::from_rgb(52, 101, 164),
                        Severity::Success => egui::Color32::from_rgb(46, 125, 50),
                        Severity::Error => egui::Color32::from_rgb(183, 28, 28),
                    };

                    ui.scope(|ui| {
                        ui.multiply_opacity(self.toasts.opacity(toast, now));
                        egui::Frame::popup(ui.style()).fill(color).show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.colored_label(egui::Color32::WHITE, &toast.message);
                                if ui.small_button("✕").clicked() {
                                    dismissed = Some(toast.id);
                                }
                            });
                        });
                    });
                }
            });

        if let Some(id) = dismissed {
            self.toasts.dismiss(id);
        }
        ctx.request_repaint_after(Duration::from_millis(50));
    }
}

impl eframe::App for TemplateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_from_runtime(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📄 Template Workspace");
                if self.snapshot.busy {
                    ui.spinner();
                }
            });
        });

        if self.snapshot.needs_login() {
            self.login_view(ctx);
        } else {
            self.sidebar(ctx);
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.editor(ui);
                    ui.separator();
                    self.generator(ui);
                });
            });
            self.confirmation_dialog(ctx);
        }

        self.toast_overlay(ctx);
    }
}
