//! Bridges the async controller to an immediate-mode UI.
//!
//! The controller lives on its own thread with a current-thread Tokio
//! runtime. The UI sends actions over a channel and reads back a snapshot
//! plus a drained outbox of side effects each frame.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tokio::sync::mpsc;

use crate::notifications::Severity;
use crate::session::SessionGuard;
use crate::workspace::{
    Draft, GenerationResult, Template, TemplateApi, UiEffects, WorkspaceAction,
    WorkspaceController,
};

/// Read-only copy of the controller state, published after every batch.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceSnapshot {
    pub templates: Vec<Template>,
    pub selection: Option<String>,
    pub draft: Draft,
    pub draft_revision: u64,
    pub confirmation: Option<String>,
    pub result: Option<GenerationResult>,
    pub authenticated: bool,
    pub busy: bool,
    /// False until the worker has published once.
    pub ready: bool,
}

impl WorkspaceSnapshot {
    /// Whether the login view should be showing. Follows the published
    /// session state only, so a redirect cannot be undone by a snapshot that
    /// predates it.
    pub fn needs_login(&self) -> bool {
        self.ready && !self.authenticated
    }
}

/// Effects the UI thread must carry out itself.
#[derive(Debug, Default)]
pub struct UiOutbox {
    pub notifications: Vec<(String, Severity)>,
    pub clipboard: Vec<String>,
    pub login_requested: bool,
}

#[derive(Debug, Default)]
struct Shared {
    snapshot: WorkspaceSnapshot,
    outbox: UiOutbox,
}

/// `UiEffects` for the desktop app. Downloads are written straight into the
/// configured directory; everything else is queued for the UI thread.
pub struct ChannelEffects {
    shared: Arc<Mutex<Shared>>,
    download_dir: PathBuf,
    repaint: Box<dyn Fn() + Send>,
}

impl ChannelEffects {
    fn with_outbox(&self, f: impl FnOnce(&mut UiOutbox)) {
        if let Ok(mut shared) = self.shared.lock() {
            f(&mut shared.outbox);
        }
        (self.repaint)();
    }
}

impl UiEffects for ChannelEffects {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.with_outbox(|outbox| outbox.notifications.push((message.to_string(), severity)));
    }

    fn present_result(&mut self, result: &GenerationResult) {
        // The snapshot carries the result; nothing to queue.
        log::debug!("Result ready: {}", result.summary());
    }

    fn copy_to_clipboard(&mut self, text: &str) -> anyhow::Result<()> {
        self.with_outbox(|outbox| outbox.clipboard.push(text.to_string()));
        Ok(())
    }

    fn trigger_download(&mut self, file_name: &str, contents: &str) -> anyhow::Result<()> {
        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(file_name);
        fs::write(&path, contents)?;
        log::info!("Wrote {}", path.display());
        Ok(())
    }

    fn redirect_to_login(&mut self) {
        self.with_outbox(|outbox| outbox.login_requested = true);
    }
}

pub struct WorkspaceRuntime {
    sender: mpsc::UnboundedSender<WorkspaceAction>,
    shared: Arc<Mutex<Shared>>,
    _worker: JoinHandle<()>,
}

impl WorkspaceRuntime {
    /// Starts the worker. `repaint` is called whenever new state is
    /// published so an idle UI wakes up.
    pub fn spawn<A>(
        api: A,
        session: SessionGuard,
        download_dir: PathBuf,
        repaint: impl Fn() + Send + Clone + 'static,
    ) -> anyhow::Result<Self>
    where
        A: TemplateApi + 'static,
    {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let shared = Arc::new(Mutex::new(Shared::default()));
        let (sender, mut receiver) = mpsc::unbounded_channel::<WorkspaceAction>();

        let effects = ChannelEffects {
            shared: shared.clone(),
            download_dir,
            repaint: Box::new(repaint.clone()),
        };
        let worker_shared = shared.clone();

        let worker = std::thread::Builder::new()
            .name("workspace-controller".to_string())
            .spawn(move || {
                let mut controller = WorkspaceController::new(api, effects, session);
                runtime.block_on(async move {
                    publish(&worker_shared, &controller, true);
                    controller.start().await;
                    publish(&worker_shared, &controller, false);
                    repaint();

                    while let Some(action) = receiver.recv().await {
                        let mut busy = action.requires_network();
                        controller.dispatch(action);
                        while let Ok(next) = receiver.try_recv() {
                            busy |= next.requires_network();
                            controller.dispatch(next);
                        }

                        if busy {
                            publish(&worker_shared, &controller, true);
                            repaint();
                        }
                        controller.run_pending().await;
                        publish(&worker_shared, &controller, false);
                        repaint();
                    }
                    log::debug!("Action channel closed, controller stopping");
                });
            })?;

        Ok(Self {
            sender,
            shared,
            _worker: worker,
        })
    }

    pub fn dispatch(&self, action: WorkspaceAction) {
        if self.sender.send(action).is_err() {
            log::error!("Workspace controller is no longer running");
        }
    }

    pub fn snapshot(&self) -> WorkspaceSnapshot {
        self.shared
            .lock()
            .map(|shared| shared.snapshot.clone())
            .unwrap_or_default()
    }

    /// Hands over everything queued for the UI since the last call.
    pub fn take_outbox(&self) -> UiOutbox {
        self.shared
            .lock()
            .map(|mut shared| std::mem::take(&mut shared.outbox))
            .unwrap_or_default()
    }
}

fn publish<A: TemplateApi>(
    shared: &Arc<Mutex<Shared>>,
    controller: &WorkspaceController<A, ChannelEffects>,
    busy: bool,
) {
    let state = controller.state();
    let snapshot = WorkspaceSnapshot {
        templates: state.store.templates().to_vec(),
        selection: state.store.selection().map(str::to_string),
        draft: state.store.draft().clone(),
        draft_revision: state.store.draft_revision(),
        confirmation: state.confirmation.message().map(str::to_string),
        result: state.result.clone(),
        authenticated: state.session.is_authenticated(),
        busy,
        ready: true,
    };

    if let Ok(mut shared) = shared.lock() {
        shared.snapshot = snapshot;
    }
}
