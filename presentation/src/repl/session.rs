//! Interactive symptom-check session
//!
//! Reads lines with reedline, hands them to SymptomCheckController, and
//! renders the resulting UiEvents on a separate task. Submissions and
//! lab-report analyses run in the background so the prompt stays usable
//! while they are pending.

use super::presenter::ReplPresenter;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::path::PathBuf;
use std::sync::Arc;
use symptom_application::{
    CommandAction, FileLoaderPort, SymptomApi, SymptomCheckController, UiEvent,
};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const HISTORY_CAPACITY: usize = 500;

/// Interactive REPL over a [`SymptomCheckController`]
pub struct SymptomRepl<A: SymptomApi + 'static> {
    controller: SymptomCheckController<A>,
    file_loader: Arc<dyn FileLoaderPort>,
    history_file: Option<PathBuf>,
    backend_label: String,
    tasks: JoinSet<()>,
}

impl<A: SymptomApi + 'static> SymptomRepl<A> {
    pub fn new(controller: SymptomCheckController<A>, file_loader: Arc<dyn FileLoaderPort>) -> Self {
        Self {
            controller,
            file_loader,
            history_file: Self::default_history_file(),
            backend_label: String::new(),
            tasks: JoinSet::new(),
        }
    }

    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_file = path;
        }
        self
    }

    /// Shown in the welcome banner
    pub fn with_backend_label(mut self, label: impl Into<String>) -> Self {
        self.backend_label = label.into();
        self
    }

    fn default_history_file() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("symptom-checker").join("history.txt"))
    }

    fn create_editor(&self) -> Reedline {
        let editor = Reedline::create();
        let Some(path) = &self.history_file else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(HISTORY_CAPACITY, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(_) => editor,
        }
    }

    /// Run until `/quit` or end of input.
    ///
    /// `events` must be the receiving end of the channel the controller
    /// was built with. Requires a multi-threaded tokio runtime.
    pub async fn run(
        mut self,
        events: mpsc::UnboundedReceiver<UiEvent>,
        presenter: ReplPresenter,
    ) -> std::io::Result<()> {
        let renderer = tokio::spawn(render_events(events, presenter));
        let mut editor = self.create_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("symptoms".to_string()),
            DefaultPromptSegment::Empty,
        );

        ReplPresenter::render_welcome(&self.backend_label);

        let result = loop {
            let signal = tokio::task::block_in_place(|| editor.read_line(&prompt));
            while self.tasks.try_join_next().is_some() {}

            match signal {
                Ok(Signal::Success(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    if !self.handle_line(line).await {
                        break Ok(());
                    }
                }
                Ok(Signal::CtrlC) => {
                    println!("^C");
                    continue;
                }
                Ok(Signal::CtrlD) => {
                    println!("Bye!");
                    break Ok(());
                }
                Err(err) => break Err(err),
            }
        };

        // Let pending submissions finish so their results are shown
        while self.tasks.join_next().await.is_some() {}
        drop(self);
        let _ = renderer.await;
        result
    }

    /// Handle one line. Returns false when the session should end.
    async fn handle_line(&mut self, line: &str) -> bool {
        match self.controller.handle_command(line).await {
            CommandAction::Continue => {}
            CommandAction::Exit => return false,
            CommandAction::Submit => {
                let controller = self.controller.clone();
                self.tasks.spawn(async move {
                    let _ = controller.submit().await;
                });
            }
            CommandAction::AnalyzeLabReport => {
                let controller = self.controller.clone();
                self.tasks.spawn(async move {
                    let _ = controller.analyze_lab_report().await;
                });
            }
            CommandAction::StageFiles(paths) => {
                match self.file_loader.load_files(&paths).await {
                    Ok(handles) => {
                        let _ = self.controller.stage_files(handles);
                    }
                    Err(e) => println!("{} {}", "Error:".red().bold(), e),
                }
            }
        }
        true
    }
}

/// Render events until every sender is gone
async fn render_events(mut events: mpsc::UnboundedReceiver<UiEvent>, mut presenter: ReplPresenter) {
    while let Some(event) = events.recv().await {
        presenter.render(&event);
    }
}
