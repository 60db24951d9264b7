use indicatif::{ProgressBar, ProgressStyle};
use ragassist_retrieval::{IngestPhase, IngestProgress};
use std::time::Duration;

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar for determinate progress
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg}\n[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░ ");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Finish a progress bar with success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

/// Finish a progress bar with error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✗ {}", message));
}

/// Renders ingestion progress: a spinner while loading, a bar while embedding
pub struct IngestProgressDisplay {
    loading: ProgressBar,
    embeddings: Option<ProgressBar>,
    hidden: bool,
}

impl IngestProgressDisplay {
    pub fn new(hidden: bool) -> Self {
        let loading = if hidden {
            ProgressBar::hidden()
        } else {
            create_spinner("Loading documents...")
        };
        Self { loading, embeddings: None, hidden }
    }

    pub fn update(&mut self, progress: IngestProgress) {
        match progress.phase {
            IngestPhase::LoadingFiles => self.loading.set_message(progress.message),
            IngestPhase::GeneratingEmbeddings => {
                if self.embeddings.is_none() {
                    finish_success(&self.loading, "Documents loaded");
                    self.embeddings = Some(if self.hidden {
                        ProgressBar::hidden()
                    } else {
                        create_progress_bar(progress.total as u64, "Generating embeddings")
                    });
                }
                if let Some(bar) = &self.embeddings {
                    bar.set_position(progress.current as u64);
                }
            }
            IngestPhase::StoringRecords => {
                if let Some(bar) = self.embeddings.take() {
                    finish_success(&bar, "Embeddings generated");
                }
                self.loading.set_message(progress.message);
            }
        }
    }

    pub fn finish(&mut self, message: &str) {
        if let Some(bar) = self.embeddings.take() {
            finish_success(&bar, "Embeddings generated");
        }
        finish_success(&self.loading, message);
    }

    pub fn fail(&mut self, message: &str) {
        if let Some(bar) = self.embeddings.take() {
            bar.abandon();
        }
        finish_error(&self.loading, message);
    }
}
