// file: src/pipeline/progress.rs
// description: stage progress bar and run statistics
// reference: uses indicatif for progress bars and tracks stage metrics

use crate::utils::logging::format_step;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stages_planned: usize,
    pub stages_completed: usize,
    pub stages_failed: usize,
    pub files_archived: usize,
    pub final_output: Option<PathBuf>,
    pub duration_secs: u64,
}

impl RunSummary {
    pub fn new(stages_planned: usize) -> Self {
        Self {
            stages_planned,
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.stages_failed == 0 && self.stages_completed == self.stages_planned
    }

    pub fn completion_rate(&self) -> f64 {
        if self.stages_planned == 0 {
            return 0.0;
        }
        (self.stages_completed as f64 / self.stages_planned as f64) * 100.0
    }
}

pub struct StageProgress {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    summary: RunSummary,
    start_time: Instant,
}

impl StageProgress {
    pub fn with_color(total_stages: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();
        Self::build(multi_progress, total_stages, colored)
    }

    /// Tracks statistics without drawing anything.
    pub fn hidden(total_stages: usize) -> Self {
        let multi_progress = MultiProgress::with_draw_target(ProgressDrawTarget::hidden());
        Self::build(multi_progress, total_stages, false)
    }

    fn build(multi_progress: MultiProgress, total_stages: usize, colored: bool) -> Self {
        let main_bar = create_progress_bar(&multi_progress, total_stages as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self {
            main_bar,
            detail_bar,
            summary: RunSummary::new(total_stages),
            start_time: Instant::now(),
        }
    }

    pub fn start_stage(&self, step: usize, total: usize, label: &str) {
        self.main_bar.println(format_step(step, total, label));
        self.main_bar.set_message(label.to_string());
    }

    pub fn stage_completed(&mut self, archived: usize, output: Option<PathBuf>) {
        self.summary.stages_completed += 1;
        self.summary.files_archived += archived;
        if output.is_some() {
            self.summary.final_output = output;
        }
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn stage_failed(&mut self) {
        self.summary.stages_failed += 1;
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Pipeline complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            duration_secs: self.start_time.elapsed().as_secs(),
            ..self.summary.clone()
        }
    }

    fn update_detail_bar(&self) {
        let message = format!(
            "Archived files: {} | Failed stages: {}",
            self.summary.files_archived, self.summary.stages_failed
        );

        self.detail_bar.set_message(message);
    }
}

impl Drop for StageProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    if colored {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("█▓▒░"),
        );
    } else {
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:30}] {pos}/{len} {msg}")
                .expect("Failed to create progress bar template")
                .progress_chars("=>-"),
        );
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    let style = ProgressStyle::default_bar()
        .template("{msg}")
        .expect("Failed to create detail bar template");
    bar.set_style(style);
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_summary_rates() {
        let mut summary = RunSummary::new(4);
        summary.stages_completed = 3;
        assert_eq!(summary.completion_rate(), 75.0);
        assert!(!summary.is_clean());

        summary.stages_completed = 4;
        assert!(summary.is_clean());
        assert_eq!(RunSummary::new(0).completion_rate(), 0.0);
    }

    #[test]
    fn test_progress_tracks_stages() {
        let mut progress = StageProgress::hidden(3);

        progress.start_stage(1, 3, "basic filter");
        progress.stage_completed(2, Some(PathBuf::from("basic_filter/filtered_basic.smi")));
        progress.stage_completed(1, None);

        let summary = progress.summary();
        assert_eq!(summary.stages_completed, 2);
        assert_eq!(summary.files_archived, 3);
        assert_eq!(
            summary.final_output,
            Some(PathBuf::from("basic_filter/filtered_basic.smi"))
        );
    }

    #[test]
    fn test_progress_failures() {
        let mut progress = StageProgress::hidden(2);
        progress.stage_failed();
        progress.stage_failed();

        assert_eq!(progress.summary().stages_failed, 2);
    }
}
