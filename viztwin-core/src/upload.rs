/// Simulated scan upload progress, advanced by a fixed-interval timer
use std::time::Duration;

use crate::config::ViewerConfig;

/// Result of a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Progress advanced; keep the timer running
    Advanced(u8),
    /// Progress was complete; cancel the timer
    Finished,
    /// No upload in progress
    Idle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSimulation {
    processing: bool,
    progress: u8,
    step: u8,
    interval: Duration,
}

impl UploadSimulation {
    pub fn new(step: u8, interval: Duration) -> Self {
        Self {
            processing: false,
            progress: 0,
            step,
            interval,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.upload_step, config.upload_tick())
    }

    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Percentage in `0..=100`
    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Begin an upload. Returns false, leaving state alone, while one is
    /// already running.
    pub fn start(&mut self) -> bool {
        if self.processing {
            return false;
        }
        self.processing = true;
        self.progress = 0;
        log::info!("upload started");
        true
    }

    /// Advance one timer period. Progress holds at 100 for one tick before
    /// the simulation reports it is finished.
    pub fn tick(&mut self) -> Tick {
        if !self.processing {
            return Tick::Idle;
        }
        if self.progress >= 100 {
            self.processing = false;
            self.progress = 100;
            log::info!("upload finished");
            return Tick::Finished;
        }
        self.progress = self.progress.saturating_add(self.step).min(100);
        Tick::Advanced(self.progress)
    }
}

impl Default for UploadSimulation {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_to_completion() {
        let mut upload = UploadSimulation::default();
        assert_eq!(upload.tick(), Tick::Idle);
        assert!(upload.start());

        for expected in (10..=100).step_by(10) {
            assert_eq!(upload.tick(), Tick::Advanced(expected as u8));
            assert!(upload.is_processing());
        }
        assert_eq!(upload.tick(), Tick::Finished);
        assert!(!upload.is_processing());
        assert_eq!(upload.progress(), 100);
        assert_eq!(upload.tick(), Tick::Idle);
    }

    #[test]
    fn test_start_ignored_while_processing() {
        let mut upload = UploadSimulation::default();
        upload.start();
        upload.tick();
        assert!(!upload.start());
        assert_eq!(upload.progress(), 10);
    }

    #[test]
    fn test_restart_resets_progress() {
        let mut upload = UploadSimulation::new(50, Duration::from_millis(1));
        upload.start();
        while upload.tick() != Tick::Finished {}
        assert!(upload.start());
        assert_eq!(upload.progress(), 0);
    }

    #[test]
    fn test_uneven_step_caps_at_hundred() {
        let mut upload = UploadSimulation::new(30, Duration::from_millis(1));
        upload.start();
        let ticks: Vec<Tick> = std::iter::from_fn(|| match upload.tick() {
            Tick::Idle => None,
            tick => Some(tick),
        })
        .collect();
        assert_eq!(
            ticks,
            vec![
                Tick::Advanced(30),
                Tick::Advanced(60),
                Tick::Advanced(90),
                Tick::Advanced(100),
                Tick::Finished
            ]
        );
    }
}
