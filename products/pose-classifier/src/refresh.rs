use crate::dashboard::Dashboard;
use stance_camera::{Camera, FrameSource};
use stance_infer::{prepare, Classifier, Prediction};
use std::ops::ControlFlow;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Refresh timer: one tick per `period`. Ticks missed while a cycle runs are dropped, and the
/// next cycle waits for the next period boundary.
pub fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

/// Where the loop is within one refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Acquiring,
    Preprocessing,
    Classifying,
    Rendering,
}

/// Result of one refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The camera had no usable frame; nothing was redrawn.
    NoFrame,
    /// A frame arrived but preprocessing or inference failed; nothing was redrawn.
    Failed,
    Rendered(Prediction),
}

/// Counters over the lifetime of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    pub cycles: u64,
    pub rendered: u64,
    pub no_frame: u64,
    pub failed: u64,
}

/// Drives acquire, preprocess, classify and render once per tick.
///
/// Cycles run to completion one at a time. A cycle that yields no prediction leaves every widget
/// as the previous cycle left it.
pub struct RefreshLoop<C: Camera> {
    source: FrameSource<C>,
    classifier: Classifier,
    dashboard: Dashboard,
    phase: CyclePhase,
    trace: Vec<CyclePhase>,
    stats: CycleStats,
}

impl<C: Camera> RefreshLoop<C> {
    pub fn new(source: FrameSource<C>, classifier: Classifier, dashboard: Dashboard) -> Self {
        Self {
            source,
            classifier,
            dashboard,
            phase: CyclePhase::Idle,
            trace: Vec::new(),
            stats: CycleStats::default(),
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Phases entered during the most recent cycle, ending with `Idle`.
    pub fn last_trace(&self) -> &[CyclePhase] {
        &self.trace
    }

    pub fn stats(&self) -> CycleStats {
        self.stats
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn source(&self) -> &FrameSource<C> {
        &self.source
    }

    fn enter(&mut self, phase: CyclePhase) {
        log::trace!("cycle {}: {:?} -> {:?}", self.stats.cycles, self.phase, phase);
        self.phase = phase;
        self.trace.push(phase);
    }

    /// Runs one full cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.trace.clear();
        self.stats.cycles += 1;

        let outcome = self.cycle().await;
        match &outcome {
            CycleOutcome::NoFrame => self.stats.no_frame += 1,
            CycleOutcome::Failed => self.stats.failed += 1,
            CycleOutcome::Rendered(_) => self.stats.rendered += 1,
        }
        self.enter(CyclePhase::Idle);
        outcome
    }

    async fn cycle(&mut self) -> CycleOutcome {
        self.enter(CyclePhase::Acquiring);
        let Some(frame) = self.source.acquire().await else {
            return CycleOutcome::NoFrame;
        };

        self.enter(CyclePhase::Preprocessing);
        let input = match prepare(&frame) {
            Ok(input) => input,
            Err(e) => {
                log::warn!("preprocessing failed, skipping cycle: {}", e);
                return CycleOutcome::Failed;
            }
        };

        self.enter(CyclePhase::Classifying);
        let prediction = match self.classifier.classify(input) {
            Ok(prediction) => prediction,
            Err(e) => {
                log::warn!("classification failed, skipping cycle: {}", e);
                return CycleOutcome::Failed;
            }
        };
        log::info!("prediction {:?}", prediction.scores());
        log::info!(
            "class {}, confidence {:.2}",
            prediction.label(),
            prediction.confidence()
        );

        self.enter(CyclePhase::Rendering);
        if let Err(e) = self.dashboard.show_frame(&frame) {
            log::warn!("could not paint frame: {}", e);
        }
        self.dashboard
            .show_prediction(&prediction, self.classifier.labels());
        CycleOutcome::Rendered(prediction)
    }

    /// Runs one cycle per tick of `ticker` until `present` breaks or fails.
    ///
    /// `present` is called after every cycle, rendered or not, to show the dashboard and handle
    /// input.
    pub async fn run<E>(
        &mut self,
        ticker: &mut Interval,
        mut present: impl FnMut(&mut Dashboard) -> Result<ControlFlow<()>, E>,
    ) -> Result<(), E> {
        loop {
            ticker.tick().await;
            self.run_cycle().await;
            if present(&mut self.dashboard)?.is_break() {
                return Ok(());
            }
        }
    }

    /// Releases the camera. Safe to call more than once; dropping the loop does the same.
    pub fn shutdown(&mut self) {
        self.source.release();
    }
}
