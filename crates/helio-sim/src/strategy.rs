//! Where orbital positions get computed.
//!
//! [`InProcessStrategy`] steps the world directly. [`OffloadedStrategy`]
//! runs the integrator on a worker thread that owns its own copy of the
//! orbital state and streams back poses over a channel; the main thread
//! applies whatever has arrived each tick, last write wins.
//!
//! Any out-of-band change to the world's orbits (a reset) must be followed by
//! [`PositionComputeStrategy::resync`], or a worker copy will overwrite it.

use std::collections::VecDeque;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, unbounded};
use helio_orbit::{BodyPose, OrbitalState, SimulationWorld};
use tracing::{debug, info};

use crate::error::SimError;

/// What one strategy call did to the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Body poses written into the world.
    pub poses_applied: usize,
    /// Pose batches applied. Each batch records one trail point per body.
    pub batches_applied: usize,
}

pub trait PositionComputeStrategy {
    fn name(&self) -> &'static str;

    /// Advance the world's orbits by `sim_dt` scaled seconds, or apply the
    /// results of earlier advances.
    fn advance(&mut self, world: &mut SimulationWorld, sim_dt: f64)
    -> Result<StepOutcome, SimError>;

    /// Scaled seconds handed to [`advance`](Self::advance) that have not been
    /// written into the world yet. After an error this includes the failed
    /// call's `sim_dt` unless it was applied.
    fn unapplied_time(&self) -> f64;

    /// Adopt the world's current orbital state, discarding results computed
    /// from an older one.
    fn resync(&mut self, _world: &SimulationWorld) -> Result<(), SimError> {
        Ok(())
    }
}

/// Steps the integrator on the calling thread. Every call updates every body.
#[derive(Clone, Copy, Debug, Default)]
pub struct InProcessStrategy;

impl PositionComputeStrategy for InProcessStrategy {
    fn name(&self) -> &'static str {
        "in-process"
    }

    fn advance(
        &mut self,
        world: &mut SimulationWorld,
        sim_dt: f64,
    ) -> Result<StepOutcome, SimError> {
        world.advance(sim_dt);
        Ok(StepOutcome {
            poses_applied: world.len(),
            batches_applied: 1,
        })
    }

    fn unapplied_time(&self) -> f64 {
        0.0
    }
}

enum WorkerRequest {
    Advance { sim_dt: f64 },
    Reset { epoch: u64, state: OrbitalState },
    Shutdown,
}

struct PoseBatch {
    /// Reset generation the poses were computed in.
    epoch: u64,
    poses: Vec<BodyPose>,
}

/// Computes positions on a dedicated `helio-orbit-worker` thread.
///
/// Results lag requests by at least one tick; the world only changes when a
/// batch arrives.
pub struct OffloadedStrategy {
    requests: Sender<WorkerRequest>,
    results: Receiver<PoseBatch>,
    handle: Option<JoinHandle<()>>,
    epoch: u64,
    /// `sim_dt` of every request not yet answered, oldest first.
    pending: VecDeque<f64>,
}

impl OffloadedStrategy {
    /// Spawn the worker with its own copy of `state`.
    pub fn spawn(state: OrbitalState) -> Result<Self, SimError> {
        let (request_tx, request_rx) = unbounded::<WorkerRequest>();
        let (result_tx, result_rx) = unbounded::<PoseBatch>();

        let handle = std::thread::Builder::new()
            .name("helio-orbit-worker".into())
            .spawn(move || worker_loop(state, request_rx, result_tx))
            .map_err(|e| SimError::WorkerUnavailable(e.to_string()))?;

        info!("Spawned background orbit worker");
        Ok(Self {
            requests: request_tx,
            results: result_rx,
            handle: Some(handle),
            epoch: 0,
            pending: VecDeque::new(),
        })
    }

    /// Requests sent that have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Block until every outstanding request has been applied, or `timeout`
    /// passes. Returns what was applied.
    pub fn flush(
        &mut self,
        world: &mut SimulationWorld,
        timeout: Duration,
    ) -> Result<StepOutcome, SimError> {
        let deadline = Instant::now() + timeout;
        let mut outcome = StepOutcome::default();
        while !self.pending.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.results.recv_timeout(remaining) {
                Ok(result) => self.apply(world, result, &mut outcome),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(SimError::WorkerUnavailable(
                        "result channel disconnected".into(),
                    ));
                }
            }
        }
        Ok(outcome)
    }

    fn apply(&mut self, world: &mut SimulationWorld, batch: PoseBatch, outcome: &mut StepOutcome) {
        if batch.epoch != self.epoch {
            debug!(epoch = batch.epoch, "Dropped pose batch from before a reset");
            return;
        }
        self.pending.pop_front();
        outcome.poses_applied += world.apply_poses(&batch.poses);
        outcome.batches_applied += 1;
    }

    /// Stop the worker and wait for it to exit.
    pub fn shutdown(&mut self) {
        let _ = self.requests.send(WorkerRequest::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
            debug!("Background orbit worker stopped");
        }
    }
}

impl PositionComputeStrategy for OffloadedStrategy {
    fn name(&self) -> &'static str {
        "offloaded"
    }

    fn advance(
        &mut self,
        world: &mut SimulationWorld,
        sim_dt: f64,
    ) -> Result<StepOutcome, SimError> {
        self.pending.push_back(sim_dt);
        self.requests
            .send(WorkerRequest::Advance { sim_dt })
            .map_err(|_| SimError::WorkerUnavailable("request channel disconnected".into()))?;

        let mut outcome = StepOutcome::default();
        loop {
            match self.results.try_recv() {
                Ok(result) => self.apply(world, result, &mut outcome),
                Err(TryRecvError::Empty) => return Ok(outcome),
                Err(TryRecvError::Disconnected) => {
                    return Err(SimError::WorkerUnavailable(
                        "result channel disconnected".into(),
                    ));
                }
            }
        }
    }

    fn unapplied_time(&self) -> f64 {
        self.pending.iter().sum()
    }

    fn resync(&mut self, world: &SimulationWorld) -> Result<(), SimError> {
        self.epoch += 1;
        let dropped = self.pending.len();
        self.pending.clear();
        self.requests
            .send(WorkerRequest::Reset {
                epoch: self.epoch,
                state: world.orbital_state(),
            })
            .map_err(|_| SimError::WorkerUnavailable("request channel disconnected".into()))?;
        debug!(epoch = self.epoch, dropped, "Resynced background orbit worker");
        Ok(())
    }
}

impl Drop for OffloadedStrategy {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(
    mut state: OrbitalState,
    requests: Receiver<WorkerRequest>,
    results: Sender<PoseBatch>,
) {
    let mut epoch = 0;
    while let Ok(request) = requests.recv() {
        match request {
            WorkerRequest::Advance { sim_dt } => {
                state.advance(sim_dt);
                let batch = PoseBatch {
                    epoch,
                    poses: state.poses(),
                };
                if results.send(batch).is_err() {
                    break;
                }
            }
            WorkerRequest::Reset {
                epoch: next,
                state: fresh,
            } => {
                epoch = next;
                state = fresh;
            }
            WorkerRequest::Shutdown => break,
        }
    }
}
