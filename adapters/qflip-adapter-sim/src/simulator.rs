//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use qflip_hal::{
    Backend, BackendAvailability, BackendConfig, BackendFactory, Capabilities, Counts,
    ExecutionResult, HalError, HalResult, Job, JobId, JobStatus, ValidationResult,
};
use qflip_ir::{Circuit, InstructionKind, Register};

use crate::statevector::Statevector;

/// Default qubit budget of the simulator.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Default shot limit per job.
pub const DEFAULT_MAX_SHOTS: u32 = 100_000;

/// Largest `max_qubits` accepted from configuration (64 GiB of amplitudes).
pub const MAX_SIMULABLE_QUBITS: u32 = 32;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// An instruction renumbered onto the simulated qubits.
struct Op {
    kind: InstructionKind,
    qubits: Vec<usize>,
    clbits: Vec<usize>,
}

/// A circuit reduced to the qubits it acts on.
///
/// Idle qubits stay in |0⟩ and never influence a measurement, so they are
/// dropped and the active ones renumbered `0..n` in ascending order.
/// Barriers are dropped too.
struct ShotPlan {
    num_qubits: usize,
    ops: Vec<Op>,
}

impl ShotPlan {
    fn new(circuit: &Circuit) -> Self {
        let active = circuit.active_qubits();
        let mut slot = vec![0usize; circuit.num_qubits()];
        for (i, q) in active.iter().enumerate() {
            slot[q.index()] = i;
        }

        let ops = circuit
            .instructions()
            .iter()
            .filter(|inst| !inst.is_barrier())
            .map(|inst| Op {
                kind: inst.kind,
                qubits: inst.qubits.iter().map(|q| slot[q.index()]).collect(),
                clbits: inst.clbits.iter().map(|c| c.index()).collect(),
            })
            .collect();

        Self {
            num_qubits: active.len(),
            ops,
        }
    }
}

/// Local simulator backend.
///
/// This backend simulates quantum circuits using a statevector simulation
/// over the qubits the circuit actually uses, up to `max_qubits` of them.
///
/// Measurement outcomes are written to the classical register and reported
/// with classical bit 0 as the rightmost character of each bitstring.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Capabilities, fixed at construction.
    capabilities: Capabilities,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// RNG seed; every job restarts from it when set.
    seed: Option<u64>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            capabilities: Capabilities::simulator(max_qubits),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed: None,
        }
    }

    /// Fix the RNG seed so repeated runs produce identical counts.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn jobs(&self) -> MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Reject submissions the simulator cannot run.
    fn check_submission(&self, circuit: &Circuit, shots: u32) -> HalResult<()> {
        let caps = &self.capabilities;

        let used = circuit.active_qubits().len();
        if used > caps.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "circuit acts on {used} qubits but simulator supports {}",
                caps.num_qubits
            )));
        }

        if let ValidationResult::Invalid { reasons } = caps.check(circuit) {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        if shots == 0 || shots > caps.max_shots {
            return Err(HalError::InvalidShots {
                shots,
                max_shots: caps.max_shots,
            });
        }

        Ok(())
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let start = Instant::now();

        let plan = ShotPlan::new(circuit);
        let num_clbits = circuit.num_clbits();

        let split = plan
            .ops
            .iter()
            .position(|op| matches!(op.kind, InstructionKind::Measure | InstructionKind::Reset))
            .unwrap_or(plan.ops.len());
        let (prefix, rest) = plan.ops.split_at(split);

        // Evolve the unitary prefix once; shots only replay what follows.
        let mut base = Statevector::new(plan.num_qubits)?;
        for op in prefix {
            if let InstructionKind::Gate(gate) = op.kind {
                base.apply_gate(gate, &op.qubits);
            }
        }

        let terminal_only = rest.iter().all(|op| op.kind == InstructionKind::Measure);
        debug!(
            declared = circuit.num_qubits(),
            simulated = base.num_qubits(),
            num_clbits,
            shots,
            terminal_only,
            "Starting simulation"
        );

        let mut rng = self.rng();
        let mut counts = Counts::new();
        let mut clbits = vec![false; num_clbits];

        for shot in 0..shots {
            clbits.fill(false);

            if terminal_only {
                let outcome = base.sample(&mut rng);
                for op in rest {
                    for (&q, &c) in op.qubits.iter().zip(&op.clbits) {
                        clbits[c] = outcome & (1 << q) != 0;
                    }
                }
            } else {
                let mut sv = base.clone();
                for op in rest {
                    match op.kind {
                        InstructionKind::Gate(gate) => sv.apply_gate(gate, &op.qubits),
                        InstructionKind::Measure => {
                            for (&q, &c) in op.qubits.iter().zip(&op.clbits) {
                                clbits[c] = sv.measure(q, &mut rng);
                            }
                        }
                        InstructionKind::Reset => {
                            for &q in &op.qubits {
                                sv.reset(q, &mut rng);
                            }
                        }
                        InstructionKind::Barrier => {}
                    }
                }
            }

            counts.insert(bitstring(&clbits), 1);

            if shot > 0 && shot % 10_000 == 0 {
                debug!("Completed {} shots", shot);
            }
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        Ok(ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .with_metadata(serde_json::json!({
                "backend": self.config.name,
                "circuit": circuit.name(),
                "num_qubits": circuit.num_qubits(),
                "simulated_qubits": plan.num_qubits,
                "num_clbits": num_clbits,
                "qreg_sizes": register_sizes(circuit.qregs()),
                "creg_sizes": register_sizes(circuit.cregs()),
                "seed": self.seed,
            })))
    }
}

/// Render the classical register with bit 0 rightmost.
fn bitstring(clbits: &[bool]) -> String {
    clbits
        .iter()
        .rev()
        .map(|&bit| if bit { '1' } else { '0' })
        .collect()
}

/// `[[name, size], ...]`, the register layout carried in result metadata.
fn register_sizes(registers: &[Register]) -> Vec<(&str, u32)> {
    registers
        .iter()
        .map(|reg| (reg.name.as_str(), reg.size))
        .collect()
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn availability(&self) -> HalResult<BackendAvailability> {
        Ok(BackendAvailability::always_available())
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        Ok(self.capabilities.check(circuit))
    }

    #[instrument(skip(self, circuit))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.check_submission(circuit, shots)?;

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), self.name(), shots);

        self.jobs()
            .insert(job_id.0.clone(), SimJob { job, result: None });

        debug!("Submitted job: {}", job_id);

        if let Some(sim_job) = self.jobs().get_mut(&job_id.0) {
            sim_job.job.transition(JobStatus::Running);
        }

        // Runs inline; the job is terminal by the time submit returns.
        let outcome = self.run_simulation(circuit, shots);

        let mut jobs = self.jobs();
        let Some(sim_job) = jobs.get_mut(&job_id.0) else {
            return Err(HalError::JobNotFound(job_id.0));
        };
        match outcome {
            Ok(result) => {
                if sim_job.job.transition(JobStatus::Completed) {
                    sim_job.result = Some(result);
                }
                Ok(job_id)
            }
            Err(err) => {
                warn!(%job_id, error = %err, "simulation failed");
                sim_job.job.transition(JobStatus::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let jobs = self.jobs();
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;

        match (&sim_job.job.status, &sim_job.result) {
            (JobStatus::Completed, Some(result)) => Ok(result.clone()),
            (JobStatus::Failed(msg), _) => Err(HalError::JobFailed(msg.clone())),
            (JobStatus::Cancelled, _) => Err(HalError::JobCancelled),
            (status, _) => Err(HalError::Backend(format!(
                "job {job_id} has no result yet (status: {status})"
            ))),
        }
    }

    async fn cancel(&self, job_id: &JobId) -> HalResult<()> {
        let mut jobs = self.jobs();
        let sim_job = jobs
            .get_mut(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;

        if !sim_job.job.transition(JobStatus::Cancelled) {
            warn!(%job_id, status = %sim_job.job.status, "job already finished; cancel ignored");
        }
        Ok(())
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = config.get_u32("max_qubits")?.unwrap_or(DEFAULT_MAX_QUBITS);
        let max_shots = config.get_u32("max_shots")?.unwrap_or(DEFAULT_MAX_SHOTS);
        let seed = config.get_u64("seed")?;

        if max_qubits > MAX_SIMULABLE_QUBITS {
            return Err(HalError::Configuration(format!(
                "'max_qubits' is {max_qubits}, the simulator handles at most {MAX_SIMULABLE_QUBITS}"
            )));
        }

        let mut capabilities = Capabilities::simulator(max_qubits).with_max_shots(max_shots);
        capabilities.name.clone_from(&config.name);

        Ok(Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            seed,
        })
    }
}
