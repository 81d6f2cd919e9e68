// crates/verdant-core/src/runtime/engine.rs
// ============================================================================
// Module: Verdant Orchestrator Engine
// Description: Step dispatch, checkpointing, interrupts, and event streaming.
// Purpose: Drive pipeline threads deterministically with durable suspension.
// Dependencies: rand, serde_json, tokio, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! The orchestrator is the single canonical execution path for Verdant
//! threads. A thread id is an exclusive execution key: threads run
//! concurrently, but one thread never has two steps in flight. After every
//! step the merged state is checkpointed before its events become observable,
//! so a thread suspended at the governor can resume in another process with
//! identical dispatches.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::time::Instant;

use rand::RngCore;
use rand::rngs::OsRng;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

use crate::core::AgentCard;
use crate::core::AgentId;
use crate::core::CheckpointRecord;
use crate::core::EventKind;
use crate::core::ExecutionState;
use crate::core::HumanResponse;
use crate::core::IdentityError;
use crate::core::IdentityStore;
use crate::core::Phase;
use crate::core::RunStatus;
use crate::core::StateDelta;
use crate::core::ThreadId;
use crate::core::UiEvent;
use crate::core::VerifiedTrace;
use crate::core::all_agent_cards;
use crate::core::orchestrator_card;
use crate::core::verify_trace;
use crate::interfaces::CheckpointStore;
use crate::interfaces::Clock;
use crate::interfaces::StoreError;
use crate::runtime::context::AdapterSet;
use crate::runtime::context::RuntimeConfig;
use crate::runtime::context::StepContext;
use crate::runtime::context::StepError;
use crate::runtime::context::StepResult;
use crate::runtime::graph::START_NODE;
use crate::runtime::graph::node_spec;
use crate::runtime::router::Route;
use crate::runtime::span::SpanOutcome;
use crate::runtime::span::StepSpan;

// ============================================================================
// SECTION: Stream Events
// ============================================================================

/// One envelope delivered to thread observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Envelope event type.
    pub event: EventKind,
    /// Structured payload.
    pub payload: Value,
}

// ============================================================================
// SECTION: Thread Status
// ============================================================================

/// Snapshot of a thread's externally observable status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadStatus {
    /// Thread identifier.
    pub thread_id: ThreadId,
    /// Current pipeline phase.
    pub phase: Phase,
    /// Whether the thread has pending dispatches.
    pub is_running: bool,
    /// Whether the thread is suspended at the governor breakpoint.
    pub is_interrupted: bool,
    /// Anomalies in the latest scan.
    pub anomaly_count: u32,
    /// Compliance status string, `pending` before evaluation.
    pub compliance_status: String,
    /// Latest projected monthly savings in USD.
    pub monthly_savings: f64,
    /// Latest composite risk score.
    pub risk_score: f64,
    /// Settlements recorded so far.
    pub settlement_count: u32,
    /// Latest clinical observation status, `pending` before auditing.
    pub fhir_audit_status: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Orchestrator execution errors.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Thread already exists.
    #[error("thread already exists: {0}")]
    ThreadExists(String),
    /// Thread not found.
    #[error("thread not found: {0}")]
    ThreadNotFound(String),
    /// Resume was called without a pending interrupt.
    #[error("no pending interrupt for thread: {0}")]
    NoPendingInterrupt(String),
    /// ROI adjustment outside the accepted band.
    #[error("roi adjustment {0} outside [0.5, 1.5]")]
    InvalidAdjustment(f64),
    /// Internal lock was poisoned.
    #[error("orchestrator thread registry poisoned")]
    RegistryPoisoned,
    /// Checkpoint store error.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Identity store error.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

// ============================================================================
// SECTION: Thread Cells
// ============================================================================

/// In-process bookkeeping for one thread.
struct ThreadCell {
    /// Per-thread exclusive execution lock.
    exec: Mutex<()>,
    /// Cooperative cancellation flag checked between steps.
    cancel_requested: AtomicBool,
    /// Journal of every envelope emitted, in order, for subscriber replay.
    journal: Mutex<Vec<StreamEvent>>,
    /// Live subscriber channels.
    subscribers: Mutex<Vec<UnboundedSender<StreamEvent>>>,
    /// Dispatch log of step spans.
    spans: Mutex<Vec<StepSpan>>,
}

impl ThreadCell {
    /// Creates empty bookkeeping for a thread.
    fn new() -> Self {
        Self {
            exec: Mutex::new(()),
            cancel_requested: AtomicBool::new(false),
            journal: Mutex::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
            spans: Mutex::new(Vec::new()),
        }
    }
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Orchestrator driving pipeline threads over an injectable checkpoint store.
pub struct Orchestrator<S> {
    /// Checkpoint store implementation.
    store: S,
    /// Agent identity store.
    identity: Arc<IdentityStore>,
    /// External adapters.
    adapters: AdapterSet,
    /// Time source.
    clock: Arc<dyn Clock + Send + Sync>,
    /// Runtime configuration.
    config: RuntimeConfig,
    /// Per-thread bookkeeping cells.
    threads: Mutex<BTreeMap<ThreadId, Arc<ThreadCell>>>,
}

impl<S: CheckpointStore> Orchestrator<S> {
    /// Creates a new orchestrator and ensures all agent identities exist.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::Identity`] when key provisioning fails.
    pub fn new(
        store: S,
        identity: Arc<IdentityStore>,
        adapters: AdapterSet,
        clock: Arc<dyn Clock + Send + Sync>,
        config: RuntimeConfig,
    ) -> Result<Self, OrchestratorError> {
        identity.ensure_all()?;
        Ok(Self {
            store,
            identity,
            adapters,
            clock,
            config,
            threads: Mutex::new(BTreeMap::new()),
        })
    }

    /// Starts a new thread and drives it to its first blocking point.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::ThreadExists`] when the thread id is
    /// already checkpointed, or a store error.
    pub fn start(
        &self,
        initial_state: ExecutionState,
        thread_id: Option<ThreadId>,
    ) -> Result<ThreadId, OrchestratorError> {
        let thread_id = thread_id.unwrap_or_else(generate_thread_id);
        if self.store.latest(&thread_id)?.is_some() {
            return Err(OrchestratorError::ThreadExists(thread_id.to_string()));
        }

        let cell = self.cell(&thread_id)?;
        let guard = lock_exec(&cell);

        self.store.append(
            &thread_id,
            &CheckpointRecord {
                step_index: 0,
                state: initial_state,
                next: Some(START_NODE),
                pending_interrupt: None,
                status: RunStatus::Running,
            },
        )?;

        self.drive_locked(&thread_id, &cell, None)?;
        drop(guard);
        Ok(thread_id)
    }

    /// Resumes a thread suspended at the governor breakpoint.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::InvalidAdjustment`] for an out-of-band
    /// adjustment and [`OrchestratorError::NoPendingInterrupt`] when the
    /// thread is not waiting.
    pub fn resume(
        &self,
        thread_id: &ThreadId,
        response: HumanResponse,
    ) -> Result<(), OrchestratorError> {
        if !(0.5..=1.5).contains(&response.roi_adjustment) {
            return Err(OrchestratorError::InvalidAdjustment(response.roi_adjustment));
        }

        let cell = self.cell(thread_id)?;
        let guard = lock_exec(&cell);

        let checkpoint = self
            .store
            .latest(thread_id)?
            .ok_or_else(|| OrchestratorError::ThreadNotFound(thread_id.to_string()))?;
        if checkpoint.status != RunStatus::Waiting || checkpoint.pending_interrupt.is_none() {
            return Err(OrchestratorError::NoPendingInterrupt(thread_id.to_string()));
        }

        self.drive_locked(thread_id, &cell, Some(response))?;
        drop(guard);
        Ok(())
    }

    /// Requests cooperative cancellation of a thread.
    ///
    /// The current step always runs to completion; cancellation takes effect
    /// at the next step boundary, or immediately for parked threads.
    ///
    /// # Errors
    ///
    /// Returns a store error when finalizing a parked thread fails.
    pub fn cancel(&self, thread_id: &ThreadId) -> Result<(), OrchestratorError> {
        let cell = self.cell(thread_id)?;
        cell.cancel_requested.store(true, Ordering::SeqCst);

        // A parked thread has no dispatch in flight; finalize right away.
        if let Ok(guard) = cell.exec.try_lock() {
            self.finalize_cancel(thread_id, &cell)?;
            drop(guard);
        }
        Ok(())
    }

    /// Returns the observable status snapshot for a thread.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::ThreadNotFound`] for unknown threads.
    pub fn status(&self, thread_id: &ThreadId) -> Result<ThreadStatus, OrchestratorError> {
        let checkpoint = self
            .store
            .latest(thread_id)?
            .ok_or_else(|| OrchestratorError::ThreadNotFound(thread_id.to_string()))?;
        let state = &checkpoint.state;

        Ok(ThreadStatus {
            thread_id: thread_id.clone(),
            phase: state.current_phase,
            is_running: checkpoint.status == RunStatus::Running,
            is_interrupted: checkpoint.status == RunStatus::Waiting,
            anomaly_count: u32::try_from(state.anomalies.len()).unwrap_or(u32::MAX),
            compliance_status: state
                .compliance_report
                .as_ref()
                .map_or_else(|| "pending".to_string(), |report| report.status.to_string()),
            monthly_savings: state
                .simulation_result
                .as_ref()
                .map_or(0.0, |simulation| simulation.monthly_savings_usd),
            risk_score: state.risk_scores.last().map_or(0.0, |score| score.score),
            settlement_count: u32::try_from(state.settlements.len()).unwrap_or(u32::MAX),
            fhir_audit_status: state
                .fhir_observations
                .last()
                .map_or_else(|| "pending".to_string(), |observation| observation.status.clone()),
        })
    }

    /// Returns every decision trace for a thread with its verification flag.
    ///
    /// Each trace is re-verified against the identity store's public key;
    /// verification failure flags the trace, it never fails the call.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::ThreadNotFound`] for unknown threads.
    pub fn traces(&self, thread_id: &ThreadId) -> Result<Vec<VerifiedTrace>, OrchestratorError> {
        let checkpoint = self
            .store
            .latest(thread_id)?
            .ok_or_else(|| OrchestratorError::ThreadNotFound(thread_id.to_string()))?;

        Ok(checkpoint
            .state
            .decision_traces
            .iter()
            .map(|trace| {
                let verified = AgentId::from_str_form(&trace.agent_id)
                    .and_then(|agent| self.identity.verifying_key(agent).ok())
                    .is_some_and(|key| verify_trace(trace, &key));
                VerifiedTrace {
                    trace: trace.clone(),
                    verified,
                }
            })
            .collect())
    }

    /// Subscribes to a thread's event stream.
    ///
    /// Committed events are replayed first, then live events arrive in
    /// strictly monotonic order.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::RegistryPoisoned`] when bookkeeping locks
    /// are poisoned.
    pub fn subscribe(
        &self,
        thread_id: &ThreadId,
    ) -> Result<UnboundedReceiver<StreamEvent>, OrchestratorError> {
        let cell = self.cell(thread_id)?;
        let (tx, rx) = unbounded_channel();

        let journal = cell.journal.lock().map_err(|_| OrchestratorError::RegistryPoisoned)?;
        for event in journal.iter() {
            let _ = tx.send(event.clone());
        }
        cell.subscribers
            .lock()
            .map_err(|_| OrchestratorError::RegistryPoisoned)?
            .push(tx);
        drop(journal);
        Ok(rx)
    }

    /// Returns the dispatch log of step spans for a thread.
    ///
    /// # Errors
    ///
    /// Returns [`OrchestratorError::RegistryPoisoned`] when bookkeeping locks
    /// are poisoned.
    pub fn dispatch_log(&self, thread_id: &ThreadId) -> Result<Vec<StepSpan>, OrchestratorError> {
        let cell = self.cell(thread_id)?;
        let spans = cell.spans.lock().map_err(|_| OrchestratorError::RegistryPoisoned)?;
        Ok(spans.clone())
    }

    /// Returns the discovery document: five role cards plus the orchestrator.
    #[must_use]
    pub fn discovery(&self) -> Vec<AgentCard> {
        let mut cards = all_agent_cards(&self.identity, &self.config.base_url);
        cards.push(orchestrator_card(&self.config.base_url));
        cards
    }

    // ------------------------------------------------------------------
    // Internal execution
    // ------------------------------------------------------------------

    /// Drives a thread until it suspends, terminates, or fails.
    ///
    /// Callers must hold the thread's exclusive execution lock.
    #[allow(
        clippy::too_many_lines,
        reason = "Maintain a single linear dispatch loop for ordered state updates."
    )]
    fn drive_locked(
        &self,
        thread_id: &ThreadId,
        cell: &Arc<ThreadCell>,
        mut response: Option<HumanResponse>,
    ) -> Result<(), OrchestratorError> {
        loop {
            let Some(checkpoint) = self.store.latest(thread_id)? else {
                return Err(OrchestratorError::ThreadNotFound(thread_id.to_string()));
            };

            match checkpoint.status {
                RunStatus::Running => {}
                RunStatus::Waiting if response.is_some() => {}
                _ => break,
            }
            let Some(node) = checkpoint.next else {
                break;
            };

            if cell.cancel_requested.swap(false, Ordering::SeqCst) {
                self.persist_terminal(thread_id, cell, checkpoint, Phase::Cancelled)?;
                break;
            }

            if checkpoint.step_index >= self.config.recursion_limit {
                self.persist_terminal(thread_id, cell, checkpoint, Phase::RecursionExceeded)?;
                break;
            }

            let mut state = checkpoint.state;
            let ctx = StepContext {
                thread_id,
                adapters: &self.adapters,
                identity: &self.identity,
                clock: self.clock.as_ref(),
                config: &self.config,
                human_response: response.take(),
            };

            let started_at = self.clock.now();
            let timer = Instant::now();
            let mut result = (node_spec(node).step)(&state, &ctx);
            let duration_ms = u64::try_from(timer.elapsed().as_millis()).unwrap_or(u64::MAX);

            if let Some(budget_ms) = self.config.step_timeout_ms {
                if result.is_ok() && duration_ms > budget_ms {
                    result = Err(StepError::TimeBudgetExceeded {
                        elapsed_ms: duration_ms,
                        budget_ms,
                    });
                }
            }

            match result {
                Err(err) => {
                    self.record_span(
                        cell,
                        node,
                        started_at,
                        duration_ms,
                        SpanOutcome::Failed {
                            reason: err.to_string(),
                        },
                    );
                    state.current_phase = Phase::Error;
                    state.error_log.push(format!("{node}: {err}"));
                    self.store.append(
                        thread_id,
                        &CheckpointRecord {
                            step_index: checkpoint.step_index + 1,
                            state: state.clone(),
                            next: None,
                            pending_interrupt: None,
                            status: RunStatus::Failed,
                        },
                    )?;
                    self.emit_phase_change(cell, Phase::Error);
                    self.emit_complete(cell, Phase::Error);
                    break;
                }
                Ok(StepResult::Suspended(payload)) => {
                    self.record_span(cell, node, started_at, duration_ms, SpanOutcome::Suspended);
                    self.store.append(
                        thread_id,
                        &CheckpointRecord {
                            step_index: checkpoint.step_index + 1,
                            state,
                            next: Some(node),
                            pending_interrupt: Some(payload.clone()),
                            status: RunStatus::Waiting,
                        },
                    )?;
                    for event in &payload.ui_events {
                        self.emit_ui_event(cell, event);
                    }
                    self.emit(
                        cell,
                        StreamEvent {
                            event: EventKind::Interrupt,
                            payload: json!({
                                "type": "governor_interrupt",
                                "requires_approval": true,
                                "thread_id": thread_id.as_str(),
                            }),
                        },
                    );
                    break;
                }
                Ok(StepResult::Delta(delta)) => {
                    self.record_span(cell, node, started_at, duration_ms, SpanOutcome::Completed);
                    let done = self.apply_and_route(
                        thread_id,
                        cell,
                        checkpoint.step_index,
                        state,
                        delta,
                        Some(node),
                    )?;
                    if done {
                        break;
                    }
                }
                Ok(StepResult::Command {
                    goto,
                    update,
                }) => {
                    self.record_span(cell, node, started_at, duration_ms, SpanOutcome::Completed);
                    let done = self.apply_command(
                        thread_id,
                        cell,
                        checkpoint.step_index,
                        state,
                        update,
                        goto,
                    )?;
                    if done {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Merges a delta, consults the node router, persists, and emits events.
    ///
    /// Returns true when the thread reached a terminal checkpoint.
    fn apply_and_route(
        &self,
        thread_id: &ThreadId,
        cell: &Arc<ThreadCell>,
        step_index: u32,
        mut state: ExecutionState,
        delta: StateDelta,
        node: Option<AgentId>,
    ) -> Result<bool, OrchestratorError> {
        let previous_phase = state.current_phase;
        let new_events = delta.ui_events.clone();
        state.apply(delta);

        let route = node.map_or(Route::End, |node| (node_spec(node).router)(&state));
        let (next, status) = match route {
            Route::Node(next) => (Some(next), RunStatus::Running),
            Route::End => (None, RunStatus::Completed),
        };

        let phase = state.current_phase;
        self.store.append(
            thread_id,
            &CheckpointRecord {
                step_index: step_index + 1,
                state,
                next,
                pending_interrupt: None,
                status,
            },
        )?;

        for event in &new_events {
            self.emit_ui_event(cell, event);
        }
        if phase != previous_phase {
            self.emit_phase_change(cell, phase);
        }
        if status == RunStatus::Completed {
            self.emit_complete(cell, phase);
            return Ok(true);
        }
        Ok(false)
    }

    /// Merges a governor command, persists, and emits events.
    ///
    /// Returns false: a command always names a next node.
    fn apply_command(
        &self,
        thread_id: &ThreadId,
        cell: &Arc<ThreadCell>,
        step_index: u32,
        mut state: ExecutionState,
        update: StateDelta,
        goto: AgentId,
    ) -> Result<bool, OrchestratorError> {
        let previous_phase = state.current_phase;
        let new_events = update.ui_events.clone();
        state.apply(update);
        let phase = state.current_phase;

        self.store.append(
            thread_id,
            &CheckpointRecord {
                step_index: step_index + 1,
                state,
                next: Some(goto),
                pending_interrupt: None,
                status: RunStatus::Running,
            },
        )?;

        for event in &new_events {
            self.emit_ui_event(cell, event);
        }
        if phase != previous_phase {
            self.emit_phase_change(cell, phase);
        }
        Ok(false)
    }

    /// Persists a terminal checkpoint for cancellation or cap breach.
    fn persist_terminal(
        &self,
        thread_id: &ThreadId,
        cell: &Arc<ThreadCell>,
        checkpoint: CheckpointRecord,
        phase: Phase,
    ) -> Result<(), OrchestratorError> {
        let mut state = checkpoint.state;
        state.current_phase = phase;
        let status =
            if phase == Phase::Cancelled { RunStatus::Cancelled } else { RunStatus::Failed };
        self.store.append(
            thread_id,
            &CheckpointRecord {
                step_index: checkpoint.step_index + 1,
                state,
                next: None,
                pending_interrupt: None,
                status,
            },
        )?;
        self.emit_phase_change(cell, phase);
        self.emit_complete(cell, phase);
        Ok(())
    }

    /// Finalizes a cancel requested while the thread was parked.
    fn finalize_cancel(
        &self,
        thread_id: &ThreadId,
        cell: &Arc<ThreadCell>,
    ) -> Result<(), OrchestratorError> {
        if !cell.cancel_requested.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let Some(checkpoint) = self.store.latest(thread_id)? else {
            return Ok(());
        };
        if matches!(checkpoint.status, RunStatus::Running | RunStatus::Waiting) {
            self.persist_terminal(thread_id, cell, checkpoint, Phase::Cancelled)?;
        }
        Ok(())
    }

    /// Returns (creating on demand) the bookkeeping cell for a thread.
    fn cell(&self, thread_id: &ThreadId) -> Result<Arc<ThreadCell>, OrchestratorError> {
        let mut registry =
            self.threads.lock().map_err(|_| OrchestratorError::RegistryPoisoned)?;
        Ok(registry.entry(thread_id.clone()).or_insert_with(|| Arc::new(ThreadCell::new())).clone())
    }

    /// Records a step span in the dispatch log.
    fn record_span(
        &self,
        cell: &Arc<ThreadCell>,
        agent: AgentId,
        started_at: crate::core::Timestamp,
        duration_ms: u64,
        outcome: SpanOutcome,
    ) {
        if let Ok(mut spans) = cell.spans.lock() {
            spans.push(StepSpan {
                agent,
                started_at,
                duration_ms,
                outcome,
            });
        }
    }

    /// Emits a UI event as a stream envelope keyed by its own kind.
    fn emit_ui_event(&self, cell: &Arc<ThreadCell>, event: &UiEvent) {
        self.emit(
            cell,
            StreamEvent {
                event: event.kind,
                payload: serde_json::to_value(event).unwrap_or(Value::Null),
            },
        );
    }

    /// Emits a phase-change envelope.
    fn emit_phase_change(&self, cell: &Arc<ThreadCell>, phase: Phase) {
        self.emit(
            cell,
            StreamEvent {
                event: EventKind::PhaseChange,
                payload: json!({"phase": phase.as_str()}),
            },
        );
    }

    /// Emits the terminal completion envelope.
    fn emit_complete(&self, cell: &Arc<ThreadCell>, phase: Phase) {
        self.emit(
            cell,
            StreamEvent {
                event: EventKind::Complete,
                payload: json!({"phase": phase.as_str()}),
            },
        );
    }

    /// Journals an envelope and fans it out to live subscribers.
    fn emit(&self, cell: &Arc<ThreadCell>, event: StreamEvent) {
        if let Ok(mut journal) = cell.journal.lock() {
            journal.push(event.clone());
        }
        if let Ok(mut subscribers) = cell.subscribers.lock() {
            subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        }
    }
}

// ============================================================================
// SECTION: Helper Functions
// ============================================================================

/// Generates a fresh random thread identifier.
fn generate_thread_id() -> ThreadId {
    let mut bytes = [0_u8; 8];
    OsRng.fill_bytes(&mut bytes);
    ThreadId::new(format!("thread-{:016x}", u64::from_be_bytes(bytes)))
}

/// Acquires a thread's execution lock, recovering from poisoning.
fn lock_exec(cell: &Arc<ThreadCell>) -> MutexGuard<'_, ()> {
    cell.exec.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
