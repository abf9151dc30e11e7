// Background task - Cancellable counter running on its own thread
//
// The task owns a CounterLoop and the producer end of a task channel. Each
// tick does O(1) work, then waits `tick_delay` before the next one. The wait
// is a condition variable timeout so terminate() wakes a sleeping worker
// immediately instead of waiting out the delay.

use super::channel::{task_channel, StatusSender, TaskListener};
use super::counter::{CounterLoop, REPORT_INTERVAL};
use crate::config::ConfigError;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

/// Name given to the worker thread
pub const WORKER_THREAD_NAME: &str = "counter-worker";

/// Background task errors
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("scheduling unavailable: {0}")]
    SchedulingUnavailable(#[source] io::Error),

    #[error("background task was already started")]
    AlreadyStarted,
}

/// Background worker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Ticks between status reports
    pub report_interval: u64,

    /// Pause between ticks in microseconds (0 = yield only)
    pub tick_delay_us: u64,
}

impl WorkerConfig {
    /// Default: report every 1000 ticks, 1 ms between ticks
    pub fn new() -> Self {
        Self {
            report_interval: REPORT_INTERVAL,
            tick_delay_us: 1_000,
        }
    }

    /// Set the report interval (at least 1)
    pub fn with_report_interval(mut self, report_interval: u64) -> Self {
        self.report_interval = report_interval.max(1);
        self
    }

    /// Set the pause between ticks
    ///
    /// Stored in whole microseconds; anything shorter becomes a plain yield.
    pub fn with_tick_delay(mut self, delay: Duration) -> Self {
        self.tick_delay_us = u64::try_from(delay.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Pause between ticks
    pub fn tick_delay(&self) -> Duration {
        Duration::from_micros(self.tick_delay_us)
    }

    /// Reject a zero report interval
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.report_interval == 0 {
            return Err(ConfigError::ZeroReportInterval);
        }
        Ok(())
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle of a background task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TaskState {
    Idle = 0,
    Running = 1,
    Terminated = 2,
}

impl TaskState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => TaskState::Idle,
            1 => TaskState::Running,
            _ => TaskState::Terminated,
        }
    }
}

/// Supplier of execution units for the worker
pub trait Spawner {
    /// Run `body` on a new execution unit
    fn spawn(
        &self,
        name: &str,
        body: Box<dyn FnOnce() + Send + 'static>,
    ) -> io::Result<JoinHandle<()>>;
}

/// Spawns named OS threads
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSpawner;

impl Spawner for ThreadSpawner {
    fn spawn(
        &self,
        name: &str,
        body: Box<dyn FnOnce() + Send + 'static>,
    ) -> io::Result<JoinHandle<()>> {
        thread::Builder::new().name(name.to_string()).spawn(body)
    }
}

/// State shared between the task handle and its thread
#[derive(Debug)]
struct Shared {
    state: AtomicU8,
    wake_lock: Mutex<()>,
    wake: Condvar,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(TaskState::Idle as u8),
            wake_lock: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    fn state(&self) -> TaskState {
        TaskState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn is_running(&self) -> bool {
        self.state() == TaskState::Running
    }

    fn transition(&self, from: TaskState, to: TaskState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Wake a worker blocked in `pause`
    fn notify(&self) {
        let _guard = self.wake_lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.wake.notify_all();
    }

    /// Yield for up to `delay`; returns false once the task is terminated
    fn pause(&self, delay: Duration) -> bool {
        if delay.is_zero() {
            thread::yield_now();
            return self.is_running();
        }

        let guard = self.wake_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if !self.is_running() {
            return false;
        }
        let _ = self
            .wake
            .wait_timeout(guard, delay)
            .unwrap_or_else(PoisonError::into_inner);
        self.is_running()
    }
}

/// Long-running counter on an isolated thread
///
/// `Idle` → `start()` → `Running` → `terminate()` → `Terminated`.
/// Dropping a running task terminates it.
pub struct BackgroundTask {
    config: WorkerConfig,
    spawner: Box<dyn Spawner>,
    shared: Arc<Shared>,
    handle: Option<JoinHandle<()>>,
}

impl BackgroundTask {
    /// Create an idle task running on OS threads
    pub fn new(config: WorkerConfig) -> Result<Self, ConfigError> {
        Self::with_spawner(config, ThreadSpawner)
    }

    /// Create an idle task using a custom spawner
    pub fn with_spawner<S>(config: WorkerConfig, spawner: S) -> Result<Self, ConfigError>
    where
        S: Spawner + 'static,
    {
        config.validate()?;
        Ok(Self {
            config,
            spawner: Box::new(spawner),
            shared: Arc::new(Shared::new()),
            handle: None,
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> TaskState {
        self.shared.state()
    }

    /// Whether the worker is running
    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    /// Worker configuration
    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Start the worker and return the listener for its messages
    pub fn start(&mut self) -> Result<TaskListener, TaskError> {
        if !self.shared.transition(TaskState::Idle, TaskState::Running) {
            return Err(TaskError::AlreadyStarted);
        }

        let (sender, listener) = task_channel();
        let shared = Arc::clone(&self.shared);
        let config = self.config;

        let spawned = self.spawner.spawn(
            WORKER_THREAD_NAME,
            Box::new(move || run_worker(shared, sender, config)),
        );

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                info!(
                    "Background task started (report every {} ticks, {:?} delay)",
                    config.report_interval,
                    config.tick_delay()
                );
                Ok(listener)
            }
            Err(e) => {
                self.shared.transition(TaskState::Running, TaskState::Idle);
                Err(TaskError::SchedulingUnavailable(e))
            }
        }
    }

    /// Stop the worker and wait for its thread to exit
    ///
    /// A no-op before `start()` and after a previous `terminate()`. Once this
    /// returns no further message is produced.
    pub fn terminate(&mut self) {
        if !self.shared.transition(TaskState::Running, TaskState::Terminated) {
            return;
        }

        self.shared.notify();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Background task panicked");
            }
        }
        info!("Background task terminated");
    }
}

impl Drop for BackgroundTask {
    fn drop(&mut self) {
        self.terminate();
    }
}

/// Worker thread body
fn run_worker(shared: Arc<Shared>, sender: StatusSender, config: WorkerConfig) {
    let mut counter = CounterLoop::new(config.report_interval);
    let delay = config.tick_delay();
    debug!("Worker: counter loop beginning");

    while shared.is_running() {
        if let Some(message) = counter.tick() {
            if !shared.is_running() {
                break;
            }
            sender.send(message);
        }

        if !shared.pause(delay) {
            break;
        }
    }

    debug!("Worker: stopped after {} ticks", counter.counter());
}
