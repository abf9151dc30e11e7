// Worker module - Background computation decoupled from the display
//
// This module provides:
// - CounterLoop: the tick logic, reporting every REPORT_INTERVAL ticks
// - BackgroundTask: runs the loop on its own thread, cancellable at any tick
// - task_channel: ordered one-way delivery of status messages to the foreground
//
// The worker thread shares nothing with the foreground except the channel and
// an atomic lifecycle flag.

pub mod channel;
pub mod counter;
pub mod task;

pub use channel::{task_channel, MessageHandler, StatusMessage, StatusSender, TaskListener};
pub use counter::{CounterLoop, REPORT_INTERVAL};
pub use task::{
    BackgroundTask, Spawner, TaskError, TaskState, ThreadSpawner, WorkerConfig, WORKER_THREAD_NAME,
};
