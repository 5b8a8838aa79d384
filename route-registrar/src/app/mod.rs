mod batch_runner;
mod registrar_app;
mod run_tally;

pub use batch_runner::{run_batch, BatchRunner};
pub use registrar_app::RegistrarApp;
pub use run_tally::{RunTally, StopReason};
