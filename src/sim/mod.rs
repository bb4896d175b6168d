pub mod driver;
pub mod metrics;
pub mod process;
pub mod workload;

pub use driver::Sim;
pub use metrics::{ProcessMetrics, Schedule};
pub use process::Process;
pub use workload::{WorkloadConfig, bernoulli_processes};
