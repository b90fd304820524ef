//! QubitQuest adapter for the IonQ device on AWS Braket
//!
//! Remote execution backend for lesson circuits. Circuits are translated
//! to OpenQASM 3, submitted as Braket quantum tasks to a fixed IonQ
//! device, and results are read back from S3 once the task completes.
//!
//! # Authentication
//!
//! AWS credentials are loaded from the standard AWS credential chain:
//! environment variables, shared config, SSO, or IAM role.
//!
//! Required environment variables:
//! - `QQ_BRAKET_S3_BUCKET` — S3 bucket for storing task results
//!
//! Optional environment variables:
//! - `QQ_BRAKET_S3_PREFIX` — S3 key prefix (default: `"qubitquest-results"`)
//! - `AWS_REGION` — AWS region (default: `"us-west-2"`)
//!
//! # Example
//!
//! ```ignore
//! use qq_adapter_ionq::IonqBackend;
//! use qq_hal::Backend;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let backend = IonqBackend::connect().await?;
//!     let job_id = backend.submit(&circuit, 1000).await?;
//!     let result = backend.wait(&job_id).await?;
//!     println!("Results: {:?}", result.counts);
//!     Ok(())
//! }
//! ```

mod backend;
mod client;
mod error;

pub use backend::{DEVICE_ARN, IonqBackend};
pub use error::{IonqError, IonqResult};

// Re-export common types
pub use qq_hal::Backend;
