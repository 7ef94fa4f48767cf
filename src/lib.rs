//! Chatdrop Core
//!
//! Client-side upload core for chat composers: validate a selected file
//! against a configured size limit, POST it to an HTTP endpoint as a
//! multipart form, and hand the hosted URL back to the caller for insertion
//! into the compose box.
//!
//! # Features
//!
//! - **Single Linear Flow**: Validate, transfer, interpret, with one await point
//! - **Classified Failures**: Every exit path is a value, never a panic
//! - **Injected Notifier**: Best-effort UI feedback that cannot fail an upload
//! - **Per-Call Config**: No global settings store; pass a fresh config each time
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatdrop::{FileHandle, NoopNotifier, UploadConfig, UploadService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UploadConfig::load("chatdrop.yaml")?;
//!     let service = UploadService::new(Arc::new(NoopNotifier));
//!     let file = FileHandle::from_path("cat.png").await?;
//!     let uploaded = service.upload(&file, &config).await?;
//!     println!("{}", uploaded.url);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod notify;
pub mod upload;

// Re-export commonly used types
pub use config::{ConfigError, UploadConfig};
pub use notify::{NoopNotifier, Notifier, NotifyKind, TracingNotifier};
pub use upload::service::UploadService;
pub use upload::{FileHandle, UploadError, UploadResult, Uploaded};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
