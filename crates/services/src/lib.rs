#![forbid(unsafe_code)]

pub mod backend;
pub mod error;
pub mod remote_session;

pub use backend::QuizBackend;
pub use error::ClientError;
pub use remote_session::{DEFAULT_BASE_URL, RemoteSessionClient, RemoteSessionConfig};

pub use reqwest::StatusCode;
