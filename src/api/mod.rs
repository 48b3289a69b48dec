pub mod endpoints;
pub mod transport;
pub mod types;

pub use transport::{DEFAULT_BASE_URL, HttpTransport, Transport};
pub use types::{ModelKind, Prediction};
