pub mod requests;
pub mod responses;

pub use requests::MoveRequest;
pub use responses::{HealthResponse, StateResponse};
