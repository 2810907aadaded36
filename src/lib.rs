pub mod api;
pub mod config;
pub mod corpus;
pub mod error;
pub mod keypad;
pub mod model;
pub mod ranker;
pub mod scorer;

pub use api::InferenceSession;
pub use error::{PdResult, PindropError};
