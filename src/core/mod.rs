pub mod etl;
pub mod kickoff;
pub mod pipeline;
pub mod render;
pub mod scoring;

pub use crate::domain::model::{Digest, Fixture, FixtureRecord, FixturesEnvelope, Kickoff};
pub use crate::domain::ports::{ConfigProvider, Pipeline};
pub use crate::utils::error::Result;
