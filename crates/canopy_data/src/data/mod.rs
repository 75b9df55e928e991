pub mod appearance;
pub mod being;
pub mod environment;
pub mod snapshot;
pub mod space;
