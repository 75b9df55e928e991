pub use canopy_core::{DiseaseLogic, SpeciesLogic, WeatherLogic};
pub mod config {
    pub use canopy_core::config::*;
}
pub mod data {
    pub use canopy_data::*;
}
pub mod environment {
    pub use canopy_core::environment::*;
}
pub mod error {
    pub use canopy_core::error::*;
}
pub mod grid {
    pub use canopy_core::grid::*;
}
pub mod lifecycle {
    pub use canopy_core::lifecycle::*;
}
pub mod metrics {
    pub use canopy_core::metrics::*;
}
pub mod pathogen {
    pub use canopy_core::pathogen::*;
}
pub mod random {
    pub use canopy_core::random::*;
}
pub mod species {
    pub use canopy_core::species::*;
}
pub mod systems {
    pub use canopy_core::systems::*;
}
pub mod world {
    pub use canopy_core::world::*;
}
