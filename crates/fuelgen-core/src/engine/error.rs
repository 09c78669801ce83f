use crate::core::models::compound::{Family, Property};
use crate::engine::mixer::PoolRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No seed compounds declared for family {family}; generation cannot anchor")]
    MissingSeeds { family: Family },

    #[error("Candidate pool for {role} is empty; pre-filter the component table before mixing")]
    EmptyPool { role: PoolRole },

    #[error("Unknown component name: '{name}'")]
    UnknownComponent { name: String },

    #[error("Component '{name}' has no value for {property}")]
    PropertyUnavailable { name: String, property: Property },

    #[error("Recipe contains no components")]
    EmptyRecipe,
}
