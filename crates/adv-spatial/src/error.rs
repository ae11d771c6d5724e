use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("wall {index} has a non-finite endpoint")]
    NonFiniteWall { index: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
