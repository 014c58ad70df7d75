//! Simulation error types.

use std::error::Error;
use std::fmt;

use platter_pool::PoolError;

/// Errors from building or stepping a [`Simulation`](crate::Simulation).
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// The particle pool rejected an operation.
    Pool(PoolError),
    /// The simulation configuration was rejected.
    InvalidConfig {
        /// Why the configuration is invalid.
        reason: String,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pool(err) => write!(f, "particle pool: {err}"),
            Self::InvalidConfig { reason } => write!(f, "invalid simulation config: {reason}"),
        }
    }
}

impl Error for SimError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pool(err) => Some(err),
            Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<PoolError> for SimError {
    fn from(err: PoolError) -> Self {
        Self::Pool(err)
    }
}
