//! Construction parameters: collision strategy plus initial capacity.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Collision strategy and its hashing parameters; fixed for a table's
/// lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "collision", rename_all = "lowercase")]
pub enum Collision {
    /// Separate chaining; home slot `poly_hash(key, z, capacity)`.
    Chain { z: u64 },
    /// Linear probing from `poly_hash(key, z, capacity)` in steps of one.
    Linear { z: u64 },
    /// Double hashing: start at `poly_hash(key, z1, capacity)` and step by
    /// `c2 - (poly_hash(key, z2, capacity) mod c2)`.
    Double { z1: u64, z2: u64, c2: u64 },
}

impl Collision {
    pub fn kind(&self) -> CollisionKind {
        match self {
            Collision::Chain { .. } => CollisionKind::Chain,
            Collision::Linear { .. } => CollisionKind::Linear,
            Collision::Double { .. } => CollisionKind::Double,
        }
    }
}

/// Strategy selector without parameters, as named in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollisionKind {
    Chain,
    Linear,
    Double,
}

impl CollisionKind {
    /// Number of positional parameters including the trailing capacity.
    pub fn arity(self) -> usize {
        match self {
            CollisionKind::Chain | CollisionKind::Linear => 2,
            CollisionKind::Double => 4,
        }
    }
}

impl fmt::Display for CollisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CollisionKind::Chain => "Chain",
            CollisionKind::Linear => "Linear",
            CollisionKind::Double => "Double",
        })
    }
}

impl FromStr for CollisionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chain" => Ok(CollisionKind::Chain),
            "linear" => Ok(CollisionKind::Linear),
            "double" => Ok(CollisionKind::Double),
            _ => Err(ConfigError::UnknownCollision(s.to_owned())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    #[serde(flatten)]
    pub collision: Collision,
    pub initial_capacity: usize,
}

impl Params {
    pub fn chain(z: u64, initial_capacity: usize) -> Self {
        Self {
            collision: Collision::Chain { z },
            initial_capacity,
        }
    }

    pub fn linear(z: u64, initial_capacity: usize) -> Self {
        Self {
            collision: Collision::Linear { z },
            initial_capacity,
        }
    }

    pub fn double(z1: u64, z2: u64, c2: u64, initial_capacity: usize) -> Self {
        Self {
            collision: Collision::Double { z1, z2, c2 },
            initial_capacity,
        }
    }

    /// Build from the positional form `(z, capacity)` for chaining and
    /// linear probing, or `(z1, z2, c2, capacity)` for double hashing.
    pub fn from_parts(kind: CollisionKind, parts: &[u64]) -> Result<Self, ConfigError> {
        if parts.len() != kind.arity() {
            return Err(ConfigError::WrongArity {
                kind,
                expected: kind.arity(),
                got: parts.len(),
            });
        }
        let capacity = usize::try_from(parts[parts.len() - 1])
            .map_err(|_| ConfigError::CapacityTooLarge(parts[parts.len() - 1]))?;
        let params = match kind {
            CollisionKind::Chain => Params::chain(parts[0], capacity),
            CollisionKind::Linear => Params::linear(parts[0], capacity),
            CollisionKind::Double => Params::double(parts[0], parts[1], parts[2], capacity),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if let Collision::Double { c2: 0, .. } = self.collision {
            return Err(ConfigError::ZeroStepModulus);
        }
        Ok(())
    }
}

/// Malformed construction parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroCapacity,
    ZeroStepModulus,
    CapacityTooLarge(u64),
    WrongArity {
        kind: CollisionKind,
        expected: usize,
        got: usize,
    },
    UnknownCollision(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(f, "initial capacity must be at least 1"),
            Self::ZeroStepModulus => write!(f, "double hashing step modulus c2 must be at least 1"),
            Self::CapacityTooLarge(c) => write!(f, "capacity {} does not fit in usize", c),
            Self::WrongArity {
                kind,
                expected,
                got,
            } => write!(f, "{} expects {} parameters, got {}", kind, expected, got),
            Self::UnknownCollision(name) => write!(f, "unknown collision strategy {:?}", name),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positional_parts_map_to_params() {
        assert_eq!(
            Params::from_parts(CollisionKind::Chain, &[31, 7]),
            Ok(Params::chain(31, 7))
        );
        assert_eq!(
            Params::from_parts(CollisionKind::Double, &[31, 37, 5, 11]),
            Ok(Params::double(31, 37, 5, 11))
        );
        assert_eq!(
            Params::from_parts(CollisionKind::Linear, &[31, 7, 9]),
            Err(ConfigError::WrongArity {
                kind: CollisionKind::Linear,
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn rejects_zero_capacity_and_zero_step() {
        assert_eq!(
            Params::from_parts(CollisionKind::Linear, &[31, 0]),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            Params::double(31, 37, 0, 11).validate(),
            Err(ConfigError::ZeroStepModulus)
        );
        assert!(Params::double(31, 37, 1, 1).validate().is_ok());
    }

    #[test]
    fn kind_names_parse_case_insensitively() {
        assert_eq!("Chain".parse::<CollisionKind>(), Ok(CollisionKind::Chain));
        assert_eq!("LINEAR".parse::<CollisionKind>(), Ok(CollisionKind::Linear));
        assert_eq!("double".parse::<CollisionKind>(), Ok(CollisionKind::Double));
        let err = "Quadratic".parse::<CollisionKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown collision strategy \"Quadratic\"");
    }

    #[test]
    fn collision_reports_its_kind() {
        assert_eq!(Params::double(1, 2, 3, 4).collision.kind(), CollisionKind::Double);
        assert_eq!(Params::linear(1, 4).collision.kind(), CollisionKind::Linear);
    }
}
