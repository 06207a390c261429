//! A registry of caller supplied conversion strategies.
//!
//! Some conversions can not be hard-coded into a model. A spectrum needs
//! matching functions to become a tristimulus value, and reducing CIE XYZ to
//! sRGB needs a policy for colors outside the sRGB gamut. Both are looked up
//! by the pair of color spaces involved.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use crate::{
    color::Space,
    error::{Error, Result},
    matching::{MatchingFunction, StandardObserver},
    models::ToSmallSpaceStrategy,
};

/// The ordered pair of color spaces a strategy applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StrategyKey {
    /// The color space converted from.
    pub source: Space,
    /// The color space converted to.
    pub target: Space,
}

impl StrategyKey {
    /// Create a new key for conversions from `source` to `target`.
    pub const fn new(source: Space, target: Space) -> Self {
        Self { source, target }
    }
}

impl std::fmt::Display for StrategyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// A strategy payload.
#[derive(Clone, Debug)]
pub enum Strategy {
    /// Matching functions integrating a spectrum, ordered X, Y, Z.
    MatchingFunctions(Vec<Arc<dyn MatchingFunction>>),
    /// The policy for reducing a color into sRGB.
    Reduction(ToSmallSpaceStrategy),
}

impl Strategy {
    /// Describe the shape of this payload for error reports.
    fn describe(&self) -> String {
        match self {
            Self::MatchingFunctions(functions) => {
                format!("{} matching functions", functions.len())
            }
            Self::Reduction(strategy) => format!("reduction strategy {strategy:?}"),
        }
    }
}

/// Strategies keyed by the pair of color spaces they convert between.
///
/// Registries are built up front and only read while converting, so one
/// registry can be shared by any number of conversions.
#[derive(Clone, Debug, Default)]
pub struct Strategies {
    entries: HashMap<StrategyKey, Strategy>,
}

impl Strategies {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a strategy, returning the one it replaces.
    pub fn insert(&mut self, key: StrategyKey, strategy: Strategy) -> Option<Strategy> {
        self.entries.insert(key, strategy)
    }

    /// Register a strategy, builder style.
    #[must_use]
    pub fn with(mut self, key: StrategyKey, strategy: Strategy) -> Self {
        self.insert(key, strategy);
        self
    }

    /// Return the strategy for the given pair, if one is registered.
    pub fn get(&self, key: StrategyKey) -> Option<&Strategy> {
        self.entries.get(&key)
    }

    /// The number of registered strategies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Determine whether no strategy is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the strategy for the given pair, failing if there is none.
    pub fn lookup(&self, key: StrategyKey) -> Result<&Strategy> {
        self.get(key).ok_or_else(|| {
            tracing::debug!(%key, "no strategy registered");
            Error::StrategyNotFound(key)
        })
    }

    /// Return exactly three matching functions for the given pair.
    pub fn matching_functions(&self, key: StrategyKey) -> Result<&[Arc<dyn MatchingFunction>; 3]> {
        let invalid = |reason: String| {
            tracing::debug!(%key, %reason, "invalid strategy");
            Error::InvalidStrategy { key, reason }
        };

        match self.lookup(key)? {
            Strategy::MatchingFunctions(functions) => {
                functions.as_slice().try_into().map_err(|_| {
                    invalid(format!(
                        "expected 3 matching functions, found {}",
                        functions.len()
                    ))
                })
            }
            other => Err(invalid(format!(
                "expected 3 matching functions, found {}",
                other.describe()
            ))),
        }
    }

    /// Return the reduction policy for the given pair, falling back to
    /// [`ToSmallSpaceStrategy::Default`] when none is registered.
    pub fn reduction_or_default(&self, key: StrategyKey) -> Result<ToSmallSpaceStrategy> {
        match self.get(key) {
            None => Ok(ToSmallSpaceStrategy::default()),
            Some(Strategy::Reduction(strategy)) => Ok(*strategy),
            Some(other) => {
                let reason = format!("expected a reduction strategy, found {}", other.describe());
                tracing::debug!(%key, %reason, "invalid strategy");
                Err(Error::InvalidStrategy { key, reason })
            }
        }
    }

    /// The process-wide registry.
    ///
    /// Holds the analytic CIE 1931 standard observer for spectra and the
    /// default reduction into sRGB. It is built on first use and never
    /// changes afterwards.
    pub fn standard() -> &'static Strategies {
        static STANDARD: OnceLock<Strategies> = OnceLock::new();

        STANDARD.get_or_init(|| {
            tracing::debug!("building standard strategies");
            Strategies::new()
                .with(
                    StrategyKey::new(Space::LightSpectrum, Space::CieXyz),
                    Strategy::MatchingFunctions(StandardObserver::functions()),
                )
                .with(
                    StrategyKey::new(Space::CieXyz, Space::Srgb),
                    Strategy::Reduction(ToSmallSpaceStrategy::Default),
                )
        })
    }
}
