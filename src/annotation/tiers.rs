//! Tier and mark selection rules.

use crate::constants::tiers::ANY_MARK;

/// Which interval marks are selected from a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkFilter {
    /// Any interval with a non-blank mark.
    Any,
    /// Intervals whose trimmed mark equals this literal.
    Exact(String),
}

impl MarkFilter {
    /// Parse a filter; `*` and the empty string select any non-blank mark.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == ANY_MARK {
            Self::Any
        } else {
            Self::Exact(value.to_string())
        }
    }

    /// Whether `mark` passes the filter.
    pub fn matches(&self, mark: &str) -> bool {
        let mark = mark.trim();
        match self {
            Self::Any => !mark.is_empty(),
            Self::Exact(expected) => mark == expected,
        }
    }
}

impl std::fmt::Display for MarkFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "{ANY_MARK}"),
            Self::Exact(mark) => write!(f, "{mark}"),
        }
    }
}

/// How search windows are located around each labeled VOT.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSource {
    /// Windows come from intervals of another tier.
    Tier {
        /// Window tier name.
        name: String,
        /// Window mark filter.
        mark: MarkFilter,
    },
    /// Constant window relative to the VOT right edge, in seconds.
    Constant {
        /// Left offset (usually negative).
        min_offset: f64,
        /// Right offset.
        max_offset: f64,
    },
}

/// Resolved tier rules for one decoding run.
#[derive(Debug, Clone, PartialEq)]
pub struct TierDefinitions {
    /// Tier holding the labeled VOTs.
    pub vot_tier: String,
    /// VOT mark filter.
    pub vot_mark: MarkFilter,
    /// Where the search windows come from.
    pub window: WindowSource,
}

impl TierDefinitions {
    /// Build tier rules from user settings.
    ///
    /// An empty or missing window tier selects a constant window of
    /// `[window_min_ms, window_max_ms]` around the VOT right edge.
    pub fn new(
        vot_tier: &str,
        vot_mark: &str,
        window_tier: Option<&str>,
        window_mark: &str,
        window_min_ms: f64,
        window_max_ms: f64,
    ) -> Self {
        let window = match window_tier.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => WindowSource::Tier {
                name: name.to_string(),
                mark: MarkFilter::parse(window_mark),
            },
            None => WindowSource::Constant {
                min_offset: window_min_ms / 1000.0,
                max_offset: window_max_ms / 1000.0,
            },
        };

        Self {
            vot_tier: vot_tier.trim().to_string(),
            vot_mark: MarkFilter::parse(vot_mark),
            window,
        }
    }
}
