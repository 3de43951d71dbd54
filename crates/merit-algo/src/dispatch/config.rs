use std::time::Duration;

use merit_core::Megawatts;

/// Dispatch engine configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Numeric slack for zero and equality checks (MW)
    pub tolerance: Megawatts,
    /// Maximum nesting of transition searches
    pub max_depth: usize,
    /// Wall-clock budget for one solve; `None` disables the check
    pub time_budget: Option<Duration>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            tolerance: Megawatts(1e-2),
            max_depth: 64,
            time_budget: Some(Duration::from_secs(5)),
        }
    }
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the numeric tolerance
    pub fn with_tolerance(mut self, tolerance: Megawatts) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the recursion bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set (or clear) the wall-clock budget
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }
}
