use hexpath_paths::Strategy;

/// When a [`PathRequestManager`](crate::PathRequestManager) advances its
/// in-flight search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum Dispatch {
    /// Run each search to completion inside the call that starts it.
    #[default]
    Immediate,
    /// Advance only on [`tick`](crate::PathRequestManager::tick), spending at
    /// most `expansions_per_tick` expansions each time.
    Ticked { expansions_per_tick: usize },
}

impl Dispatch {
    /// Expansions one poll may spend.
    #[inline]
    pub fn budget(self) -> usize {
        match self {
            Dispatch::Immediate => usize::MAX,
            Dispatch::Ticked {
                expansions_per_tick,
            } => expansions_per_tick.max(1),
        }
    }
}

/// Request manager settings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManagerConfig {
    pub strategy: Strategy,
    pub dispatch: Dispatch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticked_budget_is_at_least_one() {
        assert_eq!(Dispatch::Ticked { expansions_per_tick: 0 }.budget(), 1);
        assert_eq!(Dispatch::Ticked { expansions_per_tick: 32 }.budget(), 32);
        assert_eq!(Dispatch::Immediate.budget(), usize::MAX);
    }
}
