//! Root-split parallel search configuration.
//!
//! Top-level candidate moves are independent: each one is searched on its own
//! cloned `GameState`, so they can be spread over scoped worker threads with
//! no shared mutable state beyond the per-worker result vectors.

/// Search execution model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThreadingModel {
    /// Classic single-threaded search path.
    #[default]
    SingleThreaded,
    /// Top-level candidates are partitioned across worker threads.
    RootSplit,
}

/// Threading configuration owned by the engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub model: ThreadingModel,
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            model: ThreadingModel::SingleThreaded,
            requested_threads: 1,
        }
    }
}

impl ThreadingConfig {
    pub fn with_threads(requested_threads: usize) -> Self {
        let model = if requested_threads > 1 {
            ThreadingModel::RootSplit
        } else {
            ThreadingModel::SingleThreaded
        };
        Self {
            model,
            requested_threads,
        }
    }

    #[inline]
    pub fn normalized_threads(self) -> usize {
        match self.model {
            ThreadingModel::SingleThreaded => 1,
            ThreadingModel::RootSplit => self.requested_threads.max(1),
        }
    }

    /// Worker count actually used for `candidates` root moves.
    #[inline]
    pub fn workers_for(self, candidates: usize) -> usize {
        self.normalized_threads().min(candidates).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_is_bounded_by_candidates() {
        let config = ThreadingConfig::with_threads(8);
        assert_eq!(config.model, ThreadingModel::RootSplit);
        assert_eq!(config.workers_for(3), 3);
        assert_eq!(config.workers_for(0), 1);
        assert_eq!(ThreadingConfig::default().workers_for(10), 1);
        assert_eq!(ThreadingConfig::with_threads(0).normalized_threads(), 1);
    }
}
