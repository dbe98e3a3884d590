/// Tunable search settings owned by a [`super::SearchEngine`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// First depth of every iterative-deepening run; always completed
    pub min_depth: u32,
    /// Deepest iteration a time-bounded search will attempt
    pub max_depth: u32,
    /// Transposition table entries kept before the table is emptied
    pub tt_capacity: usize,
    /// Evaluation cache entries kept before the cache is emptied
    pub eval_cache_capacity: usize,
    /// Base magnitude of a checkmate score
    pub mate_score: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            min_depth: 1,
            max_depth: 64,
            tt_capacity: 1 << 20,
            eval_cache_capacity: 1 << 20,
            mate_score: 1_000_000,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn min_depth(mut self, depth: u32) -> Self {
        self.min_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn tt_capacity(mut self, entries: usize) -> Self {
        self.tt_capacity = entries;
        self
    }

    #[must_use]
    pub fn eval_cache_capacity(mut self, entries: usize) -> Self {
        self.eval_cache_capacity = entries;
        self
    }

    /// Scores at or beyond this magnitude announce a forced mate.
    #[must_use]
    pub fn is_mate_score(&self, score: i32) -> bool {
        score.abs() >= self.mate_score
    }
}
