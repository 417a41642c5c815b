//! Popularity ranking of works.

use reelgraph_foundation::Work;
use reelgraph_storage::WorkStore;
use tracing::debug;

/// Orders works by how many people like them.
#[derive(Clone, Copy, Debug)]
pub struct Ranking {
    default_count: usize,
}

impl Default for Ranking {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Ranking {
    /// Creates a ranking that returns `default_count` works when no count is given.
    #[must_use]
    pub fn new(default_count: usize) -> Self {
        Self { default_count }
    }

    /// The `count` most-liked works, most likes first.
    ///
    /// Ties are broken by identifier ascending, so repeated calls on
    /// unchanged data return the same order. `None` or `Some(0)` falls back
    /// to the default count.
    #[must_use]
    pub fn popular(&self, works: &WorkStore, count: Option<usize>) -> Vec<Work> {
        let count = match count {
            Some(n) if n > 0 => n,
            _ => self.default_count,
        };

        works.view(|view| {
            let mut ranked: Vec<&Work> = view.iter().collect();
            ranked.sort_by(|a, b| {
                b.like_count()
                    .cmp(&a.like_count())
                    .then_with(|| a.id.cmp(&b.id))
            });
            debug!(total = ranked.len(), count, "ranked works by likes");
            ranked.into_iter().take(count).cloned().collect()
        })
    }
}
