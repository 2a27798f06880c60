//! Second-best routes by penalising the edges of the best one

use log::debug;

use crate::routing::{PathSearch, PenaltyOverlay, SearchQuery, SearchResult};

/// Best route and, when one exists, a route that differs from it
#[derive(Debug, Clone, PartialEq)]
pub struct RouteAlternatives {
    pub primary: SearchResult,
    pub alternative: Option<SearchResult>,
}

impl RouteAlternatives {
    pub fn routes(&self) -> impl Iterator<Item = &SearchResult> {
        std::iter::once(&self.primary).chain(self.alternative.as_ref())
    }
}

impl PathSearch<'_> {
    /// Runs the search twice: once plain, then with every edge of the primary
    /// path costing `penalty_factor` times more.
    ///
    /// The second result is kept only if its node sequence differs from the
    /// primary one. Its distance and time are reported unpenalised.
    pub fn search_with_alternative(
        &self,
        query: &SearchQuery,
        penalty_factor: f64,
    ) -> Option<RouteAlternatives> {
        let primary = self.search(query, &PenaltyOverlay::empty())?;

        let penalty = PenaltyOverlay::from_path(&primary.path, penalty_factor);
        let alternative = if penalty.is_empty() {
            None
        } else {
            self.search(query, &penalty)
                .filter(|candidate| candidate.path != primary.path)
        };

        if alternative.is_none() {
            debug!(
                "No alternative to the {}-node path from {} to {}",
                primary.path.len(),
                query.start,
                query.end
            );
        }

        Some(RouteAlternatives {
            primary,
            alternative,
        })
    }
}
