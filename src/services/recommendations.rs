use crate::{models::Movie, services::index::Index};

/// Ranks a similarity row and returns the `top_n` neighbours after the first
///
/// The row is stable-sorted by descending score, so equal scores keep
/// ascending index order. The first ranked entry is then dropped by position
/// rather than by identity. That entry is the queried item itself whenever
/// its self-similarity is the unique maximum; when an earlier item ties it,
/// that earlier item is the one dropped and the query can appear in its own
/// list. Callers rely on this exact tie-break, so it must stay positional.
pub fn rank_neighbours(row: &[f64], top_n: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().skip(1).take(top_n).collect()
}

impl Index {
    /// Titles most similar to `query_title`, best first
    ///
    /// Returns an empty list when the title is unknown or the corpus has no
    /// other items. Never returns more than `top_n` titles.
    pub fn recommend(&self, query_title: &str, top_n: usize) -> Vec<String> {
        self.recommend_scored(query_title, top_n)
            .map(|ranked| {
                ranked
                    .into_iter()
                    .map(|(movie, _)| movie.title.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ranked neighbours with their scores, or `None` if the title is unknown
    pub fn recommend_scored(&self, query_title: &str, top_n: usize) -> Option<Vec<(&Movie, f64)>> {
        let query = self.lookup(query_title)?;
        let row = self.similarity().row(query.id);

        Some(
            rank_neighbours(row, top_n)
                .into_iter()
                .filter_map(|(id, score)| self.store().get(id).map(|movie| (movie, score)))
                .collect(),
        )
    }
}
