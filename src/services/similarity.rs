use super::vectorizer::DocumentVector;

/// Dense, symmetric cosine similarity matrix over a corpus
///
/// Stored row-major. Entry `(i, j)` is the cosine of the angle between the
/// document vectors of items `i` and `j`, or `0.0` when either vector is all
/// zeros. Values lie in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes every pairwise similarity, including each item with itself
    ///
    /// Norms are computed once per vector. Only the upper triangle is
    /// evaluated and mirrored, so `(i, j)` and `(j, i)` are bit-identical.
    /// The diagonal goes through the same formula as every other pair, so an
    /// item and its identical twin score exactly the same against each other.
    pub fn build(vectors: &[DocumentVector]) -> Self {
        let size = vectors.len();
        let norms: Vec<f64> = vectors.iter().map(DocumentVector::norm).collect();
        let mut scores = vec![0.0; size * size];

        for i in 0..size {
            if norms[i] == 0.0 {
                continue;
            }
            for j in i..size {
                let score = cosine(&vectors[i], &vectors[j], norms[i], norms[j]);
                scores[i * size + j] = score;
                scores[j * size + i] = score;
            }
        }

        Self { size, scores }
    }

    /// Number of rows (and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.scores[i * self.size + j]
    }

    /// Similarities of item `i` to every item, in index order
    pub fn row(&self, i: usize) -> &[f64] {
        &self.scores[i * self.size..(i + 1) * self.size]
    }
}

fn cosine(a: &DocumentVector, b: &DocumentVector, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}
