use crate::table::EmbeddingTable;

/// Averages the vectors of the known words in `question`.
///
/// `question` is split on whitespace; words missing from `embeddings` are
/// skipped without error and a word that repeats counts once per
/// occurrence. When no word is known the result is the zero vector of
/// length `dim`. Otherwise the mean has the table's dimension, which callers
/// are expected to pass as `dim`.
///
/// ```rust
/// use embeddings::{question_to_vec, EmbeddingTable};
///
/// let table = EmbeddingTable::from_entries([
///     ("cat", vec![1.0, 0.0]),
///     ("dog", vec![3.0, 0.0]),
/// ])
/// .unwrap();
///
/// assert_eq!(question_to_vec("cat dog", &table, 2), vec![2.0, 0.0]);
/// assert_eq!(question_to_vec("unknownword", &table, 2), vec![0.0, 0.0]);
/// ```
pub fn question_to_vec(question: &str, embeddings: &EmbeddingTable, dim: usize) -> Vec<f32> {
    let mut sum: Option<Vec<f32>> = None;
    let mut count = 0usize;

    for vector in question
        .split_whitespace()
        .filter_map(|word| embeddings.get(word))
    {
        match sum.as_mut() {
            Some(acc) => add_in_place(acc, vector),
            None => sum = Some(vector.to_vec()),
        }
        count += 1;
    }

    match sum {
        Some(mut mean) => {
            let n = count as f32;
            for x in mean.iter_mut() {
                *x /= n;
            }
            mean
        }
        None => vec![0.0; dim],
    }
}

fn add_in_place(acc: &mut [f32], v: &[f32]) {
    for (a, b) in acc.iter_mut().zip(v) {
        *a += *b;
    }
}
