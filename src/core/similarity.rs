use crate::domain::model::{PronunciationAssessment, SimilarityScore};

/// Levenshtein edit distance counted in `char`s, unit cost for
/// insertion, deletion and substitution.
///
/// Keeps two rows of the `(candidate + 1) x (reference + 1)` table.
pub fn levenshtein_distance(reference: &str, candidate: &str) -> usize {
    let reference: Vec<char> = reference.chars().collect();
    let candidate: Vec<char> = candidate.chars().collect();

    let mut previous: Vec<usize> = (0..=reference.len()).collect();
    let mut current = vec![0usize; reference.len() + 1];

    for (i, c) in candidate.iter().enumerate() {
        current[0] = i + 1;
        for (j, r) in reference.iter().enumerate() {
            current[j + 1] = if c == r {
                previous[j]
            } else {
                1 + previous[j].min(current[j]).min(previous[j + 1])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[reference.len()]
}

/// Case-insensitive similarity ratio in [0, 1]. Two empty strings are
/// identical.
pub fn similarity(reference: &str, candidate: &str) -> f64 {
    let reference = reference.to_lowercase();
    let candidate = candidate.to_lowercase();

    let max_length = reference.chars().count().max(candidate.chars().count());
    if max_length == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&reference, &candidate);
    (max_length - distance) as f64 / max_length as f64
}

pub fn similarity_score(reference: &str, candidate: &str) -> SimilarityScore {
    SimilarityScore::from_ratio(similarity(reference, candidate))
}

/// 比對語音轉錄與參考音譯，回傳分數與回饋
pub fn assess_pronunciation(reference: &str, transcript: &str) -> PronunciationAssessment {
    let score = similarity_score(reference, transcript);
    let band = score.band();

    tracing::debug!(
        "Pronunciation scored {} ({}) for transcript {:?}",
        score,
        band.label(),
        transcript
    );

    PronunciationAssessment {
        transcript: transcript.to_string(),
        score,
        band,
        feedback: band.feedback(),
    }
}
