use interfaces::{ScoreError, Sentiment, SentimentScorer};
use std::collections::HashMap;

/// Per-word (polarity, subjectivity) entries. Values follow the usual
/// pattern-lexicon conventions: polarity in [-1, 1], subjectivity in [0, 1].
const LEXICON: &[(&str, f64, f64)] = &[
    ("love", 0.5, 0.6),
    ("loved", 0.5, 0.6),
    ("loves", 0.5, 0.6),
    ("great", 0.8, 0.75),
    ("good", 0.7, 0.6),
    ("nice", 0.6, 1.0),
    ("awesome", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("excellent", 1.0, 1.0),
    ("wonderful", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("perfect", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("brilliant", 0.9, 0.9),
    ("happy", 0.8, 1.0),
    ("glad", 0.5, 1.0),
    ("fun", 0.3, 0.2),
    ("funny", 0.25, 0.75),
    ("cool", 0.35, 0.65),
    ("sweet", 0.35, 0.65),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("win", 0.4, 0.4),
    ("won", 0.4, 0.4),
    ("winning", 0.4, 0.4),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("impressive", 0.75, 0.9),
    ("interesting", 0.5, 0.5),
    ("lovely", 0.5, 0.9),
    ("proud", 0.8, 0.8),
    ("excited", 0.35, 0.8),
    ("exciting", 0.5, 0.9),
    ("helpful", 0.35, 0.35),
    ("solid", 0.3, 0.1),
    ("easy", 0.4, 0.8),
    ("right", 0.3, 0.5),
    ("fine", 0.4, 0.5),
    ("thanks", 0.25, 0.25),
    ("welcome", 0.4, 0.6),
    ("hate", -0.8, 0.9),
    ("hated", -0.8, 0.9),
    ("hates", -0.8, 0.9),
    ("bad", -0.7, 0.67),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 0.3),
    ("worse", -0.5, 0.5),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("mad", -0.6, 0.9),
    ("annoying", -0.5, 0.8),
    ("annoyed", -0.5, 0.8),
    ("boring", -0.8, 1.0),
    ("bored", -0.6, 0.9),
    ("stupid", -0.8, 0.9),
    ("dumb", -0.5, 0.8),
    ("ugly", -0.7, 1.0),
    ("broken", -0.4, 0.4),
    ("wrong", -0.5, 0.5),
    ("fail", -0.5, 0.5),
    ("failed", -0.5, 0.5),
    ("failing", -0.5, 0.5),
    ("lost", -0.4, 0.4),
    ("lose", -0.4, 0.4),
    ("losing", -0.4, 0.4),
    ("disappointing", -0.6, 0.75),
    ("disappointed", -0.75, 0.75),
    ("useless", -0.5, 0.6),
    ("trash", -0.6, 0.6),
    ("gross", -0.6, 0.9),
    ("scary", -0.5, 1.0),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.55),
    ("slow", -0.3, 0.4),
    ("poor", -0.4, 0.6),
    ("pain", -0.6, 0.7),
    ("painful", -0.7, 0.8),
    ("nasty", -0.8, 0.9),
    ("sick", -0.7, 0.9),
    ("tired", -0.4, 0.7),
    ("cry", -0.5, 0.6),
    ("crying", -0.5, 0.6),
    ("messy", -0.4, 0.6),
    ("weird", -0.25, 0.7),
    ("sorry", -0.3, 0.7),
];

fn is_negator(word: &str) -> bool {
    matches!(
        word,
        "not" | "no" | "never" | "cannot" | "can't" | "don't" | "doesn't" | "didn't" | "won't"
            | "isn't" | "wasn't" | "aren't" | "weren't" | "ain't" | "wouldn't" | "couldn't"
            | "shouldn't"
    )
}

fn is_intensifier(word: &str) -> bool {
    matches!(
        word,
        "very" | "really" | "extremely" | "so" | "totally" | "absolutely" | "super" | "incredibly"
    )
}

/// Built-in dictionary scorer.
///
/// Averages the (polarity, subjectivity) of every lexicon word found in the
/// text. A negator within the two preceding tokens flips and halves the next
/// match; an intensifier directly before a match boosts it. Text with no
/// lexicon words scores neutral.
pub struct LexiconScorer {
    entries: HashMap<&'static str, (f64, f64)>,
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            entries: LEXICON
                .iter()
                .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
                .collect(),
        }
    }
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentScorer for LexiconScorer {
    fn scorer_name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Result<Sentiment, ScoreError> {
        let lowered = text.to_lowercase();
        let mut polarities = Vec::new();
        let mut subjectivities = Vec::new();
        let mut negation = 0u8;
        let mut boost = 1.0;

        for token in lowered
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
        {
            if is_negator(token) {
                negation = 2;
                boost = 1.0;
                continue;
            }
            if is_intensifier(token) {
                boost = 1.3;
                continue;
            }
            if let Some(&(polarity, subjectivity)) = self.entries.get(token) {
                let mut polarity = (polarity * boost).clamp(-1.0, 1.0);
                if negation > 0 {
                    polarity *= -0.5;
                }
                polarities.push(polarity);
                subjectivities.push(subjectivity);
            }
            negation = negation.saturating_sub(1);
            boost = 1.0;
        }

        if polarities.is_empty() {
            return Ok(Sentiment::NEUTRAL);
        }
        let count = polarities.len() as f64;
        Ok(Sentiment {
            polarity: polarities.iter().sum::<f64>() / count,
            subjectivity: subjectivities.iter().sum::<f64>() / count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(text: &str) -> Sentiment {
        LexiconScorer::new().score(text).unwrap()
    }

    #[test]
    fn scores_positive_text_positive() {
        let sentiment = score("I love this");
        assert_eq!(sentiment.polarity, 0.5);
        assert_eq!(sentiment.subjectivity, 0.6);
    }

    #[test]
    fn scores_negative_text_negative() {
        assert!(score("I hate this").polarity < 0.0);
    }

    #[test]
    fn unknown_words_score_neutral() {
        let sentiment = score("the quarterly report shipped on schedule");
        assert_eq!(sentiment.polarity, 0.0);
        assert_eq!(sentiment.subjectivity, 0.0);
    }

    #[test]
    fn negation_flips_polarity() {
        assert!(score("not good").polarity < 0.0);
        assert!(score("never bad").polarity > 0.0);
    }

    #[test]
    fn negation_reaches_past_an_intensifier() {
        assert!(score("not very good").polarity < 0.0);
    }

    #[test]
    fn intensifier_boosts_the_next_match() {
        assert!(score("really good").polarity > score("good").polarity);
        // Boost never pushes polarity outside the unit range.
        assert!(score("extremely awesome").polarity <= 1.0);
    }

    #[test]
    fn balanced_text_averages_to_zero() {
        assert_eq!(score("good bad").polarity, 0.0);
    }

    #[test]
    fn casing_and_punctuation_do_not_matter() {
        assert_eq!(score("LOVE!!!").polarity, score("love").polarity);
    }
}
