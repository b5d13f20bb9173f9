use crate::defs::{ScoreError, Sentiment, SentimentScorer};

pub struct NeutralScorer;

impl SentimentScorer for NeutralScorer {
    fn scorer_name(&self) -> &str {
        "neutral"
    }

    fn score(&self, _text: &str) -> Result<Sentiment, ScoreError> {
        // Nothing matters, everything reads as perfectly neutral fact.
        Ok(Sentiment::NEUTRAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_everything_as_neutral() {
        let scorer = NeutralScorer;
        let sentiment = scorer.score("I absolutely love this").unwrap();
        assert_eq!(sentiment.polarity, 0.0);
        assert_eq!(sentiment.subjectivity, 0.0);
    }
}
