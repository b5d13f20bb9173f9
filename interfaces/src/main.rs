use interfaces::defs::MessageRecord;
use interfaces::defs::SentimentScorer;
use interfaces::neutral::NeutralScorer;

fn main() -> anyhow::Result<()> {
    let record = MessageRecord::new("Hello, world!", "2024-01-01 10:00:00");
    let scorer = NeutralScorer;
    let sentiment = scorer.score(&record.contents)?;
    println!("scorer: {}", scorer.scorer_name());
    println!("record: {:#?}", &record);
    println!("sentiment: {:#?}", &sentiment);
    Ok(())
}
