pub mod sentiment;
pub mod turn;

pub use sentiment::MongoSentimentRepository;
pub use turn::MongoTurnRepository;
