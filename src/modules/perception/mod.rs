pub mod structs;
pub mod ranking;
pub mod feed;
pub mod raw_feed;

pub use structs::{AggregationResult, NewsItem, Region};
pub use ranking::RankingSentinel;
pub use feed::FeedSentinel;
