pub mod pipeline;
pub mod writer;

pub use pipeline::NewsPipeline;
pub use writer::{beijing_stamp, write_result};
