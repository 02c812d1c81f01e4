pub mod http;
pub mod poll;
pub mod traits;

pub use http::HttpScrapeClient;
pub use poll::{poll_job, PollSettings};
pub use traits::ScrapeApi;
