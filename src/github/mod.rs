pub mod client;
pub mod fetch;
pub mod types;

pub use client::create_client;
pub use fetch::fetch_closed_prs;
pub use types::PullRequest;
