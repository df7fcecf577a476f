pub mod movie;
pub mod sort;
pub mod watchlist;

pub use movie::{MovieDetail, MovieSummary};
pub use sort::{sort_movies, SortKey};
pub use watchlist::WatchlistEntry;
