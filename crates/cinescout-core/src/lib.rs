pub mod session;
pub mod storage;
pub mod watchlist;

pub use session::{FetchTicket, SearchSession, SearchStatus, FETCH_ERROR_MESSAGE};
pub use storage::{FileStorage, SnapshotStorage};
pub use watchlist::WatchlistStore;
