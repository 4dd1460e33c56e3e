//! Personal adventure log: short timestamped entries kept in a local JSON
//! file, with per-day grouping and weekly statistics derived from them.

pub mod catalog;
pub mod entries;
pub mod error;
pub mod stats;
pub mod store;

pub use entries::{Day, Entry, EntryId, Title, local_now};
pub use error::{StorageError, StorageResult};
pub use stats::{DailyGroup, IconCount, Stats, Summary};
pub use store::{EntryStore, ReadPolicy};
