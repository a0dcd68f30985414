//! API clients for glucose data sources

pub mod nightscout;

pub use nightscout::{EntrySource, NightscoutClient, decode_entries, entries_url};

#[cfg(test)]
pub use nightscout::MockEntrySource;
