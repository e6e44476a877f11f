pub mod cache;

pub use cache::{CacheKey, CacheValue, EntityCache, FetchToken, Mutation, SlotStatus};
