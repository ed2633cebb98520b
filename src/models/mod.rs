// src/models/mod.rs

//! Domain models for the metadata client.
//!
//! This module contains all data structures used throughout the library,
//! organized by their primary purpose.

mod config;
mod record;
mod subject;

// Re-export all public types
pub use config::{
    Config, ENV_ACCESS_TOKEN, ENV_TAG_LOWEST_USER_CNT, ENV_TAG_MAX_CNT, ENV_THREAD_POOL,
    HttpConfig, ProviderConfig, TagConfig,
};
pub use record::{MetaRecord, MetaSourceInfo};
pub use subject::{
    ChildRef, Images, InfoboxEntry, InfoboxItem, InfoboxValue, Rating, SUBJECT_TYPE_BOOK,
    SearchHit, SearchResponse, SubjectDetail, Tag,
};
