pub mod collection;
pub mod config;
pub mod storage;
pub mod testing;
pub mod validation;

pub use collection::{
    default_entries, CatalogEntry, Category, CategoryCounts, Clock, CollectionError,
    CollectionFilter, CollectionStore, EntryId, EntryUpdate, NewEntry, ParseCategoryError,
    SystemClock,
};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    StorageConfig, ValidationConfig,
};
pub use storage::{
    create_collection_storage, CollectionStorage, CorruptRecordPolicy, KeyValueCollectionStorage,
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError,
};
pub use validation::{
    DraftError, FileCandidate, FileRules, SubmissionDraft, ValidationError, ValidationRules,
};
