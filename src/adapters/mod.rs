// Adapters layer: concrete implementations of the domain ports (http, storage, progress).

pub mod http;
pub mod progress;
pub mod storage;
