//! Layerstore: layered configuration resolution over host key/value storage
//!
//! Scripts running inside heterogeneous host environments see one storage
//! contract (`get/set/remove/clear` with `@key.path` deep addressing) and
//! one deterministic multi-source merge of compiled-in defaults, persisted
//! state and runtime arguments.

pub mod error;
pub mod logging;
pub mod merge;
pub mod resolve;
pub mod storage;
pub mod value_path;
