//! Scrape client engine: backend invocation, result handoff and effect execution.
mod backend;
mod export;
mod persist;
mod session;
mod shell;
mod store;
mod types;

pub use backend::{Backend, BackendSettings, ReqwestBackend, DEFAULT_BACKEND_URL};
pub use export::{export_result, render_export, ExportError};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use session::{Capabilities, Session, SubmissionReport};
pub use shell::{Clock, LogObserver, NullObserver, PresentError, ResultsPresenter};
pub use store::{
    get_results, put_results, FileStore, KeyValueStore, MemoryStore, StoreError, HANDOFF_KEY,
};
pub use types::{BackendError, BackendReply};
