// Library surface for headless/integration tests and reuse.
// Rendering lives in the binary; nothing here touches the terminal except
// the event source in `runtime` and the bell in `cue`.
pub mod app_dirs;
pub mod config;
pub mod cue;
pub mod guide;
pub mod input;
pub mod logging;
pub mod recipe;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod text;
pub mod timer;

pub use guide::Guide;
pub use session::{Phase, Session, Snapshot, Step};
pub use timer::{BrewTimer, Cue};
