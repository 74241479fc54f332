pub mod config;
pub mod constants;
pub mod controls;
pub mod host;
pub mod metrics;
pub mod registry;
pub mod runtime;
pub mod speed;
pub mod studio;
pub mod surface;

pub use config::*;
pub use controls::*;
pub use host::*;
pub use metrics::*;
pub use registry::*;
pub use runtime::*;
pub use speed::*;
pub use studio::*;
pub use surface::*;
