pub mod errors;
pub mod http;
pub mod route;
pub mod tasks;

pub use errors::GakuError;
pub use route::Route;
