pub mod app;
pub mod cards;
pub mod pages;
pub mod session;
pub mod theme;
pub mod widgets;

pub use app::GakuApp;
