pub mod api;
pub mod cards;
pub mod core;
pub mod gui;
pub mod logging;
pub mod persistence;

pub use api::GakuClient;
pub use cards::{
    Card,
    CardType,
};
pub use core::GakuError;
