#![cfg_attr(not(target_arch = "wasm32"), forbid(unsafe_code))]

pub mod chapter;
#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
#[cfg(not(target_arch = "wasm32"))]
pub mod click;
pub mod config;
pub mod controller;
pub mod dom;
pub mod formats;
#[cfg(not(target_arch = "wasm32"))]
pub mod logging;
#[cfg(not(target_arch = "wasm32"))]
pub mod outline;
#[cfg(not(target_arch = "wasm32"))]
pub mod page;
pub mod store;
pub mod tree;
#[cfg(target_arch = "wasm32")]
pub mod web;
