//! This file is the root of the `decodex` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`kernels`, `modules`,
//!     `recipes`, etc.) so the compiler knows they exist.
//! 2.  Re-exporting the handful of types a front end needs to drive a session:
//!     the data containers, the module registry, and the recipe manager/store.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
#[macro_use]
mod observability; // Make macros available throughout the crate

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod kernels;
pub mod modules;
pub mod recipes;

//==================================================================================
// 2. Public Surface
//==================================================================================
pub use config::DecodexConfig;
pub use data::{Data, DataManager};
pub use error::{DecodexError, Result};
pub use modules::{BuiltinModule, Direction, Module, ModuleRegistry};
pub use recipes::{Recipe, RecipeManager, RecipeStore, Step};
