// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod goals;
pub mod insights;
pub mod log;
pub mod models;
pub mod report;
pub mod sample;
pub mod store;
pub mod time;
pub mod utils;

pub use error::{Error, Result};
