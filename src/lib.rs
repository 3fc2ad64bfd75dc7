// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod book;
pub mod commands;
pub mod db;
pub mod errors;
pub mod models;
pub mod store;
pub mod utils;

pub use book::Book;
pub use errors::{LedgerError, Result};
