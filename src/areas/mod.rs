//! Core repository components
//!
//! This module contains the on-disk pieces of a Git repository the resolver reads:
//!
//! - `database`: Loose object store (read-only)
//! - `refs`: Branch refs under `.git/refs`
//! - `shell`: Fallback to the `git` binary for objects that are not loose
//! - `repository`: Ties the above together for a work tree

pub mod database;
pub mod refs;
pub mod repository;
pub mod shell;
