//! Database operations and SQLite management for the maintenance planner.
//!
//! This module provides low-level database operations for the Lathe
//! preventive maintenance system. It handles SQLite database connections,
//! schema management, and provides specialized query interfaces for plans,
//! activities, services, executions, and templates.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod activity_queries;
pub mod execution_queries;
pub mod migrations;
pub mod plan_queries;
pub mod service_queries;
pub mod template_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
