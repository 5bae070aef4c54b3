//! `SQLite` schema definitions for flaskr.
//!
//! `init-db` runs [`SCHEMA_STATEMENTS`] in order, so existing data is
//! cleared every time the schema is initialized.

/// Drop the existing tables, children first.
pub const DROP_TABLES: &str = r"
DROP TABLE IF EXISTS post;
DROP TABLE IF EXISTS user;
";

/// SQL statement to create the user table.
pub const CREATE_USER_TABLE: &str = r"
CREATE TABLE user (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
)
";

/// SQL statement to create the post table.
pub const CREATE_POST_TABLE: &str = r"
CREATE TABLE post (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id INTEGER NOT NULL,
    created TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    FOREIGN KEY (author_id) REFERENCES user (id)
)
";

/// All schema statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[DROP_TABLES, CREATE_USER_TABLE, CREATE_POST_TABLE];
