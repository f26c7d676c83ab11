//! PR reviewer assignment service library.
//!
//! Teams, users and pull requests stored through SeaORM, with reviewers picked
//! automatically from the author's team and an actix-web HTTP surface.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
