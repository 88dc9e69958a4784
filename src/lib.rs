//! ghprofile: look up a GitHub user and their public repositories.
//!
//! The core is [`github::fetch_user_and_repos`], which requests the profile and
//! the repository list concurrently and returns both or a [`error::FetchError`].
//! [`session::Session`] layers search tickets on top so that an older, slower
//! answer never replaces a newer one.

pub mod age;
pub mod config;
pub mod error;
pub mod github;
pub mod logging;
pub mod models;
pub mod prompt;
pub mod render;
pub mod session;
pub mod state;
pub mod stats;
pub mod svg;
pub mod validate;
