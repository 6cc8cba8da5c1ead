#![doc(html_root_url = "https://docs.rs/leaderboard-dom/0.1.0")]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! A browser leaderboard widget.
//!
//! Entries are kept in a [`Session`] (sorted, persisted to `localStorage`) and projected onto absolutely
//! positioned DOM rows by [`reconcile`]. Rows keep their identity across reorders, so only their offsets change
//! and the browser can animate them.
//!
//! In the browser, call [`mount`] (or `mountLeaderboard()` from JavaScript) once the page has loaded.

pub use lignin;

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

mod app;
pub mod config;
pub mod countries;
pub mod dom;
pub mod entry;
pub mod form;
pub mod ids;
pub mod layout;
pub mod materialize;
pub mod reconcile;
pub mod session;
pub mod storage;
pub mod store;
pub mod template;

pub use app::{mount, mount_leaderboard, Leaderboard, MountError};
pub use config::Config;
pub use entry::{Entry, EntryId};
pub use reconcile::{reconcile, Pass, Surface};
pub use session::{NewEntry, Session};
