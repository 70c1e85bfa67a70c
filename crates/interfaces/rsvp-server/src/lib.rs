//! HTTP surface for the wedding RSVP pages.
//!
//! Every address shape the app understands (`/`, `/{slug}`, `/{slug}/rsvp`,
//! `/dashboard/{slug}` and the `?setup=`/`?rsvp=`/`?dashboard=` forms) is
//! served as a server-rendered page whose `:root` carries the host palette.
//! A JSON API under `/api` exposes the same records.

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
