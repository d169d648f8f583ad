//! # ayat-search
//!
//! HTTP gateway for a Quranic semantic-search application. Question
//! suggestions are served in-process from a static corpus; verse search and
//! verse detail are proxied to an external Python search/rank server and
//! reshaped for the UI.
//!
//! ## Request flow
//!
//! ```text
//!   POST /api/suggest                 POST /api/search, /api/show
//!          │                                     │
//!          ▼                                     ▼
//!  ┌──────────────────┐                ┌───────────────────┐
//!  │ QuestionRepository│                │   BackendClient   │
//!  │  rebuild_if_stale │                │ GET /  (health)   │
//!  └────────┬─────────┘                │ POST /api/search  │
//!           │ snapshot                  │  (one 30s budget) │
//!           ▼                           └─────────┬─────────┘
//!  ┌──────────────────┐                           │
//!  │ exact lookup     │                           ▼
//!  │ + word-overlap   │                ┌───────────────────┐
//!  │   scan (≥ 0.3)   │                │ transform: verse  │
//!  │ best per qid     │                │ schema, footnote  │
//!  │ score/length sort│                │ cleanup, related  │
//!  │ top 7 + Arabic   │                │ questions + gold  │
//!  └──────────────────┘                └───────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for server, data dir and backend
//! - [`models`] - Request/response types in the shape the UI consumes
//! - [`loader`] - Forgiving JSONL/text readers: missing files and bad lines are skipped
//! - [`suggest`] - Normalization, question indices, similarity scoring, ranking, repository cache
//! - [`reference`] - Gold-standard qrels, verse translation table, surah names
//! - [`backend`] - Search backend client, wire types, error classification, response shaping
//! - [`api`] - Axum handlers for suggest, search and verse detail
//! - [`state`] - Shared application state

pub mod api;
pub mod backend;
pub mod config;
pub mod loader;
pub mod models;
pub mod reference;
pub mod state;
pub mod suggest;
