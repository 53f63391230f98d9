//! Monster stat-block rendering and search state.
//!
//! This crate provides:
//! - The stat-block renderer, producing a display-node tree per monster
//! - Sub-renderers for abilities, actions, spells and labeled lists
//! - Action-bucket classification and derived text formatting
//! - The search view-model with stale-response protection
//!
//! # Quick Start
//!
//! ```ignore
//! use bestiary_core::{render_monster, MonsterApi, SearchController};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = MonsterApi::from_env()?;
//!     let mut search = SearchController::new(api.config().page_size);
//!
//!     search.set_query("goblin");
//!     search.submit(&api).await;
//!
//!     for monster in search.results() {
//!         println!("{}", render_monster(monster));
//!     }
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod cards;
pub mod format;
pub mod render;
pub mod search;
pub mod testing;
pub mod worker;

// Re-export the wire model and client so callers need only this crate.
pub use bestiary_api::{model, ApiConfig, Error as ApiError, Monster, MonsterApi, SearchQuery, Spell};

// Primary public API
pub use actions::ActionBucket;
pub use cards::{spell_card, Component, LabeledList};
pub use render::{render_monster, render_results, Card, Node};
pub use search::{MonsterSearch, SearchController, SearchOutcome, SearchStatus, SearchTicket};
pub use testing::MockSearch;
pub use worker::{SearchReply, SearchWorker};
