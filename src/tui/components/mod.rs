//! # TUI Components
//!
//! Components follow two patterns:
//!
//! - **Stateless / transient** — created fresh each frame with the data they
//!   need (`TitleBar`, `InputPanel`, `Card`).
//! - **Stateful** — persistent state lives in `TuiState`, a transient
//!   wrapper borrows it during rendering (`CardList` over `CardListState`).
//!
//! Each component file co-locates its state types, rendering, event
//! handling, and tests. Data arrives as props (struct fields), never read
//! from ambient state, so every component can be driven by a test fixture.

pub mod card;
pub mod card_list;
pub mod input_panel;
pub mod text_wrap;
pub mod title_bar;

pub use card_list::{CardList, CardListState};
pub use input_panel::InputPanel;
pub use title_bar::TitleBar;
