//! Terminal UI: renders a game session and turns key presses into drops and
//! restarts. It only talks to the engine through `GameSession`.

mod app;
mod game_view;

pub use app::App;
pub use game_view::player_color;
