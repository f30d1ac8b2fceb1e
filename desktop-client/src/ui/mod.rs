mod game_ui;
mod sign_prompt;

pub use game_ui::TicTacToeApp;
pub use sign_prompt::prompt_for_sign;
