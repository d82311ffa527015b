pub mod calculator;
pub mod format;
pub mod leaderboard;
pub mod quiz;
pub mod state;
