pub mod analysis;
pub mod auth;
pub mod board;
pub mod download;
pub mod exam;
pub mod shared;

pub use analysis::AnalysisCommands;
pub use auth::AuthCommands;
pub use board::BoardCommands;
pub use download::DownloadCommands;
pub use exam::ExamCommands;
