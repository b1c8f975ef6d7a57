pub mod domain;
pub mod history;
pub mod ports;
pub mod presets;
pub mod prompt;
pub mod quota;

pub use domain::{GlobalSettings, ImageData, Requester, SessionHistoryEntry, UserRecord};
pub use history::EditHistory;
pub use ports::{ImageGenerationService, OutputOptions, PortError, PortResult, UserDirectoryService};
pub use prompt::{compose, EditorMode, InteriorSource, PromptRequest, Selections};
