//! services/api/src/web/state.rs
//!
//! Defines the application's shared and session-specific states.

use crate::config::Config;
use crate::web::protocol::ImageSlot;
use archstudio_core::{
    domain::{ImageData, Requester, SessionHistoryEntry},
    history::EditHistory,
    ports::{ImageGenerationService, UserDirectoryService},
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn UserDirectoryService>,
    pub generator: Arc<dyn ImageGenerationService>,
    pub config: Arc<Config>,
}

//=========================================================================================
// EditorSession (Specific to One WebSocket Connection)
//=========================================================================================

/// The state for a single, active editor WebSocket connection.
pub struct EditorSession {
    /// Who opened this session: the administrator, or a metered member.
    pub requester: Requester,
    /// Per-session API key override, taking precedence over configured keys.
    pub override_api_key: Option<String>,
    /// The main input image slot.
    pub main_image: Option<ImageData>,
    /// The style reference slot.
    pub reference_image: Option<ImageData>,
    /// The most recent generation output shown on the canvas.
    pub generated_image: Option<ImageData>,
    /// Undo/redo stack over canvas states.
    pub history: EditHistory,
    /// All generations this session produced, most recent first.
    pub session_history: Vec<SessionHistoryEntry>,
    /// Set by `UploadImage`; consumed by the next Binary frame.
    pub pending_upload: Option<(ImageSlot, String)>,
    /// A token to gracefully cancel the in-flight generation task.
    pub cancellation_token: CancellationToken,
}

impl EditorSession {
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            override_api_key: None,
            main_image: None,
            reference_image: None,
            generated_image: None,
            history: EditHistory::new(),
            session_history: Vec::new(),
            pending_upload: None,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Stores an uploaded image into its slot. A main upload starts a fresh
    /// editing lineage: the canvas output is cleared and the history is
    /// re-seeded from the new source.
    pub fn store_upload(&mut self, slot: ImageSlot, image: ImageData) {
        match slot {
            ImageSlot::Main => {
                self.generated_image = None;
                self.history = EditHistory::seeded(image.clone());
                self.main_image = Some(image);
            }
            ImageSlot::Reference => {
                self.reference_image = Some(image);
            }
        }
    }

    pub fn clear_slot(&mut self, slot: ImageSlot) {
        match slot {
            ImageSlot::Main => self.main_image = None,
            ImageSlot::Reference => self.reference_image = None,
        }
    }

    /// The image a new generation should edit. The latest output chains in
    /// only when the user typed a follow-up edit command; a plain description
    /// always starts over from the uploaded main image.
    pub fn active_input(&self, has_edit_command: bool) -> Option<&ImageData> {
        if has_edit_command {
            self.generated_image.as_ref().or(self.main_image.as_ref())
        } else {
            self.main_image.as_ref()
        }
    }

    /// Wipes the canvas, both slots and the edit history. The session-level
    /// generation log survives a reset.
    pub fn reset_canvas(&mut self) {
        self.main_image = None;
        self.reference_image = None;
        self.generated_image = None;
        self.history.clear();
        self.pending_upload = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn png(tag: u8) -> ImageData {
        ImageData {
            mime_type: "image/png".to_string(),
            data: Bytes::from(vec![tag]),
        }
    }

    #[test]
    fn main_upload_clears_output_and_reseeds_history() {
        let mut session = EditorSession::new(Requester::Admin);
        session.generated_image = Some(png(9));
        session.history = EditHistory::seeded(png(9));

        session.store_upload(ImageSlot::Main, png(1));

        assert!(session.generated_image.is_none());
        assert_eq!(session.history.len(), 1);
        assert_eq!(
            session.active_input(false).unwrap().data,
            Bytes::from(vec![1])
        );
    }

    #[test]
    fn reference_upload_leaves_canvas_untouched() {
        let mut session = EditorSession::new(Requester::Admin);
        session.store_upload(ImageSlot::Main, png(1));
        session.generated_image = Some(png(2));

        session.store_upload(ImageSlot::Reference, png(3));

        assert!(session.generated_image.is_some());
        assert_eq!(
            session.active_input(true).unwrap().data,
            Bytes::from(vec![2])
        );
    }

    #[test]
    fn fresh_description_starts_over_from_the_uploaded_image() {
        let mut session = EditorSession::new(Requester::Admin);
        session.store_upload(ImageSlot::Main, png(1));
        session.generated_image = Some(png(2));

        assert_eq!(
            session.active_input(false).unwrap().data,
            Bytes::from(vec![1])
        );
        assert_eq!(
            session.active_input(true).unwrap().data,
            Bytes::from(vec![2])
        );
    }

    #[test]
    fn reset_preserves_session_history() {
        let mut session = EditorSession::new(Requester::Admin);
        session.store_upload(ImageSlot::Main, png(1));
        session.session_history.push(SessionHistoryEntry {
            id: uuid::Uuid::new_v4(),
            image: png(2),
            timestamp: "12:00".to_string(),
            prompt: "a prompt".to_string(),
        });

        session.reset_canvas();

        assert!(session.main_image.is_none());
        assert!(session.history.is_empty());
        assert_eq!(session.session_history.len(), 1);
    }
}
