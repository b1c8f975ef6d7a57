//! services/api/src/web/protocol.rs
//!
//! Defines the WebSocket message protocol between the browser client and the API server
//! for the image editor studio.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The generation quality tier requested by the client.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Standard,
    Premium,
}

/// Which of the two upload slots a binary frame targets.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    Main,
    Reference,
}

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================
// NOTE: Image payloads are sent as raw Binary frames. Each binary frame must be
// announced by a preceding `UploadImage` message naming its slot and MIME type.
//=========================================================================================

/// Represents the structured text messages a client can send to the server.
#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Initializes a session. This must be the first message sent on the connection.
    /// `user_id: None` opens an administrator session with unmetered access.
    Init { user_id: Option<Uuid> },

    /// Stores a per-session API key override used in place of the configured key.
    SetOverrideKey { api_key: String },

    /// Announces that the next Binary frame carries an image for `slot`.
    UploadImage { slot: ImageSlot, mime_type: String },

    /// Clears an upload slot.
    ClearImage { slot: ImageSlot },

    /// Requests a generation. Preset fields carry stable preset identifiers;
    /// unknown identifiers are ignored.
    Generate {
        mode: String,
        #[serde(default)]
        interior_source: Option<String>,
        tier: Tier,
        #[serde(default)]
        description: String,
        #[serde(default)]
        edit_command: String,
        #[serde(default)]
        room_type: Option<String>,
        #[serde(default)]
        interior_style: Option<String>,
        #[serde(default)]
        plan_style: Option<String>,
        #[serde(default)]
        renovation_scene: Option<String>,
        #[serde(default)]
        landscape_scene: Option<String>,
        #[serde(default)]
        exterior_scene: Option<String>,
        #[serde(default)]
        arch_style: Option<String>,
        #[serde(default)]
        render_style: Option<String>,
    },

    /// Runs the plan-reading vision call against the main slot image.
    AnalyzePlan {
        #[serde(default)]
        interior_style: Option<String>,
    },

    /// Steps the canvas back one edit.
    Undo,

    /// Steps the canvas forward one edit.
    Redo,

    /// Clears the canvas, both upload slots and the edit history.
    ResetCanvas,

    /// Promotes the latest generated image to the main input slot.
    UseAsInput,

    /// Restores a past generation from the session history onto the canvas.
    RecallHistoryEntry { id: Uuid },
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================
// NOTE: Generated images are sent as raw Binary frames. These messages provide
// context for those frames.
//=========================================================================================

/// A compact view of one session-history generation for list payloads.
#[derive(Serialize, Debug, Clone)]
pub struct HistoryEntrySummary {
    pub id: Uuid,
    pub timestamp: String,
    pub prompt: String,
}

/// Represents the structured text messages the server can send to the client.
#[derive(Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Confirms successful session initialization.
    SessionReady,

    /// Acknowledges a binary upload landing in `slot`.
    ImageStored { slot: ImageSlot },

    /// Signals that a generation call is in flight.
    GenerationStarted,

    /// Signals a completed generation. The image follows as a Binary frame.
    GenerationFinished { timestamp: String, prompt: String },

    /// Signals that an in-flight generation was cancelled before completion.
    GenerationCancelled,

    /// A non-fatal advisory, e.g. a silent tier downgrade.
    Notice { message: String },

    /// Reports an error to the client, which should display an error message.
    Error { message: String },

    /// The current undo/redo availability. Sent after any canvas mutation.
    CanvasState { can_undo: bool, can_redo: bool },

    /// The textual layout description produced by the plan-reading call.
    PlanDescription { prompt: String },

    /// The session's generation history, most recent first.
    HistoryList { entries: Vec<HistoryEntrySummary> },
}
