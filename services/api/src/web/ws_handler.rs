//! services/api/src/web/ws_handler.rs
//!
//! This is the main entry point and control loop for an editor WebSocket
//! connection. It manages the per-session canvas state and delegates
//! generation work to background tasks.

use crate::web::{
    generate_task::{analyze_process, generate_process, GenerateOutcome, GenerateParams},
    protocol::{ClientMessage, HistoryEntrySummary, ImageSlot, ServerMessage},
    state::{AppState, EditorSession},
};
use archstudio_core::{
    domain::{ImageData, Requester},
    presets::{
        ArchStyleChoice, ExteriorScene, InteriorStyle, LandscapeScene, PlanStyle,
        RenderStyle, RenovationScene, RoomType,
    },
    prompt::{EditorMode, InteriorSource, Selections},
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{
    stream::{SplitSink, StreamExt},
    SinkExt,
};
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

type WsSender = Arc<Mutex<SplitSink<WebSocket, Message>>>;

/// The handler for upgrading HTTP requests to WebSocket connections.
pub async fn ws_handler(ws: WebSocketUpgrade, State(app_state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, app_state))
}

/// Serializes and sends one server message. Returns `false` when the client
/// is gone.
async fn send_message(ws_sender: &WsSender, msg: &ServerMessage) -> bool {
    let json = match serde_json::to_string(msg) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize server message: {}", e);
            return false;
        }
    };
    ws_sender
        .lock()
        .await
        .send(Message::Text(json.into()))
        .await
        .is_ok()
}

async fn send_image(ws_sender: &WsSender, image: &ImageData) -> bool {
    ws_sender
        .lock()
        .await
        .send(Message::Binary(image.data.clone()))
        .await
        .is_ok()
}

async fn send_canvas_state(ws_sender: &WsSender, session_state_lock: &Arc<Mutex<EditorSession>>) {
    let (can_undo, can_redo) = {
        let session = session_state_lock.lock().await;
        (session.history.can_undo(), session.history.can_redo())
    };
    send_message(ws_sender, &ServerMessage::CanvasState { can_undo, can_redo }).await;
}

async fn handle_socket(socket: WebSocket, app_state: Arc<AppState>) {
    info!("New editor WebSocket connection established.");

    // The sender is wrapped in an Arc<Mutex<>> to allow for shared mutable access across tasks.
    let (sender, mut receiver) = socket.split();
    let ws_sender: WsSender = Arc::new(Mutex::new(sender));

    let session_state_lock: Arc<Mutex<EditorSession>>;

    // --- 1. Initialization Phase ---
    if let Some(Ok(Message::Text(init_json))) = receiver.next().await {
        match serde_json::from_str::<ClientMessage>(&init_json) {
            Ok(ClientMessage::Init { user_id }) => {
                let requester = match user_id {
                    Some(id) => match app_state.directory.get_user_by_id(id).await {
                        Ok(user) => {
                            info!("Initializing member session for user {}", id);
                            Requester::Member(user)
                        }
                        Err(e) => {
                            error!("Failed to load user {}: {}", id, e);
                            let _ = send_message(
                                &ws_sender,
                                &ServerMessage::Error {
                                    message: "Failed to load user account.".to_string(),
                                },
                            )
                            .await;
                            return;
                        }
                    },
                    None => {
                        info!("Initializing admin session");
                        Requester::Admin
                    }
                };

                session_state_lock = Arc::new(Mutex::new(EditorSession::new(requester)));
                if !send_message(&ws_sender, &ServerMessage::SessionReady).await {
                    error!("Failed to send session ready message.");
                    return;
                }
            }
            _ => {
                error!("First message was not a valid Init message.");
                return;
            }
        }
    } else {
        error!("Client disconnected before sending Init message.");
        return;
    }

    // --- 2. Main Message Loop ---
    let mut generate_task_handle: Option<JoinHandle<()>> = None;

    loop {
        if let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    handle_text_message(
                        text.to_string(),
                        &app_state,
                        &session_state_lock,
                        &ws_sender,
                        &mut generate_task_handle,
                    )
                    .await;
                }
                Message::Binary(data) => {
                    let stored_slot = {
                        let mut session = session_state_lock.lock().await;
                        match session.pending_upload.take() {
                            Some((slot, mime_type)) => {
                                session.store_upload(slot, ImageData::new(mime_type, data));
                                Some(slot)
                            }
                            None => {
                                warn!("Received an unannounced binary frame, dropping it.");
                                None
                            }
                        }
                    };
                    if let Some(slot) = stored_slot {
                        send_message(&ws_sender, &ServerMessage::ImageStored { slot }).await;
                        send_canvas_state(&ws_sender, &session_state_lock).await;
                    }
                }
                Message::Close(_) => {
                    info!("Client sent close message.");
                    break;
                }
                _ => {}
            }
        } else {
            info!("Client disconnected.");
            break;
        }
    }

    // --- 3. Cleanup ---
    {
        let session = session_state_lock.lock().await;
        session.cancellation_token.cancel();
    }
    if let Some(handle) = generate_task_handle {
        handle.abort();
    }
    info!("Editor WebSocket connection closed.");
}

/// Helper function to handle the logic for different `ClientMessage` variants.
async fn handle_text_message(
    text: String,
    app_state: &Arc<AppState>,
    session_state_lock: &Arc<Mutex<EditorSession>>,
    ws_sender: &WsSender,
    generate_task_handle: &mut Option<JoinHandle<()>>,
) {
    let client_msg = match serde_json::from_str::<ClientMessage>(&text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Failed to deserialize client message: {}", e);
            return;
        }
    };

    match client_msg {
        ClientMessage::Init { .. } => {
            warn!("Received subsequent Init message, which is ignored.");
        }
        ClientMessage::SetOverrideKey { api_key } => {
            let mut session = session_state_lock.lock().await;
            session.override_api_key = if api_key.trim().is_empty() {
                None
            } else {
                Some(api_key)
            };
        }
        ClientMessage::UploadImage { slot, mime_type } => {
            let mut session = session_state_lock.lock().await;
            session.pending_upload = Some((slot, mime_type));
        }
        ClientMessage::ClearImage { slot } => {
            {
                let mut session = session_state_lock.lock().await;
                session.clear_slot(slot);
            }
            send_canvas_state(ws_sender, session_state_lock).await;
        }
        ClientMessage::Generate {
            mode,
            interior_source,
            tier,
            description,
            edit_command,
            room_type,
            interior_style,
            plan_style,
            renovation_scene,
            landscape_scene,
            exterior_scene,
            arch_style,
            render_style,
        } => {
            // Generating while a request is in flight cancels it instead.
            if let Some(handle) = generate_task_handle {
                if !handle.is_finished() {
                    info!("Generation requested while one is in flight. Cancelling.");
                    let session = session_state_lock.lock().await;
                    session.cancellation_token.cancel();
                    drop(session);
                    send_message(ws_sender, &ServerMessage::GenerationCancelled).await;
                    return;
                }
            }

            let params = GenerateParams {
                mode: EditorMode::from_id(&mode).unwrap_or_default(),
                interior_source: interior_source
                    .as_deref()
                    .and_then(InteriorSource::from_id)
                    .unwrap_or_default(),
                premium_requested: tier == crate::web::protocol::Tier::Premium,
                description,
                edit_command,
                selections: Selections {
                    arch_style: arch_style.as_deref().map(ArchStyleChoice::parse),
                    exterior_scene: exterior_scene.as_deref().and_then(ExteriorScene::from_id),
                    room_type: room_type.as_deref().and_then(RoomType::from_id),
                    interior_style: interior_style.as_deref().and_then(InteriorStyle::from_id),
                    plan_style: plan_style.as_deref().and_then(PlanStyle::from_id),
                    renovation_scene: renovation_scene
                        .as_deref()
                        .and_then(RenovationScene::from_id),
                    landscape_scene: landscape_scene
                        .as_deref()
                        .and_then(LandscapeScene::from_id),
                    render_style: render_style
                        .as_deref()
                        .and_then(RenderStyle::from_id)
                        .unwrap_or_default(),
                },
            };

            let token = CancellationToken::new();
            {
                let mut session = session_state_lock.lock().await;
                session.cancellation_token = token.clone();
            }

            send_message(ws_sender, &ServerMessage::GenerationStarted).await;

            let task = {
                let app_state = app_state.clone();
                let session_state_lock = session_state_lock.clone();
                let ws_sender = ws_sender.clone();
                tokio::spawn(async move {
                    match generate_process(app_state, session_state_lock.clone(), params, token)
                        .await
                    {
                        Ok(GenerateOutcome::Completed {
                            image,
                            prompt,
                            timestamp,
                            notice,
                        }) => {
                            if let Some(message) = notice {
                                send_message(&ws_sender, &ServerMessage::Notice { message })
                                    .await;
                            }
                            send_message(
                                &ws_sender,
                                &ServerMessage::GenerationFinished { timestamp, prompt },
                            )
                            .await;
                            send_image(&ws_sender, &image).await;
                            send_canvas_state(&ws_sender, &session_state_lock).await;
                            send_history_list(&ws_sender, &session_state_lock).await;
                        }
                        Ok(GenerateOutcome::Cancelled) => {
                            send_message(&ws_sender, &ServerMessage::GenerationCancelled).await;
                        }
                        Err(e) => {
                            error!("Generation failed: {}", e);
                            send_message(
                                &ws_sender,
                                &ServerMessage::Error {
                                    message: e.to_string(),
                                },
                            )
                            .await;
                        }
                    }
                })
            };
            *generate_task_handle = Some(task);
        }
        ClientMessage::AnalyzePlan { interior_style } => {
            match analyze_process(app_state.clone(), session_state_lock.clone(), interior_style)
                .await
            {
                Ok(prompt) => {
                    send_message(ws_sender, &ServerMessage::PlanDescription { prompt }).await;
                }
                Err(e) => {
                    error!("Plan analysis failed: {}", e);
                    send_message(
                        ws_sender,
                        &ServerMessage::Error {
                            message: e.to_string(),
                        },
                    )
                    .await;
                }
            }
        }
        ClientMessage::Undo => {
            let restored = {
                let mut session = session_state_lock.lock().await;
                let restored = session.history.undo().cloned();
                if let Some(image) = &restored {
                    session.generated_image = Some(image.clone());
                }
                restored
            };
            send_canvas_state(ws_sender, session_state_lock).await;
            if let Some(image) = restored {
                send_image(ws_sender, &image).await;
            }
        }
        ClientMessage::Redo => {
            let restored = {
                let mut session = session_state_lock.lock().await;
                let restored = session.history.redo().cloned();
                if let Some(image) = &restored {
                    session.generated_image = Some(image.clone());
                }
                restored
            };
            send_canvas_state(ws_sender, session_state_lock).await;
            if let Some(image) = restored {
                send_image(ws_sender, &image).await;
            }
        }
        ClientMessage::ResetCanvas => {
            {
                let mut session = session_state_lock.lock().await;
                session.cancellation_token.cancel();
                session.reset_canvas();
            }
            send_canvas_state(ws_sender, session_state_lock).await;
        }
        ClientMessage::UseAsInput => {
            let promoted = {
                let mut session = session_state_lock.lock().await;
                match session.generated_image.take() {
                    Some(image) => {
                        session.store_upload(ImageSlot::Main, image);
                        true
                    }
                    None => false,
                }
            };
            if promoted {
                send_message(
                    ws_sender,
                    &ServerMessage::ImageStored {
                        slot: ImageSlot::Main,
                    },
                )
                .await;
            }
            send_canvas_state(ws_sender, session_state_lock).await;
        }
        ClientMessage::RecallHistoryEntry { id } => {
            let recalled = {
                let mut session = session_state_lock.lock().await;
                let entry = session
                    .session_history
                    .iter()
                    .find(|e| e.id == id)
                    .map(|e| e.image.clone());
                if let Some(image) = &entry {
                    session.generated_image = Some(image.clone());
                    session.history.push(image.clone());
                }
                entry
            };
            match recalled {
                Some(image) => {
                    send_canvas_state(ws_sender, session_state_lock).await;
                    send_image(ws_sender, &image).await;
                }
                None => {
                    send_message(
                        ws_sender,
                        &ServerMessage::Error {
                            message: "Unknown history entry.".to_string(),
                        },
                    )
                    .await;
                }
            }
        }
    }
}

async fn send_history_list(ws_sender: &WsSender, session_state_lock: &Arc<Mutex<EditorSession>>) {
    let entries = {
        let session = session_state_lock.lock().await;
        session
            .session_history
            .iter()
            .map(|e| HistoryEntrySummary {
                id: e.id,
                timestamp: e.timestamp.clone(),
                prompt: e.prompt.clone(),
            })
            .collect()
    };
    send_message(ws_sender, &ServerMessage::HistoryList { entries }).await;
}
