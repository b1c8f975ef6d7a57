pub mod generate_task;
pub mod protocol;
pub mod rest;
pub mod state;
pub mod ws_handler;

// Re-export the main WebSocket handler to make it easily accessible
// to the binary that will build the web server router.
pub use rest::{
    create_user_handler, delete_user_handler, list_users_handler, put_api_key_handler,
    set_active_handler, update_expiry_handler, update_password_handler, update_quota_handler,
    watch_users_handler,
};
pub use ws_handler::ws_handler;
