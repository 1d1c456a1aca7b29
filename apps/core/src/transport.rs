use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::contract::{CoreResponse, ViewEvent, ViewSnapshot};
use crate::controller::{ControllerError, SearchController};
use crate::shortcut::KeyEvent;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidJson,
    InvalidRequest,
    UnknownTab,
    Disposed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TransportResponse {
    Ok { response: CoreResponse },
    Err { error: ErrorResponse },
}

pub fn handle_event(
    controller: &mut SearchController,
    event: ViewEvent,
    now: Instant,
) -> TransportResponse {
    match dispatch(controller, event, now) {
        Ok(response) => TransportResponse::Ok { response },
        Err(error) => TransportResponse::Err {
            error: map_controller_error(error),
        },
    }
}

pub fn handle_json(controller: &mut SearchController, payload: &str, now: Instant) -> String {
    let response = match serde_json::from_str::<ViewEvent>(payload) {
        Ok(event) => handle_event(controller, event, now),
        Err(error) => TransportResponse::Err {
            error: ErrorResponse {
                code: ErrorCode::InvalidJson,
                message: error.to_string(),
            },
        },
    };
    encode(&response)
}

pub fn snapshot_json(snapshot: ViewSnapshot) -> String {
    encode(&TransportResponse::Ok {
        response: CoreResponse::Snapshot(Box::new(snapshot)),
    })
}

fn dispatch(
    controller: &mut SearchController,
    event: ViewEvent,
    now: Instant,
) -> Result<CoreResponse, ControllerError> {
    let response: CoreResponse = match event {
        ViewEvent::QueryInput(input) => controller.on_query_input(&input.text, now)?.into(),
        ViewEvent::Clear => controller.on_clear(now)?.into(),
        ViewEvent::TabSelect(tab) => controller.on_tab_select(&tab.id)?.into(),
        ViewEvent::VisibilityChange(settings) => controller.on_visibility_change(settings)?.into(),
        ViewEvent::ToggleVisibility(tab) => controller.on_toggle_visibility(&tab.id)?.into(),
        ViewEvent::Key(press) => {
            let event = KeyEvent {
                key: press.key,
                ctrl: press.ctrl,
                meta: press.meta,
                alt: press.alt,
            };
            CoreResponse::Shortcut {
                outcome: controller.on_key(&event, press.focus)?,
            }
        }
        ViewEvent::Dispose => {
            controller.dispose();
            CoreResponse::Disposed
        }
    };
    Ok(response)
}

fn encode(response: &TransportResponse) -> String {
    match serde_json::to_string(response) {
        Ok(encoded) => encoded,
        Err(error) => {
            tracing::error!(%error, "failed to encode transport response");
            format!(
                "{{\"status\":\"err\",\"error\":{{\"code\":\"invalid_request\",\"message\":{}}}}}",
                serde_json::Value::String(error.to_string())
            )
        }
    }
}

fn map_controller_error(error: ControllerError) -> ErrorResponse {
    let code = match &error {
        ControllerError::UnknownTab(_) => ErrorCode::UnknownTab,
        ControllerError::Disposed => ErrorCode::Disposed,
        ControllerError::Config(_) | ControllerError::Shortcut(_) => ErrorCode::InvalidRequest,
    };
    ErrorResponse {
        code,
        message: error.to_string(),
    }
}
