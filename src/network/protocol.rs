//! Protocol Messages
//!
//! JSON bodies exchanged with the browser client. Responses that carry game
//! state serialize [`GameState`](crate::game::state::GameState) directly.

use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::game::action::{Action, ActionError, MoveDirection};

// =============================================================================
// CLIENT -> SERVER
// =============================================================================

/// Body of `POST /action`.
///
/// Every field is optional on the wire; [`ActionRequest::into_action`]
/// decides what the combination means.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// `toggleSensor`, `move` or `sleep`
    #[serde(default)]
    pub action_type: Option<String>,

    /// Single sensor to toggle (takes precedence over `sensors` when it is
    /// a non-empty string)
    #[serde(default)]
    pub sensor: Option<Value>,

    /// Sensors to toggle; anything other than an array of strings is ignored
    #[serde(default)]
    pub sensors: Option<Value>,

    /// `forward`, `backward`, `left` or `right`. Any other non-empty value
    /// is a stationary move.
    #[serde(default)]
    pub move_direction: Option<Value>,
}

impl ActionRequest {
    /// Deserialize from a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Turn the wire request into a game action.
    pub fn into_action(self) -> Result<Action, ActionError> {
        match self.action_type.as_deref() {
            Some("toggleSensor") => Ok(Action::ToggleSensor {
                sensors: sensor_list(self.sensor, self.sensors),
            }),
            Some("move") => Ok(Action::Move {
                direction: self.move_direction.and_then(direction_from),
            }),
            Some("sleep") => Ok(Action::Sleep),
            other => Err(ActionError::UnknownAction(other.unwrap_or_default().to_string())),
        }
    }
}

/// Resolve which sensors a toggle request names.
fn sensor_list(sensor: Option<Value>, sensors: Option<Value>) -> Vec<String> {
    if let Some(Value::String(name)) = sensor {
        if !name.is_empty() {
            return vec![name];
        }
    }
    match sensors {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

/// Resolve the direction of a move request.
///
/// Empty values (`null`, `false`, `0`, `""`) mean no direction. A string goes
/// through [`MoveDirection::parse`]; any other value is a stationary move.
fn direction_from(value: Value) -> Option<MoveDirection> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) => MoveDirection::parse(&s),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        _ => Some(MoveDirection::Stationary),
    }
}

// =============================================================================
// SERVER -> CLIENT
// =============================================================================

/// Body of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

impl From<&ActionError> for ErrorResponse {
    fn from(err: &ActionError) -> Self {
        Self { error: err.to_string() }
    }
}
