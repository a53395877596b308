use crate::error::ProtocolError;
use crate::state::{Action, GameSubmission, SharedState, SnapshotKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope for every frame in both directions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GameMessage {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

impl GameMessage {
    pub fn new(event: String, data: Value) -> Self {
        Self { event, data }
    }

    /// Snapshot frame carrying the whole state.
    pub fn snapshot(kind: SnapshotKind, state: &SharedState) -> Result<Self, serde_json::Error> {
        Ok(Self::new(kind.as_str().to_string(), serde_json::to_value(state)?))
    }

    /// Parse a text frame into an action.
    pub fn parse_action(text: &str) -> Result<Action, ProtocolError> {
        let msg: GameMessage =
            serde_json::from_str(text).map_err(ProtocolError::InvalidEnvelope)?;
        msg.into_action()
    }

    pub fn into_action(self) -> Result<Action, ProtocolError> {
        match self.event.as_str() {
            "setPlayers" => Ok(Action::SetPlayers(payload("setPlayers", self.data)?)),
            "addGame" => Ok(Action::AddGame(payload::<GameSubmission>("addGame", self.data)?)),
            "addCustomGame" => Ok(Action::AddCustomGame(payload("addCustomGame", self.data)?)),
            "resetSeason" => Ok(Action::ResetSeason),
            _ => Err(ProtocolError::UnknownEvent(self.event)),
        }
    }
}

fn payload<T: DeserializeOwned>(event: &'static str, data: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(data).map_err(|source| ProtocolError::InvalidPayload { event, source })
}
