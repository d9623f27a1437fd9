// Push socket framing: JSON text frames `{"event": ..., "data": ...}`
use serde::{Deserialize, Serialize};

use crate::model::{Cell, CellsPayload};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ClientMsg {
    AddCell(Cell),
    GetCells,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum ServerMsg {
    Cells(CellsPayload),
}

pub fn encode(msg: &ClientMsg) -> Result<String, serde_json::Error> {
    serde_json::to_string(msg)
}

pub fn decode(frame: &str) -> Result<ServerMsg, serde_json::Error> {
    serde_json::from_str(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn addcell_frame_shape() {
        let frame = encode(&ClientMsg::AddCell(Cell { x: 1, y: 1, r: 200, g: 100, b: 50 })).unwrap();
        let v: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(v, json!({"event": "addcell", "data": {"x":1,"y":1,"r":200,"g":100,"b":50}}));
    }

    #[test]
    fn getcells_frame_has_no_payload() {
        let v: Value = serde_json::from_str(&encode(&ClientMsg::GetCells).unwrap()).unwrap();
        assert_eq!(v, json!({"event": "getcells"}));
    }

    #[test]
    fn cells_event_accepts_keyed_lists() {
        let msg = decode(r#"{"event":"cells","data":{"0":{"x":1,"y":1,"r":200,"g":100,"b":50}}}"#).unwrap();
        let ServerMsg::Cells(payload) = msg;
        assert_eq!(payload.into_cells(), vec![Cell { x: 1, y: 1, r: 200, g: 100, b: 50 }]);
    }

    #[test]
    fn unknown_events_are_rejected() {
        assert!(decode(r#"{"event":"chat","data":"hi"}"#).is_err());
        assert!(decode("not json").is_err());
    }
}
