use serde::{Deserialize, Serialize};

use crate::core::{Cell, MAX_MESSAGE_BYTES};

/// A move sent by a participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Target row (0-2)
    pub row: usize,
    /// Target column (0-2)
    pub col: usize,
}

impl MoveRequest {
    /// Decode and validate a move from an inbound text frame
    ///
    /// # Arguments
    ///
    /// * `text` - Raw frame payload
    ///
    /// # Returns
    ///
    /// The target cell if the payload is a well-formed move, error message otherwise
    ///
    /// # Validation Rules
    ///
    /// - At most 1KB of text
    /// - JSON object with integer `row` and `col`
    /// - Both coordinates in 0-2
    pub fn parse(text: &str) -> Result<Cell, String> {
        if text.len() > MAX_MESSAGE_BYTES {
            return Err(format!("Message too large: {} bytes", text.len()));
        }

        let request: MoveRequest =
            serde_json::from_str(text).map_err(|e| format!("Malformed move: {}", e))?;

        request.cell()
    }

    /// Convert to a board cell
    pub fn cell(&self) -> Result<Cell, String> {
        Cell::new(self.row, self.col).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_move() {
        let cell = MoveRequest::parse(r#"{"row": 1, "col": 2}"#).unwrap();
        assert_eq!(cell, Cell::new(1, 2).unwrap());
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let cell = MoveRequest::parse(r#"{"type": "move", "row": 0, "col": 0}"#).unwrap();
        assert_eq!(cell, Cell::new(0, 0).unwrap());
    }

    #[test]
    fn test_parse_out_of_range() {
        assert!(MoveRequest::parse(r#"{"row": 3, "col": 0}"#).is_err());
        assert!(MoveRequest::parse(r#"{"row": 0, "col": 7}"#).is_err());
    }

    #[test]
    fn test_parse_negative_coordinates() {
        assert!(MoveRequest::parse(r#"{"row": -1, "col": 0}"#).is_err());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(MoveRequest::parse("ping").is_err());
        assert!(MoveRequest::parse("").is_err());
        assert!(MoveRequest::parse(r#"{"row": 1}"#).is_err());
        assert!(MoveRequest::parse(r#"{"row": "1", "col": "1"}"#).is_err());
    }

    #[test]
    fn test_parse_too_large() {
        let padding = " ".repeat(MAX_MESSAGE_BYTES);
        let text = format!(r#"{{"row": 1, "col": 1}}{}"#, padding);

        let err = MoveRequest::parse(&text).unwrap_err();
        assert!(err.contains("too large"));
    }
}
