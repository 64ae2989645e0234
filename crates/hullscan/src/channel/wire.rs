//! Request/response shapes at the computation boundary.
//!
//! JSON forms: `{"tag": 1, "points": [{"x": .., "y": ..}, ..]}` for requests,
//! `{"tag": 1, "hull": [..]}` or `{"tag": 1, "error": {"kind": ..}}` for responses.

use serde::{Deserialize, Serialize};

use crate::error::{HullError, HullResult};
use crate::geom2::{Hull, Point};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request<T = f64> {
    pub tag: u64,
    pub points: Vec<Point<T>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Response<T = f64> {
    pub tag: u64,
    #[serde(flatten)]
    pub outcome: Outcome<T>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome<T = f64> {
    Hull(Hull<T>),
    Error(HullError),
}

impl<T> Response<T> {
    pub fn new(tag: u64, result: HullResult<Hull<T>>) -> Self {
        let outcome = match result {
            Ok(hull) => Outcome::Hull(hull),
            Err(err) => Outcome::Error(err),
        };
        Self { tag, outcome }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Hull(_))
    }

    pub fn into_result(self) -> HullResult<Hull<T>> {
        match self.outcome {
            Outcome::Hull(hull) => Ok(hull),
            Outcome::Error(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_json_shapes() {
        let ok = Response::new(3, Ok(Hull::from(vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0)])));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"tag": 3, "hull": [{"x": 0.0, "y": 0.0}, {"x": 1.0, "y": 2.0}]})
        );
        let err: Response = Response::new(4, Err(HullError::InvalidInput { index: 2 }));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"tag": 4, "error": {"kind": "InvalidInputError", "index": 2}})
        );
    }

    #[test]
    fn request_parses_from_json() {
        let req: Request<i64> =
            serde_json::from_value(json!({"tag": 7, "points": [{"x": 1, "y": -2}]})).unwrap();
        assert_eq!(req.tag, 7);
        assert_eq!(req.points, vec![Point::new(1, -2)]);
    }

    #[test]
    fn error_response_parses_back() {
        let text = r#"{"tag": 9, "error": {"kind": "ComputationError", "reason": "worker lost"}}"#;
        let resp: Response = serde_json::from_str(text).unwrap();
        assert!(!resp.is_ok());
        assert_eq!(
            resp.into_result(),
            Err(HullError::Computation {
                reason: "worker lost".to_string()
            })
        );
    }
}
