//! Classification of `release/push` responses.

use serde_json::Value;

use super::{BadRequestResponse, PushOutcome, PushResponse};

const BODY_EXCERPT_CHARS: usize = 200;

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// Classify a push response by status code, then by body shape.
///
/// - 401 is always `Unauthorized`, whatever the body.
/// - 400 carries an array of validation failures, each becoming one reason.
/// - 2xx carries a push response object (or, from Sonarr, an array of them)
///   whose `rejected` flag decides between `Rejected` and `Accepted`.
/// - Any other status, or a body that does not parse, is an `Error`.
pub fn interpret(status: u16, body: &str) -> PushOutcome {
    match status {
        401 => PushOutcome::Unauthorized,
        400 => interpret_bad_request(body),
        200..=299 => interpret_success(body),
        other => PushOutcome::Error {
            detail: format!("unexpected status {}: {}", other, excerpt(body)),
        },
    }
}

fn interpret_bad_request(body: &str) -> PushOutcome {
    match serde_json::from_str::<Vec<BadRequestResponse>>(body) {
        Ok(responses) => PushOutcome::Rejected {
            reasons: responses.iter().map(ToString::to_string).collect(),
        },
        Err(e) => PushOutcome::Error {
            detail: format!("could not parse bad request response: {}", e),
        },
    }
}

fn interpret_success(body: &str) -> PushOutcome {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return PushOutcome::Error {
                detail: format!("could not parse push response: {}", e),
            }
        }
    };

    let responses: Result<Vec<PushResponse>, _> = match value {
        Value::Array(_) => serde_json::from_value(value),
        Value::Object(_) => serde_json::from_value(value).map(|r| vec![r]),
        _ => {
            return PushOutcome::Error {
                detail: format!("unexpected push response shape: {}", excerpt(body)),
            }
        }
    };

    let responses = match responses {
        Ok(responses) => responses,
        Err(e) => {
            return PushOutcome::Error {
                detail: format!("could not parse push response: {}", e),
            }
        }
    };

    if responses.iter().any(|r| r.rejected) {
        PushOutcome::Rejected {
            reasons: responses
                .into_iter()
                .filter(|r| r.rejected)
                .flat_map(|r| r.rejections)
                .collect(),
        }
    } else {
        PushOutcome::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_REJECTION: &str = r#"[
        {
            "propertyName": "Title",
            "errorMessage": "Unable to parse",
            "errorCode": "NotEmptyValidator",
            "attemptedValue": "Some.Release",
            "severity": "error"
        }
    ]"#;

    #[test]
    fn test_unauthorized_regardless_of_body() {
        assert_eq!(interpret(401, ""), PushOutcome::Unauthorized);
        assert_eq!(interpret(401, "not json"), PushOutcome::Unauthorized);
        assert_eq!(
            interpret(401, r#"{"rejected": true, "rejections": ["x"]}"#),
            PushOutcome::Unauthorized
        );
        assert_eq!(interpret(401, ONE_REJECTION), PushOutcome::Unauthorized);
    }

    #[test]
    fn test_bad_request_with_one_rejection() {
        match interpret(400, ONE_REJECTION) {
            PushOutcome::Rejected { reasons } => {
                assert_eq!(reasons.len(), 1);
                assert_eq!(
                    reasons[0],
                    "[error: NotEmptyValidator] Title: Unable to parse - got value: Some.Release"
                );
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_preserves_order() {
        let body = r#"[
            {"propertyName": "A", "errorMessage": "first"},
            {"propertyName": "B", "errorMessage": "second"}
        ]"#;
        match interpret(400, body) {
            PushOutcome::Rejected { reasons } => {
                assert_eq!(reasons.len(), 2);
                assert!(reasons[0].contains("first"));
                assert!(reasons[1].contains("second"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_unparsable_is_error() {
        assert!(matches!(
            interpret(400, "<html>Bad Request</html>"),
            PushOutcome::Error { .. }
        ));
        assert!(matches!(
            interpret(400, r#"{"message": "nope"}"#),
            PushOutcome::Error { .. }
        ));
    }

    #[test]
    fn test_accepted() {
        assert_eq!(interpret(200, r#"{"rejected": false}"#), PushOutcome::Accepted);
        assert_eq!(
            interpret(201, r#"{"approved": true, "rejections": []}"#),
            PushOutcome::Accepted
        );
        assert_eq!(interpret(200, "{}"), PushOutcome::Accepted);
    }

    #[test]
    fn test_rejected_with_reasons() {
        assert_eq!(
            interpret(200, r#"{"rejected": true, "rejections": ["a", "b"]}"#),
            PushOutcome::Rejected {
                reasons: vec!["a".to_string(), "b".to_string()]
            }
        );
    }

    #[test]
    fn test_array_shaped_push_response() {
        assert_eq!(
            interpret(200, r#"[{"approved": true, "rejected": false}]"#),
            PushOutcome::Accepted
        );
        assert_eq!(
            interpret(
                200,
                r#"[{"rejected": false}, {"rejected": true, "rejections": ["Unknown Series"]}]"#
            ),
            PushOutcome::Rejected {
                reasons: vec!["Unknown Series".to_string()]
            }
        );
    }

    #[test]
    fn test_success_with_unparsable_body_is_error() {
        assert!(matches!(interpret(200, ""), PushOutcome::Error { .. }));
        assert!(matches!(interpret(200, "ok"), PushOutcome::Error { .. }));
        assert!(matches!(interpret(200, "42"), PushOutcome::Error { .. }));
        assert!(matches!(
            interpret(200, r#"{"rejected": "yes"}"#),
            PushOutcome::Error { .. }
        ));
    }

    #[test]
    fn test_other_status_is_error() {
        match interpret(500, "Internal Server Error") {
            PushOutcome::Error { detail } => {
                assert!(detail.contains("500"));
                assert!(detail.contains("Internal Server Error"));
            }
            other => panic!("expected error, got {:?}", other),
        }
        assert!(matches!(
            interpret(404, r#"{"rejected": false}"#),
            PushOutcome::Error { .. }
        ));
    }
}
