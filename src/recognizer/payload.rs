use crate::capture::types::Signature;
use serde::Serialize;

/// JSON body posted to the recognition endpoint: `{"value": <signature>}`
#[derive(Debug, Serialize)]
pub struct SignaturePayload<'a> {
    pub value: &'a Signature,
}

impl<'a> SignaturePayload<'a> {
    pub fn new(signature: &'a Signature) -> Self {
        Self { value: signature }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::types::{Point, Stroke};

    #[test]
    fn test_payload_wraps_native_signature() {
        let signature = Signature::from(vec![[Point::new(3, 4)].into_iter().collect::<Stroke>()]);
        let json = serde_json::to_string(&SignaturePayload::new(&signature)).unwrap();
        assert_eq!(json, r#"{"value":[{"x":[3],"y":[4]}]}"#);
    }

    #[test]
    fn test_empty_signature_is_sent_unvalidated() {
        let signature = Signature::new();
        let json = serde_json::to_string(&SignaturePayload::new(&signature)).unwrap();
        assert_eq!(json, r#"{"value":[]}"#);
    }
}
