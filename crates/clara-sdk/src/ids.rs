// Copyright (C) 2025 Clara Platform Contributors
// SPDX-License-Identifier: Apache-2.0
//! Strongly-typed identifiers for platform entities.
//!
//! Each entity kind gets its own newtype over the wire-level [`Identifier`]
//! so a job identifier cannot be passed where a pipeline identifier is
//! expected. Construction rejects empty values.

use std::fmt;

use clara_protocol::common_proto::Identifier;
use serde::{Deserialize, Serialize};

use crate::error::{ClaraError, Result};

macro_rules! identifier {
    ($(#[$doc:meta])* $name:ident, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier. Fails on an empty value.
            pub fn new(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if value.is_empty() {
                    return Err(ClaraError::InvalidArgument(format!(
                        "{} must not be empty",
                        $label
                    )));
                }
                Ok(Self(value))
            }

            /// The identifier's string value.
            pub fn value(&self) -> &str {
                &self.0
            }

            /// Convert to the wire-level identifier message.
            pub(crate) fn to_wire(&self) -> Identifier {
                Identifier {
                    value: self.0.clone(),
                }
            }

            /// Build from a wire-level identifier, rejecting empty values.
            pub(crate) fn from_wire(id: Option<Identifier>) -> Result<Self> {
                match id {
                    Some(id) if !id.value.is_empty() => Ok(Self(id.value)),
                    _ => Err(ClaraError::UnexpectedResponse(format!(
                        "response is missing the {}",
                        $label
                    ))),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a job.
    JobId,
    "job identifier"
);
identifier!(
    /// Identifier of a pipeline.
    PipelineId,
    "pipeline identifier"
);
identifier!(
    /// Identifier of a payload.
    PayloadId,
    "payload identifier"
);
identifier!(
    /// Identifier of a model.
    ModelId,
    "model identifier"
);
identifier!(
    /// Identifier of a model catalog.
    CatalogId,
    "catalog identifier"
);
identifier!(
    /// Identifier of an inference-server instance.
    InstanceId,
    "instance identifier"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_round_trip() {
        let id = JobId::new("432b274a8f754968888807fe1eba237b").unwrap();
        assert_eq!(id.value(), "432b274a8f754968888807fe1eba237b");
        assert_eq!(id.to_string(), "432b274a8f754968888807fe1eba237b");

        let wire = id.to_wire();
        assert_eq!(wire.value, "432b274a8f754968888807fe1eba237b");
        let back = JobId::from_wire(Some(wire)).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_empty_identifier_rejected() {
        assert!(matches!(
            PipelineId::new(""),
            Err(ClaraError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_wire_missing() {
        assert!(matches!(
            PayloadId::from_wire(None),
            Err(ClaraError::UnexpectedResponse(_))
        ));
        assert!(matches!(
            PayloadId::from_wire(Some(Identifier {
                value: String::new()
            })),
            Err(ClaraError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_serde_transparent() {
        let id = ModelId::new("abc123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: ModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_distinct_types() {
        // JobId and PipelineId are distinct types even with equal values;
        // this is a compile-time property, value equality suffices here.
        let a = JobId::new("x").unwrap();
        let b = PipelineId::new("x").unwrap();
        assert_eq!(a.value(), b.value());
    }
}
