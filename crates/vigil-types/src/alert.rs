//! Alert documents mirrored from the backend store.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ids::PatientId;

/// A single alert document from a patient's alert collection.
///
/// The client holds a read-only, eventually-consistent mirror of these;
/// beyond `id` and `patient_id` the fields are opaque to this core and
/// passed through unchanged in store order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Document id assigned by the store.
    pub id: String,
    /// The patient whose collection this document lives in.
    pub patient_id: PatientId,
    /// Opaque document fields (title, severity, reading values, ...).
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Alert {
    /// Build an alert with the given opaque fields.
    pub fn new(id: impl Into<String>, patient_id: impl Into<PatientId>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            patient_id: patient_id.into(),
            fields,
        }
    }

    /// Look up an opaque field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
