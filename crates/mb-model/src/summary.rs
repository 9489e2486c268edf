//! Serializable views of a document for reports.

use std::collections::BTreeMap;

use mb_core::Units;
use serde::Serialize;

use crate::descriptor::JointDescriptor;
use crate::document::AsmtDocument;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JointSummary {
    pub name: String,
    pub kind: String,
    pub marker_i: String,
    pub marker_j: String,
    pub equations: usize,
    pub params: BTreeMap<String, f64>,
}

impl From<&JointDescriptor> for JointSummary {
    fn from(joint: &JointDescriptor) -> Self {
        Self {
            name: joint.common.name.clone(),
            kind: joint.tag().to_string(),
            marker_i: joint.common.marker_i.clone(),
            marker_j: joint.common.marker_j.clone(),
            equations: joint.kind().equation_count(),
            params: joint
                .params
                .fields()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub units: Units,
    pub markers: Vec<String>,
    pub joints: Vec<JointSummary>,
    pub skipped: Vec<String>,
}

impl From<&AsmtDocument> for DocumentSummary {
    fn from(doc: &AsmtDocument) -> Self {
        Self {
            units: doc.units,
            markers: doc.markers.iter().map(|m| m.name.clone()).collect(),
            joints: doc.joints.iter().map(JointSummary::from).collect(),
            skipped: doc
                .skipped
                .iter()
                .map(|s| format!("{} (line {})", s.tag, s.line))
                .collect(),
        }
    }
}
