//! Whole ASMT documents: `Units`, `Markers` and `Joints` sections.

use mb_asmt::{AsmtError, AsmtWriter, LineCursor};
use mb_core::Units;
use mb_system::System;

use crate::assembler::Assembler;
use crate::descriptor::JointDescriptor;
use crate::error::{ModelError, ModelResult};
use crate::factory;
use crate::marker::MarkerDescriptor;

const SECTION_LEVEL: usize = 0;
const BLOCK_LEVEL: usize = 1;

/// What to do with a joint block whose tag is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedJointPolicy {
    /// Fail the whole load.
    #[default]
    Abort,
    /// Drop the block, warn, and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    pub unsupported: UnsupportedJointPolicy,
}

/// A joint block dropped under [`UnsupportedJointPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedJoint {
    pub tag: String,
    pub line: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsmtDocument {
    pub units: Units,
    pub markers: Vec<MarkerDescriptor>,
    pub joints: Vec<JointDescriptor>,
    pub skipped: Vec<SkippedJoint>,
}

impl AsmtDocument {
    /// Parse a document. Any error aborts the load.
    pub fn parse(text: &str, options: LoadOptions) -> ModelResult<Self> {
        let mut cursor = LineCursor::new(text);
        let mut doc = Self::default();

        if cursor.peek_keyword("Units") {
            doc.units = parse_units(&mut cursor)?;
        }
        if cursor.peek_keyword("Markers") {
            doc.markers = parse_markers(&mut cursor)?;
        }
        if cursor.peek_keyword("Joints") {
            let (joints, skipped) = parse_joints(&mut cursor, options)?;
            doc.joints = joints;
            doc.skipped = skipped;
        }
        if let Some(text) = cursor.peek() {
            return Err(AsmtError::UnexpectedLine {
                line: cursor.line_number(),
                text: text.trim().to_string(),
            }
            .into());
        }

        tracing::debug!(
            markers = doc.markers.len(),
            joints = doc.joints.len(),
            skipped = doc.skipped.len(),
            "document parsed"
        );
        Ok(doc)
    }

    /// Serialize every section, including empty ones and defaulted parameters.
    pub fn store(&self) -> String {
        let mut w = AsmtWriter::new();
        store_units(&mut w, &self.units);

        w.store_string(SECTION_LEVEL, "Markers");
        for marker in &self.markers {
            marker.store(&mut w, BLOCK_LEVEL);
        }

        w.store_string(SECTION_LEVEL, "Joints");
        for joint in &self.joints {
            joint.store(&mut w, BLOCK_LEVEL);
        }
        w.into_string()
    }

    /// Build a fresh system from the document.
    ///
    /// Back-references from a previous assembly are dropped first, so each call
    /// yields an independent system. On failure no joint keeps a runtime id.
    pub fn assemble(&mut self) -> ModelResult<System> {
        for joint in &mut self.joints {
            joint.detach();
        }
        let result = self.assemble_detached();
        if result.is_err() {
            for joint in &mut self.joints {
                joint.detach();
            }
        }
        result
    }

    fn assemble_detached(&mut self) -> ModelResult<System> {
        let mut asm = Assembler::new(self.units);
        for marker in &self.markers {
            asm.add_marker(marker)?;
        }
        for joint in &mut self.joints {
            asm.add_joint(joint)?;
        }
        asm.finish()
    }
}

fn parse_units(cursor: &mut LineCursor<'_>) -> ModelResult<Units> {
    cursor.expect_keyword("Units")?;
    let mut scales = [1.0; 4];
    for (keyword, scale) in ["Time", "Mass", "Length", "Angle"].into_iter().zip(&mut scales) {
        if let Some(value) = cursor.read_optional_double(keyword)? {
            *scale = value;
        }
    }
    ensure_block_end(cursor, SECTION_LEVEL)?;
    let [time, mass, length, angle] = scales;
    Ok(Units::from_scale_factors(time, mass, length, angle)?)
}

fn store_units(w: &mut AsmtWriter, units: &Units) {
    w.store_string(SECTION_LEVEL, "Units");
    let keywords = ["Time", "Mass", "Length", "Angle"];
    for (keyword, scale) in keywords.into_iter().zip(units.scale_factors()) {
        w.store_keyword_double(BLOCK_LEVEL, keyword, scale);
    }
}

fn parse_markers(cursor: &mut LineCursor<'_>) -> ModelResult<Vec<MarkerDescriptor>> {
    cursor.expect_keyword("Markers")?;
    let mut markers = Vec::new();
    while cursor.peek_indent().is_some_and(|indent| indent > SECTION_LEVEL) {
        cursor.expect_keyword("Marker")?;
        let mut marker = MarkerDescriptor::default();
        marker.parse(cursor)?;
        ensure_block_end(cursor, BLOCK_LEVEL)?;
        markers.push(marker);
    }
    Ok(markers)
}

fn parse_joints(
    cursor: &mut LineCursor<'_>,
    options: LoadOptions,
) -> ModelResult<(Vec<JointDescriptor>, Vec<SkippedJoint>)> {
    cursor.expect_keyword("Joints")?;
    let mut joints = Vec::new();
    let mut skipped = Vec::new();

    while cursor.peek_indent().is_some_and(|indent| indent > SECTION_LEVEL) {
        let line = cursor.line_number();
        let tag = cursor.next_line("joint tag")?.trim().to_string();

        let kind = match factory::kind_from_tag(&tag, line) {
            Ok(kind) => kind,
            Err(_) if options.unsupported == UnsupportedJointPolicy::Skip => {
                let dropped = cursor.skip_block(BLOCK_LEVEL);
                tracing::warn!(%tag, line, dropped, "skipping unsupported joint");
                skipped.push(SkippedJoint { tag, line });
                continue;
            }
            Err(e) => return Err(e),
        };

        let mut joint = factory::descriptor(kind);
        let consumed = joint
            .parse(cursor)
            .map_err(|e| ModelError::in_joint(kind, line, e))?;
        ensure_block_end(cursor, BLOCK_LEVEL).map_err(|e| ModelError::in_joint(kind, line, e))?;
        tracing::debug!(joint = %joint.name(), %kind, line, consumed, "joint parsed");
        joints.push(joint);
    }
    Ok((joints, skipped))
}

/// The next line must not belong to the block opened at `level`.
fn ensure_block_end(cursor: &LineCursor<'_>, level: usize) -> Result<(), AsmtError> {
    match cursor.peek() {
        Some(text) if mb_asmt::read::indent_of(text) > level => Err(AsmtError::UnexpectedLine {
            line: cursor.line_number(),
            text: text.trim().to_string(),
        }),
        _ => Ok(()),
    }
}
