//! Workbook to planned documents.
//!
//! All identifiers and references are fixed here; nothing is written.
//! Order: batch, substrates (first appearance), samples (row order), then
//! processes by block position and class index.

use super::state::{Assembly, IngestIssue, IssueStage, PlannedDocument};
use crate::{
    classify::{classify, BlockKind},
    dedup::equivalence_classes,
    error::IngestError,
    mapping::{common, BlockRow, FieldIssue, MapperRegistry},
    reference::{ContainerId, ReferenceMinter},
    workbook::{Group, Workbook, EXPERIMENT_INFO, SAMPLE_ID_COLUMN},
};
use batchforge_schemas::{
    batch::{Batch, Sample, Substrate},
    file_formats::{archive_filename, ArchiveDocument, Entity},
    process::{ProcessKind, ProcessStep},
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

pub struct AssemblyContext<'a> {
    pub container: &'a ContainerId,
    pub minter: &'a ReferenceMinter,
    pub registry: &'a MapperRegistry,
    pub location: Option<&'a str>,
    pub batch_id: Option<&'a str>,
    pub timestamp: DateTime<Utc>,
}

/// A data row of the Experiment-Info block that names a sample.
struct SampleRow {
    row: usize,
    id: String,
}

/// `HZB_P_1_3` -> `HZB_P_1`; ids without `_` are their own batch.
pub fn derive_batch_id(first_sample_id: &str) -> String {
    match first_sample_id.rsplit_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => prefix.to_string(),
        _ => first_sample_id.to_string(),
    }
}

/// Keeps ASCII alphanumerics, `-` and `.`; runs of anything else become `_`.
pub fn slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
            out.push(c);
        } else if !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_matches('_').to_string()
}

pub fn assemble(
    workbook: &Workbook,
    source: &str,
    ctx: &AssemblyContext<'_>,
) -> Result<Assembly, IngestError> {
    let info = workbook
        .group(EXPERIMENT_INFO)
        .ok_or_else(|| IngestError::HeaderMalformed(format!("no '{}' group", EXPERIMENT_INFO)))?;
    if !info.contains(SAMPLE_ID_COLUMN) {
        return Err(IngestError::HeaderMalformed(format!(
            "'{}' has no '{}' column",
            EXPERIMENT_INFO, SAMPLE_ID_COLUMN
        )));
    }

    let mut issues = Vec::new();
    let samples = sample_rows(&info, &mut issues);
    let first = samples.first().ok_or_else(|| {
        IngestError::Ineligible(source.to_string(), "no sample ids".to_string())
    })?;

    let batch_id = ctx
        .batch_id
        .map(str::to_string)
        .unwrap_or_else(|| derive_batch_id(&first.id));
    let mut assembler = Assembler {
        ctx,
        batch_id,
        issues,
        documents: Vec::new(),
        sample_ids: HashMap::new(),
        sample_references: HashMap::new(),
        last_process: HashMap::new(),
    };

    let batch = assembler.batch(&samples);
    let substrate_references = assembler.substrates(&info, &samples);
    assembler.samples(&info, &samples, &substrate_references);

    let mut position = 0;
    for group in workbook.groups() {
        let BlockKind::Process(kind) = classify(group.label()) else {
            continue;
        };
        position += 1;
        assembler.block(&group, kind, position, &samples);
    }

    info!(
        "Assembled batch '{}': {} samples, {} documents, {} issues",
        batch.lab_id,
        samples.len(),
        assembler.documents.len(),
        assembler.issues.len()
    );
    Ok(Assembly {
        batch,
        documents: assembler.documents,
        issues: assembler.issues,
    })
}

/// Rows with a non-blank sample id. A repeated id keeps its first row.
fn sample_rows(info: &Group<'_>, issues: &mut Vec<IngestIssue>) -> Vec<SampleRow> {
    let mut rows: Vec<SampleRow> = Vec::new();
    for row in 0..info.row_count() {
        let id = crate::coerce::coerce_string(info.row(row).get(SAMPLE_ID_COLUMN));
        let Some(id) = id else { continue };
        if rows.iter().any(|s| s.id == id) {
            issues.push(
                IngestIssue::new(IssueStage::Header, format!("sample id '{}' appears more than once", id))
                    .at_row(row),
            );
            continue;
        }
        rows.push(SampleRow { row, id });
    }
    rows
}

struct Assembler<'c, 'a> {
    ctx: &'c AssemblyContext<'a>,
    batch_id: String,
    issues: Vec<IngestIssue>,
    documents: Vec<PlannedDocument>,
    /// data row -> sample id
    sample_ids: HashMap<usize, String>,
    sample_references: HashMap<String, String>,
    /// sample id -> reference of the latest process containing it
    last_process: HashMap<String, String>,
}

impl Assembler<'_, '_> {
    fn plan(&mut self, local_id: &str, entity: Entity) -> String {
        let filename = archive_filename(local_id);
        let reference = self.ctx.minter.mint(self.ctx.container, &filename);
        self.documents.push(PlannedDocument {
            filename,
            reference: reference.clone(),
            document: ArchiveDocument::new(entity),
        });
        reference
    }

    fn reference_of(&self, local_id: &str) -> String {
        self.ctx
            .minter
            .mint(self.ctx.container, &archive_filename(local_id))
    }

    fn convert_issues(&mut self, found: Vec<FieldIssue>, position: Option<usize>, row: usize) {
        for issue in found {
            let mut issue = IngestIssue::new(IssueStage::Convert, issue.to_string()).at_row(row);
            issue.block_position = position;
            self.issues.push(issue);
        }
    }

    fn batch(&mut self, samples: &[SampleRow]) -> Batch {
        for sample in samples {
            let reference = self.reference_of(&sample.id);
            self.sample_ids.insert(sample.row, sample.id.clone());
            self.sample_references.insert(sample.id.clone(), reference);
        }
        let batch = Batch {
            lab_id: self.batch_id.clone(),
            name: self.batch_id.clone(),
            datetime: self.ctx.timestamp,
            sample_ids: samples.iter().map(|s| s.id.clone()).collect(),
            sample_references: samples
                .iter()
                .map(|s| self.sample_references[&s.id].clone())
                .collect(),
        };
        let local_id = self.batch_id.clone();
        self.plan(&local_id, Entity::Batch(batch.clone()));
        batch
    }

    /// One substrate per distinct tuple; returns the reference for each
    /// sample row, parallel to `samples`.
    fn substrates(&mut self, info: &Group<'_>, samples: &[SampleRow]) -> Vec<String> {
        let mut distinct: Vec<(Substrate, String)> = Vec::new();
        let mut references = Vec::with_capacity(samples.len());
        for sample in samples {
            let row = BlockRow::new(info.label(), info.row(sample.row));
            let local_id = format!("{}_substrate", sample.row);
            let substrate = Substrate {
                lab_id: format!("{}_{}", self.batch_id, local_id),
                name: local_id.clone(),
                dimension: row.string("Sample dimension"),
                active_area: row.quantity("Sample area"),
                pixel_area: row.quantity("Pixel area"),
                number_of_pixels: row.count("Number of pixels"),
                substrate_material: row.string("Substrate material"),
                conductive_layers: row
                    .string("Substrate conductive layer")
                    .into_iter()
                    .collect(),
                description: row.string("Notes"),
            };
            self.convert_issues(row.into_issues(), None, sample.row);

            let known = distinct
                .iter()
                .find(|(existing, _)| same_substrate(existing, &substrate));
            let reference = match known {
                Some((_, reference)) => reference.clone(),
                None => {
                    let reference = self.plan(&local_id, Entity::Substrate(substrate.clone()));
                    distinct.push((substrate, reference.clone()));
                    reference
                }
            };
            references.push(reference);
        }
        references
    }

    fn samples(&mut self, info: &Group<'_>, samples: &[SampleRow], substrates: &[String]) {
        for (sample, substrate) in samples.iter().zip(substrates) {
            let row = BlockRow::new(info.label(), info.row(sample.row));
            let entity = Sample {
                lab_id: sample.id.clone(),
                name: sample.id.clone(),
                datetime: row.datetime("Date").unwrap_or(self.ctx.timestamp),
                description: row.string("Notes"),
                substrate: substrate.clone(),
                variation: row.string("Variation"),
                number_of_junctions: row.count("Number of junctions"),
                project_name: row.string("Project_Name"),
                batch_label: row.string("Batch"),
                subbatch: row.string("Subbatch"),
                sample_label: row.string("Sample"),
            };
            self.convert_issues(row.into_issues(), None, sample.row);
            self.plan(&sample.id, Entity::Sample(entity));
        }
    }

    fn block(&mut self, group: &Group<'_>, kind: ProcessKind, position: usize, samples: &[SampleRow]) {
        let rows: Vec<usize> = samples.iter().map(|s| s.row).collect();
        for class in equivalence_classes(group, &rows) {
            let row = BlockRow::new(group.label(), group.row(class.first_row()));
            let material = common::material_name(&row, kind);
            if kind.requires_material_name() && material.is_none() {
                debug!(
                    "Block {} ('{}') class {}: no material name, skipped",
                    position,
                    group.label(),
                    class.index
                );
                continue;
            }

            let Some(mapper) = self.ctx.registry.get(kind) else {
                self.issues.push(
                    IngestIssue::new(IssueStage::Map, format!("no mapper registered for '{}'", kind))
                        .at_block(position)
                        .at_row(class.first_row()),
                );
                continue;
            };
            let details = match mapper(&row) {
                Ok(details) => details,
                Err(e) => {
                    self.issues.push(
                        IngestIssue::new(IssueStage::Map, format!("'{}': {}", group.label(), e))
                            .at_block(position)
                            .at_row(class.first_row()),
                    );
                    continue;
                }
            };

            let sample_ids: Vec<String> = class
                .rows
                .iter()
                .filter_map(|r| self.sample_ids.get(r).cloned())
                .collect();
            let sample_references = sample_ids
                .iter()
                .map(|id| self.sample_references[id].clone())
                .collect();
            let name = match (kind, &material) {
                (ProcessKind::GenericProcess, _) => row
                    .string("Name")
                    .unwrap_or_else(|| group.label().to_string()),
                (_, Some(material)) => format!("{} {}", kind.display_name(), material),
                (_, None) => kind.display_name().to_string(),
            };
            let mut local_id = format!("{}_{}_{}", position, class.index, kind.tag());
            if let Some(material) = &material {
                let material_slug = slug(material);
                if !material_slug.is_empty() {
                    local_id.push('_');
                    local_id.push_str(&material_slug);
                }
            }

            let step = ProcessStep {
                lab_id: format!("{}_{}", self.batch_id, local_id),
                name,
                position_in_experimental_plan: position,
                datetime: row.datetime("Date").unwrap_or(self.ctx.timestamp),
                description: row.string("Notes"),
                location: row
                    .string("Location")
                    .or_else(|| self.ctx.location.map(str::to_string)),
                operator: row.string("Operator"),
                previous_process: sample_ids
                    .first()
                    .and_then(|id| self.last_process.get(id).cloned()),
                layer: material
                    .as_deref()
                    .filter(|_| kind.requires_material_name())
                    .map(|m| common::layer(&row, m)),
                sample_ids,
                sample_references,
                details,
            };
            self.convert_issues(row.into_issues(), Some(position), class.first_row());

            debug!(
                "Block {} ('{}') class {}: {} for {} samples",
                position,
                group.label(),
                class.index,
                local_id,
                step.sample_ids.len()
            );
            let members = step.sample_ids.clone();
            let reference = self.plan(&local_id, Entity::Process(step));
            for id in members {
                self.last_process.insert(id, reference.clone());
            }
        }
    }
}

fn same_substrate(a: &Substrate, b: &Substrate) -> bool {
    a.dimension == b.dimension
        && a.active_area == b.active_area
        && a.pixel_area == b.pixel_area
        && a.number_of_pixels == b.number_of_pixels
        && a.substrate_material == b.substrate_material
        && a.conductive_layers == b.conductive_layers
        && a.description == b.description
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_id_drops_the_last_segment() {
        assert_eq!(derive_batch_id("HZB_P_1_3"), "HZB_P_1");
        assert_eq!(derive_batch_id("KIT42"), "KIT42");
        assert_eq!(derive_batch_id("_1"), "_1");
    }

    #[test]
    fn slugs_are_filename_safe() {
        assert_eq!(slug("PbI2"), "PbI2");
        assert_eq!(slug("Cu:Au"), "Cu_Au");
        assert_eq!(slug(" Spiro-OMeTAD (doped) "), "Spiro-OMeTAD_doped");
        assert_eq!(slug("///"), "");
    }
}
