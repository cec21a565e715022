//! Conversion run summary

use std::collections::BTreeMap;

use serde::Serialize;

use crate::geo::BoundingBox;
use crate::lightlist::LightListInfo;
use crate::types::ConvertedAid;
use crate::writer::OutputPaths;

/// What one conversion run read, kept and wrote
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Per-file reader metadata, in input order
    pub inputs: Vec<LightListInfo>,
    /// Aids parsed across all inputs
    pub total_parsed: usize,
    /// Aids inside the bounding box (the count written)
    pub inside_bbox: usize,
    pub bbox: BoundingBox,
    /// Written aids per buoy class slug
    pub by_class: BTreeMap<String, usize>,
    /// Parsed aids per detected input layout
    pub by_format: BTreeMap<String, usize>,
    /// `None` on a dry run
    pub outputs: Option<OutputPaths>,
    pub dry_run: bool,
}

impl ConversionReport {
    pub(crate) fn count_classes(aids: &[ConvertedAid]) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for converted in aids {
            *counts.entry(converted.buoy.slug().to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn outside_bbox(&self) -> usize {
        self.total_parsed - self.inside_bbox
    }

    /// Human-readable summary for the terminal
    pub fn print_summary(&self) {
        println!("=== Light List Conversion ===");
        for info in &self.inputs {
            println!(
                "  Input:      {} [{}] {} entries, {} skipped",
                info.source_path, info.format, info.entry_count, info.skipped_rows
            );
        }
        println!("  Parsed:     {} total", self.total_parsed);
        println!(
            "  Area:       {} inside, {} outside ({})",
            self.inside_bbox,
            self.outside_bbox(),
            self.bbox
        );
        if !self.by_class.is_empty() {
            let classes: Vec<String> = self
                .by_class
                .iter()
                .map(|(class, n)| format!("{class}={n}"))
                .collect();
            println!("  Classes:    {}", classes.join(", "));
        }
        match &self.outputs {
            Some(paths) => {
                println!("  Buoy.ini:   {}", paths.buoy.display());
                println!("  Light.ini:  {}", paths.light.display());
            }
            None if self.dry_run => println!("  Dry run:    nothing written"),
            None => {}
        }
    }
}
