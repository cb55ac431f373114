// ==========================================
// Breather Advisor - Survey Loader
// ==========================================
// Machinery-survey report -> typed AssetDescriptor list. The survey
// layout is positional for the identity columns (machine at column 1,
// maintenance point at column 8, fixed by the report template) and
// named for the "(D) ..." data columns. Rows are classified into
// splash or circulating by the maintenance-point template text;
// unclassified rows (grease points, headers repeated mid-sheet) are
// skipped. Field-level parse failures degrade to absent values.
// ==========================================

use crate::domain::types::{Criticality, SystemType};
use crate::domain::AssetDescriptor;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawTable, UniversalFileParser};
use std::path::Path;

/// Survey column positions fixed by the report template.
pub const MACHINE_COL: usize = 1;
pub const MAINTENANCE_POINT_COL: usize = 8;

/// Maintenance-point templates processed as splash/bath systems.
pub const SPLASH_TEMPLATES: [&str; 5] = [
    "Gearbox Housing (Oil)",
    "Bearing (Oil)",
    "Pump (Oil)",
    "Electric Motor Bearing (Oil)",
    "Blower (Oil)",
];

/// Maintenance-point templates processed as circulating systems.
pub const CIRCULATING_TEMPLATES: [&str; 2] = [
    "Circulating System Reservoir (Oil)",
    "Hydraulic System Reservoir (Oil)",
];

// ==========================================
// Survey Data
// ==========================================
/// The parsed survey: the raw table (kept verbatim for the report
/// merge) plus the classified asset descriptors. Asset ids are the
/// 0-based row positions in the table, which is what the merge keys
/// results back by.
#[derive(Debug, Clone)]
pub struct SurveyData {
    pub table: RawTable,
    pub assets: Vec<AssetDescriptor>,
}

// ==========================================
// Survey Loader
// ==========================================
pub struct AssetLoader;

impl AssetLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> ImportResult<SurveyData> {
        let path = path.as_ref();
        let table = UniversalFileParser.parse(path)?;
        Self::from_table(table, &path.display().to_string())
    }

    pub fn from_table(table: RawTable, file: &str) -> ImportResult<SurveyData> {
        if table.is_empty() {
            return Err(ImportError::EmptyFile(file.to_string()));
        }

        let cols = SurveyColumns::resolve(&table);
        let mut assets = Vec::new();

        for row in 0..table.len() {
            let template = table
                .cell(row, Some(MAINTENANCE_POINT_COL))
                .unwrap_or("")
                .trim();
            let system_type = if SPLASH_TEMPLATES.contains(&template) {
                SystemType::Splash
            } else if CIRCULATING_TEMPLATES.contains(&template) {
                SystemType::Circulating
            } else {
                tracing::debug!(file, row, template, "row not a lubricated oil point, skipping");
                continue;
            };

            assets.push(Self::descriptor(&table, &cols, row, system_type));
        }

        tracing::info!(
            file,
            rows = table.len(),
            assets = assets.len(),
            "survey loaded"
        );
        Ok(SurveyData { table, assets })
    }

    fn descriptor(
        table: &RawTable,
        cols: &SurveyColumns,
        row: usize,
        system_type: SystemType,
    ) -> AssetDescriptor {
        let mut asset = AssetDescriptor::new(row.to_string(), system_type);

        asset.machine = text(table.cell(row, Some(MACHINE_COL)));
        asset.maintenance_point = text(table.cell(row, Some(MAINTENANCE_POINT_COL)));
        asset.criticality = table
            .cell(row, cols.criticality)
            .and_then(Criticality::parse);

        asset.oil_capacity_l = number(table, row, cols.oil_capacity, "(D) Oil Capacity");
        asset.height_in = number(table, row, cols.height, "(D) Height");
        asset.width_in = number(table, row, cols.width, "(D) Width");
        asset.length_in = number(table, row, cols.length, "(D) Length");
        asset.oil_level_distance_in = number(
            table,
            row,
            cols.oil_level_distance,
            "(D) Distance from Drain Port to Oil Level",
        );

        asset.flow_rate = number(table, row, cols.flow_rate, "(D) Flow Rate");
        asset.flow_rate_unit = text(table.cell(row, cols.flow_rate_unit));

        asset.operating_temp_text = text(table.cell(row, cols.operating_temp));
        asset.humidity_text = text(table.cell(row, cols.humidity));
        asset.water_contact_text = text(table.cell(row, cols.water_contact));
        asset.contamination_text = text(table.cell(row, cols.contamination));
        asset.vibration_text = text(table.cell(row, cols.vibration));
        asset.oil_mist_text = text(table.cell(row, cols.oil_mist));
        asset.clearance_text = text(table.cell(row, cols.clearance));
        asset.mounting_position = text(table.cell(row, cols.mounting));
        asset.mobile = table.cell(row, cols.mobile).map(truthy);

        asset
    }
}

// ==========================================
// Survey Columns
// ==========================================
/// Resolved "(D) ..." column positions. All optional: a survey with
/// sparse data still loads, the engine degrades per field.
struct SurveyColumns {
    criticality: Option<usize>,
    oil_capacity: Option<usize>,
    height: Option<usize>,
    width: Option<usize>,
    length: Option<usize>,
    oil_level_distance: Option<usize>,
    flow_rate: Option<usize>,
    flow_rate_unit: Option<usize>,
    operating_temp: Option<usize>,
    humidity: Option<usize>,
    water_contact: Option<usize>,
    contamination: Option<usize>,
    vibration: Option<usize>,
    oil_mist: Option<usize>,
    clearance: Option<usize>,
    mounting: Option<usize>,
    mobile: Option<usize>,
}

impl SurveyColumns {
    fn resolve(table: &RawTable) -> Self {
        Self {
            criticality: table.column_index(&["Criticality"]),
            oil_capacity: table.column_index(&["(D) Oil Capacity"]),
            height: table.column_index(&["(D) Height"]),
            width: table.column_index(&["(D) Width"]),
            length: table.column_index(&["(D) Length"]),
            oil_level_distance: table
                .column_index(&["(D) Distance from Drain Port to Oil Level"]),
            flow_rate: table.column_index(&["(D) Flow Rate"]),
            flow_rate_unit: table.column_index(&["(DU) Flow Rate"]),
            operating_temp: table.column_index(&["(D) Operating Temperature"]),
            humidity: table.column_index(&["(D) Average Relative Humidity"]),
            water_contact: table.column_index(&["(D) Water Contact Conditions"]),
            contamination: table.column_index(&["(D) Contaminant Likelihood"]),
            vibration: table.column_index(&["(D) Vibration"]),
            oil_mist: table.column_index(&["(D) Oil Mist Evidence on Headspace"]),
            clearance: table.column_index(&["(D) Breather/Fill Port Clearance"]),
            mounting: table.column_index(&["(D) Mounting Position"]),
            mobile: table.column_index(&["(D) Mobile Equipment", "Mobile"]),
        }
    }
}

fn text(cell: Option<&str>) -> Option<String> {
    cell.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Numeric survey cell, tolerating thousands separators. Unparseable
/// values degrade to `None` with a warning; survey quality problems
/// never abort a load.
fn number(table: &RawTable, row: usize, col: Option<usize>, field: &str) -> Option<f64> {
    let raw = table.cell(row, col)?;
    match raw.replace(',', "").trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            tracing::warn!(row, field, value = raw, "unparseable survey number, ignoring");
            None
        }
    }
}

fn truthy(cell: &str) -> bool {
    matches!(
        cell.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "x" | "1" | "1.0" | "si" | "sí"
    )
}
