// ==========================================
// Breather Advisor - Catalog Loader
// ==========================================
// Vendor catalog -> typed BreatherCandidate list. The column schema
// is resolved exactly once per file against an alias table (vendor
// sheets break headers across lines and drift in capitalization);
// required columns missing is a hard error, optional capability
// columns degrade to absent/false. Numeric cells tolerate
// thousands separators.
// ==========================================

use crate::domain::types::ProductType;
use crate::domain::BreatherCandidate;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawTable, UniversalFileParser};
use std::path::Path;

// ==========================================
// Catalog Schema
// ==========================================
/// Resolved column positions for one catalog file.
struct CatalogSchema {
    brand: usize,
    model: usize,
    product_type: usize,
    max_air_flow: usize,
    max_fluid_flow: Option<usize>,
    height: Option<usize>,
    diameter: Option<usize>,
    adsorption: Option<usize>,
    extended_service: Option<usize>,
    mobile: Option<usize>,
    high_vibration: Option<usize>,
    oil_mist: Option<usize>,
    rh_25_to_75: Option<usize>,
    rh_over_75: Option<usize>,
    water_low: Option<usize>,
    water_medium: Option<usize>,
    water_high: Option<usize>,
    sump_splash: Option<usize>,
    sump_circulating: Option<usize>,
}

impl CatalogSchema {
    fn resolve(table: &RawTable, file: &str) -> ImportResult<Self> {
        let required = |candidates: &[&str]| -> ImportResult<usize> {
            table
                .column_index(candidates)
                .ok_or_else(|| ImportError::MissingColumn {
                    file: file.to_string(),
                    column: candidates[0].to_string(),
                })
        };

        Ok(Self {
            brand: required(&["Brand"])?,
            model: required(&["Model"])?,
            product_type: required(&["Type"])?,
            max_air_flow: required(&["Max Air Flow (cfm)"])?,
            max_fluid_flow: table.column_index(&["Max Fluid Flow (gpm)"]),
            height: table.column_index(&["Height (in)"]),
            diameter: table.column_index(&["Diameter (in)"]),
            adsorption: table.column_index(&["Adsorption Capacity (mL)"]),
            extended_service: table.column_index(&["Extended Service", "Extended service"]),
            mobile: table.column_index(&["Mobile applications"]),
            high_vibration: table.column_index(&["High vibration"]),
            oil_mist: table.column_index(&["Integrated oil mist control"]),
            rh_25_to_75: table.column_index(&["Rh 25 to 75%"]),
            rh_over_75: table.column_index(&["Rh >75%"]),
            water_low: table.column_index(&["Water contact conditions Low"]),
            water_medium: table.column_index(&["Water contact conditions Medium"]),
            water_high: table.column_index(&["Water contact conditions High"]),
            sump_splash: table.column_index(&["Gearbox, pump, storage Sump Volume MAX gal"]),
            sump_circulating: table.column_index(&["Circulating/Hyd sump volume max gal."]),
        })
    }
}

// ==========================================
// Catalog Loader
// ==========================================
pub struct CatalogLoader;

impl CatalogLoader {
    pub fn load<P: AsRef<Path>>(path: P) -> ImportResult<Vec<BreatherCandidate>> {
        let path = path.as_ref();
        let table = UniversalFileParser.parse(path)?;
        Self::from_table(&table, &path.display().to_string())
    }

    pub fn from_table(table: &RawTable, file: &str) -> ImportResult<Vec<BreatherCandidate>> {
        if table.is_empty() {
            return Err(ImportError::EmptyFile(file.to_string()));
        }
        let schema = CatalogSchema::resolve(table, file)?;

        let mut catalog = Vec::with_capacity(table.len());
        for row in 0..table.len() {
            match Self::parse_row(table, &schema, row) {
                Some(candidate) => catalog.push(candidate),
                None => {
                    tracing::warn!(file, row, "skipping catalog row with unusable core fields");
                }
            }
        }

        if catalog.is_empty() {
            return Err(ImportError::EmptyFile(file.to_string()));
        }
        tracing::info!(file, products = catalog.len(), "breather catalog loaded");
        Ok(catalog)
    }

    /// One catalog row. `None` when the identity, type or air-flow
    /// rating is unusable; capability flags simply default to false.
    fn parse_row(table: &RawTable, schema: &CatalogSchema, row: usize) -> Option<BreatherCandidate> {
        let brand = table.cell(row, Some(schema.brand))?.to_string();
        let model = table.cell(row, Some(schema.model))?.to_string();
        let product_type = ProductType::parse(table.cell(row, Some(schema.product_type))?)?;
        let max_air_flow_cfm = number(table.cell(row, Some(schema.max_air_flow)))?;

        Some(BreatherCandidate {
            row,
            brand,
            model,
            product_type,
            max_air_flow_cfm,
            max_fluid_flow_gpm: number(table.cell(row, schema.max_fluid_flow)),
            height_in: number(table.cell(row, schema.height)),
            diameter_in: number(table.cell(row, schema.diameter)),
            adsorption_ml: number(table.cell(row, schema.adsorption)).unwrap_or(0.0),
            extended_service: flag(table.cell(row, schema.extended_service)),
            mobile_rated: flag(table.cell(row, schema.mobile)),
            high_vibration: flag(table.cell(row, schema.high_vibration)),
            oil_mist_control: flag(table.cell(row, schema.oil_mist)),
            rh_25_to_75: flag(table.cell(row, schema.rh_25_to_75)),
            rh_over_75: flag(table.cell(row, schema.rh_over_75)),
            water_contact_low: flag(table.cell(row, schema.water_low)),
            water_contact_medium: flag(table.cell(row, schema.water_medium)),
            water_contact_high: flag(table.cell(row, schema.water_high)),
            sump_max_splash_gal: number(table.cell(row, schema.sump_splash)),
            sump_max_circulating_gal: number(table.cell(row, schema.sump_circulating)),
        })
    }
}

/// Parse a numeric cell, tolerating thousands separators. Blank or
/// unparseable is `None`.
fn number(cell: Option<&str>) -> Option<f64> {
    let cleaned = cell?.replace(',', "");
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Checkbox-style capability flag.
fn flag(cell: Option<&str>) -> bool {
    matches!(
        cell.unwrap_or("").trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "x" | "1" | "1.0"
    )
}
