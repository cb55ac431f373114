// ==========================================
// Breather Advisor - Report Layer
// ==========================================
// Merges analysis results back onto the original survey rows and
// exports the combined report. The merge is keyed by asset id (the
// survey row position): the output has exactly the input's row count
// and order, rows the engine never analyzed get blank result cells.
// ==========================================

use crate::domain::{AnalysisResult, CapacityBasis};
use crate::importer::file_parser::RawTable;
use crate::importer::{ImportResult, SurveyData};
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// Report Options
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Append the full rule trace as one column.
    pub verbose_trace: bool,
    /// Append the intermediate volume/thermal/flow figures.
    pub include_calculations: bool,
}

// ==========================================
// Report Builder
// ==========================================
pub struct ReportBuilder;

impl ReportBuilder {
    /// Merge results onto the survey table.
    pub fn merged_table(
        survey: &SurveyData,
        results: &[AnalysisResult],
        options: &ReportOptions,
    ) -> RawTable {
        let by_id: HashMap<&str, &AnalysisResult> =
            results.iter().map(|r| (r.asset_id.as_str(), r)).collect();

        let mut headers = survey.table.headers.clone();
        headers.extend(
            [
                "Breather_Brand",
                "Breather_Model",
                "Breather_Note",
                "CFM_Required",
                "Result_Status",
                "Installation_Notes",
                "LCC_Model",
                "Cost_Benefit_Model",
            ]
            .map(String::from),
        );
        if options.verbose_trace {
            headers.push("Verbose_Trace".to_string());
        }
        if options.include_calculations {
            headers.extend(
                [
                    "Calc_V_Sump",
                    "Calc_V_Oil",
                    "Calc_V_Air",
                    "Calc_Delta_T",
                    "Calc_Total_GPM",
                ]
                .map(String::from),
            );
        }

        let mut rows = Vec::with_capacity(survey.table.len());
        for (row_idx, source_row) in survey.table.rows.iter().enumerate() {
            // Pad ragged source rows to the original header width
            let mut row = source_row.clone();
            row.resize(survey.table.headers.len(), String::new());

            let id = row_idx.to_string();
            match by_id.get(id.as_str()) {
                Some(result) => Self::push_result_cells(&mut row, result, options),
                None => Self::push_blank_cells(&mut row, &headers, survey.table.headers.len()),
            }
            rows.push(row);
        }

        RawTable { headers, rows }
    }

    fn push_result_cells(row: &mut Vec<String>, result: &AnalysisResult, options: &ReportOptions) {
        let first = result.selected.first();
        row.push(
            first
                .map(|r| r.candidate.brand.clone())
                .unwrap_or_default(),
        );
        row.push(
            first
                .map(|r| r.candidate.model.clone())
                .unwrap_or_default(),
        );
        row.push(
            first
                .and_then(|r| r.note.clone())
                .unwrap_or_default(),
        );
        row.push(format!("{:.4}", result.required_cfm));
        row.push(result.status.to_string());
        row.push(result.installation_notes.clone());
        row.push(
            result
                .lcc
                .as_ref()
                .map(|r| r.candidate.identity())
                .unwrap_or_default(),
        );
        row.push(
            result
                .cost_benefit
                .as_ref()
                .map(|r| r.candidate.identity())
                .unwrap_or_default(),
        );

        if options.verbose_trace {
            row.push(result.trace.join(" -> "));
        }
        if options.include_calculations {
            match &result.capacity_basis {
                Some(CapacityBasis::Thermal {
                    v_sump_gal,
                    v_oil_gal,
                    v_air_gal,
                    delta_t_f,
                    ..
                }) => {
                    row.push(format!("{v_sump_gal:.3}"));
                    row.push(format!("{v_oil_gal:.3}"));
                    row.push(format!("{v_air_gal:.3}"));
                    row.push(format!("{delta_t_f:.1}"));
                    row.push(String::new());
                }
                Some(CapacityBasis::Flow { total_gpm, .. }) => {
                    row.extend([String::new(), String::new(), String::new(), String::new()]);
                    row.push(format!("{total_gpm:.2}"));
                }
                None => row.extend(std::iter::repeat(String::new()).take(5)),
            }
        }
    }

    fn push_blank_cells(row: &mut Vec<String>, headers: &[String], source_width: usize) {
        row.extend(std::iter::repeat(String::new()).take(headers.len() - source_width));
    }

    /// Write a merged table as CSV.
    pub fn write_csv<P: AsRef<Path>>(table: &RawTable, path: P) -> ImportResult<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())
            .map_err(|e| crate::importer::ImportError::FileReadError(e.to_string()))?;
        writer.write_record(&table.headers)?;
        for row in &table.rows {
            // Pad so every record matches the header width
            let mut record = row.clone();
            record.resize(table.headers.len(), String::new());
            writer.write_record(&record)?;
        }
        writer.flush().map_err(crate::importer::ImportError::from)?;
        tracing::info!(path = %path.as_ref().display(), rows = table.rows.len(), "report written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ProductType, ResultStatus};
    use crate::domain::{BreatherCandidate, Recommendation};

    fn survey(rows: usize) -> SurveyData {
        let table = RawTable {
            headers: vec!["Site".to_string(), "Machine".to_string()],
            rows: (0..rows)
                .map(|i| vec!["S1".to_string(), format!("M{i}")])
                .collect(),
        };
        SurveyData {
            table,
            assets: Vec::new(),
        }
    }

    fn result(asset_id: &str, status: ResultStatus) -> AnalysisResult {
        let mut r = AnalysisResult::pending(asset_id);
        r.status = status;
        r.required_cfm = 2.5;
        r.selected = vec![Recommendation::with_note(
            BreatherCandidate {
                row: 0,
                brand: "Acme".to_string(),
                model: "BX-1".to_string(),
                product_type: ProductType::Disposable,
                max_air_flow_cfm: 5.0,
                max_fluid_flow_gpm: None,
                height_in: None,
                diameter_in: None,
                adsorption_ml: 0.0,
                extended_service: false,
                mobile_rated: false,
                high_vibration: false,
                oil_mist_control: false,
                rh_25_to_75: true,
                rh_over_75: false,
                water_contact_low: true,
                water_contact_medium: false,
                water_contact_high: false,
                sump_max_splash_gal: None,
                sump_max_circulating_gal: None,
            },
            "Fits directly.",
        )];
        r
    }

    #[test]
    fn test_merge_preserves_row_count_and_order() {
        let survey = survey(3);
        // Results only for rows 0 and 2, out of order
        let results = vec![
            result("2", ResultStatus::Optimal),
            result("0", ResultStatus::Suboptimal),
        ];

        let merged =
            ReportBuilder::merged_table(&survey, &results, &ReportOptions::default());
        assert_eq!(merged.rows.len(), 3);
        assert_eq!(merged.rows[0][1], "M0");
        assert_eq!(merged.rows[2][1], "M2");

        let status_col = merged
            .headers
            .iter()
            .position(|h| h == "Result_Status")
            .unwrap();
        assert_eq!(merged.rows[0][status_col], "SUBOPTIMAL");
        // Row 1 had no result: blank cells
        assert_eq!(merged.rows[1][status_col], "");
        assert_eq!(merged.rows[2][status_col], "OPTIMAL");
    }

    #[test]
    fn test_merge_carries_selection_columns() {
        let survey = survey(1);
        let results = vec![result("0", ResultStatus::Optimal)];

        let merged =
            ReportBuilder::merged_table(&survey, &results, &ReportOptions::default());
        let col = |name: &str| merged.headers.iter().position(|h| h == name).unwrap();

        assert_eq!(merged.rows[0][col("Breather_Brand")], "Acme");
        assert_eq!(merged.rows[0][col("Breather_Model")], "BX-1");
        assert_eq!(merged.rows[0][col("Breather_Note")], "Fits directly.");
        assert_eq!(merged.rows[0][col("CFM_Required")], "2.5000");
    }

    #[test]
    fn test_verbose_trace_column_optional() {
        let survey = survey(1);
        let mut r = result("0", ResultStatus::Optimal);
        r.trace = vec!["step one".to_string(), "step two".to_string()];

        let without =
            ReportBuilder::merged_table(&survey, &[r.clone()], &ReportOptions::default());
        assert!(!without.headers.contains(&"Verbose_Trace".to_string()));

        let with = ReportBuilder::merged_table(
            &survey,
            &[r],
            &ReportOptions {
                verbose_trace: true,
                include_calculations: false,
            },
        );
        let col = with
            .headers
            .iter()
            .position(|h| h == "Verbose_Trace")
            .unwrap();
        assert_eq!(with.rows[0][col], "step one -> step two");
    }

    #[test]
    fn test_csv_round_trip() {
        let survey = survey(2);
        let results = vec![result("0", ResultStatus::Optimal)];
        let merged =
            ReportBuilder::merged_table(&survey, &results, &ReportOptions::default());

        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        ReportBuilder::write_csv(&merged, file.path()).unwrap();

        use crate::importer::FileParser;
        let reparsed = crate::importer::CsvParser.parse(file.path()).unwrap();
        assert_eq!(reparsed.headers, merged.headers);
        assert_eq!(reparsed.len(), 2);
    }
}
