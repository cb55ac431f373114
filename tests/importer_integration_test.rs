// ==========================================
// Importer and report integration tests
// ==========================================
// File-to-file flow: catalog and survey CSVs in, analysis, merged
// report out. Exercises schema resolution, row classification and
// the order-preserving result merge.
// ==========================================

use breather_advisor::{
    logging, AssetLoader, CatalogLoader, GlobalConfig, Overrides, ReportBuilder, ReportOptions,
    SelectionEngine,
};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

const CATALOG_HEADER: &str = "Brand,Model,Type,Max Air Flow (cfm),Max Fluid Flow (gpm),\
Height (in),Diameter (in),Adsorption Capacity (mL),Extended Service,Mobile applications,\
High vibration,Integrated oil mist control,Rh 25 to 75%,Rh >75%,\
Water contact conditions Low,Water contact conditions Medium,Water contact conditions High,\
\"Gearbox, pump, storage Sump Volume MAX gal\",Circulating/Hyd sump volume max gal.";

fn write_catalog() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{CATALOG_HEADER}").unwrap();
    writeln!(
        file,
        "Acme,RB-10,Rebuildable,12,100,5.0,3.0,900,,,,,x,x,x,x,x,500,500"
    )
    .unwrap();
    writeln!(
        file,
        "Acme,DX-3,Disposable,3,100,5.0,3.0,250,,,,,x,x,x,x,x,500,500"
    )
    .unwrap();
    writeln!(
        file,
        "Acme,DX-20,Disposable,20,100,5.0,3.0,700,,,,,x,x,x,x,x,500,500"
    )
    .unwrap();
    file
}

fn survey_header() -> String {
    let positional = [
        "Site",
        "Machine",
        "Area",
        "Line",
        "Unit",
        "Position",
        "Lube",
        "Method",
        "Maintenance Point",
    ];
    let named = [
        "Criticality",
        "(D) Oil Capacity",
        "(D) Operating Temperature",
        "(D) Average Relative Humidity",
        "(D) Water Contact Conditions",
        "(D) Contaminant Likelihood",
        "(D) Flow Rate",
        "(DU) Flow Rate",
    ];
    positional
        .iter()
        .chain(named.iter())
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn write_survey() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{}", survey_header()).unwrap();
    // Row 0: splash gearbox
    writeln!(
        file,
        "S1,Mill Stand 3,,,,,,,Gearbox Housing (Oil),B1,100,125°F - 150°F,50%,\"No Water Contact, Typical Humidity\",Low,,"
    )
    .unwrap();
    // Row 1: grease point, not analyzed
    writeln!(file, "S1,Mill Stand 3,,,,,,,Grease Point,,,,,,,,").unwrap();
    // Row 2: circulating reservoir fed by the pump on row 3
    writeln!(
        file,
        "S1,Paper Machine 1,,,,,,,Circulating System Reservoir (Oil),A,300,,,,,,"
    )
    .unwrap();
    // Row 3: sibling pump providing the flow cross-reference
    writeln!(
        file,
        "S1,Paper Machine 1,,,,,,,Pump (Oil),C,,,,,,60,gpm"
    )
    .unwrap();
    file
}

#[tokio::test]
async fn test_file_to_report_flow() {
    logging::init_test();
    let catalog_file = write_catalog();
    let survey_file = write_survey();

    let catalog = CatalogLoader::load(catalog_file.path()).unwrap();
    assert_eq!(catalog.len(), 3);

    let survey = AssetLoader::load(survey_file.path()).unwrap();
    // Grease point skipped; gearbox, reservoir and pump classified
    assert_eq!(survey.table.len(), 4);
    assert_eq!(survey.assets.len(), 3);

    let engine = Arc::new(
        SelectionEngine::new(
            catalog,
            survey.assets.clone(),
            GlobalConfig::default(),
            Overrides::new(),
        )
        .unwrap(),
    );
    let results = engine.analyze_all().await;
    assert_eq!(results.len(), 3);

    // Gearbox (row 0): optimal pick
    assert!(results[0].success);
    assert_eq!(results[0].asset_id, "0");
    // Reservoir (row 2): flow cross-referenced from the sibling pump
    let reservoir = &results[1];
    assert_eq!(reservoir.asset_id, "2");
    assert!(reservoir
        .trace
        .iter()
        .any(|line| line.contains("Cross-Reference")));
    // Pump (row 3): criticality C, nothing required
    assert_eq!(results[2].asset_id, "3");
    assert!(results[2].selected.is_empty());

    let merged = ReportBuilder::merged_table(
        &survey,
        &results,
        &ReportOptions {
            verbose_trace: true,
            include_calculations: true,
        },
    );
    // Row count and order preserved, grease row blank
    assert_eq!(merged.rows.len(), 4);
    let status_col = merged
        .headers
        .iter()
        .position(|h| h == "Result_Status")
        .unwrap();
    assert_eq!(merged.rows[0][status_col], "OPTIMAL");
    assert_eq!(merged.rows[1][status_col], "");
    assert_eq!(merged.rows[3][status_col], "NO_BREATHER_REQUIRED");

    let output = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    ReportBuilder::write_csv(&merged, output.path()).unwrap();
    let written = std::fs::read_to_string(output.path()).unwrap();
    assert!(written.contains("Breather_Model"));
    assert!(written.contains("OPTIMAL"));
}

#[test]
fn test_catalog_brand_filter_flow() {
    let catalog_file = write_catalog();
    let catalog = CatalogLoader::load(catalog_file.path()).unwrap();

    let mut config = GlobalConfig::default();
    config.brand_filter = Some("OtherBrand".to_string());
    let err = SelectionEngine::new(catalog, vec![], config, Overrides::new()).err();
    assert!(err.is_some());
}
