//! End-to-end estimate flow over CSV rate tables on disk

use std::fs;
use std::path::Path;

use panelcost_app::app::{EstimateRequest, EstimateService};
use panelcost_app::config::Config;
use panelcost_app::export::export_estimate_to_excel;
use panelcost_app::repository::open_catalog;
use panelcost_domain::model::{EstimateOutcome, LineItemInput, SelectionKey};
use panelcost_infra::csv_loader::read_line_items;
use panelcost_types::{ErrorCategory, GarageTier};
use tempfile::tempdir;

fn write_tables(dir: &Path, bumper_paint: &str) {
    fs::write(
        dir.join("DATABASE_PAINT.csv"),
        format!(
            "Maker,Model,Year,City,W_METALLIC/SOLID,Bumper,Door\n\
             Honda,Civic,2020,Mumbai,Metallic,\"{}\",800\n\
             Honda,Civic,2019,Mumbai,Metallic,900,700\n",
            bumper_paint
        ),
    )
    .unwrap();
    fs::write(
        dir.join("DATABASE_LAB.csv"),
        "MAKER,MODEL,YEAR,CITY,BUMPER,DOOR\n\
         HONDA,CIVIC,2020.0,MUMBAI,2,3\n\
         HONDA,CIVIC,2019.0,MUMBAI,1,1\n",
    )
    .unwrap();
    fs::write(dir.join("TINKERING.csv"), "Bumper\n\nRoof\n").unwrap();
    fs::write(dir.join("R&R.csv"), "Door\n").unwrap();
}

fn config_for(dir: &Path) -> Config {
    Config {
        data_dir: Some(dir.to_path_buf()),
        ..Config::default()
    }
}

fn selection(city: &str) -> SelectionKey {
    SelectionKey::new("honda", "civic", "2020", city, "metallic", GarageTier::C)
}

#[test]
fn test_estimate_from_files() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), "1,000");
    let config = config_for(dir.path());

    let catalog = open_catalog(&config).unwrap();
    let service = EstimateService::new(&catalog, config.engine_config());
    let request = EstimateRequest {
        selection: selection("mumbai"),
        items: vec![LineItemInput::new("bumper", 50.0), LineItemInput::new("door", 0.0)],
    };

    let outcome = service.estimate(&request).unwrap();
    let estimate = outcome.estimate().unwrap();

    assert_eq!(estimate.items.len(), 2);
    assert_eq!(estimate.items[0].part, "BUMPER");
    assert!((estimate.items[0].tinkering_cost - 6600.0).abs() < 1e-9);
    assert!((estimate.items[0].painting_cost - 500.0).abs() < 1e-9);
    assert!((estimate.items[1].rnr_cost - 9900.0).abs() < 1e-9);
    assert!((estimate.items[1].painting_cost).abs() < 1e-9);
    assert!((estimate.totals.grand_total - 17000.0).abs() < 1e-9);
    // Garage tier is reported but does not change costs
    assert_eq!(estimate.garage_discount_rate, 0.5);
}

#[test]
fn test_unknown_city_is_no_match() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), "1000");
    let config = config_for(dir.path());

    let catalog = open_catalog(&config).unwrap();
    let service = EstimateService::new(&catalog, config.engine_config());
    let request = EstimateRequest {
        selection: selection("delhi"),
        items: vec![LineItemInput::new("BUMPER", 0.0)],
    };

    let err = service.estimate(&request).unwrap_err();
    assert_eq!(err.category(), Some(ErrorCategory::NoMatch));
    let message = err.to_string();
    assert!(message.contains("PAINTING"));
    assert!(message.contains("LABOUR"));
}

#[test]
fn test_empty_request_is_not_an_error() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), "1000");
    let config = config_for(dir.path());

    let catalog = open_catalog(&config).unwrap();
    let service = EstimateService::new(&catalog, config.engine_config());
    let request = EstimateRequest {
        selection: selection("mumbai"),
        items: Vec::new(),
    };

    assert_eq!(service.estimate(&request).unwrap(), EstimateOutcome::Empty);
}

#[test]
fn test_reload_picks_up_edited_tables() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), "1000");
    let config = config_for(dir.path());
    let catalog = open_catalog(&config).unwrap();

    write_tables(dir.path(), "3000");
    catalog.reload().unwrap();

    let service = EstimateService::new(&catalog, config.engine_config());
    let request = EstimateRequest {
        selection: selection("mumbai"),
        items: vec![LineItemInput::new("BUMPER", 10.0)],
    };
    let outcome = service.estimate(&request).unwrap();
    let painting = outcome.estimate().unwrap().items[0].painting_cost;
    assert!((painting - 300.0).abs() < 1e-9);
}

#[test]
fn test_options_and_vocabulary() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), "1000");
    let config = config_for(dir.path());
    let catalog = open_catalog(&config).unwrap();
    let service = EstimateService::new(&catalog, config.engine_config());

    let options = service.options(Some("Honda"), Some("Civic"));
    assert_eq!(options.makers, vec!["HONDA"]);
    assert_eq!(options.years, Some(vec!["2020".to_string(), "2019".to_string()]));
    assert_eq!(options.paint_finishes, vec!["METALLIC"]);
    assert_eq!(service.part_vocabulary(), vec!["BUMPER", "DOOR"]);
}

#[test]
fn test_missing_data_dir_is_file_not_found() {
    let dir = tempdir().unwrap();
    let config = config_for(&dir.path().join("absent"));
    let err = open_catalog(&config).err().unwrap();
    assert!(err.to_string().contains("Data directory not found"));
}

#[test]
fn test_parts_file_and_excel_export() {
    let dir = tempdir().unwrap();
    write_tables(dir.path(), "1000");
    let parts_path = dir.path().join("damage.csv");
    fs::write(&parts_path, "Part,Paint Discount (%)\nBumper,50\n,\nDoor,abc\n").unwrap();

    let items = read_line_items(&parts_path).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].discount_pct, 0.0);

    let config = config_for(dir.path());
    let catalog = open_catalog(&config).unwrap();
    let service = EstimateService::new(&catalog, config.engine_config());
    let outcome = service
        .estimate(&EstimateRequest {
            selection: selection("mumbai"),
            items,
        })
        .unwrap();

    let xlsx = dir.path().join("estimate.xlsx");
    export_estimate_to_excel(outcome.estimate().unwrap(), &xlsx).unwrap();
    assert!(fs::metadata(&xlsx).unwrap().len() > 0);
}
