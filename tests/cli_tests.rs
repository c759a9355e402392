//! Integration tests for the mdk command line

mod common;

use common::{create_test_item_type, create_test_uom, mdk, record_path, setup_test_project, write_file};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Init
// ============================================================================

#[test]
fn test_init_creates_project_structure() {
    let tmp = TempDir::new().unwrap();

    mdk()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized mdk project"));

    assert!(tmp.path().join(".mdk/config.yaml").is_file());
    assert!(tmp.path().join("masterdata/item-types").is_dir());
    assert!(tmp.path().join("masterdata/uoms").is_dir());
    assert!(tmp.path().join("masterdata/ports").is_dir());
    assert!(tmp.path().join("profile").is_dir());
}

#[test]
fn test_init_twice_fails_without_force() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    mdk()
        .current_dir(tmp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_commands_outside_project_fail() {
    let tmp = TempDir::new().unwrap();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an mdk project"));
}

// ============================================================================
// Entity create / edit
// ============================================================================

#[test]
fn test_uom_new_writes_record() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "new", "--code", "KG", "--title", "Kilogram", "--prefix", "kg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created unit of measure"))
        .stdout(predicate::str::contains("UOM-"));

    let files: Vec<_> = std::fs::read_dir(tmp.path().join("masterdata/uoms"))
        .unwrap()
        .collect();
    assert_eq!(files.len(), 1);

    let content = std::fs::read_to_string(files[0].as_ref().unwrap().path()).unwrap();
    assert!(content.contains("code: KG"));
    assert!(content.contains("title: Kilogram"));
    assert!(content.contains("author: test"));
}

#[test]
fn test_uom_new_rejects_lowercase_code() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "new", "--code", "kg", "--title", "Kilogram", "--prefix", "kg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Code must contain only uppercase letters and digits",
        ))
        .stderr(predicate::str::contains("not saved"));

    let count = std::fs::read_dir(tmp.path().join("masterdata/uoms"))
        .unwrap()
        .count();
    assert_eq!(count, 0, "rejected record must not be written");
}

#[test]
fn test_uom_new_reports_every_invalid_field() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "new", "--title", "K"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Code is required"))
        .stderr(predicate::str::contains("Title must be at least 2 characters"))
        .stderr(predicate::str::contains("Prefix is required"));
}

#[test]
fn test_uom_prefix_length_limit() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "new", "--code", "KG", "--title", "Kilogram", "--prefix", "kgram"])
        .assert()
        .success();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "new", "--code", "LB", "--title", "Pound", "--prefix", "pounds"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Prefix must be at most 5 characters"));
}

#[test]
fn test_item_type_has_no_prefix_field() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args([
            "item-type", "new", "--code", "RAW", "--title", "Raw Material", "--prefix", "x",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field 'prefix'"));
}

#[test]
fn test_item_type_description_is_optional() {
    let tmp = setup_test_project();
    let id = create_test_item_type(&tmp, "RAW", "Raw Material");

    let content = std::fs::read_to_string(record_path(&tmp, "item-types", &id)).unwrap();
    assert!(!content.contains("description"));

    mdk()
        .current_dir(tmp.path())
        .args(["ity", "edit", "RAW", "--description", "Unprocessed inputs"])
        .assert()
        .success();

    let content = std::fs::read_to_string(record_path(&tmp, "item-types", &id)).unwrap();
    assert!(content.contains("description: Unprocessed inputs"));
}

#[test]
fn test_edit_updates_record_in_place() {
    let tmp = setup_test_project();
    let id = create_test_uom(&tmp, "KG", "Kilogram", "kg");

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "edit", "kg", "--title", "Kilograms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated unit of measure"));

    let content = std::fs::read_to_string(record_path(&tmp, "uoms", &id)).unwrap();
    assert!(content.contains("title: Kilograms"));
    assert!(content.contains(&format!("id: {}", id)));
}

#[test]
fn test_edit_with_invalid_value_keeps_file() {
    let tmp = setup_test_project();
    let id = create_test_uom(&tmp, "KG", "Kilogram", "kg");
    let before = std::fs::read_to_string(record_path(&tmp, "uoms", &id)).unwrap();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "edit", &id, "--code", "k g"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Code must contain only uppercase letters and digits",
        ));

    let after = std::fs::read_to_string(record_path(&tmp, "uoms", &id)).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_edit_without_changes_fails() {
    let tmp = setup_test_project();
    create_test_uom(&tmp, "KG", "Kilogram", "kg");

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "edit", "KG"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn test_duplicate_code_is_rejected() {
    let tmp = setup_test_project();
    create_test_uom(&tmp, "KG", "Kilogram", "kg");

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "new", "--code", "KG", "--title", "Kilo", "--prefix", "kg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already used"));
}

#[test]
fn test_same_code_allowed_across_kinds() {
    let tmp = setup_test_project();
    create_test_uom(&tmp, "PCS", "Pieces", "pcs");
    create_test_item_type(&tmp, "PCS", "Piece Goods");
}

// ============================================================================
// List / Show
// ============================================================================

#[test]
fn test_list_shows_records() {
    let tmp = setup_test_project();
    create_test_uom(&tmp, "KG", "Kilogram", "kg");
    create_test_uom(&tmp, "LTR", "Litre", "l");

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("KG"))
        .stdout(predicate::str::contains("Litre"))
        .stdout(predicate::str::contains("2 units of measure"));
}

#[test]
fn test_list_empty() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["port", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No ports of discharge found."));
}

#[test]
fn test_list_search_and_id_format() {
    let tmp = setup_test_project();
    let kg = create_test_uom(&tmp, "KG", "Kilogram", "kg");
    create_test_uom(&tmp, "LTR", "Litre", "l");

    let output = mdk()
        .current_dir(tmp.path())
        .args(["uom", "list", "--search", "kilo", "-o", "id"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), kg);
}

#[test]
fn test_show_by_code_and_json() {
    let tmp = setup_test_project();
    let id = create_test_uom(&tmp, "KG", "Kilogram", "kg");

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "show", "KG"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit of Measure: Kilogram"))
        .stdout(predicate::str::contains(id.as_str()));

    let output = mdk()
        .current_dir(tmp.path())
        .args(["uom", "show", &id, "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["code"], "KG");
    assert_eq!(value["prefix"], "kg");
    assert_eq!(value["id"], id.as_str());
}

#[test]
fn test_show_blank_reference_matches_nothing() {
    let tmp = setup_test_project();
    create_test_uom(&tmp, "KG", "Kilogram", "kg");

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "show", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no unit of measure found"));
}

#[test]
fn test_show_unknown_reference() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["port", "show", "NLRTM"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no port of discharge found"));
}

// ============================================================================
// Import
// ============================================================================

#[test]
fn test_import_saves_valid_rows_and_reports_bad_ones() {
    let tmp = setup_test_project();
    let csv = tmp.path().join("ports.csv");
    std::fs::write(
        &csv,
        "code,title\nNLRTM,Rotterdam\nDEHAM,Hamburg\nbad,X\n",
    )
    .unwrap();

    mdk()
        .current_dir(tmp.path())
        .args(["port", "import", "ports.csv"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Imported 2 ports of discharge"))
        .stderr(predicate::str::contains("line 4"))
        .stderr(predicate::str::contains("1 row(s) rejected"));

    let count = std::fs::read_dir(tmp.path().join("masterdata/ports"))
        .unwrap()
        .count();
    assert_eq!(count, 2);
}

#[test]
fn test_import_short_row_is_rejected_and_later_rows_still_imported() {
    let tmp = setup_test_project();
    let csv = tmp.path().join("ports.csv");
    std::fs::write(&csv, "code,title\nNLRTM,Rotterdam\nDEHAM\nBEANR,Antwerp\n").unwrap();

    mdk()
        .current_dir(tmp.path())
        .args(["port", "import", "ports.csv"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Imported 2 ports of discharge"))
        .stderr(predicate::str::contains("line 3: expected 2 fields, found 1"))
        .stderr(predicate::str::contains("1 row(s) rejected"));

    mdk()
        .current_dir(tmp.path())
        .args(["port", "show", "BEANR"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Antwerp"));
}

#[test]
fn test_import_dry_run_writes_nothing() {
    let tmp = setup_test_project();
    let csv = tmp.path().join("uoms.csv");
    std::fs::write(&csv, "code,title,prefix\nKG,Kilogram,kg\n").unwrap();

    mdk()
        .current_dir(tmp.path())
        .args(["uom", "import", "uoms.csv", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validated 1 unit of measure"));

    let count = std::fs::read_dir(tmp.path().join("masterdata/uoms"))
        .unwrap()
        .count();
    assert_eq!(count, 0);
}

#[test]
fn test_import_unknown_column() {
    let tmp = setup_test_project();
    let csv = tmp.path().join("types.csv");
    std::fs::write(&csv, "code,title,colour\nRAW,Raw Material,red\n").unwrap();

    mdk()
        .current_dir(tmp.path())
        .args(["item-type", "import", "types.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column 'colour'"));
}

// ============================================================================
// Validate
// ============================================================================

#[test]
fn test_validate_passes_on_clean_project() {
    let tmp = setup_test_project();
    create_test_uom(&tmp, "KG", "Kilogram", "kg");
    create_test_item_type(&tmp, "RAW", "Raw Material");

    mdk()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("All files passed validation"));
}

#[test]
fn test_validate_catches_hand_edited_record() {
    let tmp = setup_test_project();
    let id = create_test_uom(&tmp, "KG", "Kilogram", "kg");

    let path = record_path(&tmp, "uoms", &id);
    let content = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, content.replace("code: KG", "code: kg")).unwrap();

    mdk()
        .current_dir(tmp.path())
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "code: Code must contain only uppercase letters and digits",
        ))
        .stderr(predicate::str::contains("Validation failed"));
}

// ============================================================================
// Schema
// ============================================================================

#[test]
fn test_schema_describes_fields() {
    mdk()
        .args(["schema", "uom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit of Measure"))
        .stdout(predicate::str::contains("prefix"))
        .stdout(predicate::str::contains("Prefix is required"));
}

#[test]
fn test_schema_json_is_valid_json() {
    let output = mdk().args(["schema", "item-type", "--json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["additionalProperties"], false);
    assert!(value["properties"]["code"].is_object());
}

// ============================================================================
// Profile
// ============================================================================

#[test]
fn test_profile_setup_with_logo() {
    let tmp = setup_test_project();
    let logo = write_file(&tmp, "brand.png", 1024);

    mdk()
        .current_dir(tmp.path())
        .args([
            "profile",
            "setup",
            "--company-name",
            "Acme Trading",
            "--email",
            "info@acme.example",
            "--logo",
        ])
        .arg(&logo)
        .assert()
        .success()
        .stdout(predicate::str::contains("Logo brand.png accepted"))
        .stdout(predicate::str::contains("preview://"))
        .stdout(predicate::str::contains("Saved company profile for Acme Trading"));

    assert!(tmp.path().join("profile/logo.png").is_file());
    let content = std::fs::read_to_string(tmp.path().join("profile/company.mdk.yaml")).unwrap();
    assert!(content.contains("logo: logo.png"));

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Trading"))
        .stdout(predicate::str::contains("info@acme.example"));
}

#[test]
fn test_profile_replacing_logo_keeps_only_the_new_file() {
    let tmp = setup_test_project();
    let png = write_file(&tmp, "brand.png", 1024);
    let gif = write_file(&tmp, "brand.gif", 2048);

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--company-name", "Acme", "--email", "a@b.example", "--logo"])
        .arg(&png)
        .assert()
        .success();
    assert!(tmp.path().join("profile/logo.png").is_file());

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--logo"])
        .arg(&gif)
        .assert()
        .success();

    assert!(tmp.path().join("profile/logo.gif").is_file());
    assert!(!tmp.path().join("profile/logo.png").exists());
    let content = std::fs::read_to_string(tmp.path().join("profile/company.mdk.yaml")).unwrap();
    assert!(content.contains("logo: logo.gif"));
}

#[test]
fn test_profile_rejected_update_keeps_existing_logo() {
    let tmp = setup_test_project();
    let png = write_file(&tmp, "brand.png", 1024);
    let gif = write_file(&tmp, "brand.gif", 2048);

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--company-name", "Acme", "--email", "a@b.example", "--logo"])
        .arg(&png)
        .assert()
        .success();

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--email", "", "--logo"])
        .arg(&gif)
        .assert()
        .failure();

    assert!(tmp.path().join("profile/logo.png").is_file());
    let content = std::fs::read_to_string(tmp.path().join("profile/company.mdk.yaml")).unwrap();
    assert!(content.contains("logo: logo.png"));
}

#[test]
fn test_profile_rejects_large_logo_but_saves_fields() {
    let tmp = setup_test_project();
    let logo = write_file(&tmp, "huge.png", 3 * 1024 * 1024);

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--company-name", "Acme", "--phone", "+31 10 123 4567", "--logo"])
        .arg(&logo)
        .assert()
        .success()
        .stderr(predicate::str::contains("File size must be 2MB or less"));

    assert!(tmp.path().join("profile/company.mdk.yaml").is_file());
    assert!(!tmp.path().join("profile/logo.png").exists());
}

#[test]
fn test_profile_rejects_non_image_logo() {
    let tmp = setup_test_project();
    let pdf = write_file(&tmp, "brochure.pdf", 512);

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--company-name", "Acme", "--email", "a@b.example", "--logo"])
        .arg(&pdf)
        .assert()
        .success()
        .stderr(predicate::str::contains("Please select an image file"));
}

#[test]
fn test_profile_requires_contact() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "setup", "--company-name", "Acme"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Provide an email address or a phone number",
        ));

    assert!(!tmp.path().join("profile/company.mdk.yaml").exists());
}

#[test]
fn test_profile_show_without_profile() {
    let tmp = setup_test_project();

    mdk()
        .current_dir(tmp.path())
        .args(["profile", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No company profile yet"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    mdk()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mdk"));
}
