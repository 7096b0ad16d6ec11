// ==========================================
// 表格清单 - CSV 文件加载集成测试
// ==========================================
// 覆盖: 配置 → CSV 解析 → 组装 全流程
// ==========================================


use std::path::{Path, PathBuf};
use table_inventory::config::{InventoryConfig, InventoryPlugin, TableSourceOptions};
use table_inventory::importer::{ExcelParser, FileParser, UniversalFileParser};
use table_inventory::{ImportError, Scalar, TableInventory};
use tempfile::TempDir;
use test_helpers::write_table;

fn write_sample_tables(dir: &TempDir) -> TableSourceOptions {
    let host_file = write_table(
        dir.path(),
        "hosts.csv",
        "name,hostname,platform,port,groups,site,netmiko_timeout,netmiko_fast_cli\n\
         r1,10.0.0.1,cisco_ios,,core,dc1,30,false\n\
         r2,10.0.0.2,junos,830,\"core,edge\",dc2,,\n",
    );
    let group_file = write_table(
        dir.path(),
        "groups.csv",
        "name,groups,region\ncore,,eu\nedge,core,\n",
    );
    let defaults_file = write_table(
        dir.path(),
        "defaults.csv",
        "username,password,port\nadmin,secret,22\nignored,row,23\n",
    );

    TableSourceOptions {
        plugin: InventoryPlugin::Csv,
        host_file,
        group_file,
        defaults_file,
    }
}

// ==========================================
// 空的整数参数 → 类型转换失败（终止加载）
// ==========================================
#[test]
fn test_csv_empty_timeout_fails() {
    let dir = TempDir::new().unwrap();
    let options = write_sample_tables(&dir);

    let err = TableInventory::new(options).load().unwrap_err();
    match err {
        ImportError::TypeConversionError { field, .. } => assert_eq!(field, "netmiko_timeout"),
        other => panic!("expected TypeConversionError, got {other}"),
    }
}

// ==========================================
// CSV 全流程
// ==========================================
#[test]
fn test_csv_inventory_end_to_end() {
    let dir = TempDir::new().unwrap();
    let mut options = write_sample_tables(&dir);
    options.host_file = write_table(
        dir.path(),
        "hosts.csv",
        "name,hostname,platform,port,groups,site,netmiko_timeout\n\
         r1,10.0.0.1,cisco_ios,,core,dc1,30\n\
         r2,10.0.0.2,junos,830,\"core,edge\",dc2,60\n",
    );

    let inventory = TableInventory::new(options).load().unwrap();

    // defaults 仅取首行
    assert_eq!(inventory.defaults.username.as_deref(), Some("admin"));
    assert_eq!(inventory.defaults.port, Some(22));

    let r1 = inventory.host("r1").unwrap();
    assert_eq!(r1.hostname.as_deref(), Some("10.0.0.1"));
    assert_eq!(r1.port, None);
    assert_eq!(r1.groups.names(), vec!["core"]);
    assert_eq!(r1.data.get("site"), Some(&Scalar::text("dc1")));
    assert_eq!(r1.data.get("groups"), Some(&Scalar::text("core")));

    let r2 = inventory.host("r2").unwrap();
    assert_eq!(r2.port, Some(830));
    assert_eq!(r2.groups.names(), vec!["core", "edge"]);
    let extras = r2.connection_options["netmiko"].extras.as_ref().unwrap();
    assert_eq!(extras.get("timeout"), Some(&Scalar::Integer(60)));

    let edge = inventory.group("edge").unwrap();
    assert_eq!(edge.groups.names(), vec!["core"]);
    assert_eq!(edge.data.get("region"), Some(&Scalar::Null));
    assert_eq!(edge.port, Some(22));
}

// ==========================================
// groups / defaults 文件缺失时跳过
// ==========================================
#[test]
fn test_optional_tables_missing() {
    let dir = TempDir::new().unwrap();
    let host_file = write_table(dir.path(), "hosts.csv", "name,hostname\nr1,10.0.0.1\n");

    let options = TableSourceOptions {
        plugin: InventoryPlugin::Csv,
        host_file,
        group_file: dir.path().join("groups.csv"),
        defaults_file: dir.path().join("defaults.csv"),
    };

    let inventory = TableInventory::new(options).load().unwrap();
    assert_eq!(inventory.hosts.len(), 1);
    assert!(inventory.groups.is_empty());
    assert_eq!(inventory.defaults.username, None);
}

// ==========================================
// YAML 配置 → 加载
// ==========================================
#[test]
fn test_load_from_config_file() {
    let dir = TempDir::new().unwrap();
    write_table(dir.path(), "hosts.csv", "name,groups\nr1,core\n");
    write_table(dir.path(), "groups.csv", "name\ncore\n");

    let config_text = format!(
        "inventory:\n  plugin: CSVInventory\n  options:\n    host_file: {}\n    group_file: {}\n    defaults_file: {}\n",
        dir.path().join("hosts.csv").display(),
        dir.path().join("groups.csv").display(),
        dir.path().join("defaults.csv").display(),
    );
    let config_file = write_table(dir.path(), "config.yml", &config_text);

    let config = InventoryConfig::from_file(&config_file).unwrap();
    let inventory = TableInventory::from_config(&config).load().unwrap();

    assert_eq!(inventory.hosts["r1"].groups.names(), vec!["core"]);
}

// ==========================================
// 按扩展名自动选择解析器
// ==========================================
#[test]
fn test_universal_parser_loader() {
    let dir = TempDir::new().unwrap();
    let host_file = write_table(dir.path(), "hosts.CSV", "name\nr1\n");

    let options = TableSourceOptions {
        plugin: InventoryPlugin::Csv,
        host_file,
        group_file: PathBuf::new(),
        defaults_file: PathBuf::new(),
    };

    let inventory = TableInventory::with_parser(options, Box::new(UniversalFileParser))
        .load()
        .unwrap();
    assert!(inventory.host("r1").is_some());
}

// ==========================================
// Excel 工作簿: 保留数值/布尔类型，空单元格 → Null
// ==========================================
fn excel_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/hosts.xlsx")
}

#[test]
fn test_excel_parser_reads_workbook() {
    let rows = ExcelParser.parse_to_raw_rows(&excel_fixture()).unwrap();

    assert_eq!(rows.len(), 2);
    let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "hostname", "port", "netmiko_fast_cli", "site"]);

    assert_eq!(rows[0].get("name"), Some(&Scalar::text("r1")));
    assert!(matches!(
        rows[0].get("port"),
        Some(Scalar::Integer(22)) | Some(Scalar::Float(_))
    ));
    assert_eq!(rows[0].get("netmiko_fast_cli"), Some(&Scalar::Bool(false)));
    assert_eq!(rows[1].get("port"), Some(&Scalar::Null));
    assert_eq!(rows[1].get("site"), Some(&Scalar::Null));
}

#[test]
fn test_excel_inventory_end_to_end() {
    let options = TableSourceOptions {
        plugin: InventoryPlugin::Excel,
        host_file: excel_fixture(),
        group_file: PathBuf::from("no/such/groups.xlsx"),
        defaults_file: PathBuf::from("no/such/defaults.xlsx"),
    };

    let inventory = TableInventory::new(options).load().unwrap();

    let r1 = &inventory.hosts["r1"];
    assert_eq!(r1.port, Some(22));
    let extras = r1.connection_options["netmiko"].extras.as_ref().unwrap();
    assert_eq!(extras.get("fast_cli"), Some(&Scalar::Bool(false)));

    let r2 = &inventory.hosts["r2"];
    assert_eq!(r2.port, None);
    let extras = r2.connection_options["netmiko"].extras.as_ref().unwrap();
    assert_eq!(extras.get("fast_cli"), Some(&Scalar::Bool(true)));
    assert_eq!(r2.data.get("site"), Some(&Scalar::Null));
}
