// ==========================================
// 对账全流程端到端测试
// ==========================================
// 测试范围: 上传主数据 → 上传出货单 → 输出 35 列对账表 → 回滚
// ==========================================

mod helpers;

use helpers::mock_config::MockConfig;
use shipment_recon::api::ReconApi;
use shipment_recon::i18n;
use shipment_recon::logging;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use test_helpers::*;

fn create_api(data_dir: &Path, config: MockConfig) -> ReconApi {
    ReconApi::new(data_dir, Arc::new(config)).expect("Failed to create ReconApi")
}

fn output_of(response: &shipment_recon::ApiResponse) -> Vec<Vec<String>> {
    let path = PathBuf::from(response.output_path.as_ref().expect("missing output path"));
    read_output(&path)
}

// ==========================================
// 场景1: AB-100 标准对账
// ==========================================

#[test]
fn test_ab100_end_to_end() {
    logging::init_test();
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_master_csv(dir.path(), "uom.csv", &["AB-100,10,50,2,3,4"]);
    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[feed_row("1001", "AB100", "20", "BURLINGTON STORES #5")],
    );

    let response = api.upload_master(&master);
    assert!(response.success, "{}", response.message);

    let response = api.upload_feed(&feed);
    assert!(response.success, "{}", response.message);

    let summary = response.summary.expect("missing summary");
    assert_eq!(summary.exact, 1);
    assert_eq!(summary.partial, 0);
    assert_eq!(summary.unmatched, 0);

    let grid = output_of(&response);
    assert_eq!(grid.len(), 2);
    assert!(grid.iter().all(|r| r.len() == 35));

    let header = &grid[0];
    assert!(header[..10].iter().all(|c| c.is_empty()));
    assert_eq!(header[10], "Order Date");
    assert_eq!(header[34], "TOTAL WEIGHT");

    let row = &grid[1];
    assert!(row[..11].iter().all(|c| c.is_empty()));
    assert_eq!(row[11], "SENSUAL");
    assert_eq!(row[12], "BURLINGTON");
    assert_eq!(row[13], "01/02/2024");
    assert_eq!(row[14], "02/01/2024");
    assert_eq!(row[15], "PO-1001");
    assert_eq!(row[16], "AB100");
    assert_eq!(row[17], "1001");
    assert_eq!(row[18], "");
    assert_eq!(row[19], "20");
    assert_eq!(row[20], "10");
    assert_eq!(row[21], "2.00");
    assert_eq!(row[22], "2");
    assert_eq!(row[23], "10");
    assert_eq!(row[24], "12.00");
    assert_eq!(row[25], "50");
    assert_eq!(row[26], "2");
    assert_eq!(row[27], "3");
    assert_eq!(row[28], "4");
    assert_eq!(row[29], "0.01");
    assert_eq!(row[30], "0.33");
    assert_eq!(row[31], "0.66");
    assert_eq!(row[32], "1");
    assert_eq!(row[33], "130");
    assert_eq!(row[34], "64.00");
}

// ==========================================
// 场景2: 投影模式行数 N → N+1
// ==========================================

#[test]
fn test_projection_output_rows() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_master_csv(
        dir.path(),
        "uom.csv",
        &["AB-100,10,50,2,3,4", "CD-200,1,2,3,4,5", "EF-300,,,,,"],
    );

    let response = api.upload_master(&master);
    assert!(response.success, "{}", response.message);
    assert!(response.summary.is_none());
    assert!(response.run_id.is_some());

    let grid = output_of(&response);
    assert_eq!(grid.len(), 4);

    // 表头只覆盖 Size(18) .. TOTAL WEIGHT(34)
    assert!(grid[0][..18].iter().all(|c| c.is_empty()));
    assert_eq!(grid[0][18], "Size");

    assert_eq!(grid[2][20], "10");
    assert_eq!(grid[2][23], "1");
    assert_eq!(grid[2][25], "2");
    assert_eq!(grid[3][23], "");
    assert!(grid[1][21..23].iter().all(|c| c.is_empty()));
}

// ==========================================
// 场景3: 关联模式行数 M → M+1（含未匹配/模糊匹配）
// ==========================================

#[test]
fn test_joined_output_rows_with_partial_and_unmatched() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_master_csv(
        dir.path(),
        "uom.csv",
        &["AB-100,10,50,2,3,4", "CD-200-XL,3,12,1,1,1"],
    );
    let rows = [
        feed_row("1", "AB100", "20", "ROSS DC"),
        feed_row("2", "CD200", "5", "TJ MAXX 12"),
        feed_row("3", "ZZ-404", "7", "123 MAIN ST"),
        feed_row("4", "", "1", "DDS DISCOUNTS"),
    ];
    let feed = write_feed_csv(dir.path(), "orders.csv", &rows);

    assert!(api.upload_master(&master).success);
    let response = api.upload_feed(&feed);
    assert!(response.success, "{}", response.message);

    let summary = response.summary.expect("missing summary");
    assert_eq!(summary.exact, 1);
    assert_eq!(summary.partial, 1);
    assert_eq!(summary.unmatched, 2);

    let grid = output_of(&response);
    assert_eq!(grid.len(), 5);

    // 模糊匹配行使用 CD-200-XL 的尺寸
    assert_eq!(grid[2][12], "T.J. MAXX");
    assert_eq!(grid[2][23], "3");
    assert_eq!(grid[2][22], "1");

    // 未匹配行：出货字段保留，尺寸与派生列留空
    assert_eq!(grid[3][12], "123");
    assert_eq!(grid[3][19], "7");
    assert!(grid[3][21..35].iter().all(|c| c.is_empty()));
    assert_eq!(grid[4][12], "DDs");
}

// ==========================================
// 场景4: 表结构错误不产生输出
// ==========================================

#[test]
fn test_master_schema_error_writes_nothing() {
    let dir = create_test_dir();
    let data_dir = dir.path().join("data");
    let api = create_api(&data_dir, MockConfig::default());

    let bad = write_csv(dir.path(), "bad.csv", &["Item #,Weight", "AB-100,10"]);

    let response = api.upload_master(&bad);
    assert!(!response.success);
    assert!(response.message.contains("Cube"));
    assert!(response.message.contains("Length"));
    assert!(response.output_path.is_none());
    assert!(!data_dir.join("output").join("combined_data.csv").exists());

    // 当前主数据未被替换
    assert!(!api.master_status().success);
}

#[test]
fn test_feed_schema_error_keeps_previous_output() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_master_csv(dir.path(), "uom.csv", &["AB-100,10,50,2,3,4"]);
    let response = api.upload_master(&master);
    let output_path = PathBuf::from(response.output_path.expect("missing output path"));
    let before = std::fs::read_to_string(&output_path).unwrap();

    let bad_feed = write_csv(dir.path(), "orders.csv", &["Item,Qty", "AB100,20"]);
    let response = api.upload_feed(&bad_feed);

    assert!(!response.success);
    assert!(response.message.contains("Num"));
    assert_eq!(std::fs::read_to_string(&output_path).unwrap(), before);
}

#[test]
fn test_feed_without_master_fails() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[feed_row("1", "AB100", "20", "ROSS")],
    );

    let response = api.upload_feed(&feed);
    assert!(!response.success);
    assert!(response.output_path.is_none());
}

#[test]
fn test_unsupported_and_missing_files() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let txt = write_csv(dir.path(), "uom.txt", &["Item #"]);
    let response = api.upload_master(&txt);
    assert!(!response.success);
    assert!(response.message.contains("txt"));

    let response = api.upload_master(dir.path().join("missing.csv"));
    assert!(!response.success);
    assert!(response.message.contains("missing.csv"));
}

// ==========================================
// 场景5: 主数据回滚
// ==========================================

#[test]
fn test_rollback_restores_previous_master() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let v1 = write_master_csv(dir.path(), "uom_v1.csv", &["AB-100,10,50,2,3,4"]);
    let v2 = write_master_csv(dir.path(), "uom_v2.csv", &["AB-100,20,50,2,3,4"]);
    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[feed_row("1", "AB100", "20", "ROSS")],
    );

    assert!(api.upload_master(&v1).success);
    assert!(api.upload_master(&v2).success);

    let grid = output_of(&api.upload_feed(&feed));
    assert_eq!(grid[1][24], "22.00");

    let response = api.rollback_master();
    assert!(response.success, "{}", response.message);
    let version = response.master_version.expect("missing version");
    assert_eq!(version.original_name, "uom_v1.csv");

    let grid = output_of(&api.upload_feed(&feed));
    assert_eq!(grid[1][24], "12.00");
    assert_eq!(grid[1][34], "64.00");
}

#[test]
fn test_rollback_without_previous_fails() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    assert!(!api.rollback_master().success);

    let master = write_master_csv(dir.path(), "uom.csv", &["AB-100,10,50,2,3,4"]);
    assert!(api.upload_master(&master).success);
    assert!(!api.rollback_master().success);
    assert!(api.master_status().success);
}

#[test]
fn test_failed_output_replace_keeps_current_master() {
    let dir = create_test_dir();
    let data_dir = dir.path().join("data");
    let api = create_api(&data_dir, MockConfig::default());

    let v1 = write_master_csv(dir.path(), "uom_v1.csv", &["AB-100,10,50,2,3,4"]);
    let v2 = write_master_csv(dir.path(), "uom_v2.csv", &["AB-100,20,50,2,3,4"]);
    assert!(api.upload_master(&v1).success);

    // 输出路径被非空目录占用：临时文件可写，替换失败
    let output = data_dir.join("output").join("combined_data.csv");
    std::fs::remove_file(&output).unwrap();
    std::fs::create_dir(&output).unwrap();
    std::fs::write(output.join("keep"), "x").unwrap();

    let response = api.upload_master(&v2);
    assert!(!response.success);
    assert!(response.output_path.is_none());

    let status = api.master_status();
    assert!(status.success);
    assert_eq!(status.master_version.unwrap().original_name, "uom_v1.csv");
    assert!(!data_dir.join("output").join(".combined_data.csv.tmp").exists());
}

#[test]
fn test_failed_output_stage_keeps_current_master() {
    let dir = create_test_dir();
    let data_dir = dir.path().join("data");
    let api = create_api(&data_dir, MockConfig::default());

    let v1 = write_master_csv(dir.path(), "uom_v1.csv", &["AB-100,10,50,2,3,4"]);
    let v2 = write_master_csv(dir.path(), "uom_v2.csv", &["AB-100,20,50,2,3,4"]);
    assert!(api.upload_master(&v1).success);
    let before = std::fs::read_to_string(data_dir.join("output").join("combined_data.csv")).unwrap();

    // 临时文件路径被目录占用，无法写入
    std::fs::create_dir(data_dir.join("output").join(".combined_data.csv.tmp")).unwrap();

    assert!(!api.upload_master(&v2).success);
    let status = api.master_status();
    assert_eq!(status.master_version.unwrap().original_name, "uom_v1.csv");
    assert!(api.rollback_master().master_version.is_none());
    assert_eq!(
        std::fs::read_to_string(data_dir.join("output").join("combined_data.csv")).unwrap(),
        before
    );
}

// ==========================================
// 场景6: 表头模糊匹配 + 主数据 UOM 列
// ==========================================

#[test]
fn test_fuzzy_headers_and_master_quantity_per_unit() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_csv(
        dir.path(),
        "uom.csv",
        &[
            "Item No,WEIGHT,Cube CM,length,WIDTH,Height,Pack Qty",
            "AB-100,10,50,2,3,4,4",
        ],
    );
    let feed = write_csv(
        dir.path(),
        "orders.csv",
        &[
            "num,ship date,P.O. #,Cancel Date,ITEM,QTY,Ship To Address",
            "7,03/01/2024,PO7,04/01/2024,ab-100,20,Fashion Nova Outlet",
        ],
    );

    assert!(api.upload_master(&master).success);
    let response = api.upload_feed(&feed);
    assert!(response.success, "{}", response.message);

    let grid = output_of(&response);
    let row = &grid[1];
    assert_eq!(row[12], "FASHION NOVA");
    assert_eq!(row[15], "PO7");
    assert_eq!(row[20], "4");
    assert_eq!(row[21], "5.00");
    assert_eq!(row[22], "5");
    assert_eq!(row[25], "50");
}

// ==========================================
// 场景7: 配置驱动的常量与口径
// ==========================================

#[test]
fn test_carton_weight_formula_and_customer() {
    let dir = create_test_dir();
    let mut config = MockConfig::carton_weight_formula();
    config.customer_name = "ACME".to_string();
    let api = create_api(&dir.path().join("data"), config);

    let master = write_master_csv(dir.path(), "uom.csv", &["AB-100,10,50,2,3,4"]);
    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[feed_row("1", "AB100", "20", "BEALLS")],
    );

    assert!(api.upload_master(&master).success);
    let grid = output_of(&api.upload_feed(&feed));
    let row = &grid[1];

    assert_eq!(row[11], "ACME");
    assert_eq!(row[30], "0.31");
    assert_eq!(row[31], "0.03");
    assert_eq!(row[32], "1");
    assert_eq!(row[34], "64.00");
}

#[test]
fn test_custom_output_file_name() {
    let dir = create_test_dir();
    let mut config = MockConfig::with_customer("SENSUAL");
    config.output_file_name = "recon.csv".to_string();
    let api = create_api(&dir.path().join("data"), config);

    let master = write_master_csv(dir.path(), "uom.csv", &["AB-100,10,50,2,3,4"]);
    let response = api.upload_master(&master);

    assert!(response.output_path.unwrap().ends_with("recon.csv"));
}

// ==========================================
// 场景8: 结果消息包含匹配统计
// ==========================================

#[test]
fn test_feed_message_reports_counts() {
    i18n::set_locale("en");
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_master_csv(dir.path(), "uom.csv", &["AB-100,10,50,2,3,4"]);
    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[
            feed_row("1", "AB100", "20", "ROSS"),
            feed_row("2", "XY-1", "20", "ROSS"),
        ],
    );

    assert!(api.upload_master(&master).success);
    let response = api.upload_feed(&feed);

    assert!(response.message.contains("Exact matches: 1"));
    assert!(response.message.contains("Partial matches: 0"));
    assert!(response.message.contains("Unmatched: 1"));
}

// ==========================================
// 场景9: Excel 主数据 + 非正 UOM
// ==========================================

#[test]
fn test_xlsx_master_end_to_end() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_master_xlsx(dir.path(), "uom.xlsx", &[&["AB-100", "10", "50", "2", "3", "4"]]);
    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[feed_row("1", "AB100", "20", "ROSS")],
    );

    let response = api.upload_master(&master);
    assert!(response.success, "{}", response.message);
    assert_eq!(response.master_version.unwrap().original_name, "uom.xlsx");

    let grid = output_of(&api.upload_feed(&feed));
    let row = &grid[1];
    assert_eq!(row[23], "10");
    assert_eq!(row[25], "50");
    assert_eq!(row[30], "0.33");
    assert_eq!(row[34], "64.00");
}

#[test]
fn test_zero_pack_quantity_gives_zero_cartons() {
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let master = write_csv(
        dir.path(),
        "uom.csv",
        &[
            "Item #,Weight,Cube,Length,Width,Height,Pack Qty",
            "AB-100,10,50,2,3,4,0",
            "CD-200,10,50,2,3,4,",
        ],
    );
    let feed = write_feed_csv(
        dir.path(),
        "orders.csv",
        &[
            feed_row("1", "AB-100", "20", "ROSS"),
            feed_row("2", "CD-200", "20", "ROSS"),
        ],
    );

    assert!(api.upload_master(&master).success);
    let grid = output_of(&api.upload_feed(&feed));

    for row in &grid[1..] {
        assert_eq!(row[21], "0.00");
        assert_eq!(row[22], "0");
        assert_eq!(row[32], "1");
        assert_eq!(row[34], "40.00");
    }
    assert_eq!(grid[1][20], "0");
    assert_eq!(grid[2][20], "");
}

#[test]
fn test_schema_error_message_is_localized() {
    i18n::set_locale("en");
    let dir = create_test_dir();
    let api = create_api(&dir.path().join("data"), MockConfig::default());

    let bad = write_csv(dir.path(), "bad.csv", &["Item #,Weight", "AB-100,10"]);
    let response = api.upload_master(&bad);

    assert!(!response.success);
    assert!(response.message.starts_with("MASTER table is missing required columns:"));
    assert!(response.message.contains("Cube"));
}
