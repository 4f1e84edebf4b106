// ==========================================
// 行绑定集成测试
// ==========================================
// 测试目标: CSV → 绑定计划 → 嵌套对象 的完整流程
// ==========================================


use chrono::NaiveDate;
use row_binder::logging;
use row_binder::{
    BindingConfig, BindingPlan, CsvRowSource, ImportError, ImportResult, MappingReport, Policy,
    RowMapper, SkipKind, UniversalRowSource,
};
use test_helpers::{shipment_csv, write_csv, Shipment, Status};

fn shipment_config(policy: Policy) -> BindingConfig {
    BindingConfig::new(policy)
        .bind("单号", "OrderNo")
        .bind("数量", "Quantity")
        .bind("重量", "Weight")
        .bind("发货日期", "ShippedOn")
        .bind("状态", "Status")
        .bind("易碎", "Fragile")
        .bind("收货人", "Consignee.Name")
        .bind("收货电话", "Consignee.Contact.Phone")
        .bind("备注", "")
}

#[test]
fn test_csv_lenient_keeps_every_row() {
    logging::init_test();

    let csv = shipment_csv();
    let plan = BindingPlan::from_config(shipment_config(Policy::lenient()));
    let mapper = RowMapper::new(CsvRowSource::new());

    let shipments: Vec<Shipment> = mapper.map(csv.path(), &plan).expect("mapping should succeed");
    assert_eq!(shipments.len(), 4);

    // 第 1 行: 全部字段成功
    let first = &shipments[0];
    assert_eq!(first.order_no.as_deref(), Some("SO-001"));
    assert_eq!(first.quantity, 10);
    assert_eq!(first.weight, Some(12.5));
    assert_eq!(first.shipped_on, NaiveDate::from_ymd_opt(2024, 3, 1));
    assert_eq!(first.status, Some(Status::Shipped));
    assert!(first.fragile);
    let consignee = first.consignee.as_ref().unwrap();
    assert_eq!(consignee.name.as_deref(), Some("ACME"));
    assert_eq!(consignee.contact.as_ref().unwrap().phone.as_deref(), Some("021-5555"));

    // 第 2 行: 数量/易碎转换失败保持默认值,空值列保持未设置
    let second = &shipments[1];
    assert_eq!(second.quantity, 0);
    assert_eq!(second.weight, None);
    assert_eq!(second.shipped_on, NaiveDate::from_ymd_opt(2024, 3, 2));
    assert_eq!(second.status, Some(Status::Delivered));
    assert!(!second.fragile);
    // 空电话仍会构造中间对象
    let contact = second.consignee.as_ref().unwrap().contact.as_ref().unwrap();
    assert_eq!(contact.phone, None);

    // 第 3 行: 缺单号,宽松策略下仍保留
    assert_eq!(shipments[2].order_no, None);
    assert_eq!(shipments[2].quantity, 7);

    assert_eq!(shipments[3].order_no.as_deref(), Some("SO-004"));
}

#[test]
fn test_csv_enforcing_drops_rows_missing_required() {
    logging::init_test();

    let csv = shipment_csv();
    let plan = BindingPlan::from_config(shipment_config(Policy::enforcing()));
    let mapper = RowMapper::new(UniversalRowSource::new());
    let mut report = MappingReport::new();

    let shipments: Vec<Shipment> = mapper
        .map_with_observer(csv.path(), &plan, &mut report)
        .expect("mapping should succeed");

    let order_numbers: Vec<&str> = shipments
        .iter()
        .filter_map(|s| s.order_no.as_deref())
        .collect();
    assert_eq!(order_numbers, vec!["SO-001", "SO-002", "SO-004"]);

    assert_eq!(report.accepted_rows, 3);
    assert_eq!(report.rejected_rows.len(), 1);
    assert_eq!(report.rejected_rows[0].row_number, 3);
    assert_eq!(report.rejected_rows[0].missing_fields, vec!["OrderNo".to_string()]);

    assert_eq!(report.skip_count(SkipKind::Unbound), 4);
    assert_eq!(report.skip_count(SkipKind::ConversionFailed), 6);
    assert_eq!(report.skip_count(SkipKind::UnresolvedPath), 0);
}

#[test]
fn test_unknown_path_only_skips_that_column() {
    let csv = write_csv(&["单号,数量", "SO-9,5"]);
    let plan = BindingPlan::new(
        vec![("单号", "OrderNo"), ("数量", "Consignee.Quantity")],
        Policy::lenient(),
    );
    let mapper = RowMapper::new(CsvRowSource::new());
    let mut report = MappingReport::new();

    let shipments: Vec<Shipment> = mapper.map_with_observer(csv.path(), &plan, &mut report).unwrap();
    assert_eq!(shipments.len(), 1);
    assert_eq!(shipments[0].order_no.as_deref(), Some("SO-9"));
    assert_eq!(shipments[0].quantity, 0);
    assert_eq!(report.skip_count(SkipKind::UnresolvedPath), 1);
    assert!(report.has_issues());
}

#[test]
fn test_missing_file_is_error_not_empty_result() {
    let plan = BindingPlan::from_config(shipment_config(Policy::lenient()));
    let mapper = RowMapper::new(CsvRowSource::new());

    let result: ImportResult<Vec<Shipment>> = mapper.map("does/not/exist.csv", &plan);
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));

    // 只有表头: 成功,结果为空
    let csv = write_csv(&["单号,数量"]);
    let shipments: Vec<Shipment> = mapper.map(csv.path(), &plan).unwrap();
    assert!(shipments.is_empty());
}

#[test]
fn test_binding_config_from_json() {
    let json = r#"{
        "columns": {
            "单号": "OrderNo",
            "收货人": "Consignee.Name",
            "备注": ""
        },
        "policy": { "enforce_non_nullable": true }
    }"#;
    let config = BindingConfig::from_json_str(json).unwrap();
    let plan = BindingPlan::from_config(config);
    assert!(plan.policy().enforce_non_nullable);
    assert_eq!(plan.len(), 3);

    let csv = write_csv(&["单号,收货人,备注", "SO-1,ACME,x", "SO-2,,y"]);
    let mapper = RowMapper::new(CsvRowSource::new());
    let shipments: Vec<Shipment> = mapper.map(csv.path(), &plan).unwrap();

    // 第 2 行收货人为空,但路径解析已构造 Consignee,根级非空校验通过
    assert_eq!(shipments.len(), 2);
    assert_eq!(shipments[1].consignee.as_ref().unwrap().name, None);
}

#[test]
fn test_policy_defaults_to_lenient_in_json() {
    let config = BindingConfig::from_json_str(r#"{ "columns": { "单号": "OrderNo" } }"#).unwrap();
    assert!(!config.policy.enforce_non_nullable);
}
