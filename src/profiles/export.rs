//! # 数据导出
//!
//! 导出提取记录与能量剖面到 CSV。
//!
//! ## 输出文件
//! - 原始数据：每条记录一行，列为所有记录字段的并集（按首次出现排序）
//! - 原始剖面：标签, Path, Stage, E, G
//! - 组合剖面：Structure, E, G
//!
//! ## 依赖关系
//! - 被 `commands/extract.rs` 调用
//! - 使用 `models/` 的记录与剖面结构
//! - 使用 `csv` 库写入 CSV 文件；组合剖面行经 `serde` 序列化

use crate::error::{A3edaError, Result};
use crate::models::{CalculationRecord, CompositeProfile, ProfileEntry};

use std::path::Path;

/// 所有记录列名的并集，保持首次出现顺序
pub fn union_columns(records: &[CalculationRecord]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in record.column_names() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }
    columns
}

/// 导出原始数据表；`label_column` 为第一列（标签列）的表头
pub fn records_to_csv(
    records: &[CalculationRecord],
    label_column: &str,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    let columns = union_columns(records);

    let mut header = vec![label_column.to_string()];
    header.extend(columns.iter().cloned());
    header.push("Fallback Used".to_string());
    wtr.write_record(&header)?;

    for record in records {
        let mut row = vec![record.label.clone()];
        row.extend(columns.iter().map(|c| record.cell(c).unwrap_or_default()));
        row.push(if record.fallback_used { "Yes" } else { "No" }.to_string());
        wtr.write_record(&row)?;
    }

    wtr.flush().map_err(|e| A3edaError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出原始剖面表
pub fn raw_profile_to_csv(
    entries: &[ProfileEntry],
    label_column: &str,
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record([label_column, "Path", "Stage", "E (kcal/mol)", "G (kcal/mol)"])?;

    for entry in entries {
        wtr.write_record(&[
            entry.label.clone(),
            entry.path.to_string(),
            entry.stage.to_string(),
            entry.energy.to_string(),
            entry.free_energy.map(|g| g.to_string()).unwrap_or_default(),
        ])?;
    }

    wtr.flush().map_err(|e| A3edaError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出组合剖面表
pub fn combined_profile_to_csv(profiles: &[CompositeProfile], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    if profiles.is_empty() {
        wtr.write_record(["Structure", "E (kcal/mol)", "G (kcal/mol)"])?;
    }
    for p in profiles {
        wtr.serialize(p)?;
    }

    wtr.flush().map_err(|e| A3edaError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FieldValue, PathKind, Stage};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_records_csv_uses_column_union() {
        let mut a = CalculationRecord::new("no_cat/ts");
        a.insert("E", FieldValue::quantity(-1.0, "Ha"));
        let mut b = CalculationRecord::new("no_cat/product");
        b.insert("E", FieldValue::quantity(-2.0, "Ha"));
        b.insert("G", FieldValue::quantity(-3.5, "kcal/mol"));
        b.fallback_used = true;

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.csv");
        records_to_csv(&[a, b], "wB97X-D_def2-SVP", &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "wB97X-D_def2-SVP,E (Ha),G (kcal/mol),Fallback Used");
        assert_eq!(lines[1], "no_cat/ts,-1,,No");
        assert_eq!(lines[2], "no_cat/product,-2,-3.5,Yes");
    }

    #[test]
    fn test_raw_profile_csv() {
        let entries = vec![ProfileEntry {
            label: "bf3/ts/frz_cat_ts".into(),
            path: PathKind::Frozen,
            stage: Stage::TransitionState,
            energy: -10.5,
            free_energy: None,
        }];
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.csv");
        raw_profile_to_csv(&entries, "m_b", &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("m_b,Path,Stage,E (kcal/mol),G (kcal/mol)\n"));
        assert!(text.contains("bf3/ts/frz_cat_ts,frz,TS,-10.5,\n"));
    }

    #[test]
    fn test_combined_profile_csv_header_from_fields() {
        let profiles = vec![CompositeProfile {
            name: "bf3+acrolein+butadiene".into(),
            energy: -6.5,
            free_energy: -4.25,
        }];
        let dir = tempdir().unwrap();
        let path = dir.path().join("combined.csv");
        combined_profile_to_csv(&profiles, &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "Structure,E (kcal/mol),G (kcal/mol)\nbf3+acrolein+butadiene,-6.5,-4.25\n"
        );
    }
}
