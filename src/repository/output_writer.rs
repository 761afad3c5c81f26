// ==========================================
// 出货数据对账系统 - 输出写入
// ==========================================
// 格式: 无表头语义的 35 列 CSV（第 0 行即表头行）
// 红线: 先写同目录临时文件再 rename，失败时旧输出保持完整
// ==========================================

use crate::domain::output::OutputTable;
use crate::repository::error::RepositoryResult;
use csv::WriterBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ==========================================
// StagedOutput - 已写入临时文件、未替换的输出
// ==========================================
// 未 persist 即被丢弃时删除临时文件
#[derive(Debug)]
pub struct StagedOutput {
    tmp_path: PathBuf,
    final_path: PathBuf,
    rows: usize,
    persisted: bool,
}

impl StagedOutput {
    /// 临时文件 rename 为最终输出，返回最终路径
    pub fn persist(mut self) -> RepositoryResult<PathBuf> {
        fs::rename(&self.tmp_path, &self.final_path)?;
        self.persisted = true;

        info!(
            path = %self.final_path.display(),
            rows = self.rows,
            "输出文件已写入"
        );
        Ok(self.final_path.clone())
    }
}

impl Drop for StagedOutput {
    fn drop(&mut self) {
        if !self.persisted {
            remove_tmp(&self.tmp_path);
        }
    }
}

fn remove_tmp(path: &Path) {
    if path.is_file() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "临时输出文件清理失败");
        }
    }
}

pub struct OutputWriter {
    output_dir: PathBuf,
}

impl OutputWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> RepositoryResult<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// 写入临时文件（旧输出保持不变）；写入失败时删除临时文件
    pub fn stage(&self, table: &OutputTable, file_name: &str) -> RepositoryResult<StagedOutput> {
        let tmp_path = self.output_dir.join(format!(".{}.tmp", file_name));

        if let Err(e) = Self::write_grid(table, &tmp_path) {
            remove_tmp(&tmp_path);
            return Err(e);
        }

        Ok(StagedOutput {
            tmp_path,
            final_path: self.output_dir.join(file_name),
            rows: table.grid_len(),
            persisted: false,
        })
    }

    /// 写出输出表，返回最终文件路径
    pub fn write(&self, table: &OutputTable, file_name: &str) -> RepositoryResult<PathBuf> {
        self.stage(table, file_name)?.persist()
    }

    fn write_grid(table: &OutputTable, path: &Path) -> RepositoryResult<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        for record in table.to_grid() {
            writer.write_record(&record)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::output::{OutputRow, OUTPUT_COLUMN_COUNT};
    use tempfile::TempDir;

    #[test]
    fn test_write_fixed_width_csv() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let table = OutputTable {
            header_columns: OutputTable::joined_header(),
            rows: vec![OutputRow {
                customer: "SENSUAL".to_string(),
                ship_to_name: "T.J. MAXX".to_string(),
                ..Default::default()
            }],
        };

        let path = writer.write(&table, "combined_data.csv").unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.len() == OUTPUT_COLUMN_COUNT));
        assert_eq!(&records[0][11], "Customer");
        assert_eq!(&records[1][12], "T.J. MAXX");
        assert!(!dir.path().join(".combined_data.csv.tmp").exists());
    }

    #[test]
    fn test_overwrite_previous_output() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let mut table = OutputTable {
            header_columns: OutputTable::projection_header(),
            rows: vec![OutputRow::default(); 3],
        };

        writer.write(&table, "out.csv").unwrap();
        table.rows.truncate(1);
        let path = writer.write(&table, "out.csv").unwrap();

        let content = fs::read_to_string(path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_failed_persist_keeps_old_output_and_removes_tmp() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let table = OutputTable {
            header_columns: OutputTable::projection_header(),
            rows: vec![OutputRow::default(); 2],
        };

        // 目标路径被非空目录占用，rename 必然失败
        let blocked = dir.path().join("out.csv");
        fs::create_dir(&blocked).unwrap();
        fs::write(blocked.join("keep"), "x").unwrap();

        assert!(writer.write(&table, "out.csv").is_err());
        assert!(blocked.join("keep").exists());
        assert!(!dir.path().join(".out.csv.tmp").exists());
    }

    #[test]
    fn test_dropped_stage_leaves_no_tmp() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let table = OutputTable {
            header_columns: OutputTable::projection_header(),
            rows: vec![OutputRow::default()],
        };

        let staged = writer.stage(&table, "out.csv").unwrap();
        assert!(dir.path().join(".out.csv.tmp").exists());
        drop(staged);

        assert!(!dir.path().join(".out.csv.tmp").exists());
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn test_failed_stage_reports_error() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path()).unwrap();
        let table = OutputTable {
            header_columns: OutputTable::projection_header(),
            rows: vec![],
        };

        // 临时文件路径被目录占用，无法创建
        fs::create_dir(dir.path().join(".out.csv.tmp")).unwrap();

        assert!(writer.stage(&table, "out.csv").is_err());
        assert!(dir.path().join(".out.csv.tmp").is_dir());
    }
}
