// ==========================================
// 出货数据对账系统 - 对账 API
// ==========================================
// 职责: 上传主数据 / 上传出货单 / 回滚主数据 / 查询状态
// 红线: 所有错误在本层转换为失败响应，不向外抛出
// 红线: 任一表结构校验失败时不写输出文件，不替换当前主数据
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ReconConfigReader, RunSettings};
use crate::domain::run::{MatchSummary, RunReport};
use crate::engine::ReconEngine;
use crate::i18n::t_with_args;
use crate::importer::error::ImportError;
use crate::importer::file_parser::UniversalFileParser;
use crate::perf::PerfGuard;
use crate::repository::{MasterStore, MasterVersion, OutputWriter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

const MASTER_DIR: &str = "master";
const OUTPUT_DIR: &str = "output";

// ==========================================
// ApiResponse - 统一响应
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiResponse {
    /// 是否成功
    pub success: bool,
    /// 结果说明（多语言）
    pub message: String,
    /// 匹配统计（仅关联运行）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<MatchSummary>,
    /// 输出文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    /// 运行ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    /// 当前主数据版本
    #[serde(skip_serializing_if = "Option::is_none")]
    pub master_version: Option<MasterVersion>,
    /// 耗时（毫秒）
    pub elapsed_ms: u64,
}

impl ApiResponse {
    fn ok(message: String) -> Self {
        Self {
            success: true,
            message,
            ..Default::default()
        }
    }

    fn failure(err: &ApiError) -> Self {
        Self {
            success: false,
            message: err.user_message(),
            ..Default::default()
        }
    }
}

// ==========================================
// ReconApi
// ==========================================
pub struct ReconApi {
    config: Arc<dyn ReconConfigReader>,
    store: MasterStore,
    writer: OutputWriter,
    parser: UniversalFileParser,
}

impl ReconApi {
    /// 创建 API 实例
    ///
    /// # 参数
    /// - data_dir: 数据目录（master/ 存主数据版本，output/ 存输出文件）
    /// - config: 配置读取器
    pub fn new<P: AsRef<Path>>(data_dir: P, config: Arc<dyn ReconConfigReader>) -> ApiResult<Self> {
        let data_dir = data_dir.as_ref();
        Ok(Self {
            config,
            store: MasterStore::open(data_dir.join(MASTER_DIR))?,
            writer: OutputWriter::new(data_dir.join(OUTPUT_DIR))?,
            parser: UniversalFileParser,
        })
    }

    /// 上传 UOM 主数据：校验 → 暂存投影输出 → 提交新版本 → 替换输出
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn upload_master<P: AsRef<Path>>(&self, path: P) -> ApiResponse {
        let perf = PerfGuard::new("upload_master");
        let result = self.try_upload_master(path.as_ref());
        Self::finish("upload_master", result, &perf)
    }

    /// 上传出货单：与当前主数据关联 → 写关联输出
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn upload_feed<P: AsRef<Path>>(&self, path: P) -> ApiResponse {
        let perf = PerfGuard::new("upload_feed");
        let result = self.try_upload_feed(path.as_ref());
        Self::finish("upload_feed", result, &perf)
    }

    /// 回滚主数据到上一版本
    #[instrument(skip(self))]
    pub fn rollback_master(&self) -> ApiResponse {
        let perf = PerfGuard::new("rollback_master");
        let result = self.store.rollback().map_err(ApiError::from).map(|version| {
            let mut response = ApiResponse::ok(t_with_args(
                "recon.master_rolled_back",
                &[("version", version.version_id.as_str())],
            ));
            response.master_version = Some(version);
            response
        });
        Self::finish("rollback_master", result, &perf)
    }

    /// 查询当前主数据版本
    #[instrument(skip(self))]
    pub fn master_status(&self) -> ApiResponse {
        let perf = PerfGuard::new("master_status");
        let result = self
            .store
            .current()
            .map_err(ApiError::from)
            .and_then(|current| current.ok_or(ApiError::NoMasterData))
            .map(|version| {
                let rows = version.rows.to_string();
                let committed_at = version.committed_at.to_rfc3339();
                let mut response = ApiResponse::ok(t_with_args(
                    "recon.status",
                    &[
                        ("version", version.version_id.as_str()),
                        ("rows", rows.as_str()),
                        ("committed_at", committed_at.as_str()),
                    ],
                ));
                response.master_version = Some(version);
                response
            });
        Self::finish("master_status", result, &perf)
    }

    // ==========================================
    // 内部流程
    // ==========================================

    fn finish(op: &str, result: ApiResult<ApiResponse>, perf: &PerfGuard) -> ApiResponse {
        let mut response = match result {
            Ok(response) => {
                info!(op, message = %response.message, "操作成功");
                response
            }
            Err(err) => {
                error!(op, error = %err, "操作失败");
                ApiResponse::failure(&err)
            }
        };
        response.elapsed_ms = perf.elapsed_ms();
        response
    }

    fn load_settings(&self) -> ApiResult<RunSettings> {
        RunSettings::load(self.config.as_ref()).map_err(|e| ApiError::ConfigError(e.to_string()))
    }

    /// 输入文件预检（任何行处理之前）
    fn check_input(path: &Path) -> ApiResult<()> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()).into());
        }
        if !UniversalFileParser::is_supported(path) {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_string())
                .unwrap_or_default();
            return Err(ImportError::UnsupportedFormat(ext).into());
        }
        Ok(())
    }

    fn try_upload_master(&self, path: &Path) -> ApiResult<ApiResponse> {
        Self::check_input(path)?;
        let settings = self.load_settings()?;
        let engine = ReconEngine::new(settings);

        let staged = self.store.stage(path)?;
        let projected = self
            .parser
            .parse(staged.path())
            .and_then(|table| engine.run_projection(&table));
        let report = match projected {
            Ok(report) => report,
            Err(err) => {
                if let Err(discard_err) = self.store.discard(staged) {
                    warn!(error = %discard_err, "暂存主数据丢弃失败");
                }
                return Err(err.into());
            }
        };

        // 输出先写入临时文件；提交后再替换，替换失败时恢复原主数据版本
        let staged_output = match self
            .writer
            .stage(&report.table, &engine.settings().output_file_name)
        {
            Ok(output) => output,
            Err(err) => {
                if let Err(discard_err) = self.store.discard(staged) {
                    warn!(error = %discard_err, "暂存主数据丢弃失败");
                }
                return Err(err.into());
            }
        };
        let (version, output_path) = self
            .store
            .commit_with(staged, report.master_rows, |_| staged_output.persist())?;

        let rows = report.master_rows.to_string();
        Ok(ApiResponse {
            success: true,
            message: t_with_args("recon.master_processed", &[("rows", rows.as_str())]),
            summary: None,
            output_path: Some(output_path.display().to_string()),
            run_id: Some(report.run_id),
            master_version: Some(version),
            elapsed_ms: 0,
        })
    }

    fn try_upload_feed(&self, path: &Path) -> ApiResult<ApiResponse> {
        Self::check_input(path)?;
        let settings = self.load_settings()?;
        let engine = ReconEngine::new(settings);

        let (version, master_path) = self.store.load_current()?;
        let master = self.parser.parse(&master_path)?;
        let feed = self.parser.parse(path)?;

        let report = engine.run_joined(&master, &feed)?;
        let output_path = self.write_output(&report, engine.settings())?;

        let summary = report.summary.unwrap_or_default();
        let rows = report.feed_rows.unwrap_or(0).to_string();
        let exact = summary.exact.to_string();
        let partial = summary.partial.to_string();
        let unmatched = summary.unmatched.to_string();

        Ok(ApiResponse {
            success: true,
            message: t_with_args(
                "recon.feed_processed",
                &[
                    ("rows", rows.as_str()),
                    ("exact", exact.as_str()),
                    ("partial", partial.as_str()),
                    ("unmatched", unmatched.as_str()),
                ],
            ),
            summary: Some(summary),
            output_path: Some(output_path.display().to_string()),
            run_id: Some(report.run_id),
            master_version: Some(version),
            elapsed_ms: 0,
        })
    }

    fn write_output(&self, report: &RunReport, settings: &RunSettings) -> ApiResult<PathBuf> {
        Ok(self.writer.write(&report.table, &settings.output_file_name)?)
    }
}
