// ==========================================
// 出货数据对账系统 - 主数据版本存储
// ==========================================
// 目录结构:
//   <root>/manifest.json          当前/上一版本清单
//   <root>/versions/<uuid>.<ext>  各版本原始文件
// 流程: stage（复制到版本槽） → 调用方校验 → commit / discard
// 红线: 清单以 写临时文件 + rename 原子替换，读端只会看到完整的旧清单或新清单
// 红线: 仅保留 current + previous 两个版本，其余在 commit 后清理
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use uuid::Uuid;

const MANIFEST_FILE: &str = "manifest.json";
const MANIFEST_TMP_FILE: &str = "manifest.json.tmp";
const VERSIONS_DIR: &str = "versions";

// ==========================================
// MasterVersion - 主数据版本元信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterVersion {
    pub version_id: String,        // UUID
    pub file_name: String,         // versions/ 下的存储文件名
    pub original_name: String,     // 上传时的文件名
    pub rows: usize,               // 数据行数（校验时统计）
    pub committed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Manifest {
    current: Option<MasterVersion>,
    previous: Option<MasterVersion>,
}

impl Manifest {
    fn retained_files(&self) -> Vec<&str> {
        self.current
            .iter()
            .chain(self.previous.iter())
            .map(|v| v.file_name.as_str())
            .collect()
    }
}

// ==========================================
// StagedMaster - 已暂存、未提交的版本
// ==========================================
#[derive(Debug)]
pub struct StagedMaster {
    version_id: String,
    file_name: String,
    original_name: String,
    path: PathBuf,
}

impl StagedMaster {
    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    /// 暂存文件路径（供调用方解析校验）
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ==========================================
// MasterStore
// ==========================================
pub struct MasterStore {
    root: PathBuf,
}

impl MasterStore {
    /// 打开（或初始化）存储目录
    pub fn open<P: AsRef<Path>>(root: P) -> RepositoryResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join(VERSIONS_DIR))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn versions_dir(&self) -> PathBuf {
        self.root.join(VERSIONS_DIR)
    }

    fn read_manifest(&self) -> RepositoryResult<Manifest> {
        let path = self.root.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Manifest::default());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 原子替换清单
    fn write_manifest(&self, manifest: &Manifest) -> RepositoryResult<()> {
        let tmp = self.root.join(MANIFEST_TMP_FILE);
        let content = serde_json::to_string_pretty(manifest)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, self.root.join(MANIFEST_FILE))?;
        Ok(())
    }

    /// 复制源文件到新的版本槽（不影响当前版本）
    pub fn stage(&self, source: &Path) -> RepositoryResult<StagedMaster> {
        let version_id = Uuid::new_v4().to_string();
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_lowercase();
        let file_name = format!("{}.{}", version_id, ext);
        let path = self.versions_dir().join(&file_name);
        let original_name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        fs::copy(source, &path)?;

        info!(version_id = %version_id, original = %original_name, "主数据已暂存");
        Ok(StagedMaster {
            version_id,
            file_name,
            original_name,
            path,
        })
    }

    /// 丢弃暂存版本（校验失败时调用）
    pub fn discard(&self, staged: StagedMaster) -> RepositoryResult<()> {
        if staged.path.exists() {
            fs::remove_file(&staged.path)?;
        }
        info!(version_id = %staged.version_id, "暂存主数据已丢弃");
        Ok(())
    }

    /// 提交暂存版本为当前版本，原当前版本降为 previous
    pub fn commit(&self, staged: StagedMaster, rows: usize) -> RepositoryResult<MasterVersion> {
        self.commit_with(staged, rows, |_| Ok(()))
            .map(|(version, ())| version)
    }

    /// 提交后执行 finalize（如替换输出文件）；finalize 失败时恢复提交前的清单
    ///
    /// # 返回
    /// - 新版本元信息与 finalize 的结果
    pub fn commit_with<T, F>(
        &self,
        staged: StagedMaster,
        rows: usize,
        finalize: F,
    ) -> RepositoryResult<(MasterVersion, T)>
    where
        F: FnOnce(&MasterVersion) -> RepositoryResult<T>,
    {
        let prior = self.read_manifest()?;
        let mut manifest = prior.clone();

        let version = MasterVersion {
            version_id: staged.version_id,
            file_name: staged.file_name,
            original_name: staged.original_name,
            rows,
            committed_at: Utc::now(),
        };

        manifest.previous = manifest.current.take();
        manifest.current = Some(version.clone());
        self.write_manifest(&manifest)?;

        let finalized = match finalize(&version) {
            Ok(value) => value,
            Err(err) => {
                match self.write_manifest(&prior) {
                    Ok(()) => warn!(version_id = %version.version_id, error = %err, "提交后续步骤失败，已恢复原版本"),
                    Err(restore_err) => error!(
                        version_id = %version.version_id,
                        error = %err,
                        restore_error = %restore_err,
                        "提交后续步骤失败，原版本恢复失败"
                    ),
                }
                self.prune(&self.read_manifest().unwrap_or(prior));
                return Err(err);
            }
        };

        info!(
            version_id = %version.version_id,
            rows = version.rows,
            previous = ?manifest.previous.as_ref().map(|v| v.version_id.as_str()),
            "主数据版本已提交"
        );

        self.prune(&manifest);
        Ok((version, finalized))
    }

    /// 回滚：current 与 previous 互换
    pub fn rollback(&self) -> RepositoryResult<MasterVersion> {
        let mut manifest = self.read_manifest()?;

        let previous = manifest.previous.take().ok_or(RepositoryError::NoPreviousVersion)?;
        manifest.previous = manifest.current.take();
        manifest.current = Some(previous.clone());
        self.write_manifest(&manifest)?;

        info!(version_id = %previous.version_id, "主数据已回滚");
        Ok(previous)
    }

    /// 当前版本元信息
    pub fn current(&self) -> RepositoryResult<Option<MasterVersion>> {
        Ok(self.read_manifest()?.current)
    }

    /// 上一版本元信息
    pub fn previous(&self) -> RepositoryResult<Option<MasterVersion>> {
        Ok(self.read_manifest()?.previous)
    }

    /// 当前版本文件路径
    pub fn load_current(&self) -> RepositoryResult<(MasterVersion, PathBuf)> {
        let version = self.current()?.ok_or(RepositoryError::NoCurrentVersion)?;
        let path = self.versions_dir().join(&version.file_name);
        if !path.exists() {
            return Err(RepositoryError::VersionFileMissing {
                version_id: version.version_id,
                path: path.display().to_string(),
            });
        }
        Ok((version, path))
    }

    /// 清理清单之外的版本文件（失败只告警，不影响提交）
    fn prune(&self, manifest: &Manifest) {
        let retained = manifest.retained_files();
        let entries = match fs::read_dir(self.versions_dir()) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "版本目录读取失败，跳过清理");
                return;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if retained.contains(&name.as_str()) {
                continue;
            }
            match fs::remove_file(entry.path()) {
                Ok(()) => info!(file = %name, "旧主数据版本已清理"),
                Err(e) => warn!(file = %name, error = %e, "旧主数据版本清理失败"),
            }
        }
    }
}
