// ==========================================
// 出货数据对账系统 - 性能统计
// ==========================================
// 输出: target = "perf"，字段 op / elapsed_ms / rows
// ==========================================

use std::time::Instant;

/// 性能统计 Guard：Drop 时记录 elapsed_ms + 处理行数
///
/// 使用方式：
/// ```ignore
/// let mut perf = shipment_recon::perf::PerfGuard::new("build_joined");
/// // do work...
/// perf.set_rows(feed.len());
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: usize,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            rows: 0,
        }
    }

    /// 记录本次操作处理的行数
    pub fn set_rows(&mut self, rows: usize) {
        self.rows = rows;
    }

    /// 已耗时（毫秒）
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms = self.elapsed_ms(),
            rows = self.rows,
            "done"
        );
    }
}
