/// 日志工具模块
///
/// 提供批处理各阶段的开始横幅和汇总输出
use std::path::Path;
use tracing::info;

/// 记录阶段开始信息
///
/// # 参数
/// - `stage`: 阶段名称（下载 / 去重 / 抽取）
/// - `code`: MeSH 编码
pub fn log_stage_start(stage: &str, code: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 开始{} - [MeSH]: {}", stage, code);
    info!(
        "开始时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// 记录检索词加载信息
pub fn log_terms_loaded(name: &str, total: usize) {
    info!("✓ 疾病: {}，共 {} 个检索词", name, total);
}

/// 打印下载汇总
///
/// # 参数
/// - `downloaded`: 新下载数量
/// - `skipped`: 已存在跳过数量
/// - `failed`: 失败数量
pub fn log_fetch_summary(downloaded: usize, skipped: usize, failed: usize) {
    info!("{}", "─".repeat(60));
    info!("📥 新下载: {}", downloaded);
    info!("⏭️ 已存在跳过: {}", skipped);
    info!("❌ 失败: {}", failed);
    info!("{}", "─".repeat(60));
}

/// 打印去重汇总
pub fn log_dedup_summary(unique: usize, document_dir: &Path) {
    info!("{}", "─".repeat(60));
    info!("📊 {} 个不重复文档保存至 {}", unique, document_dir.display());
    info!("{}", "─".repeat(60));
}

/// 打印抽取汇总
pub fn log_extract_summary(code: &str, records: usize, output: &Path) {
    info!("{}", "─".repeat(60));
    info!(
        "✅ [MeSH]: {}, [记录数]: {}, [保存路径]: {}",
        code,
        records,
        output.display()
    );
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "─".repeat(60));
}
