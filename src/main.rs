// ==========================================
// 出货数据对账系统 - 命令行入口
// ==========================================
// 用法:
//   shipment-recon master <FILE>      上传 UOM 主数据
//   shipment-recon feed <FILE>        上传出货单并生成对账表
//   shipment-recon rollback           回滚主数据
//   shipment-recon status             查看当前主数据版本
//   shipment-recon config show|set    查看/修改对账常量
// 输出: stdout 为 JSON 结果；退出码 0 成功 / 1 失败
// ==========================================

use clap::{Parser, Subcommand};
use serde_json::json;
use shipment_recon::app::{get_default_data_dir, AppState};
use shipment_recon::config::RunSettings;
use shipment_recon::{i18n, logging};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "shipment-recon")]
#[command(about = "UOM master / shipment feed reconciliation into a fixed 35-column sheet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// 数据目录（主数据版本与输出文件）
    #[arg(long, global = true, env = "SHIPMENT_RECON_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// 配置库路径（默认 <data-dir>/shipment_recon.db）
    #[arg(long, global = true)]
    config_db: Option<PathBuf>,

    /// 消息语言（zh-CN / en）
    #[arg(long, global = true, default_value = "zh-CN")]
    locale: String,
}

#[derive(Subcommand)]
enum Commands {
    /// 上传 UOM 主数据（.csv/.xlsx/.xls/.xlsm/.ods）
    Master {
        /// 主数据文件
        file: PathBuf,
    },
    /// 上传出货单，与当前主数据关联生成对账表
    Feed {
        /// 出货单文件
        file: PathBuf,
    },
    /// 回滚到上一版本主数据
    Rollback,
    /// 查看当前主数据版本
    Status,
    /// 对账常量配置
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 显示已保存的配置与本次运行的生效值
    Show,
    /// 写入配置项
    Set {
        /// 配置键（如 default_uom / cube_formula）
        key: String,
        /// 配置值
        value: String,
    },
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();
    let locale = i18n::set_locale(&cli.locale);
    tracing::debug!(locale, "消息语言");

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "启动失败");
            eprintln!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let data_dir = cli.data_dir.unwrap_or_else(get_default_data_dir);
    let state = AppState::new(data_dir, cli.config_db)?;

    let response = match cli.command {
        Commands::Master { file } => state.api.upload_master(&file),
        Commands::Feed { file } => state.api.upload_feed(&file),
        Commands::Rollback => state.api.rollback_master(),
        Commands::Status => state.api.master_status(),
        Commands::Config { action } => return run_config(&state, action),
    };

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(if response.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

fn run_config(state: &AppState, action: ConfigAction) -> anyhow::Result<ExitCode> {
    let config = state.config.as_ref();
    if let ConfigAction::Set { key, value } = &action {
        config
            .set_config_value(key, value)
            .map_err(|e| anyhow::anyhow!("配置写入失败: {}", e))?;
    }

    let stored: serde_json::Value = serde_json::from_str(
        &config
            .get_config_snapshot()
            .map_err(|e| anyhow::anyhow!("配置读取失败: {}", e))?,
    )?;
    let effective =
        RunSettings::load(config).map_err(|e| anyhow::anyhow!("配置读取失败: {}", e))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "success": true,
            "stored": stored,
            "effective": effective,
        }))?
    );
    Ok(ExitCode::SUCCESS)
}
