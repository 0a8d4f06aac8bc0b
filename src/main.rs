use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ctgov_harvest::{logger, App, Config, RunPaths};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "下载并抽取 ClinicalTrials.gov 注册记录")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 下载各检索词的压缩包并去重解压
    Download(RunArgs),
    /// 抽取文档字段，写出 <code>.json
    Extract(RunArgs),
    /// 依次执行 download 和 extract
    Run(RunArgs),
    /// 抽取单个文档并输出 JSON
    Inspect {
        /// XML 文档路径
        file: PathBuf,
        /// 输出文件，不指定时打印到标准输出
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// MeSH 编码（对应 conf/<code>.toml）
    #[arg(long, default_value = "D010300")]
    mesh: String,
    /// 输出根目录
    #[arg(long, default_value = "data/")]
    save_dir: PathBuf,
}

impl RunArgs {
    fn paths(&self) -> RunPaths {
        RunPaths::new(&self.save_dir, &self.mesh)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env();

    match cli.command {
        Command::Download(args) => {
            let app = start(config, &args)?;
            app.download().await?;
        }
        Command::Extract(args) => {
            let app = start(config, &args)?;
            app.extract().await?;
        }
        Command::Run(args) => {
            let app = start(config, &args)?;
            app.run().await?;
        }
        Command::Inspect { file, out } => {
            logger::init(None, config.verbose_logging)?;
            ctgov_harvest::inspect_document(&file, out.as_deref())?;
        }
    }

    Ok(())
}

/// 初始化日志（写入 <root>/<code>/log.txt）并创建应用
fn start(config: Config, args: &RunArgs) -> Result<App> {
    let paths = args.paths();
    logger::init(Some(&paths.log_file), config.verbose_logging)?;
    Ok(App::new(config, paths))
}
