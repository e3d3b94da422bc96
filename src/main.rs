// ==========================================
// 制造单元价值流系统 - 命令行入口
// ==========================================
// 用法:
//   cell-vsm <stations.{json,csv,xlsx}> [--raw-material-uph N]
//            [--config PATH] [--format markdown|text|json]
// ==========================================

use anyhow::{anyhow, bail, Context, Result};
use cell_vsm::config::{default_config_path, ConfigManager};
use cell_vsm::{logging, ReportFormat, VsmApi, VsmConfiguration};
use std::path::PathBuf;

const USAGE: &str = "用法: cell-vsm <stations.{json,csv,xlsx}> [--raw-material-uph N] [--config PATH] [--format markdown|text|json]";

enum OutputFormat {
    Report(ReportFormat),
    Json,
}

struct CliArgs {
    input: PathBuf,
    raw_material_uph: Option<f64>,
    config_path: Option<PathBuf>,
    output: OutputFormat,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut input = None;
    let mut raw_material_uph = None;
    let mut config_path = None;
    let mut output = OutputFormat::Report(ReportFormat::Markdown);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--raw-material-uph" => {
                let value = args.next().ok_or_else(|| anyhow!("--raw-material-uph 缺少取值"))?;
                let parsed = value
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("无法解析原料速率: {}", value))?;
                raw_material_uph = Some(parsed);
            }
            "--config" => {
                let value = args.next().ok_or_else(|| anyhow!("--config 缺少路径"))?;
                config_path = Some(PathBuf::from(value));
            }
            "--format" => {
                let value = args.next().ok_or_else(|| anyhow!("--format 缺少取值"))?;
                output = if value.eq_ignore_ascii_case("json") {
                    OutputFormat::Json
                } else {
                    OutputFormat::Report(
                        ReportFormat::parse(&value)
                            .ok_or_else(|| anyhow!("不支持的输出格式: {}", value))?,
                    )
                };
            }
            "-h" | "--help" => bail!(USAGE),
            other if other.starts_with("--") => bail!("未知参数: {}\n{}", other, USAGE),
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    bail!("只能指定一个输入文件\n{}", USAGE);
                }
            }
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| anyhow!(USAGE))?,
        raw_material_uph,
        config_path,
        output,
    })
}

fn main() -> Result<()> {
    logging::init();

    let args = parse_args()?;

    tracing::info!("==================================================");
    tracing::info!("{}", cell_vsm::APP_NAME);
    tracing::info!("系统版本: {}", cell_vsm::VERSION);
    tracing::info!("==================================================");

    let config_path = args.config_path.or_else(default_config_path);
    let config = ConfigManager::load(config_path.as_deref()).context("加载配置失败")?;
    let api = VsmApi::from_config(&config)?;

    let outcome = api
        .import_stations(&args.input)
        .with_context(|| format!("导入工位失败: {}", args.input.display()))?;
    tracing::info!(
        stations = outcome.stations.len(),
        blocked = outcome.report.summary.blocked,
        "工位已导入"
    );

    // 原料速率: 命令行 > 文件 > 配置
    let raw_material_uph = args
        .raw_material_uph
        .or(outcome.raw_material_uph)
        .or(config.get_default_options()?.raw_material_uph);

    let name = args
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "价值流".to_string());
    let mut vsm = VsmConfiguration::new(outcome.report.batch_id.clone(), name, outcome.stations);
    vsm.raw_material_uph = raw_material_uph;

    let rendered = match args.output {
        OutputFormat::Json => api.export_metrics_json(&vsm)?,
        OutputFormat::Report(format) => api.export_report(&vsm, format),
    };
    println!("{}", rendered);

    Ok(())
}
