use clap::Parser;
use gameplan::config::cli::{Command, LogFormat};
use gameplan::utils::{logger, validation::Validate};
use gameplan::{
    CliConfig, ConfigProvider, GameplanEngine, LocalStorage, SchedulePipeline, TerminalRenderer,
    TomlConfig,
};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting gameplan CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let command = cli.command.clone().unwrap_or(Command::Heatmap);

    let result = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path).and_then(|mut config| {
                // 命令列參數優先於 TOML 設定
                cli.apply_to(&mut config);
                run(config, &command)
            })
        }
        None => run(cli.clone().resolved(), &command),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ gameplan failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn run<C: ConfigProvider + Validate>(config: C, command: &Command) -> gameplan::Result<()> {
    // 驗證配置
    config.validate()?;

    let engine = GameplanEngine::new(SchedulePipeline::new(LocalStorage::new(""), config));
    let schedule = engine.load()?;

    if !schedule.report.is_clean() {
        eprintln!(
            "⚠️  Skipped {} fixture rows:",
            schedule.report.skipped.len()
        );
        for skipped in &schedule.report.skipped {
            eprintln!("   row {}: {}", skipped.row, skipped.error);
        }
    }

    let renderer = TerminalRenderer::new(engine.config().color(), engine.config().as_of());

    match command {
        Command::Heatmap => {
            print!("{}", engine.render_heat_map(&schedule, &renderer)?);
        }
        Command::List { team } => {
            let matches = engine.list_matches(&schedule, team.as_deref())?;
            print!("{}", renderer.render_matches(&schedule.gameplan, &matches));
        }
        Command::Export { heatmap } => {
            for path in engine.export(&schedule, *heatmap)? {
                println!("📁 {}", path);
            }
        }
    }

    Ok(())
}
