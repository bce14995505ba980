use clap::Parser;
use four_seasons_tarot::app::layout;
use four_seasons_tarot::config::Command;
use four_seasons_tarot::utils::error::ErrorSeverity;
use four_seasons_tarot::utils::{logger, validation::Validate};
use four_seasons_tarot::{
    draw_single_card, draw_spread, format_for_prompt, spread_info, CliConfig, LlmConfig,
    ReadingEngine, Spread, TarotAnalyzer, TarotError,
};
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = run(cli).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建议: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: CliConfig) -> Result<(), TarotError> {
    match &cli.command {
        Command::Draw { json, save } => {
            let spread = draw_spread();
            if let Some(path) = save {
                std::fs::write(path, serde_json::to_string_pretty(&spread)?)?;
                tracing::info!("💾 Spread saved to: {}", path.display());
            }
            if *json {
                println!("{}", serde_json::to_string_pretty(&spread)?);
            } else {
                println!("{}", layout::render_spread(&spread));
                println!("{}", format_for_prompt(&spread));
            }
        }
        Command::Analyze { spread } => {
            let analyzer = build_analyzer(&cli)?;
            let spread = load_or_draw(spread.as_deref())?;
            println!("{}", layout::render_spread(&spread));
            println!("📝 正在进行详细分析，请稍候...");
            let result = analyzer.analyze(&spread, None).await?;
            if !result.is_success() {
                tracing::warn!("⚠️ Analysis degraded to fallback message");
            }
            println!("{}", layout::render_analysis(&result));
        }
        Command::Insight { spread } => {
            let analyzer = build_analyzer(&cli)?;
            let spread = load_or_draw(spread.as_deref())?;
            println!("{}", layout::render_spread(&spread));
            let insight = analyzer.quick_insight(&spread).await?;
            println!("✨ 核心洞察：{}", insight);
        }
        Command::Advice { spread } => {
            let analyzer = build_analyzer(&cli)?;
            let spread = load_or_draw(spread.as_deref())?;
            println!("{}", layout::render_spread(&spread));
            let advice = analyzer.seasonal_advice(&spread).await?;
            if !advice.is_success() {
                tracing::warn!("⚠️ Seasonal advice degraded to fallback message");
            }
            println!("🌟 季节建议：\n{}", advice.seasonal_advice);
        }
        Command::Complete { json } => {
            let engine = ReadingEngine::new(build_analyzer(&cli)?);
            let reading = engine.run().await?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&reading)?);
            } else {
                println!("{}", layout::render_complete(&reading));
            }
        }
        Command::Daily { question, json } => {
            // 需要 AI 時先檢查設定
            let analyzer = match question {
                Some(_) => Some(build_analyzer(&cli)?),
                None => None,
            };

            let card = draw_single_card();
            match (analyzer, question) {
                (Some(analyzer), Some(question)) => {
                    let reading = analyzer.analyze_single_card(&card, question).await?;
                    if *json {
                        println!("{}", serde_json::to_string_pretty(&reading)?);
                    } else {
                        println!("{}", layout::render_single_reading(&reading));
                    }
                }
                _ => {
                    if *json {
                        println!("{}", serde_json::to_string_pretty(&card)?);
                    } else {
                        println!("🃏 今日之牌：{}", card);
                    }
                }
            }
        }
        Command::Cards => {
            print!("{}", layout::render_cards());
        }
        Command::Info => {
            print!("{}", layout::render_spread_info(&spread_info()));
        }
        Command::Config { check } => {
            let config = cli.llm_config()?;
            display_config_summary(&config);
            config.validate()?;
            if *check {
                let analyzer = TarotAnalyzer::new(config)?;
                analyzer.validate_api_key().await?;
                println!("✅ API密钥验证通过");
            }
        }
    }

    Ok(())
}

/// 讀取並驗證設定，未設定金鑰時直接失敗
fn build_analyzer(cli: &CliConfig) -> Result<TarotAnalyzer, TarotError> {
    let config = cli.llm_config()?;
    config.validate()?;
    config.require_api_key()?;
    tracing::debug!("LLM config: {:?}", config);
    TarotAnalyzer::new(config)
}

fn load_or_draw(path: Option<&Path>) -> Result<Spread, TarotError> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading spread from: {}", path.display());
            let content = std::fs::read_to_string(path)?;
            Spread::from_json(&content)
        }
        None => {
            tracing::info!("📜 Drawing Four Seasons spread...");
            Ok(draw_spread())
        }
    }
}

fn display_config_summary(config: &LlmConfig) {
    println!("📋 Configuration Summary:");
    println!("  API Base URL: {}", config.api_base_url);
    println!("  Model: {}", config.model);
    println!("  Max Tokens: {}", config.max_tokens);
    println!("  Temperature: {}", config.temperature);
    println!("  Timeout: {}s", config.timeout_seconds);
    println!(
        "  API Key: {}",
        if config.is_configured() { "已配置" } else { "未配置" }
    );
    println!();
}
