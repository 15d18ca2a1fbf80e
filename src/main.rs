use anyhow::Result;
use sheet_quiz_bot::utils::logging;
use sheet_quiz_bot::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，缺少任何必填项都直接退出
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
