use std::path::Path;

use api_server::{Config, Server, ServerState, init_logger, print_banner};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 设置环境 (dotenv, 日志)
    dotenv::dotenv().ok();
    init_logger();

    // 打印横幅
    print_banner();

    tracing::info!("Ladle API Server starting...");

    // 2. 加载配置
    let config = Config::from_env();

    // 3. 管理命令: import-ingredients <file.json>
    let mut args = std::env::args().skip(1);
    if let Some(command) = args.next() {
        match command.as_str() {
            "import-ingredients" => {
                let path = args.next().ok_or_else(|| {
                    anyhow::anyhow!("usage: api-server import-ingredients <file.json>")
                })?;
                let state = ServerState::initialize(&config).await;
                let count =
                    api_server::services::seed::import_ingredients(&state.pool, Path::new(&path))
                        .await?;
                tracing::info!(count, "Ingredients imported, fixed tags seeded");
                return Ok(());
            }
            other => {
                anyhow::bail!("unknown command: {other}");
            }
        }
    }

    // 4. 初始化服务器状态
    let state = ServerState::initialize(&config).await;

    // 5. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(anyhow::anyhow!(e));
    }

    Ok(())
}
