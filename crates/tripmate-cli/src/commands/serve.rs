use colored::Colorize;
use tripmate_agent::TripPlanner;
use tripmate_core::Config;
use tripmate_server::{shutdown_signal, Server, ServerConfig};

pub async fn run(
    planner: TripPlanner,
    config: &Config,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    let mut server_config = ServerConfig::from(&config.server);
    if let Some(host) = host {
        server_config = server_config.with_host(host);
    }
    if let Some(port) = port {
        server_config = server_config.with_port(port);
    }

    let address = server_config.listen_address();
    let server = Server::new(server_config, planner)?;

    println!("{}", "🌍 Travel AI Agent".green().bold());
    println!("Model {}", config.llm.model.cyan());
    println!("Open {}", format!("http://{}", address).cyan());
    println!("Press {} to stop\n", "Ctrl+C".yellow());

    server
        .run_with_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    println!("\n{}", "Server stopped.".green());
    Ok(())
}
