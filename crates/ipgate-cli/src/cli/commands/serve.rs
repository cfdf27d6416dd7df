use crate::cli::args::ServeArgs;
use crate::exit_codes::EXIT_SUCCESS;
use ipgate_server::ServerConfig;

pub(crate) fn server_config(args: ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }
    if let Some(path) = args.blocklist {
        config = config.with_blocklist_path(path);
    }
    if let Some(dir) = args.static_dir {
        config = config.with_static_dir(dir);
    }
    Ok(config)
}

pub async fn run(args: ServeArgs) -> anyhow::Result<i32> {
    let config = server_config(args)?;
    ipgate_server::serve(config).await?;
    Ok(EXIT_SUCCESS)
}
