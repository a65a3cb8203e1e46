use clap::Parser;
use countries_graphql::{CountriesService, Dataset};
use tokio::net::TcpListener;

mod args;

fn main() -> anyhow::Result<()> {
    let args = args::Args::parse();

    let filter = tracing_subscriber::filter::EnvFilter::try_new(args.log_level.as_filter_str())?;
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .without_time()
        .init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("countries-server")
        .build()?;

    runtime.block_on(async move {
        let dataset = Dataset::embedded()?;
        let service = CountriesService::with_graphql_path(dataset, &args.path);

        let listener = TcpListener::bind(args.listen_address).await?;
        tracing::info!(
            "Countries GraphQL endpoint exposed at http://{}{}",
            listener.local_addr()?,
            service.graphql_path()
        );

        axum::serve(listener, service.router())
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                tracing::info!("shutting down");
            })
            .await?;

        Ok::<(), anyhow::Error>(())
    })?;

    Ok(())
}
