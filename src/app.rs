use crate::args::{
    Args,
    Command,
};
use color_eyre::Result;
use eyre::Context as _;
use std::{
    path::Path,
    sync::Arc,
};
use swxtch_poller_collectors::{
    Aggregator,
    Collector,
    Document,
    ErrorReporter,
    Fetcher,
    FileErrorReporter,
    Snapshot,
    TracingErrorReporter,
};
use swxtch_poller_config::{
    Config,
    ErrorLogKind,
};

pub struct App {
    config: Config,
    command: Command,
}

impl App {
    pub fn new(args: Args) -> Result<Self> {
        let config = Config::new(args.config)?;
        Ok(Self {
            config,
            command: args.command.unwrap_or_default(),
        })
    }

    pub async fn run(self) -> Result<()> {
        let fetcher = self.fetcher()?;
        let aggregator = Aggregator::new(&self.config.host, fetcher.clone());
        info!(host = %self.config.host, timeout = %self.config.timeout, "starting swxtch poller");

        match &self.command {
            Command::Collect { output_file } => {
                let documents = aggregator.collect_all().await;
                self.print_documents(&documents, output_file.as_deref()).await
            }
            Command::Export { dir } => {
                let dir = dir.as_deref().unwrap_or(self.config.export_dir.as_path());
                let snapshot = Snapshot::capture(&fetcher, &aggregator.endpoints()).await;
                let (db_path, routes_path) = snapshot.write_to(dir)?;
                info!(db = %db_path.display(), routes = %routes_path.display(), "export written");
                Ok(())
            }
        }
    }

    fn fetcher(&self) -> Result<Fetcher> {
        let reporter: Arc<dyn ErrorReporter> = match self.config.error_log.kind {
            ErrorLogKind::File => Arc::new(FileErrorReporter::new(&self.config.error_log.directory)),
            ErrorLogKind::Tracing => Arc::new(TracingErrorReporter),
        };
        Fetcher::new(self.config.timeout()?, reporter)
    }

    async fn print_documents(&self, documents: &[Document], output_file: Option<&Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(documents)?;
        println!("{json}");
        println!("{}", documents.len());

        if let Some(output_file) = output_file {
            tokio::fs::write(output_file, &json)
                .await
                .wrap_err_with(|| format!("Failed to write documents to {:?}", output_file))?;
            info!("Documents exported successfully to {}", output_file.display());
        }
        Ok(())
    }
}
