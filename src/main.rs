use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chronik::{
    discover_transcripts, execute_merge, execute_render, load_curated_tables, read_csv,
    run_extraction, write_csv, write_entities_csv, write_json, write_segments_csv,
    AuthorityRecord, ChronikConfig, EntityRow, HttpAnnotator, KnowledgeBase, MergeConfig,
    SegmentRow, WikidataClient,
};

#[derive(Parser)]
#[command(name = "chronik")]
#[command(author, version, about = "Entity extraction for timecoded interview transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment transcripts, recognize entities and write entities.csv / segments.csv
    Extract,

    /// Join exported segments to the authority table and write corpus.json
    Render {
        /// Fetch birth/death dates and lexicon links from Wikidata
        #[arg(long)]
        wikidata: bool,
    },

    /// Merge extracted entities into the master authority table
    Merge,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = ChronikConfig::from_env();

    match cli.command {
        Commands::Extract => extract(&config).await,
        Commands::Render { wikidata } => render(&config, wikidata).await,
        Commands::Merge => merge(&config),
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn extract(config: &ChronikConfig) -> Result<()> {
    info!("Loading curated tables from {:?}", config.authority_dir);
    let tables = load_curated_tables(&config.additional_table(), &config.ignore_table())?;
    info!(
        "Loaded {} alias keys, {} ignored names",
        tables.alias_count(),
        tables.ignore_count()
    );

    let transcripts = discover_transcripts(&config.data_dir)?;
    if transcripts.is_empty() {
        warn!("No transcript-<id>.txt files in {:?}", config.data_dir);
    }

    let annotator = HttpAnnotator::new(config.annotator.clone());
    let corpus = run_extraction(&annotator, &transcripts, &tables, &config.normalizer).await?;

    write_entities_csv(&config.entities_export(), &corpus.entities)?;
    write_segments_csv(&config.segments_export(), &corpus.segments)?;
    info!(
        "Output written to {:?} and {:?}",
        config.entities_export(),
        config.segments_export()
    );

    Ok(())
}

async fn render(config: &ChronikConfig, wikidata: bool) -> Result<()> {
    let authority: Vec<AuthorityRecord> = read_csv(&config.authority_table())?;
    let segments: Vec<SegmentRow> =
        read_csv(&config.segments_export()).context("Run `chronik extract` first")?;

    let client = wikidata.then(|| WikidataClient::new(config.wikidata.clone()));
    let knowledge_base = client.as_ref().map(|c| c as &dyn KnowledgeBase);

    let export = execute_render(&authority, &segments, knowledge_base).await;

    for (title, names) in [
        ("Missing entities", &export.diagnostics.missing_entities),
        ("Duplicate entities", &export.diagnostics.duplicate_entities),
        ("Duplicate variations", &export.diagnostics.duplicate_variations),
    ] {
        if !names.is_empty() {
            warn!("{}: {}", title, names.join(", "));
        }
    }

    write_json(&config.corpus_export(), &export)?;
    info!("Output written to {:?}", config.corpus_export());

    Ok(())
}

fn merge(config: &ChronikConfig) -> Result<()> {
    let extracted: Vec<EntityRow> =
        read_csv(&config.entities_export()).context("Run `chronik extract` first")?;
    let curated: Vec<AuthorityRecord> = read_csv(&config.authority_table())?;

    let result = execute_merge(&extracted, &curated, &MergeConfig::default());

    write_csv(&config.merged_authority(), &result.records)?;
    info!(
        "Merged authority table written to {:?}: {} rows before merge, {} duplicates removed, {} suspect identifiers",
        config.merged_authority(),
        result.report.total_rows,
        result.report.duplicates_removed,
        result.report.suspect_identifiers.len()
    );

    Ok(())
}
