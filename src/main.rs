use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use merra2_subset::{catalog, process_files, Client, Credentials, Settings};

#[derive(Parser, Debug)]
#[command(name = "merra2-subset")]
#[command(about = "Download MERRA-2 files and subset them to a bounding box and variable list")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Directory for downloaded files
    #[arg(long, default_value = "data")]
    output_dir: PathBuf,

    /// Directory for processed (subsetted) files
    #[arg(long, default_value = "processed")]
    processed_dir: PathBuf,

    /// List available products and exit
    #[arg(long)]
    list_products: bool,
}

fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("set tracing subscriber");

    let args = Args::parse();

    if args.list_products {
        println!("Available MERRA-2 products:");
        for product in catalog::list_all() {
            println!();
            println!("Product ID: {}", product.id);
            println!("Description: {}", product.description);
            println!("Frequency: {}", product.granularity);
            println!("Available Variables: {}", product.variables.join(", "));
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> merra2_subset::Result<()> {
    // Shared setup fails here, before any network activity.
    let settings = Settings::load(&args.config)?;
    let range = settings.date_range()?;
    settings.bbox.validate()?;
    let client = Client::new(Credentials::from_env()?)?;

    info!(product = %settings.product, "starting download");
    let downloaded = client.download(&settings.product, range, &args.output_dir)?;
    info!(
        attempted = downloaded.attempted,
        succeeded = downloaded.files.len(),
        "download finished"
    );

    if downloaded.files.is_empty() {
        info!("no files were downloaded, nothing to process");
        return Ok(());
    }

    let processed = process_files(
        &downloaded.files,
        &args.processed_dir,
        &settings.bbox,
        &settings.variables,
    );
    info!(
        attempted = processed.attempted,
        succeeded = processed.files.len(),
        dir = %args.processed_dir.display(),
        "processing finished"
    );

    Ok(())
}
