use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use log::info;

use sentiscore::{ArtifactStore, BuiltinArtifact, ClassifyError, SentimentClassifier};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Remarks to classify; defaults to a built-in sample set
    remarks: Vec<String>,

    /// Force a fresh download of the model artifacts
    #[arg(short, long)]
    fresh: bool,

    /// Abort the initial model load after this many seconds
    #[arg(long)]
    load_timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.fresh {
        info!("fresh download requested, removing any cached artifacts");
        let store = ArtifactStore::new_default()?;
        store.remove_download(&BuiltinArtifact::SentimentCnn.info())?;
    }

    let mut builder =
        SentimentClassifier::builder().with_artifact(BuiltinArtifact::SentimentCnn)?;
    if let Some(secs) = args.load_timeout_secs {
        builder = builder.with_load_timeout(Duration::from_secs(secs));
    }
    let classifier = builder.build()?;

    let remarks = if args.remarks.is_empty() {
        vec![
            "This is a great movie!".to_string(),
            "The plot was fine, nothing special.".to_string(),
            "Terrible acting and a waste of two hours.".to_string(),
        ]
    } else {
        args.remarks
    };

    let start = Instant::now();
    let loaded_here = classifier.ensure_loaded().await?;
    if loaded_here {
        info!("model loaded in {:.2?}", start.elapsed());
    }

    for remark in &remarks {
        process_remark(&classifier, remark).await;
    }

    info!("classified {} remarks in {:.2?}", remarks.len(), start.elapsed());
    Ok(())
}

async fn process_remark(classifier: &SentimentClassifier, remark: &str) {
    match classifier.classify(remark).await {
        Ok(result) => {
            println!("> {}", remark);
            println!(
                "That is a {} remark! With a sentiment score of {:.2}%.",
                result.label,
                result.score * 100.0
            );
        }
        Err(ClassifyError::EmptyInput) => {
            println!("Please enter a message.");
        }
        Err(e) => {
            eprintln!("Failed to classify remark: {}", e);
        }
    }
}
