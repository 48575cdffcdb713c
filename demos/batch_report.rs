//! Batch report example
//!
//! Resolves a few people against github.com, prints progress events as rows
//! complete and finishes with the summary, export table and language breakdown.

use profile_scan::{BatchInput, BatchReport, BatchRunner, Config, Event};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let mut config = Config::default();
    config.batch.concurrency = 2;
    config.retry.max_attempts = 2;

    let runner = BatchRunner::from_config(&config)?;

    let mut events = runner.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::BatchStarted { total } => println!("Resolving {total} rows"),
                Event::RowResolved {
                    row_index,
                    success,
                    progress,
                } => println!(
                    "  row {} {} ({:.0}%)",
                    row_index + 1,
                    if success { "ok" } else { "failed" },
                    progress * 100.0
                ),
                Event::BatchFinished { total, successful } => {
                    println!("Done: {successful}/{total} resolved")
                }
            }
        }
    });

    let rows = runner
        .run(vec![
            BatchInput::from_name_parts("Linus", "Torvalds", "torvalds"),
            BatchInput::from_name_parts("Guido", "van Rossum", "gvanrossum"),
            BatchInput::from_name_parts("No", "Handle", ""),
            BatchInput::from_name_parts("Bad", "Handle", "not/a/handle"),
        ])
        .await;

    let report = BatchReport::from_rows(rows);

    println!();
    println!("Rows:              {}", report.summary.total_rows);
    println!("Successful:        {}", report.summary.successful_rows);
    println!(
        "Average repos:     {:.2}",
        report.summary.average_repository_count
    );

    println!();
    for row in &report.table {
        println!("{:<24} {:<16} {}", row.identity_label, row.identifier, row.result);
    }

    println!();
    for language in &report.languages {
        println!("{:<16} {}", language.language, language.count);
    }

    for line in &report.failures {
        eprintln!("{line}");
    }

    Ok(())
}
