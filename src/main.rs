use std::env;
use std::io;
use std::process::ExitCode;

use ebook_store::csv::{read_catalog, read_customers, read_events, write_receipts};
use ebook_store::{Catalog, Storefront};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: ebook-store <catalog.csv> <customers.csv> <events.csv>";

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let [catalog_path, customers_path, events_path] = args.as_slice() else {
        error!("{USAGE}");
        return ExitCode::FAILURE;
    };

    for path in [catalog_path, customers_path, events_path] {
        if !path.ends_with(".csv") {
            warn!(path, "input file seems to not be a csv file");
        }
    }

    let mut catalog = Catalog::new();
    match read_catalog(catalog_path) {
        Ok(rows) => {
            for result in rows {
                match result {
                    Ok(ebook) => catalog.add(ebook),
                    Err(e) => warn!("{e}"),
                }
            }
        }
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    let mut storefront = Storefront::new(catalog);
    match read_customers(customers_path) {
        Ok(rows) => {
            for result in rows {
                let registered = result
                    .map_err(|e| e.to_string())
                    .and_then(|(id, customer)| {
                        storefront
                            .register_customer(id, customer)
                            .map_err(|e| e.to_string())
                    });
                if let Err(e) = registered {
                    warn!("{e}");
                }
            }
        }
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    }

    let events = match read_events(events_path.clone()) {
        Ok(events) => events,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let (event_sender, event_receiver) = tokio::sync::mpsc::channel(16);

    tokio::spawn(async move {
        for result in events {
            match result {
                Ok(event) => {
                    if event_sender.send(event).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                }
            }
        }
    });

    storefront.run(ReceiverStream::new(event_receiver)).await;

    if let Err(e) = write_receipts(io::stdout().lock(), storefront.receipts()) {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
