//! Read a channel
//!
//! Prints the channel details and its ten most recent data points.
//!
//! ## Usage
//!
//! ```bash
//! export AMBIDATA_CH=83601
//! export AMBIDATA_READKEY=74545caba2bfd44f
//!
//! cargo run --example fetch --features trace
//! ```
//!
//! `AMBIDATA_SCHEME` and `AMBIDATA_HOST` point the client at another server.

use ambidata::{CancellationToken, Config, Fetcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "trace")]
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ambidata=debug".into()),
        )
        .init();

    let ch = std::env::var("AMBIDATA_CH").expect("AMBIDATA_CH must be set");
    let read_key = std::env::var("AMBIDATA_READKEY").expect("AMBIDATA_READKEY must be set");

    let fetcher = Fetcher::new(ch, read_key).with_config(Config::from_env()?);

    // Ctrl-C aborts whatever request is in flight
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let info = fetcher.get_channel(&cancel).await?;
    println!("Channel {} \"{}\"", info.ch, info.ch_name);
    match info.last_post {
        Some(t) => println!("Last post: {t}"),
        None => println!("Last post: never"),
    }

    let fields = [
        &info.d1, &info.d2, &info.d3, &info.d4, &info.d5, &info.d6, &info.d7, &info.d8,
    ];
    for (i, field) in fields.iter().enumerate() {
        if !field.name.is_empty() {
            println!("  d{}: {} (color {})", i + 1, field.name, field.color.as_str());
        }
    }

    println!();
    for data in fetcher.fetch_range(10, 0, &cancel).await? {
        let created = data
            .created
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".into());
        let values: Vec<String> = [
            data.d1, data.d2, data.d3, data.d4, data.d5, data.d6, data.d7, data.d8,
        ]
        .iter()
        .map(|v| v.get().map_or_else(|| "-".to_string(), |v| v.to_string()))
        .collect();
        println!("{created}  {}", values.join("\t"));
    }

    Ok(())
}
