//! Send a data point
//!
//! Posts one reading and attaches a comment to it.
//!
//! ## Usage
//!
//! ```bash
//! export AMBIDATA_CH=83601
//! export AMBIDATA_WRITEKEY=52e2cd7ddbfe2fed
//!
//! cargo run --example send --features trace -- 21.5 48
//! ```
//!
//! Each argument becomes the next field, starting at `d1`.

use ambidata::{CancellationToken, Config, Data, Maybe, Sender};
use chrono::{SubsecRound, Utc};

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
    let write_key = std::env::var("AMBIDATA_WRITEKEY").expect("AMBIDATA_WRITEKEY must be set");

    let values = std::env::args()
        .skip(1)
        .map(|arg| arg.parse::<f64>())
        .collect::<Result<Vec<_>, _>>()?;
    if values.is_empty() || values.len() > 8 {
        return Err("pass between one and eight values".into());
    }

    let mut data = Data {
        created: Some(Utc::now().trunc_subsecs(3)),
        ..Default::default()
    };
    let fields = [
        &mut data.d1,
        &mut data.d2,
        &mut data.d3,
        &mut data.d4,
        &mut data.d5,
        &mut data.d6,
        &mut data.d7,
        &mut data.d8,
    ];
    for (field, value) in fields.into_iter().zip(values) {
        *field = Maybe::just(value);
    }

    let sender = Sender::new(ch, write_key).with_config(Config::from_env()?);
    let cancel = CancellationToken::new();

    sender.send(&data, &cancel).await?;
    println!("Sent {:?}", data);

    if let Some(created) = data.created {
        sender
            .set_cmnt(created, "sent by the ambidata send example", &cancel)
            .await?;
        println!("Comment attached to {created}");
    }

    Ok(())
}
