//! Walk through the common object operations end to end.
//!
//! Set `ALIBABA_CLOUD_ACCESS_KEY_ID`, `ALIBABA_CLOUD_ACCESS_KEY_SECRET`
//! and `OSS_CLIENT_BUCKET`, then run:
//!
//! ```shell
//! cargo run --example get_started
//! ```

use oss_client::{BodySource, Client, Config, ListObjectsQuery};
use oss_client_core::{Context, OsEnv, Result};
use oss_client_file_io_tokio::TokioFileIo;
use oss_client_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let ctx = Context::new().with_file_io(TokioFileIo).with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let ctx = ctx.with_http_send(ReqwestHttpSend::with_limits(
        config.timeout,
        config.max_connections,
    )?);
    let client = Client::new(ctx, config)?;

    let bucket = std::env::var("OSS_CLIENT_BUCKET").unwrap_or_else(|_| "my-bucket".to_string());
    let object = "getting-started/hello.txt";

    let put = client
        .put_object(
            &bucket,
            object,
            BodySource::from("Hello from oss-client!"),
            Default::default(),
        )
        .await?;
    println!("uploaded to {}", put.url);

    let got = client.get_object(&bucket, object, Default::default()).await?;
    println!(
        "downloaded {} bytes with status {}",
        got.bytes().map(|b| b.len()).unwrap_or(0),
        got.status
    );

    let listing = client
        .list_objects(
            &bucket,
            ListObjectsQuery {
                prefix: Some("getting-started/".to_string()),
                ..Default::default()
            },
        )
        .await?;
    for entry in &listing.contents {
        println!("{} ({} bytes)", entry.key, entry.size);
    }

    client.delete_object(&bucket, object).await?;
    println!("cleaned up {object}");
    Ok(())
}
