use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use pharmademand_intake::{IntakeConfig, IntakeSession};
use pharmademand_inventory::RecordListStore;
use pharmademand_submission::HttpSubmissionClient;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    pharmademand_observability::init();

    let config = IntakeConfig::from_env().context("invalid configuration")?;
    let client = HttpSubmissionClient::new(&config.api_url, config.timeout)
        .with_context(|| format!("cannot use backend URL {:?}", config.api_url))?;
    let store = RecordListStore::with_default_threshold(config.default_threshold)
        .context("invalid default threshold")?;

    tracing::info!(endpoint = %client.endpoint(), "intake shell started");

    let mut session = IntakeSession::new(store, client);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    stdout
        .write_all(b"Pharmacy demand intake. Type `help` for commands.\n> ")
        .await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let reply = session.handle_line(&line).await;
        if reply.quit {
            break;
        }
        if !reply.text.is_empty() {
            stdout.write_all(reply.text.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    tracing::info!(records = session.store().len(), "intake shell stopped");
    Ok(())
}
