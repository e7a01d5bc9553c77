//! Interactive console client for the gradebook server.
//!
//! Reads commands from stdin, sends each in a single write and prints the
//! server's reply.

use anyhow::Context;
use gradebook::config::Config;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

const BANNER: &str = "Type `help` to list commands, `close` to quit.
Commands look like: <name> --<key> <value> --<key> <value>
A value runs until the next --key or the end of the line, e.g.
  add --name Jane Doe --grade 100";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::load()?;

    let mut stream = TcpStream::connect(&cfg.listen_addr)
        .await
        .with_context(|| format!("Failed to connect to {}", cfg.listen_addr))?;

    println!("Connected to {}", cfg.listen_addr);
    println!("{}", BANNER);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut buffer = vec![0u8; cfg.buffer_size];

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        stream.write_all(message.as_bytes()).await?;

        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            println!("Server closed the connection");
            break;
        }
        println!("{}", String::from_utf8_lossy(&buffer[..n]));

        if message == "close" {
            break;
        }
    }

    Ok(())
}
