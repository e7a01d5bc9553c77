use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::protocol::Reply;

/// Encoded reply payload waiting to be sent.
pub struct ReplyWriter {
    buffer: Vec<u8>,
}

impl ReplyWriter {
    pub fn new(reply: &Reply) -> Self {
        Self {
            buffer: reply.text().as_bytes().to_vec(),
        }
    }

    pub async fn write_to_stream(&self, stream: &mut TcpStream) -> anyhow::Result<()> {
        stream.write_all(&self.buffer).await?;
        stream.flush().await?;
        Ok(())
    }
}
